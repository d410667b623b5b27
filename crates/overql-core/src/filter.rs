//! Filters applicable to leaf element queries.
//!
//! Value filters (tags, ids, bounding boxes, dates, users, polygons)
//! have no dependencies. Relational filters (intersection, area, pivot,
//! around-by-set) reference other statements, which the compiler must
//! have materialized into variables before the owning query renders.

use chrono::{DateTime, Utc};

use crate::error::{RenderError, ValidationError};
use crate::graph::StatementId;
use crate::render::NameOracle;
use crate::DATE_FORMAT;

/// The comparison a tag filter performs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagComparison {
    /// `["key"]`
    Exists(String),
    /// `[!"key"]`
    NotExists(String),
    /// `["key"="value"]`
    Equals { key: String, value: String },
    /// `["key"!="value"]`
    NotEquals { key: String, value: String },
    /// `["key"~"pattern"]`
    ValueMatches { key: String, pattern: String },
    /// `["key"!~"pattern"]`
    ValueNotMatches { key: String, pattern: String },
    /// `[~"key-pattern"~"value-pattern"]`
    KeyValueMatch {
        key_pattern: String,
        value_pattern: String,
    },
}

/// A user reference in a [`Filter::User`] filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserRef {
    Id(u64),
    Name(String),
}

/// A filter on a leaf element query.
#[derive(Clone, Debug)]
pub enum Filter {
    /// Bracket tag filter, optionally case-insensitive (`,i` suffix).
    Tag {
        comparison: TagComparison,
        case_sensitive: bool,
    },
    /// OSM id filter: `(42)` or `(id:1,2,3)`. An empty list renders nothing.
    Ids(Vec<u64>),
    /// `(south,west,north,east)`
    BoundingBox {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },
    /// Intersection with other statements' results: `.a.b`.
    Intersection(Vec<StatementId>),
    /// Elements changed since the given date.
    Newer(DateTime<Utc>),
    /// Elements changed within the given date range. An open upper
    /// bound means the front date of the database.
    Changed {
        lower: DateTime<Utc>,
        upper: Option<DateTime<Utc>>,
    },
    /// Elements last edited by any of the given users.
    User(Vec<UserRef>),
    /// Elements within the given areas: `(area.a)`.
    Area(StatementId),
    /// Elements on the outline of the given areas: `(pivot.a)`.
    Pivot(StatementId),
    /// Elements within `radius` meters of another set's elements, or of
    /// explicit coordinates. Set and coordinates are mutually exclusive.
    Around {
        radius: f64,
        input: Option<StatementId>,
        points: Vec<(f64, f64)>,
    },
    /// Elements inside the polygon described by the given vertices.
    Polygon(Vec<(f64, f64)>),
}

impl Filter {
    /// Tag equality, case sensitive.
    pub fn tag(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Tag {
            comparison: TagComparison::Equals {
                key: key.into(),
                value: value.into(),
            },
            case_sensitive: true,
        }
    }

    /// `["key"]`
    pub fn has_key(key: impl Into<String>) -> Self {
        Self::Tag {
            comparison: TagComparison::Exists(key.into()),
            case_sensitive: true,
        }
    }

    /// `[!"key"]`
    pub fn lacks_key(key: impl Into<String>) -> Self {
        Self::Tag {
            comparison: TagComparison::NotExists(key.into()),
            case_sensitive: true,
        }
    }

    /// Statements this filter depends on, in declared order.
    pub fn dependencies(&self) -> Vec<StatementId> {
        match self {
            Self::Intersection(statements) => statements.clone(),
            Self::Area(input) | Self::Pivot(input) => vec![*input],
            Self::Around { input, .. } => input.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Render this filter's text. Relational filters require their
    /// dependencies to already carry variable names.
    pub fn render(&self, names: &dyn NameOracle) -> Result<String, RenderError> {
        match self {
            Self::Tag {
                comparison,
                case_sensitive,
            } => render_tag(comparison, *case_sensitive),
            Self::Ids(ids) => Ok(match ids.len() {
                0 => String::new(),
                1 => format!("({})", ids[0]),
                _ => format!(
                    "(id:{})",
                    ids.iter()
                        .map(u64::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                ),
            }),
            Self::BoundingBox {
                south,
                west,
                north,
                east,
            } => Ok(format!("({south:?},{west:?},{north:?},{east:?})")),
            Self::Intersection(statements) => {
                if statements.is_empty() {
                    return Err(ValidationError::EmptyIntersection.into());
                }
                let mut rendered = String::new();
                for id in statements {
                    rendered.push('.');
                    rendered.push_str(names.require_name(*id)?);
                }
                Ok(rendered)
            }
            Self::Newer(date) => Ok(format!("(newer:\"{}\")", date.format(DATE_FORMAT))),
            Self::Changed { lower, upper } => Ok(match upper {
                None => format!("(changed:\"{}\")", lower.format(DATE_FORMAT)),
                Some(upper) => format!(
                    "(changed:\"{}\",\"{}\")",
                    lower.format(DATE_FORMAT),
                    upper.format(DATE_FORMAT)
                ),
            }),
            Self::User(users) => render_users(users),
            Self::Area(input) => Ok(format!("(area.{})", names.require_name(*input)?)),
            Self::Pivot(input) => Ok(format!("(pivot.{})", names.require_name(*input)?)),
            Self::Around {
                radius,
                input,
                points,
            } => render_around(*radius, *input, points, names),
            Self::Polygon(points) => {
                let vertices = points
                    .iter()
                    .flat_map(|(lat, lon)| [format!("{lat:?}"), format!("{lon:?}")])
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(format!("(poly:\"{vertices}\")"))
            }
        }
    }
}

fn render_tag(comparison: &TagComparison, case_sensitive: bool) -> Result<String, RenderError> {
    let body = match comparison {
        TagComparison::Exists(key) => format!("\"{key}\""),
        TagComparison::NotExists(key) => format!("!\"{key}\""),
        TagComparison::Equals { key, value } => format!("\"{key}\"=\"{value}\""),
        TagComparison::NotEquals { key, value } => format!("\"{key}\"!=\"{value}\""),
        TagComparison::ValueMatches { key, pattern } => {
            check_regex(pattern)?;
            format!("\"{key}\"~\"{pattern}\"")
        }
        TagComparison::ValueNotMatches { key, pattern } => {
            check_regex(pattern)?;
            format!("\"{key}\"!~\"{pattern}\"")
        }
        TagComparison::KeyValueMatch {
            key_pattern,
            value_pattern,
        } => {
            check_regex(key_pattern)?;
            check_regex(value_pattern)?;
            format!("~\"{key_pattern}\"~\"{value_pattern}\"")
        }
    };
    let ending = if case_sensitive { "]" } else { ",i]" };
    Ok(format!("[{body}{ending}"))
}

fn check_regex(pattern: &str) -> Result<(), ValidationError> {
    regex_syntax::Parser::new()
        .parse(pattern)
        .map(|_| ())
        .map_err(|err| ValidationError::InvalidRegex {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

fn render_users(users: &[UserRef]) -> Result<String, RenderError> {
    if users.is_empty() {
        return Err(ValidationError::NoUsers.into());
    }
    let ids: Vec<String> = users
        .iter()
        .filter_map(|u| match u {
            UserRef::Id(id) => Some(id.to_string()),
            UserRef::Name(_) => None,
        })
        .collect();
    let user_names: Vec<String> = users
        .iter()
        .filter_map(|u| match u {
            UserRef::Name(name) => Some(format!("\"{name}\"")),
            UserRef::Id(_) => None,
        })
        .collect();

    let mut rendered = String::new();
    if !ids.is_empty() {
        rendered.push_str(&format!("(uid:{})", ids.join(",")));
    }
    if !user_names.is_empty() {
        rendered.push_str(&format!("(user:{})", user_names.join(",")));
    }
    Ok(rendered)
}

fn render_around(
    radius: f64,
    input: Option<StatementId>,
    points: &[(f64, f64)],
    names: &dyn NameOracle,
) -> Result<String, RenderError> {
    if input.is_some() && !points.is_empty() {
        return Err(ValidationError::AroundConflictingInputs.into());
    }
    if let Some(input) = input {
        return Ok(format!(
            "(around.{}:{radius:?})",
            names.require_name(input)?
        ));
    }
    if points.is_empty() {
        return Err(ValidationError::AroundMissingInput.into());
    }
    let coords = points
        .iter()
        .flat_map(|(lat, lon)| [format!("{lat:?}"), format!("{lon:?}")])
        .collect::<Vec<_>>()
        .join(",");
    Ok(format!("(around:{radius:?},{coords})"))
}
