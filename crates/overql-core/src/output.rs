//! Output requests (`out` lines) attached to statements.

/// One option token of an `out` line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutOption {
    Ids,
    Skel,
    Body,
    Tags,
    Meta,
    NoIds,
    Geom,
    /// `bb` — bounds of each element.
    Bb,
    Center,
    Asc,
    Qt,
    Count,
    /// Clip the output geometry to a bounding box.
    BoundingBox(f64, f64, f64, f64),
}

impl OutOption {
    fn render(self) -> String {
        match self {
            Self::Ids => "ids".into(),
            Self::Skel => "skel".into(),
            Self::Body => "body".into(),
            Self::Tags => "tags".into(),
            Self::Meta => "meta".into(),
            Self::NoIds => "noids".into(),
            Self::Geom => "geom".into(),
            Self::Bb => "bb".into(),
            Self::Center => "center".into(),
            Self::Asc => "asc".into(),
            Self::Qt => "qt".into(),
            Self::Count => "count".into(),
            Self::BoundingBox(s, w, n, e) => format!("({s:?}, {w:?}, {n:?}, {e:?})"),
        }
    }
}

/// One recorded output request: a set of option tokens, rendered as a
/// single `out` line with the tokens sorted and deduplicated.
#[derive(Clone, Debug, Default)]
pub struct OutClause {
    options: Vec<OutOption>,
}

impl OutClause {
    pub fn new(options: impl IntoIterator<Item = OutOption>) -> Self {
        Self {
            options: options.into_iter().collect(),
        }
    }

    /// Render as one program line, addressed to `var` when given.
    pub fn render(&self, var: Option<&str>) -> String {
        let mut line = match var {
            Some(var) => format!(".{var} out"),
            None => "out".to_string(),
        };
        let mut tokens: Vec<String> = self.options.iter().map(|opt| opt.render()).collect();
        tokens.sort();
        tokens.dedup();
        if !tokens.is_empty() {
            line.push(' ');
            line.push_str(&tokens.join(" "));
        }
        line.push(';');
        line
    }
}
