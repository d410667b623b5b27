//! Statement rendering against a naming oracle.
//!
//! Rendering is the only collaboration statements need from the
//! compiler: given a way to look up which statements already carry a
//! variable name, every statement can produce its own text. Inline
//! operands (union/difference members without a variable) are rendered
//! recursively in place.

use crate::error::{InternalError, RenderError, ValidationError};
use crate::graph::{QueryGraph, StatementId, StatementKind};

/// Lookup of the variable names assigned so far.
pub trait NameOracle {
    /// The variable name assigned to `id`, if any.
    fn name(&self, id: StatementId) -> Option<&str>;

    /// The assigned name, or an internal-consistency error when the
    /// statement was expected to be materialized already.
    fn require_name(&self, id: StatementId) -> Result<&str, InternalError> {
        self.name(id).ok_or(InternalError::MissingName(id))
    }
}

/// An oracle with no names. Useful for rendering isolated statements.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNames;

impl NameOracle for NoNames {
    fn name(&self, _id: StatementId) -> Option<&str> {
        None
    }
}

impl QueryGraph {
    /// Render a statement's own text plus its `out` lines.
    pub fn render(
        &self,
        id: StatementId,
        names: &dyn NameOracle,
        out_var: Option<&str>,
    ) -> Result<String, RenderError> {
        let core = self.render_core(id, names, out_var)?;
        let statement = self.statement(id);
        if statement.out_clauses.is_empty() {
            return Ok(core);
        }
        let var = names.name(id);
        let mut lines = vec![core];
        for clause in &statement.out_clauses {
            lines.push(clause.render(var));
        }
        Ok(lines.join("\n"))
    }

    /// Render a statement's own text, excluding output directives.
    ///
    /// With `out_var` given, the text assigns its result to that
    /// variable instead of the default set.
    pub fn render_core(
        &self,
        id: StatementId,
        names: &dyn NameOracle,
        out_var: Option<&str>,
    ) -> Result<String, RenderError> {
        match &self.statement(id).kind {
            StatementKind::Query { element, filters } => {
                let mut text = element.specifier().to_string();
                for filter in filters {
                    text.push_str(&filter.render(names)?);
                }
                match out_var {
                    Some(var) => text.push_str(&format!("->.{var};")),
                    None => text.push(';'),
                }
                Ok(text)
            }
            StatementKind::Union(operands) => {
                let mut parts = Vec::with_capacity(operands.len());
                for operand in operands {
                    parts.push(self.operand_text(*operand, names)?);
                }
                let joined = parts.join(" ");
                Ok(match out_var {
                    Some(var) => format!("({joined})->.{var};"),
                    None => format!("({joined});"),
                })
            }
            StatementKind::Difference {
                minuend,
                subtrahend,
            } => {
                let a = self.operand_text(*minuend, names)?;
                let b = self.operand_text(*subtrahend, names)?;
                Ok(match out_var {
                    Some(var) => format!("({a} - {b})->.{var};"),
                    None => format!("({a} - {b});"),
                })
            }
            StatementKind::Raw { template, bindings } => {
                // Every bound statement must already have a variable;
                // raw text can only reference results by name.
                for bound in bindings.values() {
                    names.require_name(*bound)?;
                }
                substitute_raw(template, bindings, names, out_var)
            }
            StatementKind::Recurse { mode, input } => {
                let mut text = String::new();
                if let Some(input) = input
                    && let Some(name) = names.name(*input)
                {
                    text.push_str(&format!(".{name} "));
                }
                text.push_str(mode.operator());
                push_trailing_assignment(&mut text, out_var);
                Ok(text)
            }
            StatementKind::OverlappingAreas { input, point } => {
                if input.is_some() && point.is_some() {
                    return Err(ValidationError::OverlappingAreasConflictingInputs.into());
                }
                if input.is_none() && point.is_none() {
                    return Err(ValidationError::OverlappingAreasMissingInput.into());
                }
                let mut text = String::new();
                if let Some(input) = input
                    && let Some(name) = names.name(*input)
                {
                    text.push_str(&format!(".{name} "));
                }
                text.push_str("is_in");
                if let Some((lat, lon)) = point {
                    text.push_str(&format!("({lat:?},{lon:?})"));
                }
                push_trailing_assignment(&mut text, out_var);
                Ok(text)
            }
        }
    }

    /// Operand text for combinators: a variable reference when one is
    /// assigned, the full inline rendering otherwise.
    fn operand_text(
        &self,
        id: StatementId,
        names: &dyn NameOracle,
    ) -> Result<String, RenderError> {
        match names.name(id) {
            Some(name) => Ok(format!(".{name};")),
            None => self.render(id, names, None),
        }
    }
}

/// `> ->.var;` style ending shared by recurse and is_in statements.
fn push_trailing_assignment(text: &mut String, out_var: Option<&str>) {
    match out_var {
        Some(var) => text.push_str(&format!(" ->.{var};")),
        None => text.push(';'),
    }
}

/// Substitute `{name}` and the reserved `{:out}` placeholder.
///
/// `{{` and `}}` escape literal braces.
fn substitute_raw(
    template: &str,
    bindings: &indexmap::IndexMap<String, StatementId>,
    names: &dyn NameOracle,
    out_var: Option<&str>,
) -> Result<String, RenderError> {
    let mut rendered = String::with_capacity(template.len());
    let mut saw_out_placeholder = false;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(ValidationError::UnboundPlaceholder(name).into());
                        }
                    }
                }
                if name == ":out" {
                    saw_out_placeholder = true;
                    rendered.push_str(out_var.unwrap_or("_"));
                } else if name.is_empty() {
                    return Err(ValidationError::UnnamedPlaceholder.into());
                } else if let Some(bound) = bindings.get(&name) {
                    rendered.push_str(names.require_name(*bound)?);
                } else {
                    return Err(ValidationError::UnboundPlaceholder(name).into());
                }
            }
            c => rendered.push(c),
        }
    }

    if let Some(var) = out_var
        && !saw_out_placeholder
    {
        return Err(InternalError::NoOutPlaceholder(var.to_string()).into());
    }
    Ok(rendered)
}
