//! Global query settings rendered as the header line of a program.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::DATE_FORMAT;

/// Output format of the whole query.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
    Csv(CsvOptions),
}

/// Field selection for `out:csv`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CsvOptions {
    pub fields: Vec<String>,
    /// Whether the first output line names the fields.
    pub header_line: bool,
    pub separator: Option<char>,
}

impl CsvOptions {
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            header_line: true,
            separator: None,
        }
    }
}

/// Global settings of an Overpass query, rendered as a bracketed
/// header: `[out:json][timeout:25];`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    pub format: OutputFormat,
    /// Server-side timeout in seconds.
    pub timeout: Option<u32>,
    /// Memory limit in bytes.
    pub maxsize: Option<u64>,
    /// Global bounding box applied to every statement.
    pub bbox: Option<(f64, f64, f64, f64)>,
    /// Query the database as of this date.
    pub date: Option<DateTime<Utc>>,
    /// Difference query between two dates (the second defaults to the
    /// front date of the database).
    pub diff: Option<(DateTime<Utc>, Option<DateTime<Utc>>)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            timeout: Some(25),
            maxsize: None,
            bbox: None,
            date: None,
            diff: None,
        }
    }
}

impl Settings {
    /// Render the settings header line.
    pub fn render(&self) -> Result<String, ValidationError> {
        let mut parts: Vec<String> = Vec::new();

        match &self.format {
            OutputFormat::Json => parts.push("out:json".into()),
            OutputFormat::Xml => parts.push("out:xml".into()),
            OutputFormat::Csv(csv) => parts.push(render_csv(csv)?),
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(ValidationError::NonPositiveTimeout);
            }
            parts.push(format!("timeout:{timeout}"));
        }

        if let Some(maxsize) = self.maxsize {
            parts.push(format!("maxsize:{maxsize}"));
        }

        if let Some((s, w, n, e)) = self.bbox {
            parts.push(format!("bbox:{s:?},{w:?},{n:?},{e:?}"));
        }

        if let Some(date) = self.date {
            parts.push(format!("date:\"{}\"", date.format(DATE_FORMAT)));
        }

        if let Some((lower, upper)) = self.diff {
            match upper {
                Some(upper) => parts.push(format!(
                    "diff:\"{}\",\"{}\"",
                    lower.format(DATE_FORMAT),
                    upper.format(DATE_FORMAT)
                )),
                None => parts.push(format!("diff:\"{}\"", lower.format(DATE_FORMAT))),
            }
        }

        let mut header = String::new();
        for part in parts {
            header.push_str(&format!("[{part}]"));
        }
        header.push(';');
        Ok(header)
    }
}

fn render_csv(csv: &CsvOptions) -> Result<String, ValidationError> {
    if csv.fields.is_empty() {
        return Err(ValidationError::CsvWithoutFields);
    }
    let fields = csv
        .fields
        .iter()
        .map(|f| format!("\"{}\"", f.trim_matches([' ', '"', '\''])))
        .collect::<Vec<_>>()
        .join(",");
    let mut header = format!("{fields}; {}", csv.header_line);
    if let Some(separator) = csv.separator {
        header.push_str(&format!("; \"{separator}\""));
    }
    Ok(format!("out:csv({header})"))
}
