use chrono::{TimeZone, Utc};

use crate::error::ValidationError;
use crate::settings::{CsvOptions, OutputFormat, Settings};

#[test]
fn basics() {
    let settings = Settings {
        format: OutputFormat::Json,
        timeout: Some(10),
        maxsize: Some(10000),
        bbox: Some((10.0, 20.0, 30.0, 40.0)),
        ..Settings::default()
    };
    assert_eq!(
        settings.render().unwrap(),
        "[out:json][timeout:10][maxsize:10000][bbox:10.0,20.0,30.0,40.0];"
    );
}

#[test]
fn defaults() {
    assert_eq!(Settings::default().render().unwrap(), "[out:json][timeout:25];");
}

#[test]
fn zero_timeout_is_invalid() {
    let settings = Settings {
        timeout: Some(0),
        ..Settings::default()
    };
    assert_eq!(
        settings.render(),
        Err(ValidationError::NonPositiveTimeout)
    );
}

#[test]
fn csv_with_header() {
    let settings = Settings {
        format: OutputFormat::Csv(CsvOptions::new(["::id", "name"])),
        ..Settings::default()
    };
    assert_eq!(
        settings.render().unwrap(),
        "[out:csv(\"::id\",\"name\"; true)][timeout:25];"
    );
}

#[test]
fn csv_without_header() {
    let mut csv = CsvOptions::new(["::id", "name"]);
    csv.header_line = false;
    let settings = Settings {
        format: OutputFormat::Csv(csv),
        ..Settings::default()
    };
    assert_eq!(
        settings.render().unwrap(),
        "[out:csv(\"::id\",\"name\"; false)][timeout:25];"
    );
}

#[test]
fn csv_with_separator() {
    let mut csv = CsvOptions::new(["::id", "name"]);
    csv.separator = Some('|');
    let settings = Settings {
        format: OutputFormat::Csv(csv),
        ..Settings::default()
    };
    assert_eq!(
        settings.render().unwrap(),
        "[out:csv(\"::id\",\"name\"; true; \"|\")][timeout:25];"
    );
}

#[test]
fn csv_requires_fields() {
    let settings = Settings {
        format: OutputFormat::Csv(CsvOptions::new(Vec::<String>::new())),
        ..Settings::default()
    };
    assert_eq!(settings.render(), Err(ValidationError::CsvWithoutFields));
}

#[test]
fn csv_fields_are_stripped_of_quotes() {
    let settings = Settings {
        format: OutputFormat::Csv(CsvOptions::new([" '::id' ", "\"name\""])),
        ..Settings::default()
    };
    assert_eq!(
        settings.render().unwrap(),
        "[out:csv(\"::id\",\"name\"; true)][timeout:25];"
    );
}

#[test]
fn date_setting() {
    let settings = Settings {
        date: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
        ..Settings::default()
    };
    assert_eq!(
        settings.render().unwrap(),
        "[out:json][timeout:25][date:\"2023-01-01T00:00:00Z\"];"
    );
}

#[test]
fn diff_setting() {
    let lower = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let upper = Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap();

    let open = Settings {
        diff: Some((lower, None)),
        ..Settings::default()
    };
    assert_eq!(
        open.render().unwrap(),
        "[out:json][timeout:25][diff:\"2023-01-01T00:00:00Z\"];"
    );

    let closed = Settings {
        diff: Some((lower, Some(upper))),
        ..Settings::default()
    };
    assert_eq!(
        closed.render().unwrap(),
        "[out:json][timeout:25][diff:\"2023-01-01T00:00:00Z\",\"2023-04-01T00:00:00Z\"];"
    );
}
