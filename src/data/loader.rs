use std::io::Read;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use super::error::LoadError;
use super::model::{Dataset, Dimension, DimensionRef, Record};
use crate::config::DataSource;

/// Columns every input file must carry. `residencia_iso3` is optional.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "ano",
    "senioridade",
    "contrato",
    "tamanho_empresa",
    "cargo",
    "usd",
    "remoto",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the salary dataset from its configured source. A single attempt;
/// failures are returned to the caller.
pub fn load(source: &DataSource, timeout: Duration) -> Result<Dataset, LoadError> {
    match source {
        DataSource::Url(url) => load_url(url, timeout),
        DataSource::File(path) => load_file(path),
    }
}

/// Load a local CSV file.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

fn load_url(url: &str, timeout: Duration) -> Result<Dataset, LoadError> {
    let http_err = |source: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = Client::builder().timeout(timeout).build().map_err(http_err)?;
    let response = client.get(url).send().map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(http_err)?;
    parse_csv(body.as_ref())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV with a header row into a [`Dataset`]. Extra columns are ignored.
/// Row numbers in errors are 1-based data rows (the header is row 0).
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<Record>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| LoadError::Csv { row, source })?;
        validate(&record, row)?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn validate(record: &Record, row: usize) -> Result<(), LoadError> {
    if !record.usd.is_finite() || record.usd < 0.0 {
        return Err(LoadError::InvalidValue {
            row,
            column: "usd",
            message: format!("expected a non-negative salary, got {}", record.usd),
        });
    }
    if record.role.trim().is_empty() {
        return Err(LoadError::InvalidValue {
            row,
            column: "cargo",
            message: "role is empty".to_string(),
        });
    }
    for dim in Dimension::ALL {
        if let DimensionRef::Label(label) = record.dimension(dim) {
            if label.trim().is_empty() {
                return Err(LoadError::InvalidValue {
                    row,
                    column: dim.column(),
                    message: "value is empty".to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use super::*;
    use crate::data::model::DimensionValue;

    const HEADER: &str =
        "ano,senioridade,contrato,tamanho_empresa,cargo,usd,remoto,residencia_iso3,salario";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for r in rows {
            text.push('\n');
            text.push_str(r);
        }
        text
    }

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let text = csv(&[
            "2023,senior,integral,media,Data Scientist,100000,remoto,USA,500000",
            "2022,junior,parcial,grande,Analyst,60000.5,presencial,,1",
        ]);
        let ds = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].country.as_deref(), Some("USA"));
        assert_eq!(ds.records[1].country, None);
        assert_eq!(ds.records[1].usd, 60000.5);
        assert!(ds.has_option(Dimension::Year, &DimensionValue::Year(2022)));
    }

    #[test]
    fn country_column_is_optional() {
        let text = "ano,senioridade,contrato,tamanho_empresa,cargo,usd,remoto\n\
                    2023,senior,integral,media,Analyst,1,remoto";
        let ds = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.records[0].country, None);
    }

    #[test]
    fn header_only_is_empty_dataset() {
        let ds = parse_csv(csv(&[]).as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn reports_all_missing_columns() {
        let err = parse_csv("ano,cargo\n2023,x".as_bytes()).unwrap_err();
        match err {
            LoadError::MissingColumns(cols) => {
                assert_eq!(
                    cols,
                    vec!["senioridade", "contrato", "tamanho_empresa", "usd", "remoto"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_salary_names_row() {
        let text = csv(&[
            "2023,senior,integral,media,Analyst,1,remoto,USA,1",
            "2023,senior,integral,media,Analyst,lots,remoto,USA,1",
        ]);
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { row: 2, .. }), "{err}");
    }

    #[test]
    fn fractional_year_names_row() {
        let text = csv(&[
            "2023,senior,integral,media,Analyst,1,remoto,USA,1",
            "2023.5,senior,integral,media,Analyst,1,remoto,USA,1",
        ]);
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { row: 2, .. }), "{err}");
    }

    #[test]
    fn http_error_status_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/salaries.csv", listener.local_addr().unwrap());
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            stream
                .write_all(
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .unwrap();
        });

        let err = load(&DataSource::Url(url), Duration::from_secs(5)).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, LoadError::Status { status: 404, .. }), "{err}");
    }

    #[test]
    fn negative_salary_is_rejected() {
        let text = csv(&["2023,senior,integral,media,Analyst,-5,remoto,USA,1"]);
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidValue { row: 1, column: "usd", .. }),
            "{err}"
        );
    }

    #[test]
    fn empty_dimension_label_is_rejected() {
        let text = csv(&["2023,,integral,media,Analyst,5,remoto,USA,1"]);
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidValue { row: 1, column: "senioridade", .. }),
            "{err}"
        );
    }

    #[test]
    fn empty_role_is_rejected() {
        let text = csv(&[
            "2023,senior,integral,media,Analyst,5,remoto,USA,1",
            "2023,senior,integral,media,  ,5,remoto,USA,1",
        ]);
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidValue { row: 2, column: "cargo", .. }),
            "{err}"
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            csv(&["2024,senior,integral,media,Analyst,5,remoto,BRA,1"])
        )
        .unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let ds = load(&source, Duration::from_secs(1)).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].year, 2024);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
