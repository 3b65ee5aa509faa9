//! Tests for the CSV row source.

use std::io::Write;

use fhir_ingest::{CsvOptions, CsvRowSource, IngestError};

fn source(text: &str) -> CsvRowSource<&[u8]> {
    CsvRowSource::from_reader(text.as_bytes(), &CsvOptions::default()).expect("header")
}

#[test]
fn rows_are_numbered_from_one() {
    let rows: Vec<_> = source("id,status\na,final\nb,preliminary\n")
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].number(), 1);
    assert_eq!(rows[1].number(), 2);
    assert_eq!(rows[1].get("status"), Some("preliminary"));
}

#[test]
fn cells_are_trimmed_and_short_records_pad_with_empty() {
    let mut rows = source("id, status ,value\n  a ,  final\n");
    let row = rows.next().unwrap().unwrap();
    assert_eq!(row.get("id"), Some("a"));
    assert_eq!(row.get("status"), Some("final"));
    assert_eq!(row.get("value"), Some(""));
    assert!(rows.next().is_none());
}

#[test]
fn byte_order_mark_is_not_part_of_first_column() {
    let source = source("\u{feff}id,status\nx,final\n");
    assert!(source.columns().contains("id"));
}

#[test]
fn empty_input_is_an_error() {
    let err = CsvRowSource::from_reader(&b""[..], &CsvOptions::default()).err().unwrap();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn custom_delimiter() {
    let options = CsvOptions { delimiter: b';' };
    let mut rows = CsvRowSource::from_reader(&b"id;code\n1;8867-4\n"[..], &options).unwrap();
    assert_eq!(rows.next().unwrap().unwrap().get("code"), Some("8867-4"));
}

#[test]
fn invalid_utf8_stops_iteration() {
    let mut bytes = b"id,status\nok,final\n".to_vec();
    bytes.extend_from_slice(b"bad,\xff\xfe\nlater,final\n");
    let mut rows = CsvRowSource::from_reader(bytes.as_slice(), &CsvOptions::default()).unwrap();
    assert!(rows.next().unwrap().is_ok());
    assert!(matches!(rows.next(), Some(Err(IngestError::Csv { .. }))));
    assert!(rows.next().is_none());
    assert_eq!(rows.rows_read(), 1);
}

#[test]
fn open_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "patient_id,gender").unwrap();
    writeln!(file, "p1,female").unwrap();
    let rows: Vec<_> = CsvRowSource::open(file.path(), &CsvOptions::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("gender"), Some("female"));
}

#[test]
fn open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvRowSource::open(&dir.path().join("missing.csv"), &CsvOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
