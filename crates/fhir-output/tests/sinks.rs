use fhir_model::BuiltRecord;
use fhir_model::resources::{Observation, Patient};
use fhir_output::{
    BundleWriter, NdjsonWriter, OutputError, OutputFormat, OutputSink, create_sink,
};
use serde_json::{Value, json};

fn patient(row: u64, id: &str) -> BuiltRecord {
    let patient = Patient {
        id: Some(id.to_string()),
        ..Default::default()
    };
    BuiltRecord::new(row, Box::new(patient))
}

#[test]
fn ndjson_writes_one_compact_line_per_record() {
    let mut sink = NdjsonWriter::new(Vec::new());
    sink.accept(patient(1, "a")).unwrap();
    sink.accept(patient(2, "b")).unwrap();
    sink.finalize().unwrap();
    assert_eq!(sink.accepted(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"id":"a","resourceType":"Patient"}"#,
            r#"{"id":"b","resourceType":"Patient"}"#,
        ]
    );
}

#[test]
fn bundle_wraps_entries_in_order() {
    let mut sink = BundleWriter::new(Vec::new());
    sink.accept(patient(1, "a")).unwrap();
    sink.accept(BuiltRecord::new(2, Box::new(Observation::default())))
        .unwrap();
    sink.finalize().unwrap();

    let bytes = sink.into_inner();
    assert_eq!(bytes.last(), Some(&b'\n'));
    let bundle: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        bundle,
        json!({
            "resourceType": "Bundle",
            "type": "collection",
            "total": 2,
            "entry": [
                {"resource": {"resourceType": "Patient", "id": "a"}},
                {"resource": {"resourceType": "Observation"}},
            ],
        })
    );
}

#[test]
fn empty_bundle_has_zero_total_and_no_entries() {
    let mut sink = BundleWriter::new(Vec::new());
    sink.finalize().unwrap();
    let bundle: Value = serde_json::from_slice(&sink.into_inner()).unwrap();
    assert_eq!(
        bundle,
        json!({"resourceType": "Bundle", "type": "collection", "total": 0})
    );
}

#[test]
fn bundle_refuses_records_past_the_limit() {
    let mut sink = BundleWriter::with_limit(Vec::new(), 2);
    sink.accept(patient(1, "a")).unwrap();
    sink.accept(patient(2, "b")).unwrap();
    let err = sink.accept(patient(3, "c")).unwrap_err();
    assert!(matches!(err, OutputError::Capacity { limit: 2 }));
    assert!(err.to_string().contains("--format ndjson"));
    assert_eq!(sink.accepted(), 2);
}

#[test]
fn zero_limit_uses_default() {
    let sink = BundleWriter::with_limit(Vec::new(), 0);
    assert_eq!(sink.limit(), fhir_output::DEFAULT_MAX_RESOURCES);
}

#[test]
fn finalize_is_idempotent() {
    let mut sink = BundleWriter::new(Vec::new());
    sink.accept(patient(1, "a")).unwrap();
    sink.finalize().unwrap();
    sink.finalize().unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text.matches("\"Bundle\"").count(), 1);
}

#[test]
fn create_sink_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.ndjson");
    {
        let mut sink = create_sink(Some(&path), OutputFormat::Ndjson, 0).unwrap();
        sink.accept(patient(1, "a")).unwrap();
        sink.finalize().unwrap();
    }
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "{\"id\":\"a\",\"resourceType\":\"Patient\"}\n");
}

#[test]
fn create_sink_reports_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");
    let err = create_sink(Some(&path), OutputFormat::Bundle, 0).err().unwrap();
    assert!(matches!(err, OutputError::Create { .. }));
}
