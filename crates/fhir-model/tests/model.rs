//! Tests for fhir-model types.

use fhir_model::codes::ObservationStatus;
use fhir_model::datatypes::{CodeableConcept, Coding, Reference};
use fhir_model::resources::Observation;
use fhir_model::{
    Element, FieldKind, FieldValue, IssueSeverity, Resource, TypeCatalog, ValidationIssue,
    ValueKind, default_catalog, resolve_field,
};
use serde_json::json;

#[test]
fn observation_serializes_without_absent_members() {
    let mut observation = Observation {
        status: Some(ObservationStatus::Final),
        code: Some(CodeableConcept {
            coding: vec![
                Coding::default(),
                Coding {
                    system: Some("http://loinc.org".to_string()),
                    code: Some("8867-4".to_string()),
                    ..Coding::default()
                },
            ],
            text: None,
        }),
        subject: Some(Reference {
            reference: Some("Patient/p1".to_string()),
            ..Reference::default()
        }),
        value_boolean: Some(false),
        ..Observation::default()
    };
    observation.set_id("obs-1".to_string());

    let json = observation.to_json().expect("serialize observation");
    assert_eq!(
        json,
        json!({
            "resourceType": "Observation",
            "id": "obs-1",
            "status": "final",
            "code": {"coding": [{}, {"system": "http://loinc.org", "code": "8867-4"}]},
            "subject": {"reference": "Patient/p1"},
            "valueBoolean": false
        })
    );
}

#[test]
fn field_introspection_reports_kinds() {
    let shape = default_catalog().lookup("Observation").expect("observation shape");
    let status = resolve_field(shape.fields, "Status").expect("status field");
    assert_eq!(
        status.kind,
        FieldKind::Optional(ValueKind::Code("ObservationStatus"))
    );
    let coding = resolve_field(CodeableConcept::FIELDS, "coding").expect("coding field");
    assert_eq!(coding.kind, FieldKind::Array(ValueKind::Object("Coding")));
    assert_eq!(coding.kind.to_string(), "array of object Coding");
}

#[test]
fn field_values_read_through_element_view() {
    let observation = Observation {
        status: Some(ObservationStatus::Preliminary),
        performer: vec![Reference::default()],
        ..Observation::default()
    };
    let element: &dyn Element = &observation;
    assert_eq!(
        element.field("status").and_then(|value| value.as_text()),
        Some("preliminary")
    );
    let performer = element.field("performer").expect("performer field");
    assert!(matches!(performer, FieldValue::Array(ref items) if items.len() == 1));
    assert!(performer.is_empty());
    assert!(element.field("valueSomething").is_none());
}

#[test]
fn every_catalog_type_instantiates() {
    let catalog = default_catalog();
    let names: Vec<_> = catalog.type_names().collect();
    assert_eq!(names.len(), 14);
    for name in names {
        let shape = catalog.lookup(name).expect("registered shape");
        let resource = shape.new_instance();
        assert_eq!(resource.resource_type(), name);
        assert_eq!(resource.as_element().field_infos(), shape.fields);
        assert_eq!(
            resource.to_json().expect("serialize empty resource"),
            json!({"resourceType": name})
        );
    }
}

#[test]
fn validation_issue_constructors() {
    let issue = ValidationIssue::warning("subject.reference", "unusual format");
    assert_eq!(issue.severity, IssueSeverity::Warning);
    assert!(!issue.is_error());
    assert!(ValidationIssue::error("status", "required").is_error());
}
