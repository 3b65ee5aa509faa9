//! Built-in FHIR R4 resources.

use crate::codes::{
    AdministrativeGender, AllergyIntoleranceCriticality, AllergyIntoleranceType,
    DiagnosticReportStatus, EncounterStatus, EventStatus, ImmunizationStatus, LocationMode,
    LocationStatus, MedicationRequestIntent, MedicationRequestStatus, ObservationStatus,
    RequestIntent, RequestPriority, RequestStatus, SpecimenStatus,
};
use crate::datatypes::{
    Address, AllergyIntoleranceReaction, Annotation, CodeableConcept, Coding, ContactPoint,
    Dosage, EncounterParticipant, HumanName, Identifier, ImmunizationPerformer,
    ObservationComponent, ObservationReferenceRange, Period, ProcedurePerformer, Quantity, Range,
    Reference, SpecimenCollection,
};

fhir_resource! {
    Observation {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        status: Option<ObservationStatus> => "status",
        category: Vec<CodeableConcept> => "category",
        code: Option<CodeableConcept> => "code",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        effective_date_time: Option<String> => "effectiveDateTime",
        effective_period: Option<Period> => "effectivePeriod",
        issued: Option<String> => "issued",
        performer: Vec<Reference> => "performer",
        value_quantity: Option<Quantity> => "valueQuantity",
        value_codeable_concept: Option<CodeableConcept> => "valueCodeableConcept",
        value_string: Option<String> => "valueString",
        value_boolean: Option<bool> => "valueBoolean",
        value_integer: Option<i64> => "valueInteger",
        value_date_time: Option<String> => "valueDateTime",
        data_absent_reason: Option<CodeableConcept> => "dataAbsentReason",
        interpretation: Vec<CodeableConcept> => "interpretation",
        note: Vec<Annotation> => "note",
        body_site: Option<CodeableConcept> => "bodySite",
        method: Option<CodeableConcept> => "method",
        specimen: Option<Reference> => "specimen",
        reference_range: Vec<ObservationReferenceRange> => "referenceRange",
        has_member: Vec<Reference> => "hasMember",
        component: Vec<ObservationComponent> => "component",
    }
}

fhir_resource! {
    Patient {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        active: Option<bool> => "active",
        name: Vec<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        gender: Option<AdministrativeGender> => "gender",
        birth_date: Option<String> => "birthDate",
        deceased_boolean: Option<bool> => "deceasedBoolean",
        deceased_date_time: Option<String> => "deceasedDateTime",
        address: Vec<Address> => "address",
        marital_status: Option<CodeableConcept> => "maritalStatus",
        multiple_birth_integer: Option<i64> => "multipleBirthInteger",
        general_practitioner: Vec<Reference> => "generalPractitioner",
        managing_organization: Option<Reference> => "managingOrganization",
    }
}

fhir_resource! {
    Condition {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        clinical_status: Option<CodeableConcept> => "clinicalStatus",
        verification_status: Option<CodeableConcept> => "verificationStatus",
        category: Vec<CodeableConcept> => "category",
        severity: Option<CodeableConcept> => "severity",
        code: Option<CodeableConcept> => "code",
        body_site: Vec<CodeableConcept> => "bodySite",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        onset_date_time: Option<String> => "onsetDateTime",
        onset_range: Option<Range> => "onsetRange",
        abatement_date_time: Option<String> => "abatementDateTime",
        recorded_date: Option<String> => "recordedDate",
        recorder: Option<Reference> => "recorder",
        asserter: Option<Reference> => "asserter",
        note: Vec<Annotation> => "note",
    }
}

fhir_resource! {
    Encounter {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        status: Option<EncounterStatus> => "status",
        class: Option<Coding> => "class",
        type_: Vec<CodeableConcept> => "type",
        priority: Option<CodeableConcept> => "priority",
        subject: Option<Reference> => "subject",
        participant: Vec<EncounterParticipant> => "participant",
        period: Option<Period> => "period",
        reason_code: Vec<CodeableConcept> => "reasonCode",
        service_provider: Option<Reference> => "serviceProvider",
    }
}

fhir_resource! {
    Procedure {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        status: Option<EventStatus> => "status",
        category: Option<CodeableConcept> => "category",
        code: Option<CodeableConcept> => "code",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        performed_date_time: Option<String> => "performedDateTime",
        performed_period: Option<Period> => "performedPeriod",
        recorder: Option<Reference> => "recorder",
        performer: Vec<ProcedurePerformer> => "performer",
        location: Option<Reference> => "location",
        reason_code: Vec<CodeableConcept> => "reasonCode",
        body_site: Vec<CodeableConcept> => "bodySite",
        outcome: Option<CodeableConcept> => "outcome",
        note: Vec<Annotation> => "note",
    }
}

fhir_resource! {
    MedicationRequest {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        status: Option<MedicationRequestStatus> => "status",
        intent: Option<MedicationRequestIntent> => "intent",
        category: Vec<CodeableConcept> => "category",
        medication_codeable_concept: Option<CodeableConcept> => "medicationCodeableConcept",
        medication_reference: Option<Reference> => "medicationReference",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        authored_on: Option<String> => "authoredOn",
        requester: Option<Reference> => "requester",
        reason_code: Vec<CodeableConcept> => "reasonCode",
        note: Vec<Annotation> => "note",
        dosage_instruction: Vec<Dosage> => "dosageInstruction",
    }
}

fhir_resource! {
    DiagnosticReport {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        based_on: Vec<Reference> => "basedOn",
        status: Option<DiagnosticReportStatus> => "status",
        category: Vec<CodeableConcept> => "category",
        code: Option<CodeableConcept> => "code",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        effective_date_time: Option<String> => "effectiveDateTime",
        effective_period: Option<Period> => "effectivePeriod",
        issued: Option<String> => "issued",
        performer: Vec<Reference> => "performer",
        specimen: Vec<Reference> => "specimen",
        result: Vec<Reference> => "result",
        conclusion: Option<String> => "conclusion",
        conclusion_code: Vec<CodeableConcept> => "conclusionCode",
    }
}

fhir_resource! {
    Specimen {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        accession_identifier: Option<Identifier> => "accessionIdentifier",
        status: Option<SpecimenStatus> => "status",
        type_: Option<CodeableConcept> => "type",
        subject: Option<Reference> => "subject",
        received_time: Option<String> => "receivedTime",
        parent: Vec<Reference> => "parent",
        request: Vec<Reference> => "request",
        collection: Option<SpecimenCollection> => "collection",
        note: Vec<Annotation> => "note",
    }
}

fhir_resource! {
    Practitioner {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        active: Option<bool> => "active",
        name: Vec<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Vec<Address> => "address",
        gender: Option<AdministrativeGender> => "gender",
        birth_date: Option<String> => "birthDate",
    }
}

fhir_resource! {
    Organization {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        active: Option<bool> => "active",
        type_: Vec<CodeableConcept> => "type",
        name: Option<String> => "name",
        alias: Vec<String> => "alias",
        telecom: Vec<ContactPoint> => "telecom",
        address: Vec<Address> => "address",
        part_of: Option<Reference> => "partOf",
    }
}

fhir_resource! {
    Location {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        status: Option<LocationStatus> => "status",
        name: Option<String> => "name",
        alias: Vec<String> => "alias",
        description: Option<String> => "description",
        mode: Option<LocationMode> => "mode",
        type_: Vec<CodeableConcept> => "type",
        telecom: Vec<ContactPoint> => "telecom",
        address: Option<Address> => "address",
        physical_type: Option<CodeableConcept> => "physicalType",
        managing_organization: Option<Reference> => "managingOrganization",
        part_of: Option<Reference> => "partOf",
    }
}

fhir_resource! {
    Immunization {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        status: Option<ImmunizationStatus> => "status",
        status_reason: Option<CodeableConcept> => "statusReason",
        vaccine_code: Option<CodeableConcept> => "vaccineCode",
        patient: Option<Reference> => "patient",
        encounter: Option<Reference> => "encounter",
        occurrence_date_time: Option<String> => "occurrenceDateTime",
        occurrence_string: Option<String> => "occurrenceString",
        recorded: Option<String> => "recorded",
        primary_source: Option<bool> => "primarySource",
        location: Option<Reference> => "location",
        manufacturer: Option<Reference> => "manufacturer",
        lot_number: Option<String> => "lotNumber",
        expiration_date: Option<String> => "expirationDate",
        site: Option<CodeableConcept> => "site",
        route: Option<CodeableConcept> => "route",
        dose_quantity: Option<Quantity> => "doseQuantity",
        performer: Vec<ImmunizationPerformer> => "performer",
        note: Vec<Annotation> => "note",
        reason_code: Vec<CodeableConcept> => "reasonCode",
    }
}

fhir_resource! {
    AllergyIntolerance {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        clinical_status: Option<CodeableConcept> => "clinicalStatus",
        verification_status: Option<CodeableConcept> => "verificationStatus",
        type_: Option<AllergyIntoleranceType> => "type",
        criticality: Option<AllergyIntoleranceCriticality> => "criticality",
        code: Option<CodeableConcept> => "code",
        patient: Option<Reference> => "patient",
        encounter: Option<Reference> => "encounter",
        onset_date_time: Option<String> => "onsetDateTime",
        recorded_date: Option<String> => "recordedDate",
        recorder: Option<Reference> => "recorder",
        asserter: Option<Reference> => "asserter",
        last_occurrence: Option<String> => "lastOccurrence",
        note: Vec<Annotation> => "note",
        reaction: Vec<AllergyIntoleranceReaction> => "reaction",
    }
}

fhir_resource! {
    ServiceRequest {
        id: Option<String> => "id",
        identifier: Vec<Identifier> => "identifier",
        based_on: Vec<Reference> => "basedOn",
        status: Option<RequestStatus> => "status",
        intent: Option<RequestIntent> => "intent",
        category: Vec<CodeableConcept> => "category",
        priority: Option<RequestPriority> => "priority",
        do_not_perform: Option<bool> => "doNotPerform",
        code: Option<CodeableConcept> => "code",
        quantity_quantity: Option<Quantity> => "quantityQuantity",
        subject: Option<Reference> => "subject",
        encounter: Option<Reference> => "encounter",
        occurrence_date_time: Option<String> => "occurrenceDateTime",
        occurrence_period: Option<Period> => "occurrencePeriod",
        authored_on: Option<String> => "authoredOn",
        requester: Option<Reference> => "requester",
        performer: Vec<Reference> => "performer",
        reason_code: Vec<CodeableConcept> => "reasonCode",
        specimen: Vec<Reference> => "specimen",
        body_site: Vec<CodeableConcept> => "bodySite",
        note: Vec<Annotation> => "note",
        patient_instruction: Option<String> => "patientInstruction",
    }
}
