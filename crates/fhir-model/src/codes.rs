//! Required-binding code systems used by the built-in resources.

fhir_code! {
    /// <http://hl7.org/fhir/observation-status>
    ObservationStatus {
        Registered => "registered",
        Preliminary => "preliminary",
        Final => "final",
        Amended => "amended",
        Corrected => "corrected",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    AdministrativeGender {
        Male => "male",
        Female => "female",
        Other => "other",
        Unknown => "unknown",
    }
}

fhir_code! {
    EncounterStatus {
        Planned => "planned",
        Arrived => "arrived",
        Triaged => "triaged",
        InProgress => "in-progress",
        OnLeave => "onleave",
        Finished => "finished",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    /// Event status shared by Procedure.
    EventStatus {
        Preparation => "preparation",
        InProgress => "in-progress",
        NotDone => "not-done",
        OnHold => "on-hold",
        Stopped => "stopped",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    MedicationRequestStatus {
        Active => "active",
        OnHold => "on-hold",
        Cancelled => "cancelled",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Stopped => "stopped",
        Draft => "draft",
        Unknown => "unknown",
    }
}

fhir_code! {
    MedicationRequestIntent {
        Proposal => "proposal",
        Plan => "plan",
        Order => "order",
        OriginalOrder => "original-order",
        ReflexOrder => "reflex-order",
        FillerOrder => "filler-order",
        InstanceOrder => "instance-order",
        ProposedOption => "option",
    }
}

fhir_code! {
    DiagnosticReportStatus {
        Registered => "registered",
        Partial => "partial",
        Preliminary => "preliminary",
        Final => "final",
        Amended => "amended",
        Corrected => "corrected",
        Appended => "appended",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    SpecimenStatus {
        Available => "available",
        Unavailable => "unavailable",
        Unsatisfactory => "unsatisfactory",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    LocationStatus {
        Active => "active",
        Suspended => "suspended",
        Inactive => "inactive",
    }
}

fhir_code! {
    LocationMode {
        Instance => "instance",
        Kind => "kind",
    }
}

fhir_code! {
    ImmunizationStatus {
        Completed => "completed",
        EnteredInError => "entered-in-error",
        NotDone => "not-done",
    }
}

fhir_code! {
    AllergyIntoleranceType {
        Allergy => "allergy",
        Intolerance => "intolerance",
    }
}

fhir_code! {
    AllergyIntoleranceCriticality {
        Low => "low",
        High => "high",
        UnableToAssess => "unable-to-assess",
    }
}

fhir_code! {
    /// Request status shared by ServiceRequest.
    RequestStatus {
        Draft => "draft",
        Active => "active",
        OnHold => "on-hold",
        Revoked => "revoked",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    RequestIntent {
        Proposal => "proposal",
        Plan => "plan",
        Directive => "directive",
        Order => "order",
        OriginalOrder => "original-order",
        ReflexOrder => "reflex-order",
        FillerOrder => "filler-order",
        InstanceOrder => "instance-order",
        ProposedOption => "option",
    }
}

fhir_code! {
    RequestPriority {
        Routine => "routine",
        Urgent => "urgent",
        Asap => "asap",
        Stat => "stat",
    }
}

fhir_code! {
    IdentifierUse {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Secondary => "secondary",
        Old => "old",
    }
}

fhir_code! {
    NameUse {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Nickname => "nickname",
        Anonymous => "anonymous",
        Old => "old",
        Maiden => "maiden",
    }
}

fhir_code! {
    ContactPointSystem {
        Phone => "phone",
        Fax => "fax",
        Email => "email",
        Pager => "pager",
        Url => "url",
        Sms => "sms",
        Other => "other",
    }
}

fhir_code! {
    ContactPointUse {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Mobile => "mobile",
    }
}

fhir_code! {
    AddressUse {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Billing => "billing",
    }
}

fhir_code! {
    QuantityComparator {
        LessThan => "<",
        LessOrEqual => "<=",
        GreaterOrEqual => ">=",
        GreaterThan => ">",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Codable;

    #[test]
    fn decodes_wire_code() {
        let mut status: Option<ObservationStatus> = None;
        status.decode_literal("entered-in-error").unwrap();
        assert_eq!(status, Some(ObservationStatus::EnteredInError));
        assert_eq!(ObservationStatus::EnteredInError.to_string(), "entered-in-error");
    }

    #[test]
    fn rejects_unknown_code_and_keeps_value() {
        let mut status = Some(ObservationStatus::Final);
        let error = status.decode_literal("done").unwrap_err();
        assert_eq!(error.type_name, "ObservationStatus");
        assert_eq!(error.literal, "done");
        assert_eq!(status, Some(ObservationStatus::Final));
    }

    #[test]
    fn codes_are_case_sensitive() {
        let mut gender: Option<AdministrativeGender> = None;
        assert!(gender.decode_literal("Male").is_err());
        assert!(gender.is_none());
    }

    #[test]
    fn symbolic_codes_decode() {
        let mut comparator: Option<QuantityComparator> = None;
        comparator.decode_literal("<=").unwrap();
        assert_eq!(comparator, Some(QuantityComparator::LessOrEqual));
        assert_eq!(QuantityComparator::ALL.len(), 4);
    }

    #[test]
    fn hyphenated_codes_decode() {
        let mut criticality: Option<AllergyIntoleranceCriticality> = None;
        criticality.decode_literal("unable-to-assess").unwrap();
        assert_eq!(criticality, Some(AllergyIntoleranceCriticality::UnableToAssess));

        let mut intent: Option<RequestIntent> = None;
        assert!(intent.decode_literal("original_order").is_err());
        intent.decode_literal("original-order").unwrap();
        assert_eq!(intent.map(RequestIntent::as_str), Some("original-order"));
    }
}
