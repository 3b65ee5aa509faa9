//! General-purpose datatypes and backbone elements.

use crate::codes::{
    AddressUse, ContactPointSystem, ContactPointUse, IdentifierUse, NameUse, QuantityComparator,
};

fhir_element! {
    Coding {
        system: Option<String> => "system",
        version: Option<String> => "version",
        code: Option<String> => "code",
        display: Option<String> => "display",
        user_selected: Option<bool> => "userSelected",
    }
}

fhir_element! {
    CodeableConcept {
        coding: Vec<Coding> => "coding",
        text: Option<String> => "text",
    }
}

fhir_element! {
    Reference {
        reference: Option<String> => "reference",
        type_: Option<String> => "type",
        display: Option<String> => "display",
    }
}

fhir_element! {
    Period {
        start: Option<String> => "start",
        end: Option<String> => "end",
    }
}

fhir_element! {
    Identifier {
        use_: Option<IdentifierUse> => "use",
        type_: Option<CodeableConcept> => "type",
        system: Option<String> => "system",
        value: Option<String> => "value",
        period: Option<Period> => "period",
    }
}

fhir_element! {
    HumanName {
        use_: Option<NameUse> => "use",
        text: Option<String> => "text",
        family: Option<String> => "family",
        given: Vec<String> => "given",
        prefix: Vec<String> => "prefix",
        suffix: Vec<String> => "suffix",
        period: Option<Period> => "period",
    }
}

fhir_element! {
    ContactPoint {
        system: Option<ContactPointSystem> => "system",
        value: Option<String> => "value",
        use_: Option<ContactPointUse> => "use",
        rank: Option<i64> => "rank",
        period: Option<Period> => "period",
    }
}

fhir_element! {
    Address {
        use_: Option<AddressUse> => "use",
        text: Option<String> => "text",
        line: Vec<String> => "line",
        city: Option<String> => "city",
        district: Option<String> => "district",
        state: Option<String> => "state",
        postal_code: Option<String> => "postalCode",
        country: Option<String> => "country",
        period: Option<Period> => "period",
    }
}

fhir_element! {
    Quantity {
        value: Option<f64> => "value",
        comparator: Option<QuantityComparator> => "comparator",
        unit: Option<String> => "unit",
        system: Option<String> => "system",
        code: Option<String> => "code",
    }
}

fhir_element! {
    Range {
        low: Option<Quantity> => "low",
        high: Option<Quantity> => "high",
    }
}

fhir_element! {
    Annotation {
        author_string: Option<String> => "authorString",
        time: Option<String> => "time",
        text: Option<String> => "text",
    }
}

fhir_element! {
    ObservationReferenceRange {
        low: Option<Quantity> => "low",
        high: Option<Quantity> => "high",
        type_: Option<CodeableConcept> => "type",
        text: Option<String> => "text",
    }
}

fhir_element! {
    ObservationComponent {
        code: Option<CodeableConcept> => "code",
        value_quantity: Option<Quantity> => "valueQuantity",
        value_codeable_concept: Option<CodeableConcept> => "valueCodeableConcept",
        value_string: Option<String> => "valueString",
        value_boolean: Option<bool> => "valueBoolean",
        value_integer: Option<i64> => "valueInteger",
        interpretation: Vec<CodeableConcept> => "interpretation",
    }
}

fhir_element! {
    EncounterParticipant {
        type_: Vec<CodeableConcept> => "type",
        period: Option<Period> => "period",
        individual: Option<Reference> => "individual",
    }
}

fhir_element! {
    ProcedurePerformer {
        function: Option<CodeableConcept> => "function",
        actor: Option<Reference> => "actor",
    }
}

fhir_element! {
    DoseAndRate {
        type_: Option<CodeableConcept> => "type",
        dose_quantity: Option<Quantity> => "doseQuantity",
        rate_quantity: Option<Quantity> => "rateQuantity",
    }
}

fhir_element! {
    Dosage {
        sequence: Option<i64> => "sequence",
        text: Option<String> => "text",
        patient_instruction: Option<String> => "patientInstruction",
        as_needed_boolean: Option<bool> => "asNeededBoolean",
        route: Option<CodeableConcept> => "route",
        method: Option<CodeableConcept> => "method",
        dose_and_rate: Vec<DoseAndRate> => "doseAndRate",
    }
}

fhir_element! {
    SpecimenCollection {
        collector: Option<Reference> => "collector",
        collected_date_time: Option<String> => "collectedDateTime",
        quantity: Option<Quantity> => "quantity",
        method: Option<CodeableConcept> => "method",
        body_site: Option<CodeableConcept> => "bodySite",
    }
}

fhir_element! {
    ImmunizationPerformer {
        function: Option<CodeableConcept> => "function",
        actor: Option<Reference> => "actor",
    }
}

fhir_element! {
    AllergyIntoleranceReaction {
        substance: Option<CodeableConcept> => "substance",
        manifestation: Vec<CodeableConcept> => "manifestation",
        description: Option<String> => "description",
        onset: Option<String> => "onset",
        note: Vec<Annotation> => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ObjectSlot;

    #[test]
    fn plain_structures_have_no_literal_decoder() {
        let mut coding: Option<Coding> = None;
        assert!(coding.decode_literal("http://loinc.org").is_none());
        assert!(coding.is_none());
    }

    #[test]
    fn bare_strings_never_become_references_or_quantities() {
        let mut reference: Option<Reference> = None;
        assert!(reference.decode_literal("Patient/123").is_none());
        assert!(reference.is_none());

        let mut quantity = Quantity {
            system: Some("http://unitsofmeasure.org".to_string()),
            ..Quantity::default()
        };
        assert!(ObjectSlot::decode_literal(&mut quantity, "7.2 mmol/L").is_none());
        assert_eq!(quantity.value, None);
    }
}
