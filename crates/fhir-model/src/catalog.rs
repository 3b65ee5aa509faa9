//! Resource type catalog.
//!
//! The mapping engine never names a concrete resource type: it asks a
//! [`TypeCatalog`] for the [`TypeShape`] registered under the configured
//! name and instantiates records through it.
//!
//! # Thread Safety
//!
//! Catalogs are read-only once built and shared by every worker. The
//! built-in catalog is cached using [`OnceLock`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::element::FieldInfo;
use crate::lookup::names_match;
use crate::resource::Resource;
use crate::resources::{
    AllergyIntolerance, Condition, DiagnosticReport, Encounter, Immunization, Location,
    MedicationRequest, Observation, Organization, Patient, Practitioner, Procedure,
    ServiceRequest, Specimen,
};

/// Structural description of a resource type.
#[derive(Debug, Clone, Copy)]
pub struct TypeShape {
    pub name: &'static str,
    pub fields: &'static [FieldInfo],
    new_instance: fn() -> Box<dyn Resource>,
}

impl TypeShape {
    pub const fn new(
        name: &'static str,
        fields: &'static [FieldInfo],
        new_instance: fn() -> Box<dyn Resource>,
    ) -> Self {
        Self {
            name,
            fields,
            new_instance,
        }
    }

    /// Shape of a default-constructible resource type.
    pub fn of<T: Resource + Default + 'static>(
        name: &'static str,
        fields: &'static [FieldInfo],
    ) -> Self {
        Self::new(name, fields, new_boxed::<T>)
    }

    /// A fresh, empty instance.
    pub fn new_instance(&self) -> Box<dyn Resource> {
        (self.new_instance)()
    }
}

fn new_boxed<T: Resource + Default + 'static>() -> Box<dyn Resource> {
    Box::new(T::default())
}

/// Lookup of resource types by name.
pub trait TypeCatalog: Send + Sync {
    /// Exact name first, then a case-insensitive match.
    fn lookup(&self, name: &str) -> Option<&TypeShape>;

    /// Registered shapes in registration order.
    fn shapes(&self) -> Vec<&TypeShape>;
}

/// Registry of resource shapes indexed by type name.
#[derive(Debug, Default)]
pub struct FhirCatalog {
    shapes: Vec<TypeShape>,
    by_name: HashMap<&'static str, usize>,
}

impl FhirCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shape under its name.
    ///
    /// If a shape with this name is already registered, it is replaced.
    pub fn register(&mut self, shape: TypeShape) {
        match self.by_name.get(shape.name) {
            Some(&index) => self.shapes[index] = shape,
            None => {
                self.by_name.insert(shape.name, self.shapes.len());
                self.shapes.push(shape);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.shapes.iter().map(|shape| shape.name)
    }
}

impl TypeCatalog for FhirCatalog {
    fn lookup(&self, name: &str) -> Option<&TypeShape> {
        self.by_name
            .get(name)
            .map(|&index| &self.shapes[index])
            .or_else(|| self.shapes.iter().find(|shape| names_match(shape.name, name)))
    }

    fn shapes(&self) -> Vec<&TypeShape> {
        self.shapes.iter().collect()
    }
}

static DEFAULT_CATALOG: OnceLock<FhirCatalog> = OnceLock::new();

/// Returns the built-in catalog of FHIR R4 resources.
///
/// # Registered Types
///
/// Observation, Patient, Condition, Encounter, Procedure,
/// MedicationRequest, DiagnosticReport, Specimen, Practitioner,
/// Organization, Location, Immunization, AllergyIntolerance,
/// ServiceRequest.
pub fn default_catalog() -> &'static FhirCatalog {
    DEFAULT_CATALOG.get_or_init(build_default_catalog)
}

fn build_default_catalog() -> FhirCatalog {
    let mut catalog = FhirCatalog::new();
    catalog.register(TypeShape::of::<Observation>("Observation", Observation::FIELDS));
    catalog.register(TypeShape::of::<Patient>("Patient", Patient::FIELDS));
    catalog.register(TypeShape::of::<Condition>("Condition", Condition::FIELDS));
    catalog.register(TypeShape::of::<Encounter>("Encounter", Encounter::FIELDS));
    catalog.register(TypeShape::of::<Procedure>("Procedure", Procedure::FIELDS));
    catalog.register(TypeShape::of::<MedicationRequest>(
        "MedicationRequest",
        MedicationRequest::FIELDS,
    ));
    catalog.register(TypeShape::of::<DiagnosticReport>(
        "DiagnosticReport",
        DiagnosticReport::FIELDS,
    ));
    catalog.register(TypeShape::of::<Specimen>("Specimen", Specimen::FIELDS));
    catalog.register(TypeShape::of::<Practitioner>("Practitioner", Practitioner::FIELDS));
    catalog.register(TypeShape::of::<Organization>("Organization", Organization::FIELDS));
    catalog.register(TypeShape::of::<Location>("Location", Location::FIELDS));
    catalog.register(TypeShape::of::<Immunization>("Immunization", Immunization::FIELDS));
    catalog.register(TypeShape::of::<AllergyIntolerance>(
        "AllergyIntolerance",
        AllergyIntolerance::FIELDS,
    ));
    catalog.register(TypeShape::of::<ServiceRequest>(
        "ServiceRequest",
        ServiceRequest::FIELDS,
    ));
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = default_catalog();
        assert_eq!(
            catalog.lookup("observation").map(|s| s.name),
            Some("Observation")
        );
        assert_eq!(
            catalog.lookup("MEDICATIONREQUEST").map(|s| s.name),
            Some("MedicationRequest")
        );
        assert!(catalog.lookup("Bundle").is_none());
    }

    #[test]
    fn registers_common_clinical_types() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 14);
        for name in ["Location", "Immunization", "AllergyIntolerance", "ServiceRequest"] {
            let shape = catalog.lookup(&name.to_lowercase()).unwrap();
            assert_eq!(shape.new_instance().resource_type(), name);
        }
    }

    #[test]
    fn new_instance_is_empty_and_typed() {
        let shape = default_catalog().lookup("Patient").unwrap();
        let instance = shape.new_instance();
        assert_eq!(instance.resource_type(), "Patient");
        assert!(instance.id().is_none());
    }

    #[test]
    fn register_replaces_existing_name() {
        let mut catalog = FhirCatalog::new();
        catalog.register(TypeShape::of::<Patient>("Patient", Patient::FIELDS));
        catalog.register(TypeShape::of::<Patient>("Patient", &[]));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("Patient").unwrap().fields.is_empty());
    }
}
