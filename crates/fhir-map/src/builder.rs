//! Per-row record construction.

use fhir_model::{BuiltRecord, Row, TypeCatalog, TypeShape, ValidationIssue, Validator};

use crate::error::{BuildError, BuildErrorKind, ConfigError, Target};
use crate::mapping::MappingSpec;
use crate::mutate::set_value;
use crate::path::FieldPath;
use crate::template::{has_placeholder_syntax, substitute};

/// Builds one resource per row from a [`MappingSpec`].
///
/// Paths are parsed and the resource type resolved once, up front; the
/// builder is then shared read-only by every worker.
#[derive(Debug)]
pub struct RecordBuilder<'c> {
    shape: &'c TypeShape,
    id_column: Option<String>,
    defaults: Vec<(FieldPath, String)>,
    mappings: Vec<(FieldPath, String)>,
}

impl<'c> RecordBuilder<'c> {
    pub fn new(spec: &MappingSpec, catalog: &'c dyn TypeCatalog) -> Result<Self, ConfigError> {
        let shape = catalog
            .lookup(&spec.resource_type)
            .ok_or_else(|| ConfigError::UnknownResourceType(spec.resource_type.clone()))?;
        Ok(Self {
            shape,
            id_column: spec.id_column.clone(),
            defaults: spec.parsed_defaults()?,
            mappings: spec.parsed_mappings()?,
        })
    }

    /// Canonical name of the resource type being built.
    pub fn resource_type(&self) -> &'static str {
        self.shape.name
    }

    /// Build the resource for `row`.
    ///
    /// Defaults are applied first, then mappings. A mapping whose expanded
    /// value is empty is skipped so it never blanks out a default. The id is
    /// assigned last when the id column holds a value.
    pub fn build(&self, row: &Row) -> Result<BuiltRecord, BuildError> {
        let mut resource = self.shape.new_instance();

        for (path, template) in &self.defaults {
            let target = || Target::Default(path.to_string());
            let value = match substitute(template, row) {
                Ok(value) => value,
                Err(missing) if has_placeholder_syntax(template) => {
                    return Err(BuildError::new(
                        row.number(),
                        target(),
                        BuildErrorKind::UnresolvedDefault(missing),
                    ));
                }
                Err(_) => template.clone(),
            };
            if value.is_empty() {
                continue;
            }
            set_value(resource.as_element_mut(), path, &value)
                .map_err(|error| BuildError::new(row.number(), target(), error))?;
        }

        for (path, template) in &self.mappings {
            let target = || Target::Mapping(path.to_string());
            let value = substitute(template, row)
                .map_err(|error| BuildError::new(row.number(), target(), error))?;
            if value.is_empty() {
                continue;
            }
            set_value(resource.as_element_mut(), path, &value)
                .map_err(|error| BuildError::new(row.number(), target(), error))?;
        }

        if let Some(id) = self
            .id_column
            .as_deref()
            .and_then(|column| row.get(column))
            .filter(|id| !id.is_empty())
        {
            resource.set_id(id.to_string());
        }

        Ok(BuiltRecord::new(row.number(), resource))
    }

    /// Build the resource and run the validator over it, if any.
    pub fn build_and_validate(
        &self,
        row: &Row,
        validator: Option<&dyn Validator>,
    ) -> Result<(BuiltRecord, Vec<ValidationIssue>), BuildError> {
        let record = self.build(row)?;
        let issues = validator
            .map(|validator| validator.validate(record.resource.as_ref()))
            .unwrap_or_default();
        Ok((record, issues))
    }
}
