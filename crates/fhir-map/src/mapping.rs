//! Mapping specification loaded from YAML.
//!
//! ```yaml
//! resource: Observation
//! id_column: obs_id
//! mappings:
//!   status: "${status}"
//!   code.coding[0].code: "${loinc}"
//!   subject.reference: "Patient/${patient_id}"
//! defaults:
//!   status: preliminary
//!   code.coding[0].system: http://loinc.org
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use fhir_model::ColumnSet;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::path::FieldPath;
use crate::template::placeholders;

/// Declarative row-to-resource mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MappingSpec {
    #[serde(rename = "resource", default)]
    pub resource_type: String,

    /// Column whose value becomes the resource id; empty means none.
    #[serde(default, deserialize_with = "non_empty_string")]
    pub id_column: Option<String>,

    /// Path to template, applied after defaults.
    #[serde(default, deserialize_with = "template_map")]
    pub mappings: BTreeMap<String, String>,

    /// Path to template, applied first.
    #[serde(default, deserialize_with = "template_map")]
    pub defaults: BTreeMap<String, String>,
}

impl MappingSpec {
    /// Read, parse, and validate a mapping file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = Self::from_yaml(&text)?;
        tracing::debug!(
            path = %path.display(),
            resource = %spec.resource_type,
            mappings = spec.mappings.len(),
            defaults = spec.defaults.len(),
            "loaded mapping"
        );
        Ok(spec)
    }

    /// Parse and validate a mapping document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let spec: Self = serde_yaml::from_str(text)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Require a resource type and well-formed paths.
    pub fn validate(&self) -> Result<()> {
        if self.resource_type.trim().is_empty() {
            return Err(ConfigError::MissingResourceType);
        }
        self.parsed_defaults()?;
        self.parsed_mappings()?;
        Ok(())
    }

    /// Defaults with parsed paths, in path order.
    pub fn parsed_defaults(&self) -> Result<Vec<(FieldPath, String)>> {
        parse_section("default", &self.defaults)
    }

    /// Mappings with parsed paths, in path order.
    pub fn parsed_mappings(&self) -> Result<Vec<(FieldPath, String)>> {
        parse_section("mapping", &self.mappings)
    }

    /// Every column the mapping reads: the id column plus all placeholder
    /// names in defaults and mappings.
    pub fn referenced_columns(&self) -> BTreeSet<&str> {
        self.id_column
            .iter()
            .map(String::as_str)
            .chain(
                self.defaults
                    .values()
                    .chain(self.mappings.values())
                    .flat_map(|template| placeholders(template)),
            )
            .collect()
    }

    /// Check every referenced column against `columns`.
    ///
    /// The error lists all missing names, sorted and without repeats.
    pub fn validate_columns(&self, columns: &ColumnSet) -> Result<()> {
        let missing: Vec<String> = self
            .referenced_columns()
            .into_iter()
            .filter(|name| !columns.contains(name))
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingColumns { columns: missing })
        }
    }
}

fn parse_section(
    section: &'static str,
    entries: &BTreeMap<String, String>,
) -> Result<Vec<(FieldPath, String)>> {
    entries
        .iter()
        .map(|(path, template)| {
            FieldPath::parse(path)
                .map(|parsed| (parsed, template.clone()))
                .map_err(|source| ConfigError::InvalidPath {
                    section,
                    path: path.clone(),
                    source,
                })
        })
        .collect()
}

fn non_empty_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|column| !column.is_empty()))
}

/// A YAML scalar kept as text; `true` and `42` read as `"true"` and `"42"`.
struct TemplateText(String);

impl<'de> Deserialize<'de> for TemplateText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl Visitor<'_> for TextVisitor {
            type Value = TemplateText;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string, number, or boolean")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(value.to_string()))
            }

            fn visit_string<E: de::Error>(
                self,
                value: String,
            ) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(value))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(value.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<TemplateText, E> {
                Ok(TemplateText(String::new()))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

fn template_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MapVisitor;

    impl<'de> Visitor<'de> for MapVisitor {
        type Value = BTreeMap<String, String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of paths to templates")
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = BTreeMap::new();
            while let Some((path, TemplateText(template))) =
                access.next_entry::<String, TemplateText>()?
            {
                entries.insert(path, template);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(MapVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_stringified() {
        let spec = MappingSpec::from_yaml(
            "resource: Patient\nmappings:\n  active: true\n  multipleBirthInteger: 2\n",
        )
        .unwrap();
        assert_eq!(spec.mappings["active"], "true");
        assert_eq!(spec.mappings["multipleBirthInteger"], "2");
        assert!(spec.defaults.is_empty());
    }

    #[test]
    fn empty_id_column_means_none() {
        let spec = MappingSpec::from_yaml("resource: Patient\nid_column: \"\"\n").unwrap();
        assert_eq!(spec.id_column, None);
    }

    #[test]
    fn null_sections_are_empty() {
        let spec = MappingSpec::from_yaml("resource: Patient\nmappings:\ndefaults: ~\n").unwrap();
        assert!(spec.mappings.is_empty());
        assert!(spec.defaults.is_empty());
    }

    #[test]
    fn resource_is_required() {
        assert!(matches!(
            MappingSpec::from_yaml("mappings:\n  status: final\n"),
            Err(ConfigError::MissingResourceType)
        ));
    }

    #[test]
    fn invalid_path_is_reported_with_section() {
        let err = MappingSpec::from_yaml("resource: Observation\ndefaults:\n  code..text: x\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid default path 'code..text': path cannot contain consecutive dots: code..text"
        );
    }

    #[test]
    fn missing_columns_are_sorted_and_unique() {
        let spec = MappingSpec::from_yaml(
            "resource: Observation\nid_column: id\nmappings:\n  status: \"${zeta}\"\n  code.text: \"${alpha} ${zeta}\"\ndefaults:\n  issued: \"${beta}\"\n",
        )
        .unwrap();
        let columns = ColumnSet::new(["id", "alpha"]);
        let err = spec.validate_columns(&columns).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingColumns { ref columns } if columns == &["beta", "zeta"]
        ));
    }
}
