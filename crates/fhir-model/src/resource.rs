//! Top-level FHIR resources.

use serde::Serialize;
use serde_json::Value;

use crate::element::Element;

/// A FHIR resource: an element with a resource type and a logical id.
pub trait Resource: Element {
    fn resource_type(&self) -> &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// JSON form with `resourceType` set and absent members pruned.
    fn to_json(&self) -> serde_json::Result<Value>;

    fn as_element(&self) -> &dyn Element;

    fn as_element_mut(&mut self) -> &mut dyn Element;
}

/// Serialize a resource, drop `null`, empty-array, and empty-object
/// members, then stamp `resourceType`.
///
/// Array items are never removed, so positions written by index paths
/// survive even when an earlier item is empty.
pub fn encode_resource<T: Serialize>(
    resource_type: &str,
    resource: &T,
) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(resource)?;
    prune_vacant_members(&mut value);
    if let Value::Object(members) = &mut value {
        members.insert(
            "resourceType".to_string(),
            Value::String(resource_type.to_string()),
        );
    }
    Ok(value)
}

fn prune_vacant_members(value: &mut Value) {
    match value {
        Value::Object(members) => members.retain(|_, member| {
            prune_vacant_members(member);
            !is_vacant(member)
        }),
        Value::Array(items) => items.iter_mut().for_each(prune_vacant_members),
        _ => {}
    }
}

fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prunes_nested_vacant_members_but_keeps_array_items() {
        let mut value = json!({
            "a": null,
            "b": {"c": null, "d": []},
            "e": [{}, {"f": "x"}],
            "g": false
        });
        prune_vacant_members(&mut value);
        assert_eq!(value, json!({"e": [{}, {"f": "x"}], "g": false}));
    }
}
