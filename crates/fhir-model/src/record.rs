use crate::resource::Resource;

/// A resource built from one row, owned by whoever holds it.
#[derive(Debug)]
pub struct BuiltRecord {
    /// Sequence number of the source row.
    pub row: u64,
    pub resource: Box<dyn Resource>,
}

impl BuiltRecord {
    pub fn new(row: u64, resource: Box<dyn Resource>) -> Self {
        Self { row, resource }
    }

    pub fn id(&self) -> Option<&str> {
        self.resource.id()
    }

    pub fn resource_type(&self) -> &'static str {
        self.resource.resource_type()
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        self.resource.to_json()
    }
}
