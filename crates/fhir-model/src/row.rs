use std::collections::HashMap;
use std::sync::Arc;

/// Known column names of a tabular source.
///
/// When a header repeats a name, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }
        Self { names, index }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column names in source order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One data record with its 1-based sequence number.
#[derive(Debug, Clone)]
pub struct Row {
    number: u64,
    columns: Arc<ColumnSet>,
    values: Vec<String>,
}

impl Row {
    pub fn new(number: u64, columns: Arc<ColumnSet>, values: Vec<String>) -> Self {
        Self {
            number,
            columns,
            values,
        }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(number: u64, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .unzip();
        Self::new(number, Arc::new(ColumnSet::new(names)), values)
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Value of a column.
    ///
    /// `None` for an unknown column; a known column without a cell in this
    /// record reads as the empty string.
    pub fn get(&self, column: &str) -> Option<&str> {
        let position = self.columns.position(column)?;
        Some(self.values.get(position).map_or("", String::as_str))
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .names()
            .iter()
            .enumerate()
            .map(|(position, name)| {
                (
                    name.as_str(),
                    self.values.get(position).map_or("", String::as_str),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_record_reads_missing_cells_as_empty() {
        let columns = Arc::new(ColumnSet::new(["id", "status", "value"]));
        let row = Row::new(3, columns, vec!["obs-1".to_string()]);
        assert_eq!(row.get("id"), Some("obs-1"));
        assert_eq!(row.get("value"), Some(""));
        assert_eq!(row.get("unknown"), None);
        assert_eq!(row.number(), 3);
    }

    #[test]
    fn duplicate_header_resolves_to_first() {
        let row = Row::from_pairs(1, [("code", "a"), ("code", "b")]);
        assert_eq!(row.get("code"), Some("a"));
        assert_eq!(row.columns().len(), 2);
    }
}
