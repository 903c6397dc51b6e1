/// A result row keyed by column label, values kept as text the way the
/// catalog statements (SHOW ...) return them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRow {
    pub columns: Vec<String>,
    pub values: Vec<Option<String>>,
}

impl QueryRow {
    pub fn new(columns: Vec<String>, values: Vec<Option<String>>) -> Self {
        Self { columns, values }
    }

    pub fn from_pairs(pairs: &[(&str, Option<&str>)]) -> Self {
        Self {
            columns: pairs.iter().map(|(k, _)| k.to_string()).collect(),
            values: pairs.iter().map(|(_, v)| v.map(|s| s.to_string())).collect(),
        }
    }

    pub fn has_column(&self, col: &str) -> bool {
        self.columns.iter().any(|c| c == col)
    }

    /// None when the column is absent or NULL
    pub fn get(&self, col: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == col)?;
        self.get_by_index(index)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&str> {
        self.values.get(index)?.as_deref()
    }

    pub fn get_str_with_null(&self, col: &str) -> String {
        self.get(col).unwrap_or_default().to_string()
    }
}
