const TEXT_TYPE_TERMS: [&str; 3] = ["text", "char", "enum"];

/// One row of SHOW FULL COLUMNS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMeta {
    pub table_name: String,
    pub field: String,
    pub column_type: String,
    pub collation: Option<String>,
    pub is_nullable: bool,
    pub default_value: Option<String>,
}

impl ColumnMeta {
    /// Only character columns carry a collation worth changing.
    pub fn is_text_type(&self) -> bool {
        let column_type = self.column_type.to_lowercase();
        TEXT_TYPE_TERMS
            .iter()
            .any(|term| column_type.contains(term))
    }

    pub fn collation_or_empty(&self) -> &str {
        self.collation.as_deref().unwrap_or_default()
    }

    pub fn nullable_str(&self) -> &'static str {
        if self.is_nullable {
            "NULL"
        } else {
            "NOT NULL"
        }
    }
}
