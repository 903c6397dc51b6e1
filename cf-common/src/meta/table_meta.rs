const COLLATE_TERM: &str = " COLLATE=";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMeta {
    pub table_name: String,
    /// `Create Table` text of SHOW CREATE TABLE
    pub create_table: String,
    pub collation: Option<String>,
}

impl TableMeta {
    pub fn new(table_name: &str, create_table: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            create_table: create_table.to_string(),
            collation: Self::parse_collation(create_table),
        }
    }

    /// Table default collation: text after the first ` COLLATE=` up to the next space.
    pub fn parse_collation(create_table: &str) -> Option<String> {
        let pos = create_table.find(COLLATE_TERM)?;
        let rest = &create_table[pos + COLLATE_TERM.len()..];
        let collation = match rest.find(' ') {
            Some(end) => &rest[..end],
            None => rest,
        };
        Some(collation.to_string())
    }

    pub fn collation_or_empty(&self) -> &str {
        self.collation.as_deref().unwrap_or_default()
    }
}
