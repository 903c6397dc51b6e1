use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationCounters {
    pub table_count: u64,
    pub column_count: u64,
    pub index_count: u64,
    pub failed_count: u64,
}

impl MigrationCounters {
    pub fn is_empty(&self) -> bool {
        self.table_count == 0 && self.column_count == 0 && self.index_count == 0
    }
}

impl fmt::Display for MigrationCounters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Altered {} tables, {} columns and {} indexes.",
            self.table_count, self.column_count, self.index_count
        )
    }
}
