pub mod column_meta;
pub mod fulltext_index;
pub mod migration_counters;
pub mod query_row;
pub mod sql_parser;
pub mod statement;
pub mod table_meta;
