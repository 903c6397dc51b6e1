pub mod collation_statement;
