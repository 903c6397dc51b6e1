pub mod mysql_schema_fetcher;
