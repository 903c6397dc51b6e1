pub mod fulltext_parser;
