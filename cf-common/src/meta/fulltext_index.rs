#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullTextIndex {
    pub index_name: String,
    /// parenthesized column list, verbatim from the DDL, e.g. (`post_title`,`post_content`)
    pub columns: String,
}
