use regex::Regex;

pub struct SqlUtil {}

const MYSQL_ESCAPE: char = '`';
const COLLATION_PATTERN: &str = r"^[a-zA-Z0-9_]{1,64}$";

impl SqlUtil {
    pub fn is_escaped(token: &str) -> bool {
        token.len() >= 2 && token.starts_with(MYSQL_ESCAPE) && token.ends_with(MYSQL_ESCAPE)
    }

    /// `token`, with inner backquotes doubled
    pub fn escape(token: &str) -> String {
        if Self::is_escaped(token) {
            return token.to_string();
        }
        format!(
            "{}{}{}",
            MYSQL_ESCAPE,
            token.replace(MYSQL_ESCAPE, "``"),
            MYSQL_ESCAPE
        )
    }

    /// 'value', quotes and backslashes escaped
    pub fn quote_literal(value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    /// pattern for SHOW TABLES LIKE, matching every table starting with prefix
    pub fn prefix_like_pattern(prefix: &str) -> String {
        format!("{}%", prefix.replace('\\', "\\\\").replace('\'', "''"))
    }

    /// Collation names end up unquoted in DDL, so only identifier characters pass.
    pub fn is_valid_collation(collation: &str) -> bool {
        Regex::new(COLLATION_PATTERN)
            .map(|regex| regex.is_match(collation))
            .unwrap_or(false)
    }
}
