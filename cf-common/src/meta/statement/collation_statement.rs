use crate::{
    meta::{column_meta::ColumnMeta, fulltext_index::FullTextIndex},
    utils::sql_util::SqlUtil,
};

/// Statements a collation migration sends, in the shape MySQL/MariaDB accept them.
#[derive(Debug, Clone, PartialEq)]
pub enum CollationStatement {
    AlterDatabase {
        db: String,
        collation: String,
    },

    AlterTable {
        table_name: String,
        from_collation: String,
        collation: String,
    },

    ChangeColumn {
        column: ColumnMeta,
        collation: String,
    },

    DropIndex {
        table_name: String,
        index: FullTextIndex,
    },

    CreateFullTextIndex {
        table_name: String,
        index: FullTextIndex,
    },
}

impl CollationStatement {
    pub fn to_sql(&self) -> String {
        match self {
            Self::AlterDatabase { db, collation } => {
                format!("ALTER DATABASE {} COLLATE={}", SqlUtil::escape(db), collation)
            }

            Self::AlterTable {
                table_name,
                collation,
                ..
            } => format!(
                "ALTER TABLE {} COLLATE={}",
                SqlUtil::escape(table_name),
                collation
            ),

            Self::ChangeColumn { column, collation } => {
                let field = SqlUtil::escape(&column.field);
                let mut sql = format!(
                    "ALTER TABLE {} CHANGE {} {} {} COLLATE {} {}",
                    SqlUtil::escape(&column.table_name),
                    field,
                    field,
                    column.column_type,
                    collation,
                    column.nullable_str()
                );
                if let Some(default_value) = &column.default_value {
                    sql.push_str(&format!(" DEFAULT {}", SqlUtil::quote_literal(default_value)));
                }
                sql
            }

            Self::DropIndex { table_name, index } => format!(
                "ALTER TABLE {} DROP INDEX {}",
                SqlUtil::escape(table_name),
                SqlUtil::escape(&index.index_name)
            ),

            Self::CreateFullTextIndex { table_name, index } => format!(
                "CREATE FULLTEXT INDEX {} ON {} {}",
                SqlUtil::escape(&index.index_name),
                SqlUtil::escape(table_name),
                index.columns
            ),
        }
    }

    /// progress line for the operator report
    pub fn describe(&self) -> String {
        match self {
            Self::AlterDatabase { collation, .. } => {
                format!("Changing database Collation Algorithm to: {}", collation)
            }

            Self::AlterTable {
                from_collation,
                collation,
                ..
            } => format!(
                "- found \"{}\" and ALTERing to \"{}\"...",
                from_collation, collation
            ),

            Self::ChangeColumn { column, collation } => format!(
                "- found column `{}` with collation of \"{}\" and ALTERing to \"{}\".",
                column.field,
                column.collation_or_empty(),
                collation
            ),

            Self::DropIndex { index, .. } => format!(
                "- removing fulltext index `{}` of {}",
                index.index_name, index.columns
            ),

            Self::CreateFullTextIndex { index, .. } => format!(
                "- adding back fulltext index `{}` of {}",
                index.index_name, index.columns
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn post_content_index() -> FullTextIndex {
        FullTextIndex {
            index_name: "post_content".to_string(),
            columns: "(`post_title`,`post_content`)".to_string(),
        }
    }

    #[test]
    fn test_database_and_table_sql() {
        let statement = CollationStatement::AlterDatabase {
            db: "wordpress".to_string(),
            collation: "utf8mb4_unicode_ci".to_string(),
        };
        assert_eq!(
            statement.to_sql(),
            "ALTER DATABASE `wordpress` COLLATE=utf8mb4_unicode_ci"
        );

        let statement = CollationStatement::AlterTable {
            table_name: "wp_posts".to_string(),
            from_collation: "utf8_unicode_520_ci".to_string(),
            collation: "utf8mb4_unicode_ci".to_string(),
        };
        assert_eq!(
            statement.to_sql(),
            "ALTER TABLE `wp_posts` COLLATE=utf8mb4_unicode_ci"
        );
        assert_eq!(
            statement.describe(),
            "- found \"utf8_unicode_520_ci\" and ALTERing to \"utf8mb4_unicode_ci\"..."
        );
    }

    #[test]
    fn test_change_column_sql() {
        let mut column = ColumnMeta {
            table_name: "wp_posts".to_string(),
            field: "post_status".to_string(),
            column_type: "varchar(20)".to_string(),
            collation: Some("utf8_unicode_520_ci".to_string()),
            is_nullable: false,
            default_value: Some("publish".to_string()),
        };
        let statement = CollationStatement::ChangeColumn {
            column: column.clone(),
            collation: "utf8mb4_unicode_ci".to_string(),
        };
        assert_eq!(
            statement.to_sql(),
            "ALTER TABLE `wp_posts` CHANGE `post_status` `post_status` varchar(20) COLLATE utf8mb4_unicode_ci NOT NULL DEFAULT 'publish'"
        );

        // empty default is still a default, NULL default is omitted
        column.default_value = Some(String::new());
        column.is_nullable = true;
        let statement = CollationStatement::ChangeColumn {
            column: column.clone(),
            collation: "utf8mb4_unicode_ci".to_string(),
        };
        assert_eq!(
            statement.to_sql(),
            "ALTER TABLE `wp_posts` CHANGE `post_status` `post_status` varchar(20) COLLATE utf8mb4_unicode_ci NULL DEFAULT ''"
        );

        column.default_value = None;
        let statement = CollationStatement::ChangeColumn {
            column,
            collation: "utf8mb4_unicode_ci".to_string(),
        };
        assert!(statement.to_sql().ends_with("COLLATE utf8mb4_unicode_ci NULL"));
    }

    #[test]
    fn test_fulltext_sql() {
        let drop = CollationStatement::DropIndex {
            table_name: "wp_posts".to_string(),
            index: post_content_index(),
        };
        assert_eq!(
            drop.to_sql(),
            "ALTER TABLE `wp_posts` DROP INDEX `post_content`"
        );

        let create = CollationStatement::CreateFullTextIndex {
            table_name: "wp_posts".to_string(),
            index: post_content_index(),
        };
        assert_eq!(
            create.to_sql(),
            "CREATE FULLTEXT INDEX `post_content` ON `wp_posts` (`post_title`,`post_content`)"
        );
    }
}
