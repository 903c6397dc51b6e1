use cf_common::{
    config::collation_config::CollationConfig,
    meta::{
        column_meta::ColumnMeta, fulltext_index::FullTextIndex,
        sql_parser::fulltext_parser::FullTextParser,
        statement::collation_statement::CollationStatement, table_meta::TableMeta,
    },
};

/// Statements for one table, in execution order: drops, table, columns, recreates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablePlan {
    pub table_name: String,
    pub fulltext_indexes: Vec<FullTextIndex>,
    pub alter_table: Option<CollationStatement>,
    pub change_columns: Vec<CollationStatement>,
}

impl TablePlan {
    pub fn drop_index_statement(&self, index: &FullTextIndex) -> CollationStatement {
        CollationStatement::DropIndex {
            table_name: self.table_name.clone(),
            index: index.clone(),
        }
    }

    pub fn create_index_statement(&self, index: &FullTextIndex) -> CollationStatement {
        CollationStatement::CreateFullTextIndex {
            table_name: self.table_name.clone(),
            index: index.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollationPlanner {
    pub config: CollationConfig,
    /// collation for columns, and for tables when not forcing
    pub target: String,
    pub force_algorithm: Option<String>,
}

impl CollationPlanner {
    pub fn new(config: &CollationConfig, force_algorithm: Option<String>) -> Self {
        Self {
            config: config.clone(),
            target: config.resolve_target(),
            force_algorithm,
        }
    }

    pub fn is_forcing(&self) -> bool {
        self.force_algorithm.is_some()
    }

    /// collation for the database and tables
    pub fn table_target(&self) -> &str {
        self.force_algorithm.as_deref().unwrap_or(&self.target)
    }

    /// Always emitted, whatever the current database collation is.
    pub fn plan_database(&self, db: &str) -> CollationStatement {
        CollationStatement::AlterDatabase {
            db: db.to_string(),
            collation: self.table_target().to_string(),
        }
    }

    pub fn plan_table(&self, table: &TableMeta, columns: &[ColumnMeta]) -> TablePlan {
        let current = table.collation_or_empty();
        let alter_table = if self.should_alter_table(current) {
            Some(CollationStatement::AlterTable {
                table_name: table.table_name.clone(),
                from_collation: current.to_string(),
                collation: self.table_target().to_string(),
            })
        } else {
            None
        };

        // columns go to the configured target even when forcing
        let change_columns = columns
            .iter()
            .filter(|column| self.should_alter_column(column))
            .map(|column| CollationStatement::ChangeColumn {
                column: column.clone(),
                collation: self.target.clone(),
            })
            .collect();

        TablePlan {
            table_name: table.table_name.clone(),
            fulltext_indexes: FullTextParser::parse(&table.create_table),
            alter_table,
            change_columns,
        }
    }

    fn should_alter_table(&self, current: &str) -> bool {
        if self.config.is_undesired(current) {
            return true;
        }
        match &self.force_algorithm {
            Some(algorithm) => current != algorithm,
            None => false,
        }
    }

    fn should_alter_column(&self, column: &ColumnMeta) -> bool {
        if !column.is_text_type() {
            return false;
        }
        let current = column.collation_or_empty();
        self.config.is_undesired(current) || (self.is_forcing() && current != self.target)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const POSTS_DDL: &str = "CREATE TABLE `wp_posts` (\n  `ID` bigint(20) unsigned NOT NULL AUTO_INCREMENT,\n  `post_title` text COLLATE utf8_unicode_520_ci NOT NULL,\n  `post_content` longtext COLLATE utf8_unicode_520_ci NOT NULL,\n  PRIMARY KEY (`ID`),\n  FULLTEXT KEY `post_content` (`post_title`,`post_content`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8 COLLATE=utf8_unicode_520_ci";

    fn column(field: &str, column_type: &str, collation: Option<&str>) -> ColumnMeta {
        ColumnMeta {
            table_name: "wp_posts".to_string(),
            field: field.to_string(),
            column_type: column_type.to_string(),
            collation: collation.map(|c| c.to_string()),
            is_nullable: false,
            default_value: None,
        }
    }

    fn posts_columns() -> Vec<ColumnMeta> {
        vec![
            column("ID", "bigint(20) unsigned", None),
            column("post_title", "text", Some("utf8_unicode_520_ci")),
            column("post_content", "longtext", Some("utf8_unicode_520_ci")),
            column("post_status", "varchar(20)", Some("utf8mb4_unicode_ci")),
            column("post_mime_type", "varchar(100)", Some("utf8mb4_general_ci")),
        ]
    }

    fn changed_fields(plan: &TablePlan) -> Vec<String> {
        plan.change_columns
            .iter()
            .map(|s| match s {
                CollationStatement::ChangeColumn { column, .. } => column.field.clone(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn test_plan_undesired_table() {
        let planner = CollationPlanner::new(&CollationConfig::default(), None);
        let table = TableMeta::new("wp_posts", POSTS_DDL);
        let plan = planner.plan_table(&table, &posts_columns());

        assert_eq!(plan.fulltext_indexes.len(), 1);
        assert_eq!(
            plan.alter_table,
            Some(CollationStatement::AlterTable {
                table_name: "wp_posts".to_string(),
                from_collation: "utf8_unicode_520_ci".to_string(),
                collation: "utf8mb4_unicode_ci".to_string(),
            })
        );
        assert_eq!(changed_fields(&plan), vec!["post_title", "post_content"]);
    }

    #[test]
    fn test_plan_clean_table() {
        let planner = CollationPlanner::new(&CollationConfig::default(), None);
        let table = TableMeta::new(
            "wp_options",
            "CREATE TABLE `wp_options` (`option_name` varchar(191)) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
        );
        let columns = vec![column("option_name", "varchar(191)", Some("utf8mb4_unicode_ci"))];
        let plan = planner.plan_table(&table, &columns);

        assert!(plan.alter_table.is_none());
        assert!(plan.change_columns.is_empty());
        assert!(plan.fulltext_indexes.is_empty());
    }

    #[test]
    fn test_plan_never_touches_non_text_columns() {
        let planner =
            CollationPlanner::new(&CollationConfig::default(), Some("utf8_general_ci".into()));
        let table = TableMeta::new("wp_posts", POSTS_DDL);
        let columns = vec![
            column("ID", "bigint(20) unsigned", Some("utf8_unicode_520_ci")),
            column("data", "blob", Some("utf8_unicode_520_ci")),
            column("post_date", "datetime", None),
        ];
        let plan = planner.plan_table(&table, &columns);
        assert!(plan.change_columns.is_empty());
    }

    #[test]
    fn test_plan_forcing_targets_differ() {
        let planner =
            CollationPlanner::new(&CollationConfig::default(), Some("utf8mb4_general_ci".into()));
        assert_eq!(
            planner.plan_database("wordpress").to_sql(),
            "ALTER DATABASE `wordpress` COLLATE=utf8mb4_general_ci"
        );

        let table = TableMeta::new(
            "wp_posts",
            "CREATE TABLE `wp_posts` (`a` text) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
        );
        let plan = planner.plan_table(&table, &posts_columns());

        // the table follows the forced algorithm
        match &plan.alter_table {
            Some(CollationStatement::AlterTable { collation, .. }) => {
                assert_eq!(collation, "utf8mb4_general_ci")
            }
            other => panic!("unexpected table plan: {:?}", other),
        }

        // columns are compared to and moved to the configured target
        assert_eq!(
            changed_fields(&plan),
            vec!["post_title", "post_content", "post_mime_type"]
        );
        for statement in plan.change_columns.iter() {
            match statement {
                CollationStatement::ChangeColumn { collation, .. } => {
                    assert_eq!(collation, "utf8mb4_unicode_ci")
                }
                other => panic!("unexpected column plan: {:?}", other),
            }
        }
    }

    #[test]
    fn test_plan_forcing_same_collation() {
        let planner =
            CollationPlanner::new(&CollationConfig::default(), Some("utf8mb4_unicode_ci".into()));
        let table = TableMeta::new(
            "wp_options",
            "CREATE TABLE `wp_options` (`a` text) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
        );
        let plan = planner.plan_table(&table, &[]);
        assert!(plan.alter_table.is_none());

        // no COLLATE= clause reads as an empty collation, which differs while forcing
        let table = TableMeta::new("wp_bare", "CREATE TABLE `wp_bare` (`a` int) ENGINE=InnoDB");
        let plan = planner.plan_table(&table, &[]);
        assert!(plan.alter_table.is_some());
    }

    #[test]
    fn test_plan_with_configured_undesired() {
        let config = CollationConfig {
            undesired: vec!["latin1_swedish_ci".to_string()],
            ..Default::default()
        };
        let planner = CollationPlanner::new(&config, None);

        // only the configured list counts as undesired
        let table = TableMeta::new("wp_posts", POSTS_DDL);
        assert!(planner.plan_table(&table, &posts_columns()).alter_table.is_none());

        let table = TableMeta::new(
            "wp_legacy",
            "CREATE TABLE `wp_legacy` (`a` text) ENGINE=MyISAM DEFAULT CHARSET=latin1 COLLATE=latin1_swedish_ci",
        );
        let columns = vec![column("a", "text", Some("latin1_swedish_ci"))];
        let plan = planner.plan_table(&table, &columns);
        assert!(plan.alter_table.is_some());
        assert_eq!(changed_fields(&plan), vec!["a"]);
    }

    #[test]
    fn test_plan_with_db_collate_override() {
        let config = CollationConfig {
            db_collate: "utf8mb4_general_ci".to_string(),
            ..Default::default()
        };
        let planner = CollationPlanner::new(&config, None);
        assert_eq!(planner.target, "utf8mb4_general_ci");
        assert_eq!(
            planner.plan_database("wordpress").to_sql(),
            "ALTER DATABASE `wordpress` COLLATE=utf8mb4_general_ci"
        );

        let table = TableMeta::new("wp_posts", POSTS_DDL);
        let plan = planner.plan_table(&table, &posts_columns());
        assert_eq!(
            plan.alter_table.map(|s| s.to_sql()),
            Some("ALTER TABLE `wp_posts` COLLATE=utf8mb4_general_ci".to_string())
        );
    }
}
