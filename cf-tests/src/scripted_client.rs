use async_trait::async_trait;
use cf_common::{error::Error, meta::query_row::QueryRow};
use cf_connector::DbClient;

#[derive(Debug, Clone, PartialEq)]
pub struct MockColumn {
    pub field: String,
    pub column_type: String,
    pub collation: Option<String>,
    pub is_nullable: bool,
    pub default_value: Option<String>,
}

impl MockColumn {
    pub fn new(field: &str, column_type: &str, collation: Option<&str>) -> Self {
        Self {
            field: field.to_string(),
            column_type: column_type.to_string(),
            collation: collation.map(|c| c.to_string()),
            is_nullable: false,
            default_value: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockTable {
    pub name: String,
    pub collation: Option<String>,
    pub columns: Vec<MockColumn>,
    /// (index name, column list)
    pub fulltext_indexes: Vec<(String, String)>,
    pub is_view: bool,
}

impl MockTable {
    pub fn new(name: &str, collation: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            collation: collation.map(|c| c.to_string()),
            columns: Vec::new(),
            fulltext_indexes: Vec::new(),
            is_view: false,
        }
    }

    pub fn view(name: &str) -> Self {
        Self {
            is_view: true,
            ..Self::new(name, None)
        }
    }

    pub fn column(mut self, column: MockColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn fulltext(mut self, name: &str, columns: &str) -> Self {
        self.fulltext_indexes
            .push((name.to_string(), columns.to_string()));
        self
    }

    /// rendered the way SHOW CREATE TABLE prints it
    pub fn create_table(&self) -> String {
        let mut lines = Vec::new();
        for col in self.columns.iter() {
            let mut line = format!("  `{}` {}", col.field, col.column_type);
            if let Some(collation) = &col.collation {
                line.push_str(&format!(" COLLATE {}", collation));
            }
            if !col.is_nullable {
                line.push_str(" NOT NULL");
            }
            match &col.default_value {
                Some(v) => line.push_str(&format!(" DEFAULT '{}'", v)),
                None if col.is_nullable => line.push_str(" DEFAULT NULL"),
                None => {}
            }
            lines.push(line);
        }
        for (name, columns) in self.fulltext_indexes.iter() {
            lines.push(format!("  FULLTEXT KEY `{}` {}", name, columns));
        }

        let mut sql = format!(
            "CREATE TABLE `{}` (\n{}\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
            self.name,
            lines.join(",\n")
        );
        if let Some(collation) = &self.collation {
            sql.push_str(&format!(" COLLATE={}", collation));
        }
        sql
    }
}

/// In memory catalog answering the statements a collation migration sends,
/// applying every DDL to its tables and recording what it received.
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    pub db: String,
    pub db_collation: String,
    pub tables: Vec<MockTable>,
    pub queries: Vec<String>,
    pub executed: Vec<String>,
    /// statements containing one of these are rejected with a query error
    pub reject: Vec<String>,
    /// statements containing one of these fail as if the server went away
    pub disconnect: Vec<String>,
}

impl ScriptedClient {
    pub fn new(db: &str, tables: Vec<MockTable>) -> Self {
        Self {
            db: db.to_string(),
            db_collation: "utf8mb4_unicode_520_ci".to_string(),
            tables,
            queries: Vec::new(),
            executed: Vec::new(),
            reject: Vec::new(),
            disconnect: Vec::new(),
        }
    }

    pub fn reject_on(mut self, pattern: &str) -> Self {
        self.reject.push(pattern.to_string());
        self
    }

    pub fn disconnect_on(mut self, pattern: &str) -> Self {
        self.disconnect.push(pattern.to_string());
        self
    }

    pub fn get_table(&self, name: &str) -> Option<&MockTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    fn check_faults(&self, sql: &str) -> Result<(), Error> {
        if self.disconnect.iter().any(|p| sql.contains(p.as_str())) {
            return Err(Error::ConnectionError(
                "MySQL server has gone away".to_string(),
            ));
        }
        if self.reject.iter().any(|p| sql.contains(p.as_str())) {
            return Err(Error::QueryError(format!("rejected: {}", sql)));
        }
        Ok(())
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut MockTable, Error> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name && !t.is_view)
            .ok_or_else(|| Error::QueryError(format!("Table '{}' doesn't exist", name)))
    }

    fn show_tables(&self, sql: &str) -> Vec<QueryRow> {
        let pattern = between(sql, "'", "'").unwrap_or_default();
        let prefix = pattern.trim_end_matches('%');
        let label = format!("Tables_in_{} ({})", self.db, pattern);
        self.tables
            .iter()
            .filter(|t| t.name.starts_with(prefix))
            .map(|t| QueryRow::from_pairs(&[(label.as_str(), Some(t.name.as_str()))]))
            .collect()
    }

    fn show_create_table(&self, sql: &str) -> Result<Vec<QueryRow>, Error> {
        let name = between(sql, "`", "`").unwrap_or_default();
        let table = self
            .get_table(name)
            .ok_or_else(|| Error::QueryError(format!("Table '{}' doesn't exist", name)))?;
        if table.is_view {
            let ddl = format!("CREATE VIEW `{}` AS select 1 AS `1`", name);
            return Ok(vec![QueryRow::from_pairs(&[
                ("View", Some(name)),
                ("Create View", Some(ddl.as_str())),
            ])]);
        }
        let ddl = table.create_table();
        Ok(vec![QueryRow::from_pairs(&[
            ("Table", Some(name)),
            ("Create Table", Some(ddl.as_str())),
        ])])
    }

    fn show_full_columns(&self, sql: &str) -> Result<Vec<QueryRow>, Error> {
        let name = between(sql, "`", "`").unwrap_or_default();
        let table = self
            .get_table(name)
            .ok_or_else(|| Error::QueryError(format!("Table '{}' doesn't exist", name)))?;
        Ok(table
            .columns
            .iter()
            .map(|c| {
                QueryRow::from_pairs(&[
                    ("Field", Some(c.field.as_str())),
                    ("Type", Some(c.column_type.as_str())),
                    ("Collation", c.collation.as_deref()),
                    ("Null", Some(if c.is_nullable { "YES" } else { "NO" })),
                    ("Key", Some("")),
                    ("Default", c.default_value.as_deref()),
                    ("Extra", Some("")),
                    ("Privileges", Some("select,insert,update,references")),
                    ("Comment", Some("")),
                ])
            })
            .collect())
    }

    fn alter_table(&mut self, sql: &str) -> Result<(), Error> {
        let name = between(sql, "`", "`").unwrap_or_default().to_string();
        let rest = sql
            .splitn(2, &format!("`{}` ", name))
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let table = self.table_mut(&name)?;

        if let Some(collation) = rest.strip_prefix("COLLATE=") {
            table.collation = Some(collation.to_string());
            return Ok(());
        }

        if rest.starts_with("DROP INDEX") {
            let index_name = between(&rest, "`", "`").unwrap_or_default();
            let before = table.fulltext_indexes.len();
            table.fulltext_indexes.retain(|(n, _)| n != index_name);
            if table.fulltext_indexes.len() == before {
                return Err(Error::QueryError(format!(
                    "Can't DROP '{}'; check that column/key exists",
                    index_name
                )));
            }
            return Ok(());
        }

        if rest.starts_with("CHANGE") {
            let field = between(&rest, "`", "`").unwrap_or_default().to_string();
            let collation = rest
                .split(" COLLATE ")
                .nth(1)
                .and_then(|s| s.split(' ').next())
                .unwrap_or_default()
                .to_string();
            let column = table
                .columns
                .iter_mut()
                .find(|c| c.field == field)
                .ok_or_else(|| Error::QueryError(format!("Unknown column '{}'", field)))?;
            column.collation = Some(collation);
            return Ok(());
        }

        Err(Error::QueryError(format!("unsupported statement: {}", sql)))
    }

    fn create_fulltext_index(&mut self, sql: &str) -> Result<(), Error> {
        // CREATE FULLTEXT INDEX `name` ON `table` (cols)
        let mut parts = sql.splitn(2, " ON ");
        let index_name = between(parts.next().unwrap_or_default(), "`", "`")
            .unwrap_or_default()
            .to_string();
        let target = parts.next().unwrap_or_default();
        let table_name = between(target, "`", "`").unwrap_or_default().to_string();
        let columns = target
            .splitn(2, "` ")
            .nth(1)
            .unwrap_or_default()
            .to_string();

        let table = self.table_mut(&table_name)?;
        if table.fulltext_indexes.iter().any(|(n, _)| *n == index_name) {
            return Err(Error::QueryError(format!(
                "Duplicate key name '{}'",
                index_name
            )));
        }
        table.fulltext_indexes.push((index_name, columns));
        Ok(())
    }
}

#[async_trait]
impl DbClient for ScriptedClient {
    async fn query(&mut self, sql: &str) -> Result<Vec<QueryRow>, Error> {
        self.queries.push(sql.to_string());
        self.check_faults(sql)?;

        if sql.starts_with("SHOW TABLES LIKE") {
            Ok(self.show_tables(sql))
        } else if sql.starts_with("SHOW CREATE TABLE") {
            self.show_create_table(sql)
        } else if sql.starts_with("SHOW FULL COLUMNS FROM") {
            self.show_full_columns(sql)
        } else {
            Err(Error::QueryError(format!("unsupported query: {}", sql)))
        }
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, Error> {
        self.executed.push(sql.to_string());
        self.check_faults(sql)?;

        if sql.starts_with("ALTER DATABASE") {
            self.db_collation = sql
                .split("COLLATE=")
                .nth(1)
                .unwrap_or_default()
                .to_string();
        } else if sql.starts_with("ALTER TABLE") {
            self.alter_table(sql)?;
        } else if sql.starts_with("CREATE FULLTEXT INDEX") {
            self.create_fulltext_index(sql)?;
        } else {
            return Err(Error::QueryError(format!("unsupported statement: {}", sql)));
        }
        Ok(0)
    }
}

fn between<'a>(s: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = s.find(start)? + start.len();
    let to = s[from..].find(end)? + from;
    Some(&s[from..to])
}
