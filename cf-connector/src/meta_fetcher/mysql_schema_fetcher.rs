use cf_common::{
    error::Error,
    meta::{column_meta::ColumnMeta, table_meta::TableMeta},
    utils::sql_util::SqlUtil,
};

use crate::DbClient;

const CREATE_TABLE: &str = "Create Table";

/// Read only catalog queries: table list, DDL text and column definitions.
pub struct MysqlSchemaFetcher {}

impl MysqlSchemaFetcher {
    pub async fn fetch_tables(
        client: &mut dyn DbClient,
        table_prefix: &str,
    ) -> Result<Vec<String>, Error> {
        let sql = format!(
            "SHOW TABLES LIKE '{}'",
            SqlUtil::prefix_like_pattern(table_prefix)
        );
        let rows = client.query(&sql).await?;

        // the only column is labelled "Tables_in_<db> (<pattern>)"
        Ok(rows
            .iter()
            .filter_map(|row| row.get_by_index(0))
            .map(|tb| tb.to_string())
            .collect())
    }

    /// None when the object has no `Create Table` text, e.g. a view
    pub async fn fetch_table_meta(
        client: &mut dyn DbClient,
        table_name: &str,
    ) -> Result<Option<TableMeta>, Error> {
        let sql = format!("SHOW CREATE TABLE {}", SqlUtil::escape(table_name));
        let rows = client.query(&sql).await?;

        let row = match rows.first() {
            Some(row) => row,
            None => {
                return Err(Error::MetadataError(format!(
                    "no result for: {}",
                    sql
                )))
            }
        };

        if !row.has_column(CREATE_TABLE) {
            return Ok(None);
        }
        Ok(Some(TableMeta::new(
            table_name,
            &row.get_str_with_null(CREATE_TABLE),
        )))
    }

    pub async fn fetch_columns(
        client: &mut dyn DbClient,
        table_name: &str,
    ) -> Result<Vec<ColumnMeta>, Error> {
        let sql = format!("SHOW FULL COLUMNS FROM {}", SqlUtil::escape(table_name));
        let rows = client.query(&sql).await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            columns.push(ColumnMeta {
                table_name: table_name.to_string(),
                field: row.get_str_with_null("Field"),
                column_type: row.get_str_with_null("Type"),
                collation: row.get("Collation").map(|c| c.to_string()),
                is_nullable: row.get("Null") != Some("NO"),
                default_value: row.get("Default").map(|d| d.to_string()),
            });
        }
        Ok(columns)
    }
}
