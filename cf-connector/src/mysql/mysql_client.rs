use async_trait::async_trait;
use cf_common::{error::Error, log_debug, meta::query_row::QueryRow};
use futures::TryStreamExt;
use sqlx::{mysql::MySqlRow, Column, Executor, MySql, Pool, Row};

use crate::{close_conn_pool, DbClient};

#[derive(Clone)]
pub struct MysqlClient {
    pub conn_pool: Pool<MySql>,
}

#[async_trait]
impl DbClient for MysqlClient {
    async fn query(&mut self, sql: &str) -> Result<Vec<QueryRow>, Error> {
        log_debug!("mysql query sql: {}", sql);
        // a plain &str goes through the text protocol, SHOW statements can not be prepared
        let mut rows = (&self.conn_pool).fetch(sql);

        let mut results = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(Error::from_sqlx)? {
            results.push(Self::to_query_row(&row)?);
        }
        Ok(results)
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, Error> {
        log_debug!("mysql execute sql: {}", sql);
        let result = (&self.conn_pool)
            .execute(sql)
            .await
            .map_err(Error::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn close(&mut self) -> Result<(), Error> {
        close_conn_pool!(self)
    }
}

impl MysqlClient {
    pub fn new(conn_pool: Pool<MySql>) -> Self {
        Self { conn_pool }
    }

    fn to_query_row(row: &MySqlRow) -> Result<QueryRow, Error> {
        let mut columns = Vec::with_capacity(row.len());
        let mut values = Vec::with_capacity(row.len());
        for (i, col) in row.columns().iter().enumerate() {
            columns.push(col.name().to_string());
            values.push(Self::get_str_with_null(row, i)?);
        }
        Ok(QueryRow::new(columns, values))
    }

    fn get_str_with_null(row: &MySqlRow, index: usize) -> Result<Option<String>, Error> {
        if let Ok(value) = row.try_get::<Option<String>, _>(index) {
            return Ok(value);
        }
        // binary collated catalog columns come back as bytes
        let value: Option<Vec<u8>> = row.try_get(index).map_err(Error::from_sqlx)?;
        Ok(value.map(|v| String::from_utf8_lossy(&v).to_string()))
    }
}
