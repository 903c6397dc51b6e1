pub mod meta_fetcher;
pub mod mysql;

use async_trait::async_trait;
use cf_common::{error::Error, meta::query_row::QueryRow};

/// The single database handle a migration runs on. Statements are sent one
/// at a time, each committing on its own.
#[async_trait]
pub trait DbClient: Send {
    async fn query(&mut self, sql: &str) -> Result<Vec<QueryRow>, Error>;

    /// returns affected rows
    async fn execute(&mut self, sql: &str) -> Result<u64, Error>;

    async fn close(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

#[macro_export(local_inner_macros)]
macro_rules! close_conn_pool {
    ($self:ident) => {
        if $self.conn_pool.is_closed() {
            Ok(())
        } else {
            Ok($self.conn_pool.close().await)
        }
    };
}
