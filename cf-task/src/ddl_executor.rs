use cf_common::{
    error::Error,
    log_error, log_info,
    meta::{
        fulltext_index::FullTextIndex, migration_counters::MigrationCounters,
        statement::collation_statement::CollationStatement,
    },
};
use cf_connector::DbClient;

use crate::{collation_planner::TablePlan, reporter::Reporter};

const NO_ALTERATIONS: &str = "- no ALTERations required.";

pub struct DdlExecutor {
    pub dry_run: bool,
    pub counters: MigrationCounters,
    pub reporter: Reporter,
    /// statements in the order they were sent (or would have been, in dry run)
    pub statements: Vec<String>,
}

impl DdlExecutor {
    pub fn new(dry_run: bool, reporter: Reporter) -> Self {
        Self {
            dry_run,
            counters: MigrationCounters::default(),
            reporter,
            statements: Vec::new(),
        }
    }

    /// Ok(true) once applied, Ok(false) when the database rejected the
    /// statement, Err only for a lost connection.
    pub async fn execute(
        &mut self,
        client: &mut dyn DbClient,
        statement: &CollationStatement,
    ) -> Result<bool, Error> {
        let sql = statement.to_sql();
        self.reporter.report_sql(&sql);
        self.statements.push(sql.clone());

        if self.dry_run {
            log_info!("dry run, skip sql: {}", sql);
            return Ok(true);
        }

        match client.execute(&sql).await {
            Ok(_) => {
                log_info!("execute sql: [{}] success", sql);
                Ok(true)
            }
            Err(e) => {
                log_error!("execute sql: [{}] failed: {}", sql, e);
                self.counters.failed_count += 1;
                if e.is_fatal() {
                    Err(e)
                } else {
                    Ok(false)
                }
            }
        }
    }

    pub async fn execute_database(
        &mut self,
        client: &mut dyn DbClient,
        statement: &CollationStatement,
    ) -> Result<(), Error> {
        self.reporter.report(statement.describe());
        self.execute(client, statement).await?;
        Ok(())
    }

    /// Dropped fulltext indexes are recreated whatever happened in between,
    /// the first error is returned afterwards.
    pub async fn execute_table_plan(
        &mut self,
        client: &mut dyn DbClient,
        plan: &TablePlan,
    ) -> Result<(), Error> {
        let mut dropped = Vec::with_capacity(plan.fulltext_indexes.len());
        let altered = self.drop_and_alter(client, plan, &mut dropped).await;
        let restored = self.restore_indexes(client, plan, &dropped).await;
        altered.and(restored)
    }

    async fn drop_and_alter(
        &mut self,
        client: &mut dyn DbClient,
        plan: &TablePlan,
        dropped: &mut Vec<FullTextIndex>,
    ) -> Result<(), Error> {
        self.counters.index_count += plan.fulltext_indexes.len() as u64;
        for index in plan.fulltext_indexes.iter() {
            let statement = plan.drop_index_statement(index);
            self.reporter.report(statement.describe());
            if self.execute(client, &statement).await? {
                dropped.push(index.clone());
            }
        }

        match &plan.alter_table {
            Some(statement) => {
                self.reporter.report(statement.describe());
                if self.execute(client, statement).await? {
                    self.counters.table_count += 1;
                }
            }
            None => self.reporter.report(NO_ALTERATIONS),
        }

        // a rejected column does not stop the remaining ones
        for statement in plan.change_columns.iter() {
            self.reporter.report(statement.describe());
            if self.execute(client, statement).await? {
                self.counters.column_count += 1;
            }
        }
        Ok(())
    }

    async fn restore_indexes(
        &mut self,
        client: &mut dyn DbClient,
        plan: &TablePlan,
        dropped: &[FullTextIndex],
    ) -> Result<(), Error> {
        let mut result = Ok(());
        for index in dropped {
            let statement = plan.create_index_statement(index);
            self.reporter.report(statement.describe());
            if let Err(e) = self.execute(client, &statement).await {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}
