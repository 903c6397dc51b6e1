use anyhow::bail;
use cf_common::{
    config::collation_config::CollationConfig,
    error::Error,
    log_error, log_info, log_warn,
    meta::migration_counters::MigrationCounters,
    utils::sql_util::SqlUtil,
};
use cf_connector::{meta_fetcher::mysql_schema_fetcher::MysqlSchemaFetcher, DbClient};

use crate::{collation_planner::CollationPlanner, ddl_executor::DdlExecutor, reporter::Reporter};

/// Per run flags. A scheduled run is silent and never forces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationRequest {
    pub report: bool,
    pub verbose: bool,
    pub dry_run: bool,
    pub force_algorithm: Option<String>,
}

impl MigrationRequest {
    pub fn scheduled() -> Self {
        Self::default()
    }

    pub fn on_demand(force_algorithm: Option<String>) -> Self {
        Self {
            report: true,
            force_algorithm,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MigrationOutcome {
    pub counters: MigrationCounters,
    pub report: Vec<String>,
    pub statements: Vec<String>,
}

/// A run stopped by a lost connection, carrying what was done until then.
#[derive(Debug, thiserror::Error)]
#[error("collation migration aborted, {}: {}", .outcome.counters, .source)]
pub struct MigrationAborted {
    pub outcome: MigrationOutcome,
    #[source]
    pub source: Error,
}

pub struct CollationMigrator {
    pub db: String,
    pub table_prefix: String,
    pub collation: CollationConfig,
}

impl CollationMigrator {
    pub fn new(db: &str, table_prefix: &str, collation: CollationConfig) -> Self {
        Self {
            db: db.to_string(),
            table_prefix: table_prefix.to_string(),
            collation,
        }
    }

    /// Runs the whole migration on one connection: database collation, then
    /// each table carrying the prefix. Counters start from zero on every call.
    pub async fn migrate(
        &self,
        client: &mut dyn DbClient,
        request: &MigrationRequest,
    ) -> anyhow::Result<MigrationOutcome> {
        if let Some(algorithm) = &request.force_algorithm {
            if !SqlUtil::is_valid_collation(algorithm) {
                bail! {Error::ConfigError(format!(
                    "force algorithm: {} is not a valid collation name",
                    algorithm
                ))}
            }
        }

        let planner = CollationPlanner::new(&self.collation, request.force_algorithm.clone());
        let mut executor = DdlExecutor::new(
            request.dry_run,
            Reporter::new(request.report, request.verbose),
        );
        log_info!(
            "collation migration starts, db: {}, prefix: {}, target: {}, force: {:?}",
            self.db,
            self.table_prefix,
            planner.target,
            planner.force_algorithm
        );

        if let Some(algorithm) = &planner.force_algorithm {
            executor
                .reporter
                .report(format!("Forcing Collation Algorithm to: {}.", algorithm));
        }

        let result = self.migrate_tables(client, &planner, &mut executor).await;
        executor.reporter.report(executor.counters.to_string());
        let outcome = MigrationOutcome {
            counters: executor.counters,
            report: executor.reporter.lines,
            statements: executor.statements,
        };

        match result {
            Ok(()) => {
                log_info!("collation migration finished, {}", outcome.counters);
                Ok(outcome)
            }
            Err(source) => {
                log_error!(
                    "collation migration aborted, {}, error: {}",
                    outcome.counters,
                    source
                );
                Err(MigrationAborted { outcome, source }.into())
            }
        }
    }

    async fn migrate_tables(
        &self,
        client: &mut dyn DbClient,
        planner: &CollationPlanner,
        executor: &mut DdlExecutor,
    ) -> Result<(), Error> {
        executor
            .execute_database(client, &planner.plan_database(&self.db))
            .await?;

        let tables = MysqlSchemaFetcher::fetch_tables(client, &self.table_prefix).await?;
        for table_name in tables.iter() {
            match self
                .migrate_table(client, planner, executor, table_name)
                .await
            {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    log_error!("skip table: {}, error: {}", table_name, e);
                    executor
                        .reporter
                        .report(format!("- skipped, failed to inspect table: {}", e));
                }
            }
        }
        Ok(())
    }

    async fn migrate_table(
        &self,
        client: &mut dyn DbClient,
        planner: &CollationPlanner,
        executor: &mut DdlExecutor,
        table_name: &str,
    ) -> Result<(), Error> {
        log_info!("checking table: {}", table_name);
        executor
            .reporter
            .report(format!("Checking table \"{}\"...", table_name));

        let table = match MysqlSchemaFetcher::fetch_table_meta(client, table_name).await? {
            Some(table) => table,
            None => {
                log_warn!("{} is not a base table, skip it", table_name);
                executor.reporter.report("- not a base table, skipped.");
                return Ok(());
            }
        };
        let columns = MysqlSchemaFetcher::fetch_columns(client, table_name).await?;

        let plan = planner.plan_table(&table, &columns);
        executor.execute_table_plan(client, &plan).await
    }
}
