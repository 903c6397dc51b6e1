use std::{
    fs::{self, File},
    io::Read,
    panic,
};

use cf_common::{
    config::{config_enums::RunMode, task_config::TaskConfig},
    log_error, log_finished, log_info,
};
use cf_connector::{mysql::mysql_client::MysqlClient, DbClient};
use log4rs::config::RawConfig;

use crate::{
    collation_migrator::{CollationMigrator, MigrationOutcome, MigrationRequest},
    task_util::TaskUtil,
};

const LOG_LEVEL_PLACEHODLER: &str = "LOG_LEVEL_PLACEHODLER";
const LOG_DIR_PLACEHODLER: &str = "LOG_DIR_PLACEHODLER";

// DDL on one catalog must not race, a single connection serializes everything
const MAX_CONNECTIONS: u32 = 1;

#[derive(Clone)]
pub struct TaskRunner {
    config: TaskConfig,
}

impl TaskRunner {
    pub fn new(task_config_file: &str) -> anyhow::Result<Self> {
        Ok(Self {
            config: TaskConfig::new(task_config_file)?,
        })
    }

    pub fn from_config(config: TaskConfig) -> Self {
        Self { config }
    }

    /// Request implied by the config: on demand runs report and may force,
    /// scheduled runs do neither.
    pub fn default_request(&self) -> MigrationRequest {
        let runtime = &self.config.runtime;
        let mut request = match runtime.mode {
            RunMode::Scheduled => MigrationRequest::scheduled(),
            RunMode::OnDemand => {
                let force_algorithm = if self.config.force.enabled {
                    Some(self.config.force.algorithm.clone())
                } else {
                    None
                };
                MigrationRequest::on_demand(force_algorithm)
            }
        };
        request.verbose = runtime.verbose;
        request.dry_run = runtime.dry_run;
        request
    }

    pub fn build_migrator(&self) -> CollationMigrator {
        CollationMigrator::new(
            &self.config.mysql.db,
            &self.config.mysql.table_prefix,
            self.config.collation.clone(),
        )
    }

    pub async fn start_task(
        &self,
        enable_log4rs: bool,
        request: &MigrationRequest,
    ) -> anyhow::Result<MigrationOutcome> {
        if enable_log4rs {
            self.init_log4rs()?;
        }

        panic::set_hook(Box::new(|panic_info| {
            let backtrace = std::backtrace::Backtrace::capture();
            log_error!("panic: {}\nbacktrace:\n{}", panic_info, backtrace);
        }));

        let mysql = &self.config.mysql;
        let conn_pool = TaskUtil::create_mysql_conn_pool(
            &mysql.url,
            MAX_CONNECTIONS,
            mysql.connect_timeout_secs,
            mysql.enable_sqlx_log,
        )
        .await?;
        let mut client = MysqlClient::new(conn_pool);

        log_info!("task starts, mode: {}", self.config.runtime.mode);
        let result = self.build_migrator().migrate(&mut client, request).await;
        client.close().await?;

        let outcome = result?;
        log_finished!("task finished, {}", outcome.counters);
        Ok(outcome)
    }

    fn init_log4rs(&self) -> anyhow::Result<()> {
        let log4rs_file = &self.config.runtime.log4rs_file;
        if fs::metadata(log4rs_file).is_err() {
            return Ok(());
        }

        let mut config_str = String::new();
        File::open(log4rs_file)?.read_to_string(&mut config_str)?;
        config_str = config_str
            .replace(LOG_DIR_PLACEHODLER, &self.config.runtime.log_dir)
            .replace(LOG_LEVEL_PLACEHODLER, &self.config.runtime.log_level);

        let config: RawConfig = serde_yaml::from_str(&config_str)?;
        log4rs::init_raw_config(config)?;
        Ok(())
    }
}
