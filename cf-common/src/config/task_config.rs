use anyhow::{bail, Context};

use crate::{error::Error, utils::sql_util::SqlUtil};

use super::{
    collation_config::{CollationConfig, ForceConfig, DEFAULT_TARGET_COLLATION},
    config_enums::RunMode,
    ini_loader::IniLoader,
    mysql_config::MysqlConfig,
    runtime_config::RuntimeConfig,
};

#[derive(Clone, Debug)]
pub struct TaskConfig {
    pub mysql: MysqlConfig,
    pub collation: CollationConfig,
    pub force: ForceConfig,
    pub runtime: RuntimeConfig,
}

const MYSQL: &str = "mysql";
const COLLATION: &str = "collation";
const FORCE: &str = "force";
const RUNTIME: &str = "runtime";
const ALGORITHM: &str = "algorithm";

impl TaskConfig {
    pub fn new(task_config_file: &str) -> anyhow::Result<Self> {
        let loader = IniLoader::new(task_config_file)?;
        Self::from_loader(&loader)
            .with_context(|| format!("invalid configs in [{}]", task_config_file))
    }

    pub fn from_loader(loader: &IniLoader) -> anyhow::Result<Self> {
        Ok(Self {
            mysql: Self::load_mysql_config(loader)?,
            collation: Self::load_collation_config(loader)?,
            force: Self::load_force_config(loader)?,
            runtime: Self::load_runtime_config(loader)?,
        })
    }

    fn load_mysql_config(loader: &IniLoader) -> anyhow::Result<MysqlConfig> {
        Ok(MysqlConfig {
            url: loader.get_required(MYSQL, "url")?,
            db: loader.get_required(MYSQL, "db")?,
            table_prefix: loader.get_optional(MYSQL, "table_prefix")?,
            connect_timeout_secs: loader.get_with_default(MYSQL, "connect_timeout_secs", 10)?,
            enable_sqlx_log: loader.get_optional(MYSQL, "enable_sqlx_log")?,
        })
    }

    fn load_collation_config(loader: &IniLoader) -> anyhow::Result<CollationConfig> {
        let default = CollationConfig::default();
        let config = CollationConfig {
            target: loader.get_with_default(COLLATION, "target", default.target)?,
            db_collate: loader.get_optional(COLLATION, "db_collate")?,
            undesired: loader
                .get_list(COLLATION, "undesired")
                .unwrap_or(default.undesired),
        };

        Self::check_collation("target", &config.target)?;
        if !config.db_collate.is_empty() {
            Self::check_collation("db_collate", &config.db_collate)?;
        }
        for collation in config.undesired.iter() {
            Self::check_collation("undesired", collation)?;
        }
        Ok(config)
    }

    fn load_force_config(loader: &IniLoader) -> anyhow::Result<ForceConfig> {
        let config = ForceConfig {
            enabled: loader.get_optional(FORCE, "enabled")?,
            algorithm: loader.get_with_default(
                FORCE,
                ALGORITHM,
                DEFAULT_TARGET_COLLATION.to_string(),
            )?,
        };
        Self::check_collation(ALGORITHM, &config.algorithm)?;
        Ok(config)
    }

    fn load_runtime_config(loader: &IniLoader) -> anyhow::Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            mode: loader.get_with_default(RUNTIME, "mode", RunMode::Scheduled)?,
            verbose: loader.get_optional(RUNTIME, "verbose")?,
            dry_run: loader.get_optional(RUNTIME, "dry_run")?,
            log_level: loader.get_with_default(RUNTIME, "log_level", "info".to_string())?,
            log_dir: loader.get_with_default(RUNTIME, "log_dir", "./logs".to_string())?,
            log4rs_file: loader.get_with_default(
                RUNTIME,
                "log4rs_file",
                "./log4rs.yaml".to_string(),
            )?,
        })
    }

    fn check_collation(key: &str, collation: &str) -> anyhow::Result<()> {
        if !SqlUtil::is_valid_collation(collation) {
            bail! {Error::ConfigError(format!(
                "{}={} is not a valid collation name",
                key, collation
            ))}
        }
        Ok(())
    }
}
