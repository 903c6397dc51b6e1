pub mod collation_config;
pub mod config_enums;
pub mod ini_loader;
pub mod mysql_config;
pub mod runtime_config;
pub mod task_config;
