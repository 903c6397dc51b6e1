use super::config_enums::RunMode;

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub mode: RunMode,
    pub verbose: bool,
    pub dry_run: bool,
    pub log_level: String,
    pub log_dir: String,
    pub log4rs_file: String,
}
