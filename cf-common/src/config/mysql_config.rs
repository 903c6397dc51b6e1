#[derive(Clone, Debug)]
pub struct MysqlConfig {
    pub url: String,
    pub db: String,
    pub table_prefix: String,
    pub connect_timeout_secs: u64,
    pub enable_sqlx_log: bool,
}
