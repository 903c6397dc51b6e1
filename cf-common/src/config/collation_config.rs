pub const DEFAULT_TARGET_COLLATION: &str = "utf8mb4_unicode_ci";
pub const DEFAULT_UNDESIRED_COLLATIONS: [&str; 2] = ["utf8mb4_unicode_520_ci", "utf8_unicode_520_ci"];
/// algorithms offered to operators when forcing
pub const SUGGESTED_FORCE_ALGORITHMS: [&str; 4] = [
    "utf8mb4_unicode_ci",
    "utf8mb4_general_ci",
    "utf8_unicode_ci",
    "utf8_general_ci",
];

#[derive(Clone, Debug)]
pub struct CollationConfig {
    pub target: String,
    /// site level override, same meaning as DB_COLLATE
    pub db_collate: String,
    pub undesired: Vec<String>,
}

impl Default for CollationConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET_COLLATION.to_string(),
            db_collate: String::new(),
            undesired: DEFAULT_UNDESIRED_COLLATIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl CollationConfig {
    pub fn is_undesired(&self, collation: &str) -> bool {
        self.undesired.iter().any(|c| c == collation)
    }

    /// The override wins unless it is empty or itself undesired.
    pub fn resolve_target(&self) -> String {
        if !self.db_collate.is_empty() && !self.is_undesired(&self.db_collate) {
            return self.db_collate.clone();
        }
        self.target.clone()
    }
}

#[derive(Clone, Debug)]
pub struct ForceConfig {
    pub enabled: bool,
    pub algorithm: String,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            algorithm: DEFAULT_TARGET_COLLATION.to_string(),
        }
    }
}
