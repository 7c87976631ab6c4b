/// Settings for a load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Per-folder metadata file name.
    pub metadata_file: String,
    /// Database file created inside the destination directory.
    pub database_file: String,
    /// Delete all rows from the target tables before loading.
    pub reset: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            metadata_file: "photos.json".to_string(),
            database_file: "Photos.db".to_string(),
            reset: true,
        }
    }
}

impl IngestConfig {
    /// Defaults overridden by `PHOTOLOAD_METADATA_FILE`, `PHOTOLOAD_DATABASE_FILE`
    /// and `PHOTOLOAD_NO_RESET`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup("PHOTOLOAD_METADATA_FILE").filter(|v| !v.is_empty()) {
            config.metadata_file = name;
        }
        if let Some(name) = lookup("PHOTOLOAD_DATABASE_FILE").filter(|v| !v.is_empty()) {
            config.database_file = name;
        }
        if lookup("PHOTOLOAD_NO_RESET").is_some_and(|v| !v.is_empty()) {
            config.reset = false;
        }
        config
    }
}
