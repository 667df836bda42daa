//! Centralized reader for DATEKIT_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const LOG: &str = "DATEKIT_LOG";
const LOG_FORMAT: &str = "DATEKIT_LOG_FORMAT";
const CONFIG_DIR: &str = "DATEKIT_CONFIG_DIR";

/// Snapshot of all DATEKIT_* environment variables at load time.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnvVars {
    /// Log filter directive, e.g. "debug" or "datekit=trace" (default: warn).
    pub log: Option<String>,

    /// Log output format: "json" or unset for human-readable lines.
    pub log_format: Option<String>,

    /// Directory holding config.yaml, overriding the XDG location.
    pub config_dir: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all DATEKIT_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            log: non_empty_var(LOG),
            log_format: non_empty_var(LOG_FORMAT),
            config_dir: non_empty_var(CONFIG_DIR),
        }
    }

    /// Whether JSON log lines were requested.
    pub fn json_logs(&self) -> bool {
        self.log_format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}
