use dentquote_core::AppConfig;

pub const OPERATOR_ID_VAR: &str = "DENTQUOTE_OPERATOR_ID";
pub const LOG_FORMAT_VAR: &str = "DENTQUOTE_LOG_FORMAT";

/// Everything the binary reads from its environment.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app: AppConfig,
    /// Operator stamped on quotes committed in live mode. Live creates are
    /// refused without one.
    pub operator_id: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = AppConfig::from_lookup(&lookup)?;
        let operator_id = lookup(OPERATOR_ID_VAR)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Ok(Self { app, operator_id })
    }
}
