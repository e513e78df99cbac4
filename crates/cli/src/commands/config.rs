use orderdesk_core::config::{AppConfig, LoadOptions};

/// Render the effective configuration with secrets redacted. Always exits
/// zero: an invalid config is itself useful output here.
pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("configuration is invalid: {error}"),
    };

    let api_key = if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" };
    let base_url = config.llm.base_url.as_deref().unwrap_or("<provider default>");

    [
        format!("database.url = {}", config.database.url),
        format!("database.max_connections = {}", config.database.max_connections),
        format!("database.timeout_secs = {}", config.database.timeout_secs),
        format!("llm.provider = {:?}", config.llm.provider),
        format!("llm.model = {}", config.llm.model),
        format!("llm.base_url = {base_url}"),
        format!("llm.api_key = {api_key}"),
        format!("llm.timeout_secs = {}", config.llm.timeout_secs),
        format!(
            "llm.budgets = classify:{} extract:{} answer:{}",
            config.llm.budgets.classify, config.llm.budgets.extract, config.llm.budgets.answer
        ),
        format!("logging.level = {}", config.logging.level),
        format!("logging.format = {:?}", config.logging.format),
    ]
    .join("\n")
}
