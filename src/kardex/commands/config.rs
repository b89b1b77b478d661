use crate::commands::{CmdMessage, CmdResult};
use crate::config::KardexConfig;
use crate::error::Result;
use std::path::Path;

const KNOWN_KEYS: &str = "api-url, page-size, timeout-secs, cache-max-age-secs";

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut config = KardexConfig::load(config_dir)?;

    match action {
        ConfigAction::ShowAll => {
            result.config = Some(config);
        }
        ConfigAction::ShowKey(key) => match key.as_str() {
            "api-url" => result.add_message(CmdMessage::info(config.api_url)),
            "page-size" => result.add_message(CmdMessage::info(config.page_size.to_string())),
            "timeout-secs" => result.add_message(CmdMessage::info(config.timeout_secs.to_string())),
            "cache-max-age-secs" => {
                result.add_message(CmdMessage::info(config.cache_max_age_secs.to_string()))
            }
            other => result.add_message(CmdMessage::error(format!(
                "Unknown config key: {other} (known keys: {KNOWN_KEYS})"
            ))),
        },
        ConfigAction::Set(key, value) => {
            match key.as_str() {
                "api-url" => config.api_url = value.clone(),
                "page-size" => match value.parse() {
                    Ok(size) => config.set_page_size(size),
                    Err(_) => {
                        result.add_message(CmdMessage::error(format!(
                            "page-size must be a positive integer, got \"{value}\""
                        )));
                        return Ok(result);
                    }
                },
                "timeout-secs" => match value.parse() {
                    Ok(secs) => config.timeout_secs = secs,
                    Err(_) => {
                        result.add_message(CmdMessage::error(format!(
                            "timeout-secs must be a number of seconds, got \"{value}\""
                        )));
                        return Ok(result);
                    }
                },
                "cache-max-age-secs" => match value.parse() {
                    Ok(secs) => config.cache_max_age_secs = secs,
                    Err(_) => {
                        result.add_message(CmdMessage::error(format!(
                            "cache-max-age-secs must be a number of seconds, got \"{value}\""
                        )));
                        return Ok(result);
                    }
                },
                other => {
                    result.add_message(CmdMessage::error(format!(
                        "Unknown config key: {other} (known keys: {KNOWN_KEYS})"
                    )));
                    return Ok(result);
                }
            }
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("{key} set to {value}")));
        }
    }

    Ok(result)
}
