//! Config command implementation

use super::output::{Mark, Output};
use crate::utils::toml_config::{ConfigError, SiteQaConfig};
use std::fs;
use std::path::Path;

/// Resolve the configuration at `path` the way the server would and print it.
///
/// Returns `false` when the file cannot be parsed or, with `validate`, when
/// validation fails.
pub fn run(path: &Path, validate: bool, output: &Output) -> bool {
    output.section("Configuration");

    let config = match resolve(path) {
        Ok(Some(config)) => {
            output.field("file", &path.display().to_string());
            config
        }
        Ok(None) => {
            output.field("file", &path.display().to_string());
            output.mark(Mark::Note, "file not found, showing defaults");
            SiteQaConfig::default()
        }
        Err(e) => {
            output.mark(Mark::Fail, &e.to_string());
            return false;
        }
    };

    print_config(&config, output);

    if !validate {
        return true;
    }

    output.section("Validation");
    match config.validate() {
        Ok(()) => {
            output.mark(Mark::Ok, "Configuration is valid");
            true
        }
        Err(e) => {
            output.mark(Mark::Fail, &e.to_string());
            if let ConfigError::MissingEnvVar(var) = &e {
                output.tip(&format!("Set {} in the environment or in .env", var));
            }
            false
        }
    }
}

fn resolve(path: &Path) -> Result<Option<SiteQaConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    SiteQaConfig::from_toml_str(&content).map(Some)
}

fn print_config(config: &SiteQaConfig, output: &Output) {
    output.section("Server");
    output.field("listen", &config.listen_addr());
    output.field("log_level", &config.server.log_level);
    output.field("log_format", &config.server.log_format);

    output.section("OpenAI");
    output.field("api_base", &config.openai.api_base);
    output.field("api_key_env", &config.openai.api_key_env);
    output.field("model", &config.openai.model);
    output.field("assistant_name", &config.openai.assistant_name);
    output.field("vector_store_name", &config.openai.vector_store_name);
    output.field(
        "poll_interval",
        &format!("{} ms", config.openai.poll_interval_ms),
    );

    output.section("Scrape");
    output.field("separator", &format!("{:?}", config.scrape.separator));
    output.field("include_images", &config.scrape.include_images.to_string());
    if let Some(selector) = &config.scrape.selector {
        output.field("selector", selector);
    }
    output.field("cleanup rules", &config.scrape.cleanup.len().to_string());
    for rule in &config.scrape.cleanup {
        output.bullet(&rule.name);
    }
}
