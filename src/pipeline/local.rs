use std::collections::HashMap;

use crate::app::Cli;
use crate::config;
use crate::prelude::*;

use super::provider::Pipeline;

/// Pipeline implementation for running the uploader by hand, outside any CI
/// provider. Inputs come from the CLI flags, outputs go to the log.
pub struct LocalPipeline {
    inputs: HashMap<&'static str, String>,
}

impl From<&Cli> for LocalPipeline {
    fn from(cli: &Cli) -> Self {
        let mut inputs = HashMap::new();
        let mut insert = |name: &'static str, value: &Option<String>| {
            if let Some(value) = value {
                inputs.insert(name, value.clone());
            }
        };
        insert(config::UPLOAD_TOKEN_INPUT, &cli.upload_token);
        insert(config::API_KEY_INPUT, &cli.api_key);
        insert(config::REPORT_PATH_INPUT, &cli.report_path);
        insert(config::API_ENDPOINT_INPUT, &cli.api_endpoint);
        insert(config::COMMIT_SHA_INPUT, &cli.commit_sha);
        insert(config::BRANCH_INPUT, &cli.branch);
        insert(config::TEST_FRAMEWORK_INPUT, &cli.test_framework);
        insert(config::TEST_SUITE_INPUT, &cli.test_suite);
        Self { inputs }
    }
}

impl Pipeline for LocalPipeline {
    fn setup_logger(&self) -> Result<()> {
        let log_level = std::env::var("GAFFER_LOG")
            .ok()
            .and_then(|log_level| log_level.parse::<log::LevelFilter>().ok())
            .unwrap_or(log::LevelFilter::Info);

        let config = simplelog::ConfigBuilder::new()
            .set_time_level(log::LevelFilter::Debug)
            .build();

        simplelog::TermLogger::init(
            log_level,
            config,
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
        .context("Failed to install the local logger")?;
        Ok(())
    }

    fn get_provider_slug(&self) -> &'static str {
        "local"
    }

    fn input(&self, name: &str) -> String {
        self.inputs.get(name).cloned().unwrap_or_default()
    }

    fn set_output(&self, key: &str, value: &str) -> Result<()> {
        info!("{key}={value}");
        Ok(())
    }
}
