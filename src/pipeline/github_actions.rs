use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use crate::prelude::*;

use super::logger::GithubActionLogger;
use super::provider::{Pipeline, PipelineDetector};

pub struct GithubActionsPipeline;

/// Maps an action input name to the environment variable the Actions runner
/// exposes it through: name uppercased, spaces replaced with underscores,
/// prefixed with `INPUT_`.
fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl PipelineDetector for GithubActionsPipeline {
    fn detect() -> bool {
        env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
    }
}

impl Pipeline for GithubActionsPipeline {
    fn setup_logger(&self) -> Result<()> {
        log::set_boxed_logger(Box::new(GithubActionLogger::new()))
            .context("Failed to install the GitHub Actions logger")?;
        // The logger filters on its own level, computed from the runner env
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    fn get_provider_slug(&self) -> &'static str {
        "github-actions"
    }

    fn input(&self, name: &str) -> String {
        env::var(input_env_name(name))
            .map(|value| value.trim().to_owned())
            .unwrap_or_default()
    }

    fn set_output(&self, key: &str, value: &str) -> Result<()> {
        let output_path = env::var("GITHUB_OUTPUT")
            .map_err(|_| anyhow!("GITHUB_OUTPUT environment variable not found"))?;
        let mut output_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&output_path)
            .context(format!("Failed to open output file at {output_path}"))?;
        writeln!(output_file, "{key}={value}")?;
        Ok(())
    }
}
