mod logger;
mod provider;

pub use self::provider::Pipeline;

use crate::app::Cli;
use github_actions::GithubActionsPipeline;
use local::LocalPipeline;
use provider::PipelineDetector;

// Provider implementations
mod github_actions;
mod local;

pub fn get_pipeline(cli: &Cli) -> Box<dyn Pipeline> {
    if GithubActionsPipeline::detect() {
        return Box::new(GithubActionsPipeline);
    }

    Box::new(LocalPipeline::from(cli))
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::prelude::*;

    use super::Pipeline;

    /// In-memory pipeline recording outputs and failure reports, for
    /// exercising the stages without a CI environment.
    #[derive(Default)]
    pub struct MockPipeline {
        inputs: HashMap<String, String>,
        pub outputs: RefCell<Vec<(String, String)>>,
        pub failures: RefCell<Vec<String>>,
    }

    impl MockPipeline {
        pub fn with_inputs<const N: usize>(inputs: [(&str, &str); N]) -> Self {
            Self {
                inputs: inputs
                    .into_iter()
                    .map(|(name, value)| (name.to_owned(), value.to_owned()))
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl Pipeline for MockPipeline {
        fn setup_logger(&self) -> Result<()> {
            Ok(())
        }

        fn get_provider_slug(&self) -> &'static str {
            "mock"
        }

        fn input(&self, name: &str) -> String {
            self.inputs.get(name).cloned().unwrap_or_default()
        }

        fn set_output(&self, key: &str, value: &str) -> Result<()> {
            self.outputs
                .borrow_mut()
                .push((key.to_owned(), value.to_owned()));
            Ok(())
        }

        fn report_failure(&self, message: &str) {
            self.failures.borrow_mut().push(message.to_owned());
        }
    }
}
