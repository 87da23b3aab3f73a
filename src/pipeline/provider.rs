use crate::prelude::*;

pub trait PipelineDetector {
    /// Detects if the current process is running inside the pipeline provider.
    fn detect() -> bool;
}

/// `Pipeline` is the seam between the uploader and the CI pipeline it runs in:
/// string-keyed input lookup on the way in, an output sink and a failure sink
/// on the way out.
pub trait Pipeline {
    /// Registers the logger matching the pipeline provider.
    fn setup_logger(&self) -> Result<()>;

    /// Returns the slug of the pipeline provider.
    fn get_provider_slug(&self) -> &'static str;

    /// Returns the value of a named pipeline input, or an empty string when
    /// the input is unset.
    fn input(&self, name: &str) -> String;

    /// Publishes a key/value output of the run.
    fn set_output(&self, key: &str, value: &str) -> Result<()>;

    /// Signals the run as failed, carrying the error message.
    ///
    /// The actual failure signal towards the pipeline is the process exit
    /// code; this only reports the message.
    fn report_failure(&self, message: &str) {
        error!("{message}");
    }
}
