use clap::Parser;

use crate::config::Config;
use crate::pipeline::{self, Pipeline};
use crate::prelude::*;
use crate::uploader::{API_VERSION, HttpTransport, Transport, UploadForm, UploadResponse};

#[derive(Parser, Debug)]
#[command(version, about = "Uploads test reports to Gaffer")]
pub struct Cli {
    /// The Gaffer upload token
    #[arg(long, env = "GAFFER_UPLOAD_TOKEN")]
    pub upload_token: Option<String>,

    /// Deprecated alias of --upload-token
    #[arg(long, env = "GAFFER_API_KEY", hide = true)]
    pub api_key: Option<String>,

    /// Path to the test report file or directory to upload
    #[arg(long, env = "GAFFER_REPORT_PATH")]
    pub report_path: Option<String>,

    /// Override the upload endpoint, useful for on-premises installations
    #[arg(long, env = "GAFFER_API_ENDPOINT", hide = true)]
    pub api_endpoint: Option<String>,

    /// Commit SHA to tag the test run with
    #[arg(long)]
    pub commit_sha: Option<String>,

    /// Branch name to tag the test run with
    #[arg(long)]
    pub branch: Option<String>,

    /// Test framework to tag the test run with
    #[arg(long)]
    pub test_framework: Option<String>,

    /// Test suite to tag the test run with
    #[arg(long)]
    pub test_suite: Option<String>,
}

pub async fn run() -> Result<bool> {
    let cli = Cli::parse();
    let pipeline = pipeline::get_pipeline(&cli);
    pipeline.setup_logger()?;
    debug!("Pipeline provider detected: {}", pipeline.get_provider_slug());

    execute(pipeline.as_ref(), &HttpTransport).await
}

/// One pass: resolve inputs, build the payload, upload it. Exactly one
/// terminal signal reaches the pipeline — the `status=success` output or a
/// single failure report, never both.
async fn execute(pipeline: &dyn Pipeline, transport: &dyn Transport) -> Result<bool> {
    match try_upload(pipeline, transport).await {
        Ok(response) => {
            debug!("Upload response ({}): {}", response.status, response.body);
            pipeline.set_output("status", "success")?;
            Ok(true)
        }
        Err(err) => {
            pipeline.report_failure(&err.to_string());
            Ok(false)
        }
    }
}

async fn try_upload(pipeline: &dyn Pipeline, transport: &dyn Transport) -> Result<UploadResponse> {
    debug!("Beginning Gaffer upload...");
    let config = Config::resolve(pipeline)?;

    info!("Packaging test report from {}", config.report_path.display());
    let form = UploadForm::build(&config.report_path, &config.tags, API_VERSION)?;

    info!(
        "Uploading {} file(s) to {}",
        form.files.len(),
        config.upload_url
    );
    let response = transport.send(form, &config.token, &config.upload_url).await?;
    info!("Test report uploaded");

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use crate::pipeline::testing::MockPipeline;
    use crate::uploader::UploadForm;
    use url::Url;

    struct MockTransport {
        failure: Option<String>,
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(
            &self,
            _form: UploadForm,
            _token: &str,
            _endpoint: &Url,
        ) -> Result<UploadResponse, UploadError> {
            match &self.failure {
                Some(message) => Err(UploadError::Transport(message.clone())),
                None => Ok(UploadResponse {
                    status: reqwest::StatusCode::OK,
                    body: "{}".into(),
                }),
            }
        }
    }

    fn pipeline_with_report(report_path: &str) -> MockPipeline {
        MockPipeline::with_inputs([
            ("upload-token", "the-token"),
            ("report-path", report_path),
            ("branch", "main"),
        ])
    }

    #[tokio::test]
    async fn test_successful_run_sets_status_output() {
        let report = tempfile::NamedTempFile::new().unwrap();
        let pipeline = pipeline_with_report(report.path().to_str().unwrap());
        let transport = MockTransport { failure: None };

        let succeeded = execute(&pipeline, &transport).await.unwrap();

        assert!(succeeded);
        assert_eq!(
            *pipeline.outputs.borrow(),
            vec![("status".to_owned(), "success".to_owned())]
        );
        assert!(pipeline.failures.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_once() {
        let report = tempfile::NamedTempFile::new().unwrap();
        let pipeline = pipeline_with_report(report.path().to_str().unwrap());
        let transport = MockTransport {
            failure: Some("Upload failed".into()),
        };

        let succeeded = execute(&pipeline, &transport).await.unwrap();

        assert!(!succeeded);
        assert!(pipeline.outputs.borrow().is_empty());
        assert_eq!(*pipeline.failures.borrow(), vec!["Upload failed".to_owned()]);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_io() {
        let pipeline = MockPipeline::with_inputs([("report-path", "does-not-exist/")]);
        let transport = MockTransport { failure: None };

        let succeeded = execute(&pipeline, &transport).await.unwrap();

        // resolution fails first: the bogus report path is never touched
        assert!(!succeeded);
        assert_eq!(
            *pipeline.failures.borrow(),
            vec![UploadError::MissingCredential.to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_report_path_fails() {
        let pipeline = MockPipeline::with_inputs([("upload-token", "the-token")]);
        let transport = MockTransport { failure: None };

        let succeeded = execute(&pipeline, &transport).await.unwrap();

        assert!(!succeeded);
        assert_eq!(
            *pipeline.failures.borrow(),
            vec![UploadError::MissingSourcePath.to_string()]
        );
    }
}
