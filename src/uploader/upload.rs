use async_trait::async_trait;
use url::Url;

use crate::error::UploadError;
use crate::prelude::*;
use crate::request_client::UPLOAD_CLIENT;

use super::form::UploadForm;
use super::interfaces::UploadResponse;

/// The sending half of the uploader, kept behind a trait so the orchestrator
/// can be exercised without a network.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(
        &self,
        form: UploadForm,
        token: &str,
        endpoint: &Url,
    ) -> Result<UploadResponse, UploadError>;
}

/// Performs the real multipart POST: one attempt, no retry.
pub struct HttpTransport;

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(
        &self,
        form: UploadForm,
        token: &str,
        endpoint: &Url,
    ) -> Result<UploadResponse, UploadError> {
        let version = form.version;
        let multipart = form.into_multipart().await?;

        // reqwest derives the boundary and multipart content-type headers
        let response = UPLOAD_CLIENT
            .post(endpoint.clone())
            .header(version.auth_header(), token)
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(UploadError::Transport(format!(
                "Upload failed with status {status}: {body}"
            )));
        }

        Ok(UploadResponse { status, body })
    }
}
