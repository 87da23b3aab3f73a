use std::path::PathBuf;

/// Errors produced while resolving inputs, packaging the report and
/// uploading it.
///
/// The orchestrator only surfaces the message text; the kinds exist so the
/// stages can be tested without string matching.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Upload token not provided. Set the upload-token input.")]
    MissingCredential,

    #[error("Report path not provided. Set the report-path input.")]
    MissingSourcePath,

    #[error("Failed to read {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode test run tags: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(String),
}
