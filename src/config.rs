use std::path::PathBuf;

use url::Url;

use crate::error::UploadError;
use crate::pipeline::Pipeline;
use crate::prelude::*;
use crate::uploader::TestRunTags;

pub const DEFAULT_UPLOAD_URL: &str = "https://app.gaffer.sh/api/upload";

// Pipeline input names
pub const UPLOAD_TOKEN_INPUT: &str = "upload-token";
pub const API_KEY_INPUT: &str = "api-key";
pub const REPORT_PATH_INPUT: &str = "report-path";
pub const API_ENDPOINT_INPUT: &str = "api-endpoint";
pub const COMMIT_SHA_INPUT: &str = "commit-sha";
pub const BRANCH_INPUT: &str = "branch";
pub const TEST_FRAMEWORK_INPUT: &str = "test-framework";
pub const TEST_SUITE_INPUT: &str = "test-suite";

/// The resolved parameters of one upload run. Immutable once resolved; no
/// filesystem or network access happens during resolution.
#[derive(Debug)]
pub struct Config {
    pub token: String,
    pub report_path: PathBuf,
    pub upload_url: Url,
    pub tags: TestRunTags,
}

struct Credential {
    token: String,
    deprecated: bool,
}

/// Picks the upload credential: `upload-token` wins over the deprecated
/// `api-key`; neither being set is a hard failure.
fn resolve_credential(upload_token: String, api_key: String) -> Result<Credential, UploadError> {
    if !upload_token.is_empty() {
        return Ok(Credential {
            token: upload_token,
            deprecated: false,
        });
    }
    if !api_key.is_empty() {
        return Ok(Credential {
            token: api_key,
            deprecated: true,
        });
    }
    Err(UploadError::MissingCredential)
}

fn resolve_tags(pipeline: &dyn Pipeline) -> TestRunTags {
    let non_empty = |name: &str| {
        let value = pipeline.input(name);
        (!value.is_empty()).then_some(value)
    };

    TestRunTags {
        commit_sha: non_empty(COMMIT_SHA_INPUT),
        branch: non_empty(BRANCH_INPUT),
        test_framework: non_empty(TEST_FRAMEWORK_INPUT),
        test_suite: non_empty(TEST_SUITE_INPUT),
    }
}

impl Config {
    pub fn resolve(pipeline: &dyn Pipeline) -> Result<Self> {
        let credential = resolve_credential(
            pipeline.input(UPLOAD_TOKEN_INPUT),
            pipeline.input(API_KEY_INPUT),
        )?;
        if credential.deprecated {
            warn!("The api-key input is deprecated. Please use upload-token instead.");
        }

        let report_path = pipeline.input(REPORT_PATH_INPUT);
        if report_path.is_empty() {
            return Err(UploadError::MissingSourcePath.into());
        }

        let raw_upload_url = match pipeline.input(API_ENDPOINT_INPUT) {
            endpoint if endpoint.is_empty() => DEFAULT_UPLOAD_URL.into(),
            endpoint => endpoint,
        };
        let upload_url = Url::parse(&raw_upload_url)
            .map_err(|e| anyhow!("Invalid upload URL: {raw_upload_url}, {e}"))?;

        Ok(Self {
            token: credential.token,
            report_path: PathBuf::from(report_path),
            upload_url,
            tags: resolve_tags(pipeline),
        })
    }
}
