use serde::Serialize;

/// Version of the ingestion API wire contract. It drives the multipart field
/// names, the tag encoding and the auth header name, all at once: a
/// deployment speaks exactly one version, selected at build time through
/// [`API_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// `run_package` file parts, repeated `tags.key`/`tags.value` parts,
    /// `X-Gaffer-API-Key` header.
    #[allow(dead_code)]
    Legacy,
    /// `files` file parts, a single JSON `tags` part, `X-API-Key` header.
    V2,
}

/// The wire contract version this build speaks.
pub const API_VERSION: ApiVersion = ApiVersion::V2;

impl ApiVersion {
    pub fn file_field(&self) -> &'static str {
        match self {
            ApiVersion::Legacy => "run_package",
            ApiVersion::V2 => "files",
        }
    }

    pub fn auth_header(&self) -> &'static str {
        match self {
            ApiVersion::Legacy => "X-Gaffer-API-Key",
            ApiVersion::V2 => "X-API-Key",
        }
    }
}

/// Descriptive metadata attached to a test-run upload. Absent inputs stay
/// `None` and are left out of the wire encoding entirely.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(rename = "framework", skip_serializing_if = "Option::is_none")]
    pub test_framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_suite: Option<String>,
}

impl TestRunTags {
    /// Ordered `(key, value)` pairs for the legacy structured-pairs encoding.
    /// The order is the fixed resolution order of the tag inputs.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("commit_sha", &self.commit_sha),
            ("branch", &self.branch),
            ("test_framework", &self.test_framework),
            ("test_suite", &self.test_suite),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
        .collect()
    }
}

/// The raw outcome of a successful upload. The body schema belongs to the
/// ingestion API and is not interpreted here.
#[derive(Debug)]
pub struct UploadResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiVersion::Legacy, "run_package", "X-Gaffer-API-Key")]
    #[case(ApiVersion::V2, "files", "X-API-Key")]
    fn test_wire_names_per_version(
        #[case] version: ApiVersion,
        #[case] file_field: &str,
        #[case] auth_header: &str,
    ) {
        assert_eq!(version.file_field(), file_field);
        assert_eq!(version.auth_header(), auth_header);
    }

    #[test]
    fn test_tags_serialize_to_camel_case() {
        let tags = TestRunTags {
            commit_sha: Some("abc123".into()),
            branch: Some("main".into()),
            test_framework: Some("jest".into()),
            test_suite: Some("unit".into()),
        };
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            serde_json::json!({
                "commitSha": "abc123",
                "branch": "main",
                "framework": "jest",
                "testSuite": "unit",
            })
        );
    }

    #[test]
    fn test_empty_tags_serialize_to_empty_object() {
        assert_eq!(
            serde_json::to_string(&TestRunTags::default()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_pairs_keep_resolution_order_and_skip_absent() {
        let tags = TestRunTags {
            commit_sha: Some("abc123".into()),
            branch: Some("main".into()),
            ..Default::default()
        };
        assert_eq!(
            tags.pairs(),
            vec![("commit_sha", "abc123"), ("branch", "main")]
        );
    }
}
