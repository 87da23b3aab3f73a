use std::fs;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use tokio_util::io::ReaderStream;

use crate::error::UploadError;
use crate::prelude::*;

use super::interfaces::{ApiVersion, TestRunTags};

/// One file attached to the upload: where it lives on disk and the name it
/// carries on the wire (its path relative to the upload root).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePart {
    pub source: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEncoding {
    /// Repeated `tags.key`/`tags.value` parts, in resolution order.
    Pairs(Vec<(String, String)>),
    /// A single `tags` part holding a JSON object. Always present, even for
    /// an empty tag set (`{}`).
    Json(String),
}

/// The assembled multipart payload, before any file handle is opened. File
/// streams only come into existence in [`UploadForm::into_multipart`], at
/// send time, so the transport is the sole owner of every open handle.
#[derive(Debug, PartialEq)]
pub struct UploadForm {
    pub version: ApiVersion,
    pub files: Vec<FilePart>,
    pub tags: TagEncoding,
}

/// Enumerates every file under `root`, at any depth, with its path relative
/// to `root` as display name. Directories are recursed into, never attached.
///
/// A subtree whose listing fails is logged and skipped; parts collected for
/// its siblings are kept. Traversal order follows directory-listing order
/// and is not meaningful.
fn collect_files(root: &Path) -> Vec<FilePart> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to list {}: {e}", dir.display());
                continue;
            }
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!("Failed to read an entry of {}: {e}", dir.display());
                    continue;
                }
            };
            let path = entry.path();
            let is_dir = match entry.file_type() {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    error!("Failed to stat {}: {e}", path.display());
                    continue;
                }
            };
            if is_dir {
                pending.push(path);
            } else {
                let file_name = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .into_owned();
                files.push(FilePart {
                    source: path,
                    file_name,
                });
            }
        }
    }

    files
}

fn encode_tags(tags: &TestRunTags, version: ApiVersion) -> Result<TagEncoding, UploadError> {
    match version {
        ApiVersion::Legacy => Ok(TagEncoding::Pairs(
            tags.pairs()
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        )),
        ApiVersion::V2 => Ok(TagEncoding::Json(serde_json::to_string(tags)?)),
    }
}

impl UploadForm {
    /// Assembles the payload for `report_path`: one part per file (a single
    /// part when the path is a regular file, one per nested file when it is
    /// a directory) plus the encoded tag set.
    pub fn build(
        report_path: &Path,
        tags: &TestRunTags,
        version: ApiVersion,
    ) -> Result<Self, UploadError> {
        let metadata = fs::metadata(report_path).map_err(|source| UploadError::Filesystem {
            path: report_path.to_path_buf(),
            source,
        })?;

        let files = if metadata.is_dir() {
            collect_files(report_path)
        } else {
            let file_name = report_path
                .file_name()
                .unwrap_or(report_path.as_os_str())
                .to_string_lossy()
                .into_owned();
            vec![FilePart {
                source: report_path.to_path_buf(),
                file_name,
            }]
        };

        Ok(Self {
            version,
            files,
            tags: encode_tags(tags, version)?,
        })
    }

    /// Converts the payload into a `reqwest` multipart form, opening one
    /// read stream per file part. Consumes the form: the streams are drained
    /// and closed by the HTTP client while sending the body.
    pub async fn into_multipart(self) -> Result<Form, UploadError> {
        let mut form = Form::new();
        let file_field = self.version.file_field();

        for file_part in self.files {
            let file = tokio::fs::File::open(&file_part.source)
                .await
                .map_err(|source| UploadError::Filesystem {
                    path: file_part.source.clone(),
                    source,
                })?;
            let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
            form = form.part(file_field, Part::stream(body).file_name(file_part.file_name));
        }

        match self.tags {
            TagEncoding::Pairs(pairs) => {
                for (key, value) in pairs {
                    form = form.text("tags.key", key).text("tags.value", value);
                }
            }
            TagEncoding::Json(json) => {
                form = form.text("tags", json);
            }
        }

        Ok(form)
    }
}
