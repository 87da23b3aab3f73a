mod form;
mod interfaces;
mod upload;

pub use form::UploadForm;
pub use interfaces::{API_VERSION, ApiVersion, TestRunTags, UploadResponse};
pub use upload::{HttpTransport, Transport};
