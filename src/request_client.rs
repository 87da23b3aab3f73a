use lazy_static::lazy_static;
use reqwest::ClientBuilder;

const USER_AGENT: &str = "gaffer-upload";

lazy_static! {
    // File parts are streamed from disk and streams can't be cloned, so this
    // client carries no retry middleware: the upload is fire-once.
    pub static ref UPLOAD_CLIENT: reqwest::Client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .build()
        .unwrap();
}
