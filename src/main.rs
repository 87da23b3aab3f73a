mod app;
mod config;
mod error;
mod pipeline;
mod prelude;
mod request_client;
mod uploader;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match crate::app::run().await {
        // Upload failure: already reported through the pipeline failure sink
        Ok(false) => std::process::exit(1),
        Ok(true) => {}
        // Bootstrap failure, before any pipeline sink is available
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
