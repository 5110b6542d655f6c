pub mod client;
pub mod prompt;

pub use client::{GeneratedImage, GenerationClient, GenerationRequest};
pub use prompt::build_prompt;

use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured (set one in Settings or via {env})")]
    MissingApiKey { env: &'static str },
    #[error("no source photo loaded")]
    MissingPhoto,
    #[error("service answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("service returned no image: {reason}")]
    NoImage { reason: String },
}

pub enum GenerationResult {
    Success(GeneratedImage),
    Error(String),
}

/// Run one request on the tokio runtime and post the outcome to `sender`.
pub fn start_generation(
    runtime: &tokio::runtime::Handle,
    client: GenerationClient,
    request: GenerationRequest,
    sender: Sender<GenerationResult>,
) {
    runtime.spawn(async move {
        let result = match client.generate(&request).await {
            Ok(image) => {
                log::info!("received {} bytes ({})", image.data.len(), image.mime);
                GenerationResult::Success(image)
            }
            Err(e) => {
                log::error!("generation failed: {}", e.summary());
                GenerationResult::Error(e.summary())
            }
        };
        let _ = sender.send(result);
    });
}
