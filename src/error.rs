use food_vision_common::PredictError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodVisionError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No images found: {0}")]
    NoImagesFound(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("All {0} upload(s) failed")]
    AllFailed(usize),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FoodVisionError>;
