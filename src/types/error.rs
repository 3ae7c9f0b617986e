use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("no points supplied")]
    EmptyInput,
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}
