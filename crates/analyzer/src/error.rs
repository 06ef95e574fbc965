use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid screening threshold: {0}")]
    InvalidThreshold(String),
}
