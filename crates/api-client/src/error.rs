use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request to the data provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The data provider answered with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("The data provider returned an error (code {code}): {msg}")]
    Provider { code: i64, msg: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("The data provider returned no records for {0}")]
    EmptyData(String),
}
