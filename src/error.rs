use thiserror::Error;

/// Out-of-contract input to the duration formatter
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// A store document that does not match the workout/exercise shape
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl RecordError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RecordError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("document store API error: status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to decode document store response: {0}")]
    Decode(String),
    #[error("write token not configured. Run 'repbook config set store.token <TOKEN>'")]
    MissingToken,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("identity service API error: status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("not signed in. Run 'repbook auth sign-in <USER_ID>'")]
    NotSignedIn,
}
