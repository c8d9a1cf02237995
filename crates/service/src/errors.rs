use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 401/403: the session is gone and the user belongs on `/login`.
    #[error("login required (server answered {status})")]
    LoginRequired { status: u16 },
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ClientError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ClientError::LoginRequired { .. } => 1001,
            ClientError::InvalidCredentials => 1002,
            ClientError::Http { .. } => 1003,
            ClientError::Model(_) => 1004,
            ClientError::Network(_) => 1101,
            ClientError::Decode(_) => 1102,
            ClientError::Storage(_) => 1201,
            ClientError::Io(_) => 1202,
        }
    }

    pub fn is_login_required(&self) -> bool {
        matches!(self, ClientError::LoginRequired { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
