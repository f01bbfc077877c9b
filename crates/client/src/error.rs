use partsdash_engine::RefreshError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<ClientError> for RefreshError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network(msg) => RefreshError::Transport(msg),
            ClientError::Api(status, msg) => {
                RefreshError::Transport(format!("status {status}: {msg}"))
            }
            ClientError::Parse(msg) => RefreshError::Payload(msg),
        }
    }
}
