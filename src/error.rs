/// Failures on the submit path. None of these reach the user; the message
/// element only ever reflects an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The request failed before any response arrived.
    #[error("request failed: {0}")]
    Transport(String),

    /// The payload could not be serialized to JSON.
    #[error("payload encoding failed: {0}")]
    Encode(String),

    /// A DOM call needed to bind or read the form failed.
    #[error("dom error: {0}")]
    Dom(String),

    /// Options passed from the page could not be deserialized.
    #[error("invalid options: {0}")]
    Options(String),
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Encode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_cause() {
        let err = SubmitError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
