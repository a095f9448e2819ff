/// Unified error type for the remedit tool.
///
/// All crates use this error type for propagation across crate boundaries.
/// Internal errors should be converted into the appropriate variant.
#[derive(Debug, thiserror::Error)]
pub enum RemeditError {
    /// The requested page does not exist on the wiki.
    #[error("page not found: {0}")]
    NotFound(String),

    /// The server rejected the supplied credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure talking to the wiki server.
    #[error("network error: {0}")]
    Network(String),

    /// The page changed on the server since it was fetched.
    #[error("edit conflict: {0}")]
    Conflict(String),

    /// The configured editor could not be started.
    #[error("cannot launch editor: {0}")]
    EditorLaunch(String),

    /// The editor terminated abnormally; the edit is discarded.
    #[error("editor aborted: {0}")]
    EditorExit(String),

    /// Error from configuration loading or validation.
    #[error("config error: {0}")]
    Config(String),

    /// Local filesystem failure (temporary file or recovery file).
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal error for unexpected conditions.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RemeditError {
    /// Process exit code for this error.
    ///
    /// Conflicts get a distinct code so callers can script around them;
    /// every other failure maps to 1. Usage errors exit with 2 via clap.
    pub fn exit_code(&self) -> u8 {
        match self {
            RemeditError::Conflict(_) => 3,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for RemeditError {
    fn from(err: std::io::Error) -> Self {
        RemeditError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for RemeditError {
    fn from(err: serde_yaml::Error) -> Self {
        RemeditError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_exit_code_is_distinct() {
        let conflict = RemeditError::Conflict("page moved on".to_string());
        assert_eq!(conflict.exit_code(), 3);

        for err in [
            RemeditError::NotFound("Home".to_string()),
            RemeditError::Auth("bad credentials".to_string()),
            RemeditError::Network("connection refused".to_string()),
            RemeditError::EditorLaunch("not found".to_string()),
            RemeditError::EditorExit("status 1".to_string()),
            RemeditError::Config("bad yaml".to_string()),
            RemeditError::Io("disk full".to_string()),
            RemeditError::Internal("oops".to_string()),
        ] {
            assert_eq!(err.exit_code(), 1, "unexpected code for {err}");
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = RemeditError::NotFound("FrontPage".to_string());
        assert_eq!(err.to_string(), "page not found: FrontPage");
    }
}
