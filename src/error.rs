use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for configuration, driver state and snapshot I/O.
///
/// The numeric passes themselves never fail: degenerate distances are floored,
/// out-of-range cell coordinates are clamped, and a mis-sized boundary table
/// is a programming error that panics.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value or caller-supplied particle data.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Operation not permitted in the current driver state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Propagated I/O errors (config files, snapshot directories).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("dt must be finite and > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("dt"));
    }

    #[test]
    fn state_error_mentions_state() {
        let e = Error::InvalidState("simulation is done".into());
        assert!(e.to_string().starts_with("invalid state"));
    }

    #[test]
    fn json_errors_convert() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
