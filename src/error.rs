use thiserror::Error;

/// Number of body characters quoted in a parse error message
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication failed: could not log in to {host} as {username}")]
    Auth { host: String, username: String },

    /// The statistics page could not be turned into port records.
    ///
    /// `body` holds the full raw response so operators can see what the switch sent.
    #[error("Parse error: {reason} (response starts with: {:?})", excerpt(.body))]
    Parse { reason: String, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExporterError {
    pub fn parse(reason: impl Into<String>, body: &str) -> Self {
        Self::Parse {
            reason: reason.into(),
            body: body.to_string(),
        }
    }
}

/// Bounds violations found while reshaping the parallel arrays into port records
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReshapeError {
    #[error("port index {index} is out of range for {ports} ports")]
    PortOutOfRange { index: usize, ports: usize },

    #[error("link_status has {len} entries, no entry for port index {index}")]
    MissingLinkStatus { index: usize, len: usize },

    #[error("pkts has {len} entries, active port index {index} needs {needed}")]
    PacketsOutOfRange {
        index: usize,
        len: usize,
        needed: usize,
    },
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

pub type Result<T> = std::result::Result<T, ExporterError>;
