#[derive(Debug)]
pub enum CliError {
    /// Configuration file unreadable or invalid.
    Config(String),
    /// Terminal input failed.
    Io(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(m) | Self::Io(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for CliError {}
