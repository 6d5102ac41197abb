use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginError {
    Config(String),
    Network(String),
    Timeout(String),
    Parse(String),
    Serialization(String),
}

impl fmt::Display for LoginError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::Config(message) => write!(formatter, "Config error: {message}"),
            LoginError::Network(message) => write!(formatter, "Network error: {message}"),
            LoginError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            LoginError::Parse(message) => write!(formatter, "Response error: {message}"),
            LoginError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for LoginError {}
