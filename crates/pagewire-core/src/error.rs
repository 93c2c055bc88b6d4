use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page definition error: {0}")]
    Page(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Invalid validation pattern for '{field}': {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
