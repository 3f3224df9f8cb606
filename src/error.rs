use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to establish database connection: {0}")]
    Connection(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
