use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parsing error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
