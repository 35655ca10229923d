use miette::Diagnostic;
use thiserror::Error;

/// Main error type for codeposter operations
#[derive(Error, Diagnostic, Debug)]
pub enum PosterError {
    #[error("IO error: {0}")]
    #[diagnostic(code(codeposter::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(codeposter::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(codeposter::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot decode {path}: {message}")]
    #[diagnostic(code(codeposter::decode))]
    Decode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Encoding error: {message}")]
    #[diagnostic(code(codeposter::encode))]
    Encode { message: String },

    #[error("Layout error: {message}")]
    #[diagnostic(code(codeposter::layout))]
    Layout { message: String },
}

pub type Result<T> = std::result::Result<T, PosterError>;
