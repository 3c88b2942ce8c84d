use thiserror::Error;

/// Error type for loading and normalizing pedigree files.
#[derive(Error, Debug)]
pub enum PedigreeError {
    /// The file is not valid JSON text.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON is valid but none of the accepted layouts matched.
    #[error("Unable to extract pedigree nodes from JSON structure: {0}")]
    Format(String),

    /// IO error occurred while reading the file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for pedscore-core operations.
pub type Result<T> = std::result::Result<T, PedigreeError>;
