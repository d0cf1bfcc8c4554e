//! Import-specific error types
//!
//! # Error Types
//!
//! - **`ArchiveError`**: The archive collaborator could not read the upload
//! - **`ImportError`**: The create-deck flow was rejected; the collection is
//!   left exactly as it was

use crate::model::FormError;
use thiserror::Error;

/// Errors from reading an uploaded archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Input is not a readable zip archive
    #[error("Invalid archive: {0}")]
    Corrupt(#[from] zip::result::ZipError),

    /// An entry could not be read
    #[error("Failed to read archive entry '{name}': {source}")]
    Entry {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort the create-deck flow
#[derive(Debug, Error)]
pub enum ImportError {
    /// Form did not validate
    #[error("Invalid deck form: {0}")]
    Form(#[from] FormError),

    /// No archive was supplied with the form
    #[error("An archive file is required")]
    MissingArchive,

    /// Nothing left to import once the back image was set aside
    #[error("Archive contains no card images")]
    NoImages,

    /// Another import is still pending
    #[error("An import is already in progress")]
    Busy,

    /// Archive could not be read
    #[error("Error processing archive: {0}")]
    Archive(#[from] ArchiveError),
}
