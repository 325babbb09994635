//! Error types for territory map generation

use thiserror::Error;

/// Errors that can occur during map generation or queries
#[derive(Error, Debug)]
pub enum MapGenError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No mask image was supplied before starting a run
    #[error("missing generation mask")]
    MissingMask,

    /// The configuration defines no continents
    #[error("no continent definitions configured")]
    MissingContinents,

    /// A continent has an empty name pool and generated names are disabled
    #[error("continent '{continent}' has an empty name pool and no name fallback")]
    EmptyNamePool {
        /// Name of the offending continent
        continent: String,
    },

    /// A run is already active; cancel it first
    #[error("generation already in progress")]
    GenerationInProgress,

    /// A run lost its inputs before reaching completion
    #[error("generation aborted before completion")]
    Aborted,

    /// Mask buffer does not match its declared dimensions
    #[error("invalid mask: {0}")]
    InvalidMask(String),

    /// Mask image could not be decoded
    #[error("failed to load mask image: {0}")]
    MaskLoad(#[from] image::ImageError),

    /// Requested region ID does not exist
    #[error("region not found: {0}")]
    RegionNotFound(usize),

    /// TOML configuration could not be parsed
    #[cfg(feature = "serde")]
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be written as TOML
    #[cfg(feature = "serde")]
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl MapGenError {
    /// Whether this error was raised before any state transition because of
    /// bad inputs (as opposed to a query on an existing map)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MapGenError::InvalidConfig(_)
                | MapGenError::MissingMask
                | MapGenError::MissingContinents
                | MapGenError::EmptyNamePool { .. }
                | MapGenError::InvalidMask(_)
                | MapGenError::MaskLoad(_)
        )
    }
}

/// Result type alias for map generation operations
pub type Result<T> = std::result::Result<T, MapGenError>;
