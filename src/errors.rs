use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoadError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    // Terrain and world errors
    #[error("Invalid terrain grid: {reason}")]
    InvalidTerrain { reason: String },

    #[error("Invalid settlement: {reason}")]
    InvalidSettlement { reason: String },

    #[error("Map file not found at path: {path}")]
    MapFileNotFound { path: PathBuf },

    #[error("Corrupted map file: {reason}")]
    CorruptedMapFile { reason: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Result type alias for all fallible operations
pub type RoadResult<T> = Result<T, RoadError>;
