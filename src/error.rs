use std::path::PathBuf;

pub type AnimationResult<T> = Result<T, AnimationError>;

#[derive(thiserror::Error, Debug)]
pub enum AnimationError {
    #[error("icon file '{}' not found", path.display())]
    MissingAsset { path: PathBuf },

    #[error("failed to decode icon '{}': {source}", path.display())]
    AssetDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("encoding error: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnimationError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<gif::EncodingError> for AnimationError {
    fn from(err: gif::EncodingError) -> Self {
        match err {
            gif::EncodingError::Io(io) => Self::Io(io),
            other => Self::encode(other.to_string()),
        }
    }
}

impl From<png::EncodingError> for AnimationError {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(io) => Self::Io(io),
            other => Self::encode(other.to_string()),
        }
    }
}
