use thiserror::Error;

pub type Result<T, E = TrainerError> = std::result::Result<T, E>;

/// Failures at the fallible edges of the trainer: embedded assets and files.
/// The scoring and session core never produces one of these.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("embedded asset not found: {0}")]
    MissingAsset(String),
    #[error("embedded asset {0} is not valid utf-8")]
    InvalidAsset(String),
    #[error("unable to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_message() {
        let err = TrainerError::MissingAsset("pools.json".to_string());
        assert_eq!(err.to_string(), "embedded asset not found: pools.json");
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?
        }

        assert!(matches!(fails(), Err(TrainerError::Io(_))));
    }
}
