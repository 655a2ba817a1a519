use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Keys end up as file names, so they are restricted
    ///  to ascii alphanumerics, `-` and `_`
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Backing storage for anything we persist between sessions.
///  Implementations should be cheap to clone and safe to share.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(None)` - nothing has been stored under `key`
    /// * `Ok(Some(value))` - the last value written
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing anything already there
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("rootCidArray").is_ok());
        assert!(validate_key("signature").is_ok());
        assert!(validate_key("with-dash_and_underscore").is_ok());

        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../escape"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            validate_key("has space"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
