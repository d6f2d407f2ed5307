use std::fmt;

/// Shared secret presented by clients in the `x-api-key` header.
#[derive(Clone, Default)]
pub struct Secrets {
    pub api_key: Option<String>,
}

impl Secrets {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.is_empty()).then_some(api_key),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// An empty `API_KEY` counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("API_KEY").map(Self::new).unwrap_or_default()
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_is_unset() {
        let secrets = Secrets::from_lookup(|_| Some(String::new()));
        assert!(secrets.api_key.is_none());

        let secrets = Secrets::from_lookup(|_| None);
        assert!(secrets.api_key.is_none());
    }

    #[test]
    fn test_api_key_is_loaded() {
        let secrets = Secrets::from_lookup(|key| (key == "API_KEY").then(|| "s3cret".to_string()));
        assert_eq!(secrets.api_key.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", Secrets::new("s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
