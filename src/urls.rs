use url::Url;

use crate::call::Id;
use crate::errors::ConfigError;

/// Convenience wrapper for URL generation functions.
#[derive(Clone, Debug)]
pub struct Urls {
    /// Top-level URL, including trailing slash.
    base: Url,

    /// Path for all call-related actions.
    pub(crate) calls_path: String,

    /// Prefix for all call-related actions.
    calls_prefix: String,
}

impl Urls {
    /// Create a new instance. `calls_path` should *not* include a trailing slash.
    pub fn new(base: impl AsRef<str>, calls_path: impl Into<String>) -> Result<Self, ConfigError> {
        let base = Url::parse(base.as_ref()).map_err(|source| ConfigError::InvalidUrl {
            name: "CALLCENTER_BASE_URL",
            source,
        })?;
        let calls_path = calls_path.into();
        let calls_prefix = format!("{}/", calls_path);

        Ok(Urls {
            base,
            calls_path,
            calls_prefix,
        })
    }

    pub fn calls(&self) -> Result<Url, url::ParseError> {
        self.base.join(&self.calls_prefix)
    }

    pub fn call(&self, id: Id) -> Result<Url, url::ParseError> {
        self.calls()?.join(&id.to_string())
    }
}
