use thiserror::Error;
use url::Url;

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "USER_MANAGER_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Unsupported API URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

/// Backend location. Every endpoint the client talks to hangs off `api_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_url: Url,
}

impl Config {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = Url::parse(api_url.trim()).map_err(|e| ConfigError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        match api_url.scheme() {
            "http" | "https" => Ok(Self { api_url }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Base URL baked in when the browser bundle was built.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::new(option_env!("USER_MANAGER_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Base URL from the process environment, loading `.env` if present.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url =
            std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&api_url)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// `{base}/api/user`
    pub fn users_endpoint(&self) -> String {
        self.endpoint(&[])
    }

    /// `{base}/api/user/{id}`
    pub fn user_endpoint(&self, id: &str) -> String {
        self.endpoint(&[id])
    }

    /// `{base}/api/user/{id}/image`
    pub fn image_endpoint(&self, id: &str) -> String {
        self.endpoint(&[id, "image"])
    }

    /// Resolves a `profileImage` reference against the backend origin.
    /// Absolute references are returned unchanged.
    pub fn asset_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_string();
        }

        let base = self.api_url.as_str().trim_end_matches('/');
        format!("{}/{}", base, reference.trim_start_matches('/'))
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.api_url.clone();
        // http(s) URLs always have a path, so this cannot fail
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "user"]).extend(segments);
        }
        url.into()
    }
}
