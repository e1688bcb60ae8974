use content_core::AppError;

/// Path prefix the content routes are mounted under by default.
pub const DEFAULT_ROUTE_PREFIX: &str = "/api/content-module";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// HTTP listener and mount configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Normalized: starts with `/`, no trailing `/`. Empty means the root.
    pub route_prefix: String,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `CONTENT_SERVER_HOST` (optional, defaults to `0.0.0.0`)
    /// - `CONTENT_SERVER_PORT` (optional, defaults to 3000)
    /// - `CONTENT_ROUTE_PREFIX` (optional, defaults to `/api/content-module`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("CONTENT_SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("CONTENT_SERVER_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid CONTENT_SERVER_PORT '{raw}': must be a port number"
                ))
            })?,
        };

        let route_prefix = normalize_prefix(
            &lookup("CONTENT_ROUTE_PREFIX").unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string()),
        );

        Ok(Self {
            host,
            port,
            route_prefix,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `"api/content/"` → `"/api/content"`, `"/"` → `""`.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
