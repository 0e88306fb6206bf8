use std::env;
use std::fmt;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

pub const PORT_VAR: &str = "FOLIO_PORT";
pub const CLOUD_NAME_VAR: &str = "CLOUDINARY_CLOUD_NAME";
pub const API_KEY_VAR: &str = "CLOUDINARY_API_KEY";
pub const API_SECRET_VAR: &str = "CLOUDINARY_API_SECRET";
pub const API_BASE_VAR: &str = "CLOUDINARY_API_BASE";

/// Asset host account credentials. Never logged or returned to callers.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base: String,
    /// `None` when any of the credential variables is missing or empty
    pub credentials: Option<Credentials>,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty(PORT_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("invalid {PORT_VAR} value '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let api_base = non_empty(API_BASE_VAR).unwrap_or_else(|| String::from(DEFAULT_API_BASE));

        let credentials = match (
            non_empty(CLOUD_NAME_VAR),
            non_empty(API_KEY_VAR),
            non_empty(API_SECRET_VAR),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(Credentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Self {
            port,
            api_base,
            credentials,
        }
    }
}
