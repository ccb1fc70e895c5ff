use std::env;

use thiserror::Error;

/// Audience and issuer of the app tokens handed out by SignIn.
pub const DEFAULT_TOKEN_ISSUER: &str = "abelanav2.examples.com";

/// App token lifetime (seconds).
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 6_000_000;

/// Photos per page in a list query.
pub const DEFAULT_PHOTOS_PER_PAGE: usize = 50;

/// Confidence level of the Wilson interval used to rank the stream.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub token_issuer: String,
    pub jwt_expiration_secs: i64,
    pub google_client_id: Option<String>,
    pub upload_bucket: Option<String>,
    pub public_bucket: String,
    pub photos_per_page: usize,
    pub confidence_level: f64,
    pub auto_publish: bool,
    /// Bearer secret of the resized image notification route; unset disables it.
    pub notification_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                value: String::new(),
            });
        }

        let confidence_level = parse_or("CONFIDENCE_LEVEL", DEFAULT_CONFIDENCE_LEVEL)?;
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ConfigError::Invalid {
                name: "CONFIDENCE_LEVEL",
                value: confidence_level.to_string(),
            });
        }

        let photos_per_page = parse_or("PHOTOS_PER_PAGE", DEFAULT_PHOTOS_PER_PAGE)?;
        if photos_per_page == 0 {
            return Err(ConfigError::Invalid {
                name: "PHOTOS_PER_PAGE",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_or("SERVER_PORT", 50051)?,
            jwt_secret,
            token_issuer: env::var("TOKEN_ISSUER")
                .unwrap_or_else(|_| DEFAULT_TOKEN_ISSUER.to_string()),
            jwt_expiration_secs: parse_or("JWT_EXPIRATION_SECS", DEFAULT_JWT_EXPIRATION_SECS)?,
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok().filter(|s| !s.is_empty()),
            upload_bucket: env::var("UPLOAD_BUCKET").ok().filter(|s| !s.is_empty()),
            public_bucket: env::var("PUBLIC_BUCKET").unwrap_or_else(|_| "abelanav2".to_string()),
            photos_per_page,
            confidence_level,
            auto_publish: parse_or("AUTO_PUBLISH", false)?,
            notification_secret: env::var("NOTIFICATION_SECRET").ok().filter(|s| !s.is_empty()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Base URL of the resized, publicly readable images.
    pub fn images_base_url(&self) -> String {
        format!("https://storage.googleapis.com/{}/", self.public_bucket)
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            database_url: None,
            server_host: "127.0.0.1".to_string(),
            server_port: 50051,
            jwt_secret: "secret".to_string(),
            token_issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            jwt_expiration_secs: DEFAULT_JWT_EXPIRATION_SECS,
            google_client_id: None,
            upload_bucket: None,
            public_bucket: "abelana-public".to_string(),
            photos_per_page: DEFAULT_PHOTOS_PER_PAGE,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            auto_publish: false,
            notification_secret: None,
        }
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(sample().server_addr(), "127.0.0.1:50051");
    }

    #[test]
    fn test_images_base_url() {
        assert_eq!(
            sample().images_base_url(),
            "https://storage.googleapis.com/abelana-public/"
        );
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let value: u16 = parse_or("ABELANA_TEST_UNSET_PORT", 4242).unwrap();
        assert_eq!(value, 4242);
    }
}
