//! Configuration module
//!
//! This module provides configuration structures for the API, including database,
//! storage, admin authentication, media limits, and email notification settings.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_PHOTO_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 200;
const MIN_ADMIN_API_KEY_LEN: usize = 32;

/// Base configuration shared by all components
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub admin_api_key: String,
    pub environment: String,
}

/// Academy backend configuration
#[derive(Clone, Debug)]
pub struct AcademyConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Media limits
    pub max_photo_size_bytes: usize,
    pub photo_allowed_extensions: Vec<String>,
    pub photo_allowed_content_types: Vec<String>,
    pub max_video_size_bytes: usize,
    pub video_allowed_extensions: Vec<String>,
    pub video_allowed_content_types: Vec<String>,
    // Email notifications for new inquiries
    pub email_notifications_enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    /// Mailbox that receives the internal "new inquiry" notification.
    pub inquiry_inbox: Option<String>,
    pub academy_name: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AcademyConfig>);

impl Config {
    fn inner(&self) -> &AcademyConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AcademyConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn admin_api_key(&self) -> &str {
        &self.inner().base.admin_api_key
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn max_photo_size_bytes(&self) -> usize {
        self.inner().max_photo_size_bytes
    }

    pub fn photo_allowed_extensions(&self) -> &[String] {
        &self.inner().photo_allowed_extensions
    }

    pub fn photo_allowed_content_types(&self) -> &[String] {
        &self.inner().photo_allowed_content_types
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.inner().max_video_size_bytes
    }

    pub fn video_allowed_extensions(&self) -> &[String] {
        &self.inner().video_allowed_extensions
    }

    pub fn video_allowed_content_types(&self) -> &[String] {
        &self.inner().video_allowed_content_types
    }

    pub fn email_notifications_enabled(&self) -> bool {
        self.inner().email_notifications_enabled
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.inner().smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.inner().smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.inner().smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.inner().smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.inner().smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.inner().smtp_tls
    }

    pub fn inquiry_inbox(&self) -> Option<&str> {
        self.inner().inquiry_inbox.as_deref()
    }

    pub fn academy_name(&self) -> &str {
        &self.inner().academy_name
    }
}

fn split_list(raw: String) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_lowercase()).collect()
}

impl AcademyConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str =
            env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            admin_api_key: env::var("ADMIN_API_KEY")
                .map_err(|_| anyhow::anyhow!("ADMIN_API_KEY must be set for admin routes"))?,
            environment,
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| StorageBackend::from_str(&s).ok());

        let config = AcademyConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            max_photo_size_bytes: env::var("MAX_PHOTO_SIZE_MB")
                .unwrap_or_else(|_| MAX_PHOTO_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_PHOTO_SIZE_MB)
                * 1024
                * 1024,
            photo_allowed_extensions: split_list(
                env::var("PHOTO_ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| "jpg,jpeg,png,gif,webp".to_string()),
            ),
            photo_allowed_content_types: split_list(
                env::var("PHOTO_ALLOWED_CONTENT_TYPES").unwrap_or_else(|_| {
                    "image/jpeg,image/png,image/gif,image/webp".to_string()
                }),
            ),
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_MB")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                * 1024
                * 1024,
            video_allowed_extensions: split_list(
                env::var("VIDEO_ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| "mp4,mov,webm".to_string()),
            ),
            video_allowed_content_types: split_list(
                env::var("VIDEO_ALLOWED_CONTENT_TYPES")
                    .unwrap_or_else(|_| "video/mp4,video/quicktime,video/webm".to_string()),
            ),
            email_notifications_enabled: env::var("EMAIL_NOTIFICATIONS_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|s| s.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            inquiry_inbox: env::var("INQUIRY_INBOX").ok(),
            academy_name: env::var("ACADEMY_NAME")
                .unwrap_or_else(|_| "Dance Academy".to_string()),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a postgres:// or postgresql:// URL"
            ));
        }

        if self.base.admin_api_key.len() < MIN_ADMIN_API_KEY_LEN {
            return Err(anyhow::anyhow!(
                "ADMIN_API_KEY must be at least {} characters long",
                MIN_ADMIN_API_KEY_LEN
            ));
        }

        let env = self.base.environment.to_lowercase();
        let is_production = env == "production" || env == "prod";
        if is_production
            && self
                .base
                .cors_origins
                .iter()
                .any(|o| o.trim() == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.storage_backend {
            Some(StorageBackend::S3) => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set for the s3 backend"
                    ));
                }
            }
            Some(StorageBackend::Local) => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set for the local backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set for the local backend"
                    ));
                }
            }
            None => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be set to 's3' or 'local'"
                ));
            }
        }

        if self.email_notifications_enabled {
            if self.smtp_host.is_none() || self.smtp_from.is_none() {
                return Err(anyhow::anyhow!(
                    "SMTP_HOST and SMTP_FROM must be set when EMAIL_NOTIFICATIONS_ENABLED=true"
                ));
            }
            if self.smtp_user.is_some() != self.smtp_password.is_some() {
                return Err(anyhow::anyhow!(
                    "SMTP_USER and SMTP_PASSWORD must be set together"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> AcademyConfig {
        AcademyConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["http://localhost:3000".to_string()],
                db_max_connections: MAX_CONNECTIONS,
                db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
                admin_api_key: "a".repeat(MIN_ADMIN_API_KEY_LEN),
                environment: "development".to_string(),
            },
            database_url: "postgres://localhost/academy".to_string(),
            storage_backend: Some(StorageBackend::Local),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: Some("/tmp/academy-media".to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
            max_photo_size_bytes: MAX_PHOTO_SIZE_MB * 1024 * 1024,
            photo_allowed_extensions: split_list("jpg,png".to_string()),
            photo_allowed_content_types: split_list("image/jpeg,image/png".to_string()),
            max_video_size_bytes: MAX_VIDEO_SIZE_MB * 1024 * 1024,
            video_allowed_extensions: split_list("mp4".to_string()),
            video_allowed_content_types: split_list("video/mp4".to_string()),
            email_notifications_enabled: false,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            inquiry_inbox: None,
            academy_name: "Dance Academy".to_string(),
        }
    }

    #[test]
    fn validate_accepts_minimal_local_config() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_short_admin_key() {
        let mut config = minimal_config();
        config.base.admin_api_key = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let mut config = minimal_config();
        config.database_url = "mysql://localhost/academy".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_wildcard_cors_in_production() {
        let mut config = minimal_config();
        config.base.environment = "production".to_string();
        config.base.cors_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_requires_s3_bucket_for_s3_backend() {
        let mut config = minimal_config();
        config.storage_backend = Some(StorageBackend::S3);
        assert!(config.validate().is_err());

        config.s3_bucket = Some("academy-media".to_string());
        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_requires_smtp_pairing_when_email_enabled() {
        let mut config = minimal_config();
        config.email_notifications_enabled = true;
        assert!(config.validate().is_err());

        config.smtp_host = Some("smtp.example.com".to_string());
        config.smtp_from = Some("noreply@example.com".to_string());
        assert!(config.validate().is_ok());

        config.smtp_user = Some("user".to_string());
        assert!(config.validate().is_err());

        config.smtp_password = Some("secret".to_string());
        assert!(config.validate().is_ok());
    }
}
