use std::env;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
}

/// Which backend receives uploaded media files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Local,
    S3,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

/// S3-compatible object storage parameters, present when
/// `STORAGE_BACKEND=s3`.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub endpoint: Option<String>,
    /// Base URL under which stored objects are publicly reachable.
    pub public_url: Option<String>,
}

/// SMTP parameters for the contact-form notification. Absent when the
/// deployment has no mail relay configured; sends are then skipped.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub notification_email: String,
}

/// Credentials for the startup admin bootstrap.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// All runtime configuration, read once at startup and handed to the
/// components that need it. Nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub upload_dir: String,
    pub storage_backend: StorageBackend,
    pub s3: Option<S3Settings>,
    pub smtp: Option<SmtpSettings>,
    pub bootstrap_admin: Option<AdminBootstrap>,
    pub port: u16,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// Unset and empty are treated the same so that blank lines in a .env
/// file do not enable half-configured features.
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    match optional(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var: name,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_backend = match optional("STORAGE_BACKEND").as_deref() {
            None | Some("local") => StorageBackend::Local,
            Some("s3") => StorageBackend::S3,
            Some(other) => {
                return Err(ConfigError::InvalidVar {
                    var: "STORAGE_BACKEND",
                    message: format!("expected \"local\" or \"s3\", got \"{other}\""),
                });
            }
        };

        let s3 = match storage_backend {
            StorageBackend::S3 => Some(S3Settings {
                bucket: required("S3_BUCKET")?,
                region: optional("S3_REGION"),
                endpoint: optional("S3_ENDPOINT"),
                public_url: optional("S3_PUBLIC_URL"),
            }),
            StorageBackend::Local => None,
        };

        let smtp = match (optional("SMTP_HOST"), optional("NOTIFICATION_EMAIL")) {
            (Some(host), Some(notification_email)) => {
                let username = required("SMTP_USER")?;
                Some(SmtpSettings {
                    host,
                    port: parsed("SMTP_PORT", 587)?,
                    from_email: optional("SMTP_FROM_EMAIL").unwrap_or_else(|| username.clone()),
                    from_name: optional("SMTP_FROM_NAME")
                        .unwrap_or_else(|| "Portfolio CMS".to_string()),
                    username,
                    password: required("SMTP_PASSWORD")?,
                    notification_email,
                })
            }
            _ => None,
        };

        let bootstrap_admin = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                email,
                password,
                full_name: optional("ADMIN_NAME").unwrap_or_else(|| "Admin".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            secret_key: required("SECRET_KEY")?,
            access_token_expire_minutes: parsed("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            upload_dir: optional("UPLOAD_DIR").unwrap_or_else(|| "static/uploads".to_string()),
            storage_backend,
            s3,
            smtp,
            bootstrap_admin,
            port: parsed("PORT", 8080)?,
        })
    }
}
