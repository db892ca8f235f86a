use std::fmt;
use thiserror::Error;

/// Errors from loading and validating configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Required setting '{name}' is missing")]
    Missing { name: String },

    #[error("Setting '{name}' is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

impl SettingsError {
    fn missing(name: &str) -> Self {
        Self::Missing {
            name: name.to_string(),
        }
    }

    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn required_env(name: &str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::missing(name))
}

/// Infrastructure settings: database location and listen address
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
}

impl BootstrapSettings {
    /// Load bootstrap settings from environment variables with defaults
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = env_or("DATABASE_URL", "sqlite://docket.db?mode=rwc");
        if database_url.is_empty() {
            return Err(SettingsError::invalid("DATABASE_URL", "cannot be empty"));
        }

        let server_host = env_or("HOST", "0.0.0.0");
        if server_host.is_empty() {
            return Err(SettingsError::invalid("HOST", "cannot be empty"));
        }

        let port_value = env_or("PORT", "3000");
        let server_port: u16 = port_value.parse().map_err(|_| {
            SettingsError::invalid(
                "PORT",
                format!("expected port number between 1 and 65535, got '{}'", port_value),
            )
        })?;
        if server_port == 0 {
            return Err(SettingsError::invalid("PORT", "port 0 is outside valid range"));
        }

        Ok(Self {
            database_url,
            server_host,
            server_port,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

/// Token issuance settings
///
/// `expire_minutes` may be zero or negative in configuration; issuance
/// falls back to 60 minutes in that case.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expire_minutes: i64,
}

impl JwtSettings {
    /// Load JWT settings from environment variables
    ///
    /// `JWT_SECRET` is required and must be at least 32 characters; issuer,
    /// audience, and expiry have defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        let secret = required_env("JWT_SECRET")?;
        if secret.len() < 32 {
            return Err(SettingsError::invalid(
                "JWT_SECRET",
                format!("must be at least 32 characters, got {}", secret.len()),
            ));
        }

        let issuer = env_or("JWT_ISSUER", "docket-backend");
        let audience = env_or("JWT_AUDIENCE", "docket-clients");

        let expire_value = env_or("JWT_EXPIRE_MINUTES", "60");
        let expire_minutes: i64 = expire_value.parse().map_err(|_| {
            SettingsError::invalid(
                "JWT_EXPIRE_MINUTES",
                format!("expected an integer, got '{}'", expire_value),
            )
        })?;

        Ok(Self {
            secret,
            issuer,
            audience,
            expire_minutes,
        })
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expire_minutes", &self.expire_minutes)
            .finish()
    }
}

/// Administrator seed settings
#[derive(Clone)]
pub struct AdminSeedSettings {
    pub email: String,
    pub password: String,
}

impl AdminSeedSettings {
    /// Load admin seed settings from environment variables
    pub fn from_env() -> Result<Self, SettingsError> {
        let email = required_env("ADMIN_SEED_EMAIL")?;
        if !email.contains('@') {
            return Err(SettingsError::invalid(
                "ADMIN_SEED_EMAIL",
                "must be an email address",
            ));
        }

        let password = required_env("ADMIN_SEED_PASSWORD")?;
        if password.is_empty() {
            return Err(SettingsError::invalid("ADMIN_SEED_PASSWORD", "cannot be empty"));
        }

        Ok(Self { email, password })
    }
}

impl fmt::Debug for AdminSeedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeedSettings")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
