//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so `Config::from_env` works on a bare checkout. Values that need parsing
//! (ports, URLs, flags, sizes) are validated here and surface as
//! `ConfigError::InvalidValue`.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use url::Url;

/// Environment variable names. Public so tests and the auxiliary binaries can
/// refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_SITE_URL: &str = "SITE_URL";
pub const ENV_SITE_NAME: &str = "SITE_NAME";
pub const ENV_CONTENT_DIR: &str = "CONTENT_DIR";
pub const ENV_PUBLIC_DIR: &str = "PUBLIC_DIR";
pub const ENV_SMTP_HOST: &str = "SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_SMTP_USER: &str = "SMTP_USER";
pub const ENV_SMTP_PASSWORD: &str = "SMTP_PASSWORD";
pub const ENV_ENQUIRY_RECIPIENT: &str = "ENQUIRY_RECIPIENT";
pub const ENV_WHATSAPP_NUMBER: &str = "WHATSAPP_NUMBER";
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";
pub const ENV_ADMIN_USERNAME: &str = "ADMIN_USERNAME";
pub const ENV_ADMIN_PASSWORD_HASH: &str = "ADMIN_PASSWORD_HASH";
pub const ENV_CANONICAL_REDIRECT: &str = "CANONICAL_REDIRECT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";

const ALL_ENV_KEYS: [&str; 16] = [
    ENV_BIND_ADDR,
    ENV_SITE_URL,
    ENV_SITE_NAME,
    ENV_CONTENT_DIR,
    ENV_PUBLIC_DIR,
    ENV_SMTP_HOST,
    ENV_SMTP_PORT,
    ENV_SMTP_USER,
    ENV_SMTP_PASSWORD,
    ENV_ENQUIRY_RECIPIENT,
    ENV_WHATSAPP_NUMBER,
    ENV_JWT_SECRET,
    ENV_ADMIN_USERNAME,
    ENV_ADMIN_PASSWORD_HASH,
    ENV_CANONICAL_REDIRECT,
    ENV_MAX_UPLOAD_BYTES,
];

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SITE_URL: &str = "https://www.example.ae";
const DEFAULT_SITE_NAME: &str = "Dubai Approvals";
const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_SMTP_HOST: &str = "localhost";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_WHATSAPP_NUMBER: &str = "971500000000";
const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// SMTP relay settings for enquiry notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Inbox receiving enquiries; `SMTP_USER` when no override is set.
    pub recipient: String,
}

/// Where the site keeps generated blog artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub content_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl SiteLayout {
    pub fn new(content_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    /// Listing store file.
    pub fn store_path(&self) -> PathBuf {
        self.content_dir.join("posts.json")
    }

    /// Directory holding one rendering unit per post.
    pub fn units_dir(&self) -> PathBuf {
        self.content_dir.join("blog")
    }

    /// Scratch space for staged commits. Lives next to the units so renames
    /// stay on one filesystem.
    pub fn staging_dir(&self) -> PathBuf {
        self.content_dir.join(".staging")
    }

    /// Blog images, served under `/assets/blog/`.
    pub fn assets_dir(&self) -> PathBuf {
        self.public_dir.join("assets").join("blog")
    }

    pub fn unit_path(&self, slug: &str) -> PathBuf {
        self.units_dir().join(format!("{slug}.html"))
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    site_url: Url,
    site_name: String,
    layout: SiteLayout,
    smtp: SmtpConfig,
    whatsapp_number: String,
    jwt_secret: String,
    admin_username: String,
    admin_password_hash: Option<String>,
    canonical_redirect: bool,
    max_upload_bytes: usize,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = var_or(ENV_BIND_ADDR, DEFAULT_BIND_ADDR);

        let site_url = var_or(ENV_SITE_URL, DEFAULT_SITE_URL);
        let site_url = Url::parse(&site_url).map_err(|e| ConfigError::InvalidValue {
            field: ENV_SITE_URL,
            reason: e.to_string(),
        })?;

        let smtp_port = match env::var(ENV_SMTP_PORT) {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_SMTP_PORT,
                reason: format!("'{raw}' is not a port number"),
            })?,
            Err(_) => DEFAULT_SMTP_PORT,
        };
        let smtp_user = var_or(ENV_SMTP_USER, "");
        let recipient = env::var(ENV_ENQUIRY_RECIPIENT)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| smtp_user.clone());

        let canonical_redirect = match env::var(ENV_CANONICAL_REDIRECT) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                field: ENV_CANONICAL_REDIRECT,
                reason: format!("'{raw}' is not a boolean"),
            })?,
            Err(_) => true,
        };

        let max_upload_bytes = match env::var(ENV_MAX_UPLOAD_BYTES) {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_MAX_UPLOAD_BYTES,
                reason: format!("'{raw}' is not a byte count"),
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let jwt_secret = var_or(ENV_JWT_SECRET, DEFAULT_JWT_SECRET);
        let admin_password_hash = env::var(ENV_ADMIN_PASSWORD_HASH)
            .ok()
            .filter(|v| !v.trim().is_empty());
        // A known signing key would let anyone mint admin tokens.
        if admin_password_hash.is_some()
            && (jwt_secret.trim().is_empty() || jwt_secret == DEFAULT_JWT_SECRET)
        {
            return Err(ConfigError::InvalidValue {
                field: ENV_JWT_SECRET,
                reason: format!(
                    "must be set to a private value when {ENV_ADMIN_PASSWORD_HASH} is set"
                ),
            });
        }

        Ok(Self {
            bind_addr,
            site_url,
            site_name: var_or(ENV_SITE_NAME, DEFAULT_SITE_NAME),
            layout: SiteLayout::new(
                var_or(ENV_CONTENT_DIR, DEFAULT_CONTENT_DIR),
                var_or(ENV_PUBLIC_DIR, DEFAULT_PUBLIC_DIR),
            ),
            smtp: SmtpConfig {
                host: var_or(ENV_SMTP_HOST, DEFAULT_SMTP_HOST),
                port: smtp_port,
                user: smtp_user,
                password: var_or(ENV_SMTP_PASSWORD, ""),
                recipient,
            },
            whatsapp_number: var_or(ENV_WHATSAPP_NUMBER, DEFAULT_WHATSAPP_NUMBER),
            jwt_secret,
            admin_username: var_or(ENV_ADMIN_USERNAME, DEFAULT_ADMIN_USERNAME),
            admin_password_hash,
            canonical_redirect,
            max_upload_bytes,
        })
    }

    /// Development defaults rooted at the given directories. Used by tests
    /// and tools that must not touch the working directory.
    pub fn for_layout(layout: SiteLayout) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            site_url: Url::parse(DEFAULT_SITE_URL).expect("default site url is valid"),
            site_name: DEFAULT_SITE_NAME.to_string(),
            layout,
            smtp: SmtpConfig {
                host: DEFAULT_SMTP_HOST.to_string(),
                port: DEFAULT_SMTP_PORT,
                user: String::new(),
                password: String::new(),
                recipient: "enquiries@example.ae".to_string(),
            },
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password_hash: None,
            canonical_redirect: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_admin_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.admin_password_hash = Some(hash.into());
        self
    }

    pub fn with_canonical_redirect(mut self, enabled: bool) -> Self {
        self.canonical_redirect = enabled;
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Public base URL, used for canonical links and the sitemap.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }
    pub fn smtp(&self) -> &SmtpConfig {
        &self.smtp
    }
    /// International number without `+`, as expected by wa.me links.
    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }
    /// Secret used for signing/verifying admin JWTs.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }
    /// Argon2 PHC string. `None` disables admin login.
    pub fn admin_password_hash(&self) -> Option<&str> {
        self.admin_password_hash.as_deref()
    }
    pub fn canonical_redirect(&self) -> bool {
        self.canonical_redirect
    }
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Absolute URL for a site path such as `/blog/some-post`.
    pub fn absolute_url(&self, path: &str) -> String {
        self.site_url
            .join(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.site_url.as_str().trim_end_matches('/'), path))
    }

    /// Environment keys this module reads.
    pub fn env_keys() -> &'static [&'static str] {
        &ALL_ENV_KEYS
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
