use std::fmt;

use launcher_core::campaign::normalize_account_id;
use launcher_core::error::CoreError;

/// Developer token issued for the manager account.
pub const ENV_DEVELOPER_TOKEN: &str = "GOOGLE_ADS_DEVELOPER_TOKEN";
/// OAuth client id.
pub const ENV_CLIENT_ID: &str = "GOOGLE_ADS_CLIENT_ID";
/// OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "GOOGLE_ADS_CLIENT_SECRET";
/// Long-lived OAuth refresh token.
pub const ENV_REFRESH_TOKEN: &str = "GOOGLE_ADS_REFRESH_TOKEN";
/// Manager (MCC) account id sent as `login-customer-id`.
pub const ENV_LOGIN_CUSTOMER_ID: &str = "GOOGLE_ADS_LOGIN_CUSTOMER_ID";

/// Every credential variable, in the order they are reported when missing.
pub const REQUIRED_CREDENTIALS: [&str; 5] = [
    ENV_DEVELOPER_TOKEN,
    ENV_CLIENT_ID,
    ENV_CLIENT_SECRET,
    ENV_REFRESH_TOKEN,
    ENV_LOGIN_CUSTOMER_ID,
];

const DEFAULT_BASE_URL: &str = "https://googleads.googleapis.com";
const DEFAULT_API_VERSION: &str = "v17";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Credentials for the Google Ads API.
///
/// `Debug` redacts every secret so the struct can be logged safely.
#[derive(Clone)]
pub struct AdsCredentials {
    pub developer_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// Manager account id, digits only.
    pub login_customer_id: String,
}

impl fmt::Debug for AdsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdsCredentials")
            .field("developer_token", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("login_customer_id", &self.login_customer_id)
            .finish()
    }
}

impl AdsCredentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup.
    ///
    /// Blank values count as missing. Every missing variable is reported
    /// at once, so the operator can fix the environment in one pass.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let values: Vec<Option<String>> = REQUIRED_CREDENTIALS.iter().map(|n| read(*n)).collect();
        let missing: Vec<&'static str> = REQUIRED_CREDENTIALS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(n, _)| *n)
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::ConfigurationMissing(missing));
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        let developer_token = next();
        let client_id = next();
        let client_secret = next();
        let refresh_token = next();
        let login_customer_id = normalize_account_id(&next())?;

        Ok(Self {
            developer_token,
            client_id,
            client_secret,
            refresh_token,
            login_customer_id,
        })
    }
}

/// Non-secret client settings with defaults.
///
/// | Env Var                     | Default                              |
/// |-----------------------------|--------------------------------------|
/// | `GOOGLE_ADS_BASE_URL`       | `https://googleads.googleapis.com`   |
/// | `GOOGLE_ADS_API_VERSION`    | `v17`                                |
/// | `GOOGLE_ADS_TOKEN_URL`      | `https://oauth2.googleapis.com/token`|
/// | `GOOGLE_ADS_TIMEOUT_SECS`   | `60`                                 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdsSettings {
    pub base_url: String,
    pub api_version: String,
    pub token_url: String,
    pub request_timeout_secs: u64,
}

impl Default for AdsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AdsSettings {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |name: &str, default: String| {
            lookup(name)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let request_timeout_secs = match lookup("GOOGLE_ADS_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                CoreError::Validation(format!(
                    "GOOGLE_ADS_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            base_url: read("GOOGLE_ADS_BASE_URL", defaults.base_url),
            api_version: read("GOOGLE_ADS_API_VERSION", defaults.api_version),
            token_url: read("GOOGLE_ADS_TOKEN_URL", defaults.token_url),
            request_timeout_secs,
        })
    }
}
