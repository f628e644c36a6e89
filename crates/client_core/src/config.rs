use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;
use shared::{domain::Step, protocol::Service};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "flow.toml";

const USERS_BASE_URL: &str = "http://localhost:8002";
const VERIFICATION_BASE_URL: &str = "http://localhost:8003";

/// How `/process-payment/` receives its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentEncoding {
    #[default]
    Json,
    Query,
}

impl FromStr for PaymentEncoding {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(PaymentEncoding::Json),
            "query" => Ok(PaymentEncoding::Query),
            _ => Err(()),
        }
    }
}

/// Client-side route paths for each page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub register: String,
    pub payment: String,
    pub verify_otp: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            register: "/".into(),
            payment: "/payment".into(),
            verify_otp: "/verify-otp".into(),
        }
    }
}

impl RouteTable {
    pub fn path_for(&self, step: Step) -> &str {
        match step {
            Step::Register => &self.register,
            Step::Payment => &self.payment,
            Step::VerifyOtp => &self.verify_otp,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Registration and payment.
    pub users_base_url: Url,
    /// OTP verification, checkout sessions and OTP resend.
    pub verification_base_url: Url,
    pub payment_encoding: PaymentEncoding,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
    pub routes: RouteTable,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            users_base_url: Url::parse(USERS_BASE_URL)
                .expect("default users url is a valid literal"),
            verification_base_url: Url::parse(VERIFICATION_BASE_URL)
                .expect("default verification url is a valid literal"),
            payment_encoding: PaymentEncoding::default(),
            request_timeout: None,
            routes: RouteTable::default(),
        }
    }
}

impl FlowSettings {
    /// Points every service at one origin. Handy for a single local backend.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            users_base_url: base_url.clone(),
            verification_base_url: base_url,
            ..Self::default()
        }
    }

    pub fn base_url(&self, service: Service) -> &Url {
        match service {
            Service::Users => &self.users_base_url,
            Service::Verification => &self.verification_base_url,
        }
    }

    fn apply_file(&mut self, file: FileSettings) -> Result<(), ConfigError> {
        if let Some(v) = file.users_base_url {
            self.users_base_url = parse_url("users_base_url", v)?;
        }
        if let Some(v) = file.verification_base_url {
            self.verification_base_url = parse_url("verification_base_url", v)?;
        }
        if let Some(v) = file.payment_encoding {
            self.payment_encoding = parse_encoding("payment_encoding", v)?;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(routes) = file.routes {
            if let Some(v) = routes.register {
                self.routes.register = v;
            }
            if let Some(v) = routes.payment {
                self.routes.payment = v;
            }
            if let Some(v) = routes.verify_otp {
                self.routes.verify_otp = v;
            }
        }
        Ok(())
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = env("APP__USERS_BASE_URL") {
            self.users_base_url = parse_url("APP__USERS_BASE_URL", v)?;
        }
        if let Some(v) = env("APP__VERIFICATION_BASE_URL") {
            self.verification_base_url = parse_url("APP__VERIFICATION_BASE_URL", v)?;
        }
        if let Some(v) = env("APP__PAYMENT_ENCODING") {
            self.payment_encoding = parse_encoding("APP__PAYMENT_ENCODING", v)?;
        }
        if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
            let secs = v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: "APP__REQUEST_TIMEOUT_SECS",
                value: v.clone(),
            })?;
            self.request_timeout = timeout_from_secs(secs);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    users_base_url: Option<String>,
    verification_base_url: Option<String>,
    payment_encoding: Option<String>,
    request_timeout_secs: Option<u64>,
    routes: Option<FileRoutes>,
}

#[derive(Debug, Default, Deserialize)]
struct FileRoutes {
    register: Option<String>,
    payment: Option<String>,
    verify_otp: Option<String>,
}

/// Defaults, then the toml file at `path`, then `APP__*` values from `env`.
/// A missing file is not an error.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<FlowSettings, ConfigError> {
    let mut settings = FlowSettings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file = toml::from_str::<FileSettings>(&raw).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            settings.apply_file(file)?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConfigError::Read {
                path: PathBuf::from(path),
                source,
            })
        }
    }

    settings.apply_env(env)?;
    Ok(settings)
}

fn parse_url(key: &'static str, raw: String) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: raw,
        source,
    })
}

fn parse_encoding(key: &'static str, raw: String) -> Result<PaymentEncoding, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
