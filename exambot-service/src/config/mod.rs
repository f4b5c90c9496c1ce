use rand::{distributions::Alphanumeric, Rng};
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::observability::LogFormat;
use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_ADMIN_USERNAME: &str = "shaswat369";
const DEFAULT_ADMIN_PASSWORD: &str = "shaswat.millionaire";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const LLM_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=3_600;
/// One minute to one year.
const TOKEN_TTL_RANGE: RangeInclusive<i64> = 1..=525_600;

#[derive(Debug, Clone)]
pub struct ExamBotConfig {
    pub common: core_config::Config,
    pub llm: LlmConfig,
    pub cors: CorsConfig,
    pub ads: AdsConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Environment {
    Dev,
    Prod,
}

/// Which model backend serves the generation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "LLM_PROVIDER must be 'gemini' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    /// Absent keys are tolerated at startup outside prod; requests then fail.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AdsConfig {
    pub file: PathBuf,
    /// When false, updates are accepted and logged but never written.
    pub persist: bool,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: Secret<String>,
    pub token_secret: Secret<String>,
    pub token_ttl_minutes: i64,
    pub require_token: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl ExamBotConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment = match env::var("ENVIRONMENT").as_deref() {
            Ok("prod") | Ok("production") => Environment::Prod,
            _ => Environment::Dev,
        };
        let is_prod = environment == Environment::Prod;

        let provider: ProviderKind = get_env("LLM_PROVIDER", Some("gemini"))?.parse()?;
        let api_key = optional_env("GEMINI_API_KEY")
            .or_else(|| optional_env("EMERGENT_LLM_KEY"))
            .map(Secret::new);

        if is_prod && provider == ProviderKind::Gemini && api_key.is_none() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY is required in production but not set"
            )));
        }

        let token_secret = match optional_env("ADMIN_TOKEN_SECRET") {
            Some(secret) => secret,
            None => {
                if is_prod {
                    return Err(AppError::ConfigError(anyhow::anyhow!(
                        "ADMIN_TOKEN_SECRET is required in production but not set"
                    )));
                }
                random_secret()
            }
        };

        Ok(ExamBotConfig {
            common: common_config,
            llm: LlmConfig {
                provider,
                api_key,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL))?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
                timeout_secs: ranged_env(
                    "LLM_TIMEOUT_SECS",
                    DEFAULT_LLM_TIMEOUT_SECS,
                    LLM_TIMEOUT_RANGE,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env("CORS_ORIGINS", Some("*"))?),
            },
            ads: AdsConfig {
                file: get_env("ADS_FILE", Some("ads.json"))?.into(),
                persist: parse_bool(&get_env("ADS_PERSIST", Some("true"))?),
            },
            admin: AdminConfig {
                username: get_env("ADMIN_USERNAME", Some(DEFAULT_ADMIN_USERNAME))?,
                password: Secret::new(get_env(
                    "ADMIN_PASSWORD",
                    Some(DEFAULT_ADMIN_PASSWORD),
                )?),
                token_secret: Secret::new(token_secret),
                token_ttl_minutes: ranged_env(
                    "ADMIN_TOKEN_TTL_MINUTES",
                    DEFAULT_TOKEN_TTL_MINUTES,
                    TOKEN_TTL_RANGE,
                )?,
                require_token: parse_bool(&get_env("ADMIN_REQUIRE_TOKEN", Some("false"))?),
            },
            logging: LoggingConfig {
                level: get_env("LOG_LEVEL", Some("info"))?,
                format: get_env("LOG_FORMAT", Some("json"))?
                    .parse()
                    .map_err(AppError::ConfigError)?,
                otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Numeric setting that must parse and fall inside `range` when present.
fn ranged_env<T>(key: &str, default: T, range: RangeInclusive<T>) -> Result<T, AppError>
where
    T: FromStr + PartialOrd + Display,
{
    let Some(raw) = optional_env(key) else {
        return Ok(default);
    };

    let value: T = raw.trim().parse().map_err(|_| {
        AppError::ConfigError(anyhow::anyhow!("{} must be a number, got '{}'", key, raw))
    })?;

    if !range.contains(&value) {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be between {} and {}, got {}",
            key,
            range.start(),
            range.end(),
            value
        )));
    }

    Ok(value)
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
