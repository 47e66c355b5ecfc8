//! Scout configuration from environment variables

use std::env;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://sc2pulse.nephest.com/sc2/api";
pub const MAX_SPARKLINE_DAYS: i64 = 3_650;

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutConfig {
    /// Base URL of the ladder API
    pub api_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Max legacy-uid keys sent in one history request
    pub history_key_limit: usize,

    /// Candidate rating band
    pub min_rating: i64,
    pub max_rating: i64,

    /// Sparkline window for summaries
    pub sparkline_days: i64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
            history_key_limit: 10,
            min_rating: 0,
            max_rating: 5000,
            sparkline_days: 7,
        }
    }
}

impl ScoutConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `PULSE_API_URL` (default: https://sc2pulse.nephest.com/sc2/api)
    /// - `PULSE_TIMEOUT_SECS` (default: 10)
    /// - `SCOUT_HISTORY_KEY_LIMIT` (default: 10)
    /// - `SCOUT_MIN_MMR` (default: 0)
    /// - `SCOUT_MAX_MMR` (default: 5000)
    /// - `SCOUT_SPARKLINE_DAYS` (default: 7, at most 3650)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = match env::var("PULSE_API_URL") {
            Ok(url) if url.trim().is_empty() => {
                return Err(ConfigError::MissingVariable("PULSE_API_URL".to_string()))
            }
            Ok(url) => url.trim().to_string(),
            Err(_) => defaults.api_url,
        };

        let config = Self {
            api_url,
            timeout_secs: parse_var("PULSE_TIMEOUT_SECS", defaults.timeout_secs)?,
            history_key_limit: parse_var("SCOUT_HISTORY_KEY_LIMIT", defaults.history_key_limit)?,
            min_rating: parse_var("SCOUT_MIN_MMR", defaults.min_rating)?,
            max_rating: parse_var("SCOUT_MAX_MMR", defaults.max_rating)?,
            sparkline_days: parse_var("SCOUT_SPARKLINE_DAYS", defaults.sparkline_days)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "PULSE_API_URL must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "PULSE_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if self.history_key_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "SCOUT_HISTORY_KEY_LIMIT must be greater than 0".to_string(),
            ));
        }

        if self.min_rating > self.max_rating {
            return Err(ConfigError::InvalidValue(format!(
                "SCOUT_MIN_MMR ({}) exceeds SCOUT_MAX_MMR ({})",
                self.min_rating, self.max_rating
            )));
        }

        if self.sparkline_days <= 0 || self.sparkline_days > MAX_SPARKLINE_DAYS {
            return Err(ConfigError::InvalidValue(format!(
                "SCOUT_SPARKLINE_DAYS must be between 1 and {}, got {}",
                MAX_SPARKLINE_DAYS, self.sparkline_days
            )));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            ConfigError::InvalidValue(format!("{} must be a number, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "PULSE_API_URL",
        "PULSE_TIMEOUT_SECS",
        "SCOUT_HISTORY_KEY_LIMIT",
        "SCOUT_MIN_MMR",
        "SCOUT_MAX_MMR",
        "SCOUT_SPARKLINE_DAYS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    // Env vars are process-global; keep every env-mutating case in one test
    #[test]
    fn test_from_env() {
        clear_env();
        let config = ScoutConfig::from_env().unwrap();
        assert_eq!(config, ScoutConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);

        env::set_var("PULSE_API_URL", "http://localhost:8080/api");
        env::set_var("PULSE_TIMEOUT_SECS", "25");
        env::set_var("SCOUT_HISTORY_KEY_LIMIT", "4");
        env::set_var("SCOUT_MIN_MMR", "2000");
        env::set_var("SCOUT_MAX_MMR", " 4500 ");
        env::set_var("SCOUT_SPARKLINE_DAYS", "14");
        let config = ScoutConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.timeout_secs, 25);
        assert_eq!(config.history_key_limit, 4);
        assert_eq!(config.min_rating, 2000);
        assert_eq!(config.max_rating, 4500);
        assert_eq!(config.sparkline_days, 14);

        env::set_var("PULSE_TIMEOUT_SECS", "soon");
        assert!(matches!(
            ScoutConfig::from_env(),
            Err(ConfigError::InvalidValue(_))
        ));
        env::remove_var("PULSE_TIMEOUT_SECS");

        env::set_var("PULSE_API_URL", "  ");
        assert!(matches!(
            ScoutConfig::from_env(),
            Err(ConfigError::MissingVariable(_))
        ));

        env::set_var("PULSE_API_URL", "ftp://example.test");
        assert!(matches!(
            ScoutConfig::from_env(),
            Err(ConfigError::InvalidValue(_))
        ));

        clear_env();
    }

    #[test]
    fn test_validate_rating_band() {
        let config = ScoutConfig {
            min_rating: 4000,
            max_rating: 3000,
            ..ScoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate_key_limit() {
        let config = ScoutConfig {
            history_key_limit: 0,
            ..ScoutConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ScoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_sparkline_days_bounds() {
        let too_long = ScoutConfig {
            sparkline_days: 200_000_000,
            ..ScoutConfig::default()
        };
        assert!(matches!(too_long.validate(), Err(ConfigError::InvalidValue(_))));

        let zero = ScoutConfig {
            sparkline_days: 0,
            ..ScoutConfig::default()
        };
        assert!(zero.validate().is_err());

        let longest = ScoutConfig {
            sparkline_days: MAX_SPARKLINE_DAYS,
            ..ScoutConfig::default()
        };
        assert!(longest.validate().is_ok());
    }
}
