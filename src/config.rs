use crate::advice::{AdvicePolicy, DEFAULT_DELTA_THRESHOLD, DEFAULT_RATIO_HIGH, DEFAULT_RATIO_LOW};
use std::{env, net::IpAddr, net::SocketAddr, path::PathBuf, str::FromStr};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data.csv";
pub const DEFAULT_CALORIES_PER_STEP: f64 = 0.05;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("{0}")]
    Inconsistent(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub data_path: PathBuf,
    pub advice: AdvicePolicy,
    pub calories_per_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            advice: AdvicePolicy::default(),
            calories_per_step: DEFAULT_CALORIES_PER_STEP,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = parse_var(&lookup, "HOST")?.unwrap_or(IpAddr::from([0, 0, 0, 0]));
        let port: u16 = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);
        let data_path = lookup("FITTRACK_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let policy = lookup("FITTRACK_ADVICE_POLICY").unwrap_or_else(|| "delta".to_string());
        let advice = match policy.trim().to_ascii_lowercase().as_str() {
            "delta" => {
                let threshold: i64 = parse_var(&lookup, "FITTRACK_DELTA_THRESHOLD")?
                    .unwrap_or(DEFAULT_DELTA_THRESHOLD);
                if threshold < 0 {
                    return Err(ConfigError::Invalid {
                        name: "FITTRACK_DELTA_THRESHOLD",
                        value: threshold.to_string(),
                    });
                }
                AdvicePolicy::Delta { threshold }
            }
            "ratio" => {
                let low: f64 =
                    parse_var(&lookup, "FITTRACK_RATIO_LOW")?.unwrap_or(DEFAULT_RATIO_LOW);
                let high: f64 =
                    parse_var(&lookup, "FITTRACK_RATIO_HIGH")?.unwrap_or(DEFAULT_RATIO_HIGH);
                if !(low >= 0.0 && low < high) {
                    return Err(ConfigError::Inconsistent(format!(
                        "FITTRACK_RATIO_LOW ({low}) must be non-negative and below FITTRACK_RATIO_HIGH ({high})"
                    )));
                }
                AdvicePolicy::Ratio { low, high }
            }
            _ => {
                return Err(ConfigError::Invalid {
                    name: "FITTRACK_ADVICE_POLICY",
                    value: policy,
                });
            }
        };

        let calories_per_step: f64 = parse_var(&lookup, "FITTRACK_CALORIES_PER_STEP")?
            .unwrap_or(DEFAULT_CALORIES_PER_STEP);
        if !(calories_per_step.is_finite() && calories_per_step >= 0.0) {
            return Err(ConfigError::Invalid {
                name: "FITTRACK_CALORIES_PER_STEP",
                value: calories_per_step.to_string(),
            });
        }

        Ok(Self {
            addr: SocketAddr::new(host, port),
            data_path,
            advice,
            calories_per_step,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
