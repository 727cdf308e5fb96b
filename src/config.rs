use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which scoring model the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringModelKind {
    /// Fixed weighted combination.
    Weighted,
    /// Linear model with fitted parameters loaded from `MODEL_PARAMS_PATH`.
    Trained,
}

impl FromStr for ScoringModelKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(ScoringModelKind::Weighted),
            "trained" => Ok(ScoringModelKind::Trained),
            other => anyhow::bail!(
                "SCORING_MODEL must be 'weighted' or 'trained', got '{}'",
                other
            ),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub api_keys: Vec<String>,
    pub scoring_model: ScoringModelKind,
    pub model_params_path: Option<PathBuf>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub max_body_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .field("scoring_model", &self.scoring_model)
            .field("model_params_path", &self.model_params_path)
            .field("rate_limit_per_second", &self.rate_limit_per_second)
            .field("rate_limit_burst", &self.rate_limit_burst)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            api_keys: lookup("API_KEYS")
                .ok_or_else(|| anyhow::anyhow!("API_KEYS environment variable required"))
                .and_then(|raw| parse_api_keys(&raw))?,
            scoring_model: lookup("SCORING_MODEL")
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<ScoringModelKind>())
                .transpose()?
                .unwrap_or(ScoringModelKind::Weighted),
            model_params_path: lookup("MODEL_PARAMS_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            rate_limit_per_second: lookup("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a positive number"))
                .and_then(|n: u64| {
                    if n == 0 {
                        anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than zero");
                    }
                    Ok(n)
                })?,
            rate_limit_burst: lookup("RATE_LIMIT_BURST")
                .unwrap_or_else(|| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive number"))
                .and_then(|n: u32| {
                    if n == 0 {
                        anyhow::bail!("RATE_LIMIT_BURST must be greater than zero");
                    }
                    Ok(n)
                })?,
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .unwrap_or_else(|| (1024 * 1024).to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a valid byte count"))?,
        };

        if config.scoring_model == ScoringModelKind::Trained && config.model_params_path.is_none()
        {
            anyhow::bail!("MODEL_PARAMS_PATH is required when SCORING_MODEL=trained");
        }

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("API keys configured: {}", config.api_keys.len());
        tracing::debug!("Scoring model: {:?}", config.scoring_model);
        if let Some(ref path) = config.model_params_path {
            tracing::debug!("Model parameters path: {}", path.display());
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Splits a comma-separated key list, rejecting empty entries.
fn parse_api_keys(raw: &str) -> anyhow::Result<Vec<String>> {
    let keys: Vec<String> = raw.split(',').map(|k| k.trim().to_string()).collect();
    if keys.iter().any(|k| k.is_empty()) {
        anyhow::bail!("API_KEYS cannot contain empty keys");
    }
    Ok(keys)
}
