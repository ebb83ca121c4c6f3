use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Object-detection endpoint that accepts raw image bytes
    #[serde(default = "default_detector_url")]
    pub detector_url: String,

    /// Upper bound on a single detection call, in seconds
    #[serde(default = "default_detector_timeout_secs")]
    pub detector_timeout_secs: u64,

    /// JSON file used by the file-backed preference store
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,

    /// Redis connection URL; when set, preferences are kept in Redis instead of a file
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Key under which the preference blob is stored
    #[serde(default = "default_preferences_key")]
    pub preferences_key: String,

    /// Optional recipe catalog JSON file; the built-in catalog is used when absent
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Recommendations shown next to the ingredient results
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Recommendations on the dedicated recommendations page
    #[serde(default = "default_page_recommendation_limit")]
    pub page_recommendation_limit: usize,

    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,

    /// Most missing ingredients a recipe may have and still be offered with substitutions
    #[serde(default = "default_max_missing_ingredients")]
    pub max_missing_ingredients: usize,

    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_detector_url() -> String {
    "http://localhost:8500/v1/detect".to_string()
}

fn default_detector_timeout_secs() -> u64 {
    30
}

fn default_preferences_path() -> String {
    "user_preferences.json".to_string()
}

fn default_preferences_key() -> String {
    "userPreferences".to_string()
}

fn default_recommendation_limit() -> usize {
    6
}

fn default_page_recommendation_limit() -> usize {
    12
}

fn default_similar_limit() -> usize {
    4
}

fn default_max_missing_ingredients() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector_url: default_detector_url(),
            detector_timeout_secs: default_detector_timeout_secs(),
            preferences_path: default_preferences_path(),
            redis_url: None,
            preferences_key: default_preferences_key(),
            catalog_path: None,
            recommendation_limit: default_recommendation_limit(),
            page_recommendation_limit: default_page_recommendation_limit(),
            similar_limit: default_similar_limit(),
            max_missing_ingredients: default_max_missing_ingredients(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Build configuration from an explicit set of variables, ignoring the process environment
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
