use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional Google Books API key for higher quota
    #[serde(default)]
    pub google_books_api_key: Option<String>,

    /// Google Books API base URL
    #[serde(default = "default_google_books_api_url")]
    pub google_books_api_url: String,

    /// Unsplash image source base URL
    #[serde(default = "default_unsplash_url")]
    pub unsplash_url: String,

    /// Reddit base URL used for reader feedback
    #[serde(default = "default_reddit_url")]
    pub reddit_url: String,

    /// User-Agent sent to Reddit, which rejects anonymous clients
    #[serde(default = "default_reddit_user_agent")]
    pub reddit_user_agent: String,

    /// Timeout for the book search call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout for decorative image lookups, in seconds
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,

    /// Timeout for reader feedback lookups, in seconds
    #[serde(default = "default_feedback_timeout_secs")]
    pub feedback_timeout_secs: u64,

    /// Number of results requested when the form leaves it blank
    #[serde(default = "default_max_results")]
    pub default_max_results: u8,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_google_books_api_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_unsplash_url() -> String {
    "https://source.unsplash.com".to_string()
}

fn default_reddit_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_reddit_user_agent() -> String {
    "moodshelf/0.1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_image_timeout_secs() -> u64 {
    4
}

fn default_feedback_timeout_secs() -> u64 {
    8
}

fn default_max_results() -> u8 {
    6
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        // An empty key in .env means "no key", not a key of ""
        if config
            .google_books_api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            config.google_books_api_key = None;
        }

        Ok(config)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
