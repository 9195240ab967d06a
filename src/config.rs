use derive_builder::Builder;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

#[serde_as]
#[derive(Deserialize, Debug, Clone, Builder)]
#[serde(default)]
#[builder(default)]
pub struct Config {
    #[serde_as(as = "DisplayFromStr")]
    pub log: tracing::Level,

    /// Page size used when a list request does not carry one
    pub default_page_size: u32,

    /// Largest page size a list request may ask for
    pub max_page_size: u32,

    #[builder(setter(into))]
    pub token_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: tracing::Level::INFO,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            token_type: String::from(DEFAULT_TOKEN_TYPE),
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ACID").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Config>())?;

        Ok(config)
    }
}
