use std::time::Instant;

use tracing::warn;

use crate::config::{ApiConfig, LimitsConfig};
use crate::providers::{AlchemyClient, BasenameResolver, NeynarClient, ProviderError};

/// Shared per-process handles. A provider whose key is not configured is `None`
/// and the routes that need it answer 500 instead of the process refusing to start.
#[derive(Clone)]
pub struct AppState {
    pub alchemy: Option<AlchemyClient>,
    pub neynar: Option<NeynarClient>,
    pub names: BasenameResolver,
    pub limits: LimitsConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        alchemy: Option<AlchemyClient>,
        neynar: Option<NeynarClient>,
        names: BasenameResolver,
        limits: LimitsConfig,
    ) -> Self {
        assert!(limits.top_tokens > 0, "Top token count must be positive");
        assert!(
            limits.gallery_page_size > 0,
            "Gallery page size must be positive"
        );
        Self {
            alchemy,
            neynar,
            names,
            limits,
            start_time: Instant::now(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ProviderError> {
        let alchemy = match config.alchemy.api_key.as_deref() {
            Some(key) => Some(AlchemyClient::new(&config.alchemy, key)?),
            None => {
                warn!("Alchemy API key not configured; holdings routes will return 500");
                None
            }
        };
        let neynar = match config.neynar.api_key.as_deref() {
            Some(key) => Some(NeynarClient::new(&config.neynar, key)?),
            None => {
                warn!("Neynar API key not configured; search routes will return 500");
                None
            }
        };
        let names = BasenameResolver::new(&config.names)?;
        Ok(Self::new(alchemy, neynar, names, config.limits.clone()))
    }
}
