use crate::config::GateConfig;
use crate::moderation::{ImageModerator, RekognitionModerator};
use crate::store::{ObjectStore, S3Store};
use aws_config::{BehaviorVersion, Region};
use std::sync::Arc;

/// Shared application state
///
/// Holds the immutable configuration plus the two downstream client
/// handles. Requests never share mutable data, so nothing here needs
/// synchronization beyond the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration
    pub config: Arc<GateConfig>,

    /// Object store (S3 in production, in-memory in tests)
    pub store: Arc<dyn ObjectStore>,

    /// Moderation service (Rekognition in production)
    pub moderator: Arc<dyn ImageModerator>,
}

impl AppState {
    /// Create state with production AWS clients
    pub async fn from_config(config: GateConfig) -> anyhow::Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let aws = loader.load().await;

        let store = S3Store::new(&aws, &config);
        let moderator = RekognitionModerator::new(&aws, &config);

        Ok(Self::with_components(
            config,
            Arc::new(store),
            Arc::new(moderator),
        ))
    }

    /// Create state from explicit components
    pub fn with_components(
        config: GateConfig,
        store: Arc<dyn ObjectStore>,
        moderator: Arc<dyn ImageModerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            moderator,
        }
    }
}
