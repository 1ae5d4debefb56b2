//! Application state.

use std::sync::Arc;

use reelforge_render::{RenderConfig, RenderPipeline};
use reelforge_stock::StockClient;
use reelforge_storage::OutputStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<RenderPipeline>,
    pub store: Arc<OutputStore>,
}

impl AppState {
    /// Create new application state.
    ///
    /// All configuration is read from the environment exactly once here;
    /// nothing mutates it afterwards.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let render_config = RenderConfig::from_env();
        let stock = StockClient::from_env()?;
        let store = OutputStore::from_env();

        let pipeline = RenderPipeline::new(render_config, stock, store.clone());

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
            store: Arc::new(store),
        })
    }
}
