use clap::Args;
use url::Url;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// HTTP RPC endpoint of the IPFS node to upload to
    #[arg(long, default_value = "http://127.0.0.1:5001")]
    pub storage_url: Url,

    /// Gateway used for file links
    #[arg(long, default_value = "https://ipfs.io")]
    pub gateway_url: Url,

    /// Timeout for each request to the IPFS node, in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            storage_url: self.storage_url.clone(),
            gateway_url: self.gateway_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;
        let address = state.wallet()?.address();

        Ok(format!(
            "Initialized decloud directory at: {}\n\
             - Wallet key: {}\n\
             - Wallet address: {}\n\
             - Store: {}\n\
             - Config: {}\n\
             - Storage node: {}\n\
             - Gateway: {}",
            state.decloud_dir.display(),
            state.key_path.display(),
            address,
            state.store_path.display(),
            state.config_path.display(),
            state.config.storage_url,
            state.config.gateway_url,
        ))
    }
}
