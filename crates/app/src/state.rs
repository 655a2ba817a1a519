use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use common::dashboard::Dashboard;
use common::session::{KeyWallet, WalletError};
use common::storage::{KuboClient, StorageError, DEFAULT_REQUEST_TIMEOUT};
use common::store::FileStore;
use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "decloud";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const KEY_FILE_NAME: &str = "key.pem";
pub const STORE_DIR_NAME: &str = "store";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP RPC endpoint of the IPFS node uploads go to
    #[serde(default = "default_storage_url")]
    pub storage_url: Url,
    /// Gateway used to build links to uploaded files
    #[serde(default = "default_gateway_url")]
    pub gateway_url: Url,
    /// Upper bound on each call to the storage node, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_storage_url() -> Url {
    Url::parse("http://127.0.0.1:5001").expect("hardcoded URL must parse")
}

fn default_gateway_url() -> Url {
    Url::parse("https://ipfs.io").expect("hardcoded URL must parse")
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_url: default_storage_url(),
            gateway_url: default_gateway_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the decloud directory (~/.decloud)
    pub decloud_dir: PathBuf,
    /// Path to the wallet key PEM file
    pub key_path: PathBuf,
    /// Directory backing the persisted key-value store
    pub store_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the decloud directory path (custom or default ~/.decloud)
    pub fn decloud_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory with a fresh wallet key
    pub fn init(custom_path: Option<PathBuf>, config: Option<AppConfig>) -> Result<Self, StateError> {
        let decloud_dir = Self::decloud_dir(custom_path)?;

        if decloud_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&decloud_dir)?;

        let store_path = decloud_dir.join(STORE_DIR_NAME);
        fs::create_dir_all(&store_path)?;

        let wallet = KeyWallet::generate()?;
        let key_path = decloud_dir.join(KEY_FILE_NAME);
        fs::write(&key_path, wallet.to_pem())?;

        let config = config.unwrap_or_default();
        let config_path = decloud_dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, toml::to_string_pretty(&config)?)?;

        Ok(Self {
            decloud_dir,
            key_path,
            store_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the decloud directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let decloud_dir = Self::decloud_dir(custom_path)?;

        if !decloud_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let key_path = decloud_dir.join(KEY_FILE_NAME);
        let store_path = decloud_dir.join(STORE_DIR_NAME);
        let config_path = decloud_dir.join(CONFIG_FILE_NAME);

        if !key_path.exists() {
            return Err(StateError::MissingFile(KEY_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config: AppConfig = toml::from_str(&fs::read_to_string(&config_path)?)?;

        Ok(Self {
            decloud_dir,
            key_path,
            store_path,
            config_path,
            config,
        })
    }

    /// Load the wallet key from the key file
    pub fn wallet(&self) -> Result<KeyWallet, StateError> {
        let pem = fs::read_to_string(&self.key_path)?;
        Ok(KeyWallet::from_pem(&pem)?)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }

    pub fn storage(&self) -> Result<KuboClient, StateError> {
        Ok(KuboClient::new(&self.config.storage_url)?)
    }

    pub fn dashboard(&self) -> Result<Dashboard<KuboClient, FileStore>, StateError> {
        Ok(Dashboard::new(self.storage()?, self.store()).with_timeout(self.config.request_timeout()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("decloud directory not initialized. Run 'decloud init' first")]
    NotInitialized,

    #[error("decloud directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("storage client error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
