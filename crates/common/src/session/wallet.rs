use std::fmt;

use async_trait::async_trait;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

/// Size of an Ed25519 secret key in bytes
pub const SECRET_KEY_SIZE: usize = 32;
const PEM_TAG: &str = "PRIVATE KEY";

/// Message the user signs to start a session
pub const WELCOME_MESSAGE: &str = "
Welcome to DeCloud! 

Please sign this message to start uploading files to the IPFS.
";

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("request rejected by the wallet: {0}")]
    Rejected(String),
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
    #[error("wallet exposed no accounts")]
    NoAccounts,
    #[error("signature does not match address {0}")]
    InvalidSignature(Address),
    #[error("key error: {0}")]
    Key(#[from] anyhow::Error),
}

/// Account address as exposed by a wallet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signing wallet
#[async_trait]
pub trait WalletProvider: Send + Sync + fmt::Debug {
    /// Ask the wallet to expose its accounts to us
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Address of the account that signs
    async fn signer_address(&self) -> Result<Address, WalletError>;

    /// Sign `message`, returning an encoded signature
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;

    /// Check that `signature` over `message` was produced by `address`
    fn verify_message(
        &self,
        address: &Address,
        message: &str,
        signature: &str,
    ) -> Result<(), WalletError>;
}

/// Wallet backed by a local Ed25519 key.
///
/// Addresses are the `0x`-prefixed hex public key and signatures
///  are hex encoded.
#[derive(Debug, Clone)]
pub struct KeyWallet {
    key: SigningKey,
}

impl KeyWallet {
    /// Generate a fresh key using the OS RNG
    pub fn generate() -> Result<Self, WalletError> {
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| WalletError::Unavailable(format!("no randomness available: {}", e)))?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Self {
        Self {
            key: SigningKey::from_bytes(bytes),
        }
    }

    /// Encode the key in PEM format with tag "PRIVATE KEY"
    pub fn to_pem(&self) -> String {
        pem::encode(&pem::Pem::new(PEM_TAG, self.key.to_bytes()))
    }

    /// Parse a key written by [`KeyWallet::to_pem`]
    pub fn from_pem(pem_str: &str) -> Result<Self, WalletError> {
        let pem = pem::parse(pem_str).map_err(|e| anyhow::anyhow!("failed to parse PEM: {}", e))?;
        if pem.tag() != PEM_TAG {
            return Err(anyhow::anyhow!("invalid PEM tag, expected {}", PEM_TAG).into());
        }

        let bytes: [u8; SECRET_KEY_SIZE] = pem.contents().try_into().map_err(|_| {
            anyhow::anyhow!(
                "invalid private key size in PEM, expected {}, got {}",
                SECRET_KEY_SIZE,
                pem.contents().len()
            )
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn address(&self) -> Address {
        address_of(&self.key.verifying_key())
    }
}

fn address_of(key: &VerifyingKey) -> Address {
    Address(format!("0x{}", hex::encode(key.as_bytes())))
}

fn parse_address(address: &Address) -> Result<VerifyingKey, WalletError> {
    let digits = address.as_str().strip_prefix("0x").unwrap_or(address.as_str());
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|_| anyhow::anyhow!("address hex decode error"))?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| anyhow::anyhow!("invalid address: {}", e).into())
}

#[async_trait]
impl WalletProvider for KeyWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address()])
    }

    async fn signer_address(&self) -> Result<Address, WalletError> {
        Ok(self.address())
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let signature = self.key.sign(message.as_bytes());
        Ok(hex::encode(signature.to_bytes()))
    }

    fn verify_message(
        &self,
        address: &Address,
        message: &str,
        signature: &str,
    ) -> Result<(), WalletError> {
        let key = parse_address(address)?;
        let bytes = hex::decode(signature)
            .map_err(|_| WalletError::InvalidSignature(address.clone()))?;
        let signature = Signature::from_slice(&bytes)
            .map_err(|_| WalletError::InvalidSignature(address.clone()))?;
        key.verify_strict(message.as_bytes(), &signature)
            .map_err(|_| WalletError::InvalidSignature(address.clone()))
    }
}
