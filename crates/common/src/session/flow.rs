use std::time::Duration;

use crate::identifier::Identifier;
use crate::ledger::{Ledger, Persistence};
use crate::storage::{with_timeout, StorageError, StorageService};
use crate::store::{KeyValueStore, StoreError};

use super::state::{Session, SessionEvent};
use super::wallet::{Address, WalletError, WalletProvider, WELCOME_MESSAGE};

/// Key the session token is persisted under
pub const SIGNATURE_KEY: &str = "signature";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),
    #[error("failed to persist signature: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("sign in before uploading files")]
    NotAuthenticated,
    #[error("No files chosen yet. Please choose some file(s) and try again!")]
    NoFilesSelected,
    #[error("Something went wrong. Please try again! ({0})")]
    Submission(#[from] StorageError),
}

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub identifier: Identifier,
    pub file_count: usize,
    pub persistence: Persistence,
}

impl UploadReceipt {
    pub fn message(&self) -> String {
        if self.file_count == 1 {
            "File uploaded successfully!".to_string()
        } else {
            format!("{} files uploaded successfully!", self.file_count)
        }
    }
}

/// Sign the welcome message with `wallet` and persist the signature.
///
/// On any failure the session is left as it was and the error is
///  logged before being returned.
pub async fn sign_in<W, K>(
    session: &mut Session,
    wallet: &W,
    store: &K,
) -> Result<Address, AuthError>
where
    W: WalletProvider + ?Sized,
    K: KeyValueStore + ?Sized,
{
    match authenticate(wallet, store).await {
        Ok(address) => {
            tracing::info!(%address, "signed in");
            session.apply(SessionEvent::SignInSucceeded {
                address: address.clone(),
            });
            Ok(address)
        }
        Err(e) => {
            tracing::error!(error = %e, "sign in failed");
            session.apply(SessionEvent::SignInFailed {
                reason: e.to_string(),
            });
            Err(e)
        }
    }
}

async fn authenticate<W, K>(wallet: &W, store: &K) -> Result<Address, AuthError>
where
    W: WalletProvider + ?Sized,
    K: KeyValueStore + ?Sized,
{
    let accounts = wallet.request_accounts().await?;
    if accounts.is_empty() {
        return Err(WalletError::NoAccounts.into());
    }
    let address = wallet.signer_address().await?;
    let signature = wallet.sign_message(WELCOME_MESSAGE).await?;
    store.set_item(SIGNATURE_KEY, &signature).await?;
    Ok(address)
}

/// Rebuild a session from a persisted signature.
///
/// The session is authenticated only if a signature exists and
///  verifies against the wallet's current address.
pub async fn restore<W, K>(wallet: &W, store: &K) -> Session
where
    W: WalletProvider + ?Sized,
    K: KeyValueStore + ?Sized,
{
    let mut session = Session::new();

    let signature = match store.get_item(SIGNATURE_KEY).await {
        Ok(Some(signature)) => signature,
        Ok(None) => return session,
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored signature");
            return session;
        }
    };

    let address = match wallet.signer_address().await {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!(error = %e, "wallet unavailable, staying signed out");
            return session;
        }
    };

    match wallet.verify_message(&address, WELCOME_MESSAGE, signature.trim()) {
        Ok(()) => {
            session.apply(SessionEvent::SignInSucceeded { address });
        }
        Err(e) => tracing::warn!(error = %e, "stored signature is not valid for this wallet"),
    }
    session
}

/// Forget the persisted signature and end the session
pub async fn sign_out<K>(session: &mut Session, store: &K) -> Result<(), StoreError>
where
    K: KeyValueStore + ?Sized,
{
    store.remove_item(SIGNATURE_KEY).await?;
    session.apply(SessionEvent::SignedOut);
    Ok(())
}

/// Submit the session's selected files as one upload and record the
///  resulting root in the ledger.
///
/// An empty selection fails before the storage network is contacted.
///  A failed submission leaves the ledger untouched. After a success
///  the caller is expected to rebuild the catalog from the ledger.
pub async fn upload_files<S, K>(
    session: &mut Session,
    storage: &S,
    ledger: &Ledger<K>,
    timeout: Duration,
) -> Result<UploadReceipt, UploadError>
where
    S: StorageService + ?Sized,
    K: KeyValueStore,
{
    if !session.is_authenticated() {
        return Err(UploadError::NotAuthenticated);
    }

    let selection = session.selection().to_vec();
    if selection.is_empty() {
        session.apply(SessionEvent::UploadFailed {
            reason: UploadError::NoFilesSelected.to_string(),
        });
        return Err(UploadError::NoFilesSelected);
    }
    let file_count = selection.len();

    let identifier = match with_timeout(timeout, storage.put(selection)).await {
        Ok(identifier) => identifier,
        Err(e) => {
            tracing::error!(error = %e, file_count, "upload failed");
            session.apply(SessionEvent::UploadFailed {
                reason: e.to_string(),
            });
            return Err(e.into());
        }
    };

    let persistence = ledger.append(identifier.clone()).await;
    tracing::info!(%identifier, file_count, ?persistence, "upload complete");
    session.apply(SessionEvent::UploadSucceeded(identifier.clone()));

    Ok(UploadReceipt {
        identifier,
        file_count,
        persistence,
    })
}
