//! Wallet sessions and the upload flow
//!
//! A [`Session`] is either anonymous or authenticated by a wallet
//!  signature over [`WELCOME_MESSAGE`]. Only an authenticated session
//!  can upload; each upload yields exactly one new root, which is
//!  appended to the [`Ledger`](crate::ledger::Ledger).

mod flow;
mod state;
mod wallet;

pub use flow::{
    restore, sign_in, sign_out, upload_files, AuthError, UploadError, UploadReceipt,
    SIGNATURE_KEY,
};
pub use state::{Session, SessionEvent, SessionState};
pub use wallet::{Address, KeyWallet, WalletError, WalletProvider, WELCOME_MESSAGE};
