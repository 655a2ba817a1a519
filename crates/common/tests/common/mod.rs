//! Shared helpers for the integration tests
#![allow(dead_code)]

use common::dashboard::Dashboard;
use common::identifier::Identifier;
use common::session::{sign_in, KeyWallet, Session};
use common::store::MemoryStore;
use common::testkit::MemoryStorage;

pub fn id(s: &str) -> Identifier {
    Identifier::new(s).unwrap()
}

/// A dashboard over in-memory storage and store, plus handles to both
pub fn setup_dashboard() -> (Dashboard<MemoryStorage, MemoryStore>, MemoryStorage, MemoryStore) {
    let storage = MemoryStorage::new();
    let store = MemoryStore::new();
    let dashboard = Dashboard::new(storage.clone(), store.clone());
    (dashboard, storage, store)
}

/// A session that has signed in with a fresh wallet
pub async fn signed_in_session(store: &MemoryStore) -> (Session, KeyWallet) {
    let wallet = KeyWallet::generate().unwrap();
    let mut session = Session::new();
    sign_in(&mut session, &wallet, store).await.unwrap();
    (session, wallet)
}
