use clap::Args;
use common::session::{restore, sign_out};
use common::store::StoreError;

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct SignOut;

#[derive(Debug, thiserror::Error)]
pub enum SignOutError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("failed to clear session: {0}")]
    Store(#[from] StoreError),
}

#[async_trait::async_trait]
impl crate::op::Op for SignOut {
    type Error = SignOutError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let wallet = state.wallet()?;
        let store = state.store();

        let mut session = restore(&wallet, &store).await;
        let was_signed_in = session.is_authenticated();
        sign_out(&mut session, &store).await?;

        if was_signed_in {
            Ok("Signed out".to_string())
        } else {
            Ok("Not signed in".to_string())
        }
    }
}
