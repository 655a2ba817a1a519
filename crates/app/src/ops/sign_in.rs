use clap::Args;
use common::session::{sign_in, AuthError, Session};

use crate::state::StateError;

/// Sign the welcome message with your wallet key to start a session
#[derive(Args, Debug, Clone)]
pub struct SignIn;

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("sign in failed: {0}")]
    Auth(#[from] AuthError),
}

#[async_trait::async_trait]
impl crate::op::Op for SignIn {
    type Error = SignInError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let wallet = state.wallet()?;
        let store = state.store();

        let mut session = Session::new();
        let address = sign_in(&mut session, &wallet, &store).await?;

        Ok(format!("Signed in as {}", address))
    }
}
