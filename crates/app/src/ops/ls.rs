use clap::Args;
use common::format::DateFormat;
use common::ledger::LedgerError;
use common::session::restore;

use crate::render::render_dashboard;
use crate::state::StateError;

/// Show every file uploaded from this machine
#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// How to print upload dates (date or datetime)
    #[arg(long, default_value_t = DateFormat::Date)]
    pub date_format: DateFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("not signed in. Run 'decloud sign-in' first")]
    NotSignedIn,
    #[error("failed to read upload history: {0}")]
    Ledger(#[from] LedgerError),
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = LsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let wallet = state.wallet()?;
        let dashboard = state.dashboard()?;

        let session = restore(&wallet, dashboard.ledger().store()).await;
        if !session.is_authenticated() {
            return Err(LsError::NotSignedIn);
        }

        let catalog = dashboard.load().await?;
        Ok(render_dashboard(
            session.address(),
            &catalog,
            &state.config.gateway_url,
            self.date_format,
        ))
    }
}
