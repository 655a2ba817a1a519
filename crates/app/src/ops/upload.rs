use std::path::PathBuf;

use clap::Args;
use common::dashboard::UploadOutcome;
use common::format::DateFormat;
use common::ledger::Persistence;
use common::session::{restore, Address, SessionEvent, UploadError};
use common::storage::UploadFile;
use url::Url;

use crate::render::render_dashboard;
use crate::state::StateError;

/// Upload one or more files as a single directory
#[derive(Args, Debug, Clone)]
pub struct Upload {
    /// Files to upload
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadOpError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("not signed in. Run 'decloud sign-in' first")]
    NotSignedIn,
    #[error("{0}")]
    Upload(#[from] UploadError),
}

#[async_trait::async_trait]
impl crate::op::Op for Upload {
    type Error = UploadOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let wallet = state.wallet()?;
        let dashboard = state.dashboard()?;

        let mut session = restore(&wallet, dashboard.ledger().store()).await;
        if !session.is_authenticated() {
            return Err(UploadOpError::NotSignedIn);
        }

        let mut files = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let data = tokio::fs::read(path)
                .await
                .map_err(|e| UploadOpError::Read(path.clone(), e))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            files.push(UploadFile::new(name, data));
        }
        session.apply(SessionEvent::FilesSelected(files));

        let outcome = dashboard.upload(&mut session).await?;
        Ok(summarize(
            &outcome,
            session.address(),
            &state.config.gateway_url,
        ))
    }
}

/// Receipt first, so the root is reported even if the reload failed
fn summarize(outcome: &UploadOutcome, address: Option<&Address>, gateway: &Url) -> String {
    let receipt = &outcome.receipt;
    let mut out = vec![
        receipt.message(),
        format!("Root CID: {}", receipt.identifier),
    ];
    if receipt.persistence == Persistence::SessionOnly {
        out.push(
            "Warning: the upload could not be saved locally and will be forgotten after this session"
                .to_string(),
        );
    }
    out.push(String::new());
    match &outcome.catalog {
        Ok(catalog) => out.push(render_dashboard(address, catalog, gateway, DateFormat::Date)),
        Err(e) => out.push(format!("Could not reload your files: {}", e)),
    }
    out.join("\n")
}
