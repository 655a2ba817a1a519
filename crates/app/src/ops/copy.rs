use clap::Args;
use common::clipboard::{copy_to_clipboard, TerminalClipboard};
use common::identifier::Identifier;

/// Copy a CID to the clipboard
#[derive(Args, Debug, Clone)]
pub struct CopyCid {
    /// CID to copy
    pub cid: Identifier,
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("failed to write to the clipboard: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for CopyCid {
    type Error = CopyError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut clipboard = TerminalClipboard::stdout();
        Ok(copy_to_clipboard(
            &mut clipboard,
            &self.cid,
            "File CID copied to clipboard!",
        )?)
    }
}
