use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Somewhere text can be copied to
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> io::Result<()>;
}

/// Copies through the terminal using the OSC 52 escape sequence,
///  which most terminal emulators (and tmux, with `set-clipboard on`)
///  forward to the system clipboard.
#[derive(Debug)]
pub struct TerminalClipboard<W> {
    out: W,
}

impl TerminalClipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for TerminalClipboard<W> {
    fn set_text(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()
    }
}

/// Copy `text` and hand back the confirmation to show the user
pub fn copy_to_clipboard<C: Clipboard>(
    clipboard: &mut C,
    text: &str,
    message: &str,
) -> io::Result<String> {
    clipboard.set_text(text)?;
    tracing::debug!(text, "copied to clipboard");
    Ok(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        let mut clipboard = TerminalClipboard::new(Vec::new());
        let confirmation =
            copy_to_clipboard(&mut clipboard, "bafyfile", "File CID copied to clipboard!").unwrap();

        assert_eq!(confirmation, "File CID copied to clipboard!");
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, format!("\x1b]52;c;{}\x07", STANDARD.encode("bafyfile")));
    }
}
