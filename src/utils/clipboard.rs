use log::warn;
use thiserror::Error;

/// Error when the host offers no clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard unavailable: {reason}")]
pub struct ClipboardUnavailable {
    pub reason: String,
}

/// Host clipboard access.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardUnavailable>;
}

/// A clipboard that is never there, for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardUnavailable> {
        Err(ClipboardUnavailable { reason: "no clipboard on this host".to_string() })
    }
}

/// The system clipboard, through `arboard`.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn connect() -> Result<Self, ClipboardUnavailable> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardUnavailable { reason: e.to_string() })
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardUnavailable> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardUnavailable { reason: e.to_string() })
    }
}

/// The system clipboard when one can be reached, otherwise [NoClipboard].
#[cfg(feature = "clipboard")]
pub fn host_clipboard() -> Box<dyn Clipboard> {
    match SystemClipboard::connect() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            warn!("{}", e);
            Box::new(NoClipboard)
        }
    }
}

/// Always [NoClipboard]; build with the `clipboard` feature for the system clipboard.
#[cfg(not(feature = "clipboard"))]
pub fn host_clipboard() -> Box<dyn Clipboard> {
    Box::new(NoClipboard)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The text to show so the user can copy it by hand
    ManualCopy(String),
}

/// Copy `text`, falling back to handing it back for display.
pub fn copy_or_display(clipboard: &mut dyn Clipboard, text: &str) -> CopyOutcome {
    match clipboard.set_text(text) {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            warn!("{}, falling back to manual copy", e);
            CopyOutcome::ManualCopy(text.to_string())
        }
    }
}
