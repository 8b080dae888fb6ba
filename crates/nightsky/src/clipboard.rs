//! Copy-email button with temporary feedback and a manual fallback.

use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, WrapErr};

/// Writes text to a clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. The handle is kept alive so X11/Wayland
/// selections outlive the write.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("connected", &self.inner.is_some())
            .finish()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().wrap_err("clipboard unavailable")?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_string())
                .wrap_err("clipboard write failed")?;
        }
        Ok(())
    }
}

/// What pressing the copy button did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing to copy.
    Skipped,
    Copied,
    /// The clipboard failed; the address is shown for manual copying.
    Fallback,
}

/// Button state: its label and an optional fallback prompt.
#[derive(Debug)]
pub struct CopyButton {
    idle_label: String,
    label: String,
    restore_at: Option<Instant>,
    prompt: Option<String>,
}

impl CopyButton {
    pub const COPIED_LABEL: &'static str = "Copied!";
    pub const FEEDBACK: Duration = Duration::from_millis(1200);
    pub const PROMPT_TITLE: &'static str = "Copy email address:";

    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            idle_label: label.clone(),
            label,
            restore_at: None,
            prompt: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Address awaiting manual copy, if the clipboard failed.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    /// Copy `email`, showing feedback on success or the prompt on failure.
    pub fn press(
        &mut self,
        email: &str,
        clipboard: &mut impl ClipboardWriter,
        now: Instant,
    ) -> CopyOutcome {
        if email.is_empty() {
            return CopyOutcome::Skipped;
        }
        match clipboard.write_text(email) {
            Ok(()) => {
                self.label = Self::COPIED_LABEL.to_string();
                self.restore_at = Some(now + Self::FEEDBACK);
                CopyOutcome::Copied
            }
            Err(err) => {
                log::warn!("copy to clipboard failed: {err:#}");
                self.prompt = Some(email.to_string());
                CopyOutcome::Fallback
            }
        }
    }

    /// Restore the idle label once the feedback period has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.restore_at.is_some_and(|at| now >= at) {
            self.label = self.idle_label.clone();
            self.restore_at = None;
        }
    }

    /// When `tick` next needs to run.
    pub fn deadline(&self) -> Option<Instant> {
        self.restore_at
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeClipboard {
        written: Vec<String>,
        fail: bool,
    }

    impl ClipboardWriter for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(eyre!("no display"));
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_shows_feedback_then_restores() {
        let mut button = CopyButton::new("Copy email");
        let mut clipboard = FakeClipboard::default();
        let now = Instant::now();

        let outcome = button.press("ada@example.com", &mut clipboard, now);
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(clipboard.written, vec!["ada@example.com".to_string()]);
        assert_eq!(button.label(), CopyButton::COPIED_LABEL);

        button.tick(now + Duration::from_millis(1199));
        assert_eq!(button.label(), CopyButton::COPIED_LABEL);
        button.tick(now + CopyButton::FEEDBACK);
        assert_eq!(button.label(), "Copy email");
        assert_eq!(button.deadline(), None);
    }

    #[test]
    fn test_double_press_restores_idle_label() {
        let mut button = CopyButton::new("Copy email");
        let mut clipboard = FakeClipboard::default();
        let now = Instant::now();
        button.press("a@b.c", &mut clipboard, now);
        button.press("a@b.c", &mut clipboard, now + Duration::from_millis(100));
        button.tick(now + Duration::from_secs(5));
        assert_eq!(button.label(), "Copy email");
    }

    #[test]
    fn test_failure_opens_prompt() {
        let mut button = CopyButton::new("Copy email");
        let mut clipboard = FakeClipboard {
            fail: true,
            ..Default::default()
        };
        let outcome = button.press("ada@example.com", &mut clipboard, Instant::now());
        assert_eq!(outcome, CopyOutcome::Fallback);
        assert_eq!(button.prompt(), Some("ada@example.com"));
        assert_eq!(button.label(), "Copy email");
        button.dismiss_prompt();
        assert_eq!(button.prompt(), None);
    }

    #[test]
    fn test_empty_email_is_skipped() {
        let mut button = CopyButton::new("Copy email");
        let mut clipboard = FakeClipboard::default();
        assert_eq!(
            button.press("", &mut clipboard, Instant::now()),
            CopyOutcome::Skipped
        );
        assert!(clipboard.written.is_empty());
    }
}
