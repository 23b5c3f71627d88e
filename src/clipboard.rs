//! Best-effort clipboard copy with transient "copied" feedback.
//!
//! Standalone utility with no ties to the workflow state machine. Copy
//! buttons are identified by [`CopyTarget`] variants rather than id
//! strings, and a successful copy flips a per-target flag that clears
//! itself after two seconds.

use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// How long the "copied" flag stays set after a successful copy.
const COPIED_HOLD: Duration = Duration::from_millis(2000);

/// Which copy button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    Step1,
    Step2,
    Blueprint,
    Todo,
    /// One of the generated prompts, by index.
    Prompt(usize),
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step1 => write!(f, "step1"),
            Self::Step2 => write!(f, "step2"),
            Self::Blueprint => write!(f, "blueprint"),
            Self::Todo => write!(f, "todo"),
            Self::Prompt(index) => write!(f, "prompt-{index}"),
        }
    }
}

/// Trait for clipboard write paths.
pub trait ClipboardBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Put `text` on the clipboard.
    fn copy(&self, text: &str) -> anyhow::Result<()>;
}

/// Backend that pipes text to a platform clipboard program.
pub struct CommandBackend {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandBackend {
    pub fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl ClipboardBackend for CommandBackend {
    fn name(&self) -> &str {
        self.program
    }

    fn copy(&self, text: &str) -> anyhow::Result<()> {
        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            anyhow::bail!("{} exited with {status}", self.program);
        }
        Ok(())
    }
}

/// Clipboard programs to try on this platform, primary first.
fn platform_backends() -> Vec<Box<dyn ClipboardBackend>> {
    #[cfg(target_os = "macos")]
    {
        vec![Box::new(CommandBackend::new("pbcopy", &[]))]
    }

    #[cfg(target_os = "windows")]
    {
        vec![Box::new(CommandBackend::new("clip", &[]))]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![
            Box::new(CommandBackend::new("wl-copy", &[])),
            Box::new(CommandBackend::new("xclip", &["-selection", "clipboard"])),
            Box::new(CommandBackend::new("xsel", &["--clipboard", "--input"])),
        ]
    }
}

/// Copies text and tracks which button recently succeeded.
pub struct CopyTracker {
    backends: Vec<Box<dyn ClipboardBackend>>,
    copied: Arc<Mutex<HashSet<CopyTarget>>>,
    hold: Duration,
}

impl CopyTracker {
    /// Tracker with the platform's default backend chain.
    pub fn new() -> Self {
        Self::with_backends(platform_backends())
    }

    /// Tracker with an explicit backend chain, primary first.
    pub fn with_backends(backends: Vec<Box<dyn ClipboardBackend>>) -> Self {
        Self { backends, copied: Arc::new(Mutex::new(HashSet::new())), hold: COPIED_HOLD }
    }

    /// Override how long the copied flag stays set.
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Copy `text` to the clipboard, best effort.
    ///
    /// Tries each backend in order; the first success sets the flag for
    /// `target` and schedules it to clear. Every failure is logged and
    /// swallowed. Must be called from within a tokio runtime.
    pub fn copy_to_clipboard(&self, text: &str, target: CopyTarget) {
        for backend in &self.backends {
            match backend.copy(text) {
                Ok(()) => {
                    self.mark_copied(target);
                    return;
                }
                Err(e) => {
                    tracing::debug!(backend = backend.name(), error = %e, "Clipboard backend failed, trying next");
                }
            }
        }
        tracing::warn!(button = %target, "Failed to copy text: no clipboard backend succeeded");
    }

    /// Whether `target` was copied within the last hold window.
    pub fn is_copied(&self, target: CopyTarget) -> bool {
        self.copied.lock().contains(&target)
    }

    fn mark_copied(&self, target: CopyTarget) {
        self.copied.lock().insert(target);

        let copied = Arc::clone(&self.copied);
        let hold = self.hold;
        tokio::spawn(async move {
            tokio::time::sleep(hold).await;
            copied.lock().remove(&target);
        });
    }
}

impl Default for CopyTracker {
    fn default() -> Self {
        Self::new()
    }
}
