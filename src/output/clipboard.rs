//! System clipboard through the platform's copy command

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    /// None of the known copy commands is installed
    #[error("No clipboard command found (tried: {0})")]
    NoClipboardFound(String),

    #[error("Clipboard command '{command}' failed: {message}")]
    CommandFailed { command: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A copy command that reads the text on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardCommand {
    Pbcopy,
    WlCopy,
    Xclip,
    Xsel,
    ClipExe,
    Termux,
}

impl ClipboardCommand {
    fn program(self) -> &'static str {
        match self {
            Self::Pbcopy => "pbcopy",
            Self::WlCopy => "wl-copy",
            Self::Xclip => "xclip",
            Self::Xsel => "xsel",
            Self::ClipExe => "clip.exe",
            Self::Termux => "termux-clipboard-set",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::Xsel => &["--clipboard", "--input"],
            _ => &[],
        }
    }

    fn copy(self, text: &str) -> Result<(), ClipboardError> {
        let command = self.program();
        let mut child = Command::new(command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.as_mut().ok_or_else(|| ClipboardError::CommandFailed {
            command,
            message: "stdin unavailable".to_string(),
        })?;
        stdin.write_all(text.as_bytes())?;
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed { command, message: format!("exited with {}", status) })
        }
    }
}

/// Commands worth trying on this platform, most specific first.
fn candidates() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        return vec![ClipboardCommand::Pbcopy];
    }
    if cfg!(target_os = "windows") {
        return vec![ClipboardCommand::ClipExe];
    }
    if cfg!(target_os = "android") {
        return vec![ClipboardCommand::Termux];
    }

    let mut list = Vec::new();
    if env::var_os("WAYLAND_DISPLAY").is_some() {
        list.push(ClipboardCommand::WlCopy);
    }
    list.extend([ClipboardCommand::Xclip, ClipboardCommand::Xsel]);
    if env::var_os("WSL_DISTRO_NAME").is_some() {
        list.insert(0, ClipboardCommand::ClipExe);
    }
    list.push(ClipboardCommand::Termux);
    list
}

/// `true` when `program` is an existing file on `PATH`.
fn command_exists(program: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| Path::new(&dir).join(program).is_file()))
        .unwrap_or(false)
}

/// Copy `text` with the first available clipboard command.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let candidates = candidates();
    let Some(command) = candidates.iter().copied().find(|c| command_exists(c.program())) else {
        let tried: Vec<&str> = candidates.iter().map(|c| c.program()).collect();
        return Err(ClipboardError::NoClipboardFound(tried.join(", ")));
    };

    tracing::debug!("Copying {} bytes with {}", text.len(), command.program());
    command.copy(text)
}
