//! System clipboard access through the platform's clipboard tools.
//!
//! Wayland uses `wl-copy`, X11 `xclip` or `xsel`, macOS `pbcopy` and
//! Windows `clip`. The first tool found on `PATH` gets the text on stdin.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard tool found (install wl-clipboard, xclip or xsel)")]
    NoTool,
    #[error("failed to run {tool}: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}")]
    Failed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },
}

/// Destination for the rendered result
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// A clipboard command line: program plus fixed arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tool {
    program: &'static str,
    args: &'static [&'static str],
}

const WL_COPY: Tool = Tool {
    program: "wl-copy",
    args: &[],
};

const FALLBACK_TOOLS: &[Tool] = &[
    Tool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    Tool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
    Tool {
        program: "pbcopy",
        args: &[],
    },
    Tool {
        program: "clip.exe",
        args: &[],
    },
    Tool {
        program: "clip",
        args: &[],
    },
];

/// The clipboard of the machine we are running on
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        let (tool, path) = candidates(wayland)
            .find_map(|tool| which::which(tool.program).ok().map(|path| (tool, path)))
            .ok_or(ClipboardError::NoTool)?;

        tracing::debug!(tool = tool.program, "writing to clipboard");
        pipe_into(tool, path, text)
    }
}

fn candidates(wayland: bool) -> impl Iterator<Item = Tool> {
    wayland
        .then_some(WL_COPY)
        .into_iter()
        .chain(FALLBACK_TOOLS.iter().copied())
}

fn pipe_into(tool: Tool, path: PathBuf, text: &str) -> Result<(), ClipboardError> {
    let io_err = |source: std::io::Error| ClipboardError::Io {
        tool: tool.program,
        source,
    };

    let mut child = Command::new(path)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(io_err)?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    if let Err(e) = written {
        // Reap the child so a broken pipe does not leave a zombie behind
        let _ = child.kill();
        let _ = child.wait();
        return Err(io_err(e));
    }

    let status = child.wait().map_err(io_err)?;
    if !status.success() {
        return Err(ClipboardError::Failed {
            tool: tool.program,
            status,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wayland_prefers_wl_copy() {
        let first = candidates(true).next().unwrap();
        assert_eq!(first.program, "wl-copy");
    }

    #[test]
    fn x11_starts_with_xclip() {
        let programs: Vec<_> = candidates(false).map(|t| t.program).collect();
        assert_eq!(programs[0], "xclip");
        assert!(!programs.contains(&"wl-copy"));
    }

    #[cfg(unix)]
    #[test]
    fn tool_that_ignores_stdin_is_reaped_on_write_error() {
        let tool = Tool {
            program: "true",
            args: &[],
        };
        let path = which::which("true").unwrap();
        // Larger than a pipe buffer, so the write outlives the child
        let text = "x".repeat(4 * 1024 * 1024);

        let err = pipe_into(tool, path, &text).unwrap_err();
        assert!(matches!(err, ClipboardError::Io { tool: "true", .. }));
    }

    #[test]
    fn no_tool_error_mentions_install_hint() {
        assert!(ClipboardError::NoTool.to_string().contains("xclip"));
    }
}
