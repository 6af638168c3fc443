use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

const WL_COPY_COMMAND: &str = "wl-copy";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run wl-copy command: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("wl-copy exited with non-zero status: {status}")]
    CommandFailed { status: String },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()>;
}

/// Wayland clipboard via the `wl-copy` utility, fed over stdin so the text
/// never touches the filesystem.
#[derive(Debug, Default)]
pub struct WlCopyBackend;

fn command_io(source: io::Error) -> ClipboardError {
    ClipboardError::CommandIo {
        command: WL_COPY_COMMAND.to_string(),
        source,
    }
}

impl ClipboardBackend for WlCopyBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        let mut child = Command::new(WL_COPY_COMMAND)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(command_io)?;

        {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                command_io(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "child stdin unavailable",
                ))
            })?;
            stdin.write_all(text.as_bytes()).map_err(command_io)?;
        }

        let status = child.wait().map_err(command_io)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed {
                status: status.to_string(),
            })
        }
    }
}
