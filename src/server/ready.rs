//! Readiness notification for the supervising desktop process.
//!
//! The parent expects exactly one `{"type":"ready","port":N}` message once the
//! listener is bound. Under Node/Electron the message goes over the IPC
//! channel named by `NODE_CHANNEL_FD`, which carries newline-delimited JSON.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub const NODE_CHANNEL_FD_ENV: &str = "NODE_CHANNEL_FD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParentMessage {
    Ready { port: u16 },
}

impl ParentMessage {
    /// One JSON document terminated by `\n`.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyNotifier {
    /// Node IPC channel inherited from the parent.
    NodeIpc(i32),
    Stdout,
    /// Not supervised; readiness is only logged.
    Disabled,
}

impl ReadyNotifier {
    pub fn detect(notify_stdout: bool) -> Self {
        Self::from_parts(notify_stdout, std::env::var(NODE_CHANNEL_FD_ENV).ok().as_deref())
    }

    fn from_parts(notify_stdout: bool, channel_fd: Option<&str>) -> Self {
        if notify_stdout {
            return ReadyNotifier::Stdout;
        }
        match channel_fd.and_then(|fd| fd.trim().parse::<i32>().ok()) {
            Some(fd) if fd >= 0 => ReadyNotifier::NodeIpc(fd),
            _ => ReadyNotifier::Disabled,
        }
    }

    /// Deliver `message`. Returns whether anything was sent.
    pub fn notify(&self, message: &ParentMessage) -> io::Result<bool> {
        let line = message.to_line().map_err(io::Error::other)?;
        match self {
            ReadyNotifier::Disabled => Ok(false),
            ReadyNotifier::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(line.as_bytes())?;
                out.flush()?;
                Ok(true)
            }
            ReadyNotifier::NodeIpc(fd) => {
                write_to_channel(*fd, line.as_bytes())?;
                Ok(true)
            }
        }
    }
}

#[cfg(unix)]
fn write_to_channel(fd: i32, bytes: &[u8]) -> io::Result<()> {
    use std::mem::ManuallyDrop;
    use std::os::unix::io::FromRawFd;

    // SAFETY: F_GETFD only reads the descriptor flags; an unknown fd yields EBADF.
    if unsafe { libc::fcntl(fd, libc::F_GETFD) } == -1 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: the descriptor is open (checked above) and was inherited from the
    // parent, which keeps it for the life of the process. ManuallyDrop keeps us
    // from closing it.
    let mut channel = ManuallyDrop::new(unsafe { std::fs::File::from_raw_fd(fd) });
    channel.write_all(bytes)?;
    channel.flush()
}

#[cfg(not(unix))]
fn write_to_channel(_fd: i32, _bytes: &[u8]) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "parent IPC channel is only supported on unix",
    ))
}
