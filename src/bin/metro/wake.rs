//! Screen wake lock backed by the platform's inhibitor command.
//!
//! The lock is held for as long as the child process lives. If something
//! else kills it, the next poll reports the lock as released.

use std::{
    io,
    process::{Child, Command, Stdio},
};

use saavy_metronome::runtime::{WakeLock, WakeLockError};

#[derive(Default)]
pub struct SystemWakeLock {
    child: Option<Child>,
}

impl SystemWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

fn inhibitor() -> Option<Command> {
    if cfg!(target_os = "linux") {
        let mut cmd = Command::new("systemd-inhibit");
        cmd.args([
            "--what=idle",
            "--who=metro",
            "--why=metronome playing",
            "sleep",
            "infinity",
        ]);
        Some(cmd)
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("caffeinate");
        cmd.arg("-d");
        Some(cmd)
    } else {
        None
    }
}

impl WakeLock for SystemWakeLock {
    fn acquire(&mut self) -> Result<(), WakeLockError> {
        if self.child.is_some() {
            return Ok(());
        }
        let mut cmd = inhibitor().ok_or(WakeLockError::Unsupported)?;
        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => WakeLockError::Unsupported,
                _ => WakeLockError::Denied(err.to_string()),
            })?;
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                log::debug!("wake lock process already gone: {err}");
            }
            let _ = child.wait();
        }
    }

    fn poll_released(&mut self) -> bool {
        let exited = match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(Some(status))) => {
                log::debug!("wake lock process exited: {status}");
                true
            }
            Some(Err(err)) => {
                log::warn!("lost track of wake lock process: {err}");
                true
            }
            _ => false,
        };
        if exited {
            self.child = None;
        }
        exited
    }
}

impl Drop for SystemWakeLock {
    fn drop(&mut self) {
        self.release();
    }
}
