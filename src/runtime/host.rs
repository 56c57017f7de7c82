//! Host notifications: visibility and the screen wake lock.
//!
//! The wake lock is a best-effort power hint. Every failure is logged and
//! swallowed; playback never depends on it.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WakeLockError {
    #[error("wake lock is not supported on this host")]
    Unsupported,
    #[error("wake lock request denied: {0}")]
    Denied(String),
}

/// A platform wake lock.
pub trait WakeLock {
    fn acquire(&mut self) -> Result<(), WakeLockError>;

    fn release(&mut self);

    /// Poll for a release the host performed on its own. Returns true once
    /// per revocation.
    fn poll_released(&mut self) -> bool {
        false
    }
}

impl WakeLock for Box<dyn WakeLock> {
    fn acquire(&mut self) -> Result<(), WakeLockError> {
        (**self).acquire()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn poll_released(&mut self) -> bool {
        (**self).poll_released()
    }
}

/// Wake lock for hosts without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWakeLock;

impl WakeLock for NoWakeLock {
    fn acquire(&mut self) -> Result<(), WakeLockError> {
        Err(WakeLockError::Unsupported)
    }

    fn release(&mut self) {}
}

/// Notifications pushed by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The UI became visible (focused) or hidden
    VisibilityChanged { visible: bool },
    /// The host revoked the wake lock
    WakeLockReleased,
}

/// Tracks whether the lock is held so requests and releases stay idempotent.
pub(crate) struct WakeLockGuard<W> {
    lock: W,
    held: bool,
}

impl<W: WakeLock> WakeLockGuard<W> {
    pub(crate) fn new(lock: W) -> Self {
        Self { lock, held: false }
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held
    }

    /// Acquire unless already held.
    pub(crate) fn request(&mut self) {
        if self.held {
            return;
        }
        match self.lock.acquire() {
            Ok(()) => {
                log::debug!("wake lock acquired");
                self.held = true;
            }
            Err(WakeLockError::Unsupported) => {
                log::trace!("wake lock unsupported");
            }
            Err(err) => {
                log::warn!("could not acquire wake lock: {err}");
            }
        }
    }

    pub(crate) fn release(&mut self) {
        if self.held {
            self.lock.release();
            self.held = false;
            log::debug!("wake lock released");
        }
    }

    /// The host dropped the lock. Re-acquire when `reacquire` holds.
    pub(crate) fn revoked(&mut self, reacquire: bool) {
        self.held = false;
        if reacquire {
            log::debug!("wake lock revoked while playing, re-acquiring");
            self.request();
        }
    }

    pub(crate) fn poll_released(&mut self) -> bool {
        self.lock.poll_released()
    }

    pub(crate) fn lock(&self) -> &W {
        &self.lock
    }

    #[cfg(test)]
    pub(crate) fn lock_mut(&mut self) -> &mut W {
        &mut self.lock
    }
}
