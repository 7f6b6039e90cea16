//! Ctrl-C tracking for long builds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Records whether the user pressed Ctrl-C.
///
/// The build process shares our process group and receives the signal
/// itself; we only remember that it happened so the truncated stderr is
/// not reduced into a misleading report.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Install the process-wide Ctrl-C handler.
    pub fn install() -> Result<Self, super::DriverError> {
        let interrupt = Self::default();
        let flag = Arc::clone(&interrupt.flag);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once Ctrl-C has been seen.
    pub fn check(&self) -> Result<(), super::DriverError> {
        if self.is_set() {
            Err(super::DriverError::Interrupted)
        } else {
            Ok(())
        }
    }
}
