use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::DiffError;
use crate::traits::Interrupt;

/// Loop iterations between interrupt polls in the scan hot paths.
pub const POLL_INTERVAL: usize = 1 << 16;

/// Cancel flag plus optional deadline, shared with whoever may stop the scan.
#[derive(Clone, Debug)]
pub struct ScanControl {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl ScanControl {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for ScanControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupt for ScanControl {
    fn check(&self) -> Result<(), DiffError> {
        if self.is_cancelled() {
            return Err(DiffError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(DiffError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

/// Interrupt that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    #[inline]
    fn check(&self) -> Result<(), DiffError> {
        Ok(())
    }
}

/// Counts loop iterations and polls the interrupt every `POLL_INTERVAL` of them.
pub(crate) struct Poller<'a, I: Interrupt + ?Sized> {
    interrupt: &'a I,
    countdown: usize,
}

impl<'a, I: Interrupt + ?Sized> Poller<'a, I> {
    pub(crate) fn new(interrupt: &'a I) -> Self {
        Self {
            interrupt,
            countdown: POLL_INTERVAL,
        }
    }

    #[inline]
    pub(crate) fn tick(&mut self) -> Result<(), DiffError> {
        self.countdown -= 1;
        if self.countdown == 0 {
            self.countdown = POLL_INTERVAL;
            self.interrupt.check()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_seen_by_clones() {
        let control = ScanControl::new();
        let shared = control.clone();
        assert!(control.check().is_ok());
        shared.cancel();
        assert!(matches!(control.check(), Err(DiffError::Cancelled)));
    }

    #[test]
    fn elapsed_deadline_fires() {
        let control = ScanControl::with_timeout(Duration::ZERO);
        assert!(matches!(control.check(), Err(DiffError::DeadlineExceeded)));
    }

    #[test]
    fn poller_checks_once_per_interval() {
        let control = ScanControl::new();
        control.cancel();
        let mut poller = Poller::new(&control);
        for _ in 0..POLL_INTERVAL - 1 {
            assert!(poller.tick().is_ok());
        }
        assert!(poller.tick().is_err());
    }
}
