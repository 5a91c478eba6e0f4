//! Two-state wait/ready gate holding at most one continuation.

/// Defers a single continuation until the document is ready.
///
/// While waiting, the first submitted continuation is parked and later ones
/// are dropped. Once open, submissions are handed straight back to run now.
#[derive(Debug)]
pub struct ReadinessGate<T> {
    open: bool,
    pending: Option<T>,
}

impl<T> ReadinessGate<T> {
    /// A gate waiting for its ready signal.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            open: false,
            pending: None,
        }
    }

    /// A gate whose ready signal already fired.
    #[must_use]
    pub fn ready() -> Self {
        Self {
            open: true,
            pending: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit a continuation. Returns it when it should run immediately.
    pub fn submit(&mut self, continuation: T) -> Option<T> {
        if self.open {
            return Some(continuation);
        }
        if self.pending.is_none() {
            self.pending = Some(continuation);
        }
        None
    }

    /// Fire the ready signal. Returns the parked continuation, if any;
    /// repeated signals return `None`.
    pub fn open(&mut self) -> Option<T> {
        self.open = true;
        self.pending.take()
    }
}

impl<T> Default for ReadinessGate<T> {
    fn default() -> Self {
        Self::waiting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_gate_runs_immediately() {
        let mut gate = ReadinessGate::ready();
        assert_eq!(gate.submit(1), Some(1));
        assert!(!gate.has_pending());
    }

    #[test]
    fn test_waiting_gate_parks_first_continuation() {
        let mut gate = ReadinessGate::waiting();
        assert_eq!(gate.submit("first"), None);
        assert_eq!(gate.submit("second"), None);
        assert!(gate.has_pending());

        assert_eq!(gate.open(), Some("first"));
        assert!(gate.is_open());
        assert_eq!(gate.open(), None);
    }

    #[test]
    fn test_open_without_continuation() {
        let mut gate: ReadinessGate<()> = ReadinessGate::default();
        assert_eq!(gate.open(), None);
        assert_eq!(gate.submit(()), Some(()));
    }
}
