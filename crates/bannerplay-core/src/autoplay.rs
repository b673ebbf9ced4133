//! Autoplay Recovery
//!
//! When the browser refuses to resume playback after a source swap, the
//! controller arms a one-shot recovery: the next user gesture retries
//! playback, and the first successful play disarms it again.

/// Recovery state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RecoveryState {
    #[default]
    Idle,
    Armed { attempts: u32 },
}

/// Per-controller autoplay recovery
#[derive(Debug, Default)]
pub struct AutoplayRecovery {
    state: RecoveryState,
}

impl AutoplayRecovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm recovery. Returns true only on the Idle -> Armed transition, i.e.
    /// when gesture listeners must be registered.
    pub fn arm(&mut self) -> bool {
        match self.state {
            RecoveryState::Idle => {
                self.state = RecoveryState::Armed { attempts: 0 };
                true
            }
            RecoveryState::Armed { .. } => false,
        }
    }

    /// Record a retry; returns false when not armed
    pub fn record_attempt(&mut self) -> bool {
        match &mut self.state {
            RecoveryState::Armed { attempts } => {
                *attempts += 1;
                true
            }
            RecoveryState::Idle => false,
        }
    }

    /// Disarm after a successful play. Returns true if it was armed, i.e.
    /// when gesture listeners must be removed.
    pub fn disarm(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.state = RecoveryState::Idle;
        was_armed
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, RecoveryState::Armed { .. })
    }

    /// Retries made since arming
    pub fn attempts(&self) -> u32 {
        match self.state {
            RecoveryState::Armed { attempts } => attempts,
            RecoveryState::Idle => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_once() {
        let mut recovery = AutoplayRecovery::new();

        assert!(recovery.arm());
        assert!(!recovery.arm());
        assert!(recovery.is_armed());
    }

    #[test]
    fn test_attempts_and_disarm() {
        let mut recovery = AutoplayRecovery::new();
        assert!(!recovery.record_attempt());

        recovery.arm();
        recovery.record_attempt();
        recovery.record_attempt();
        assert_eq!(recovery.attempts(), 2);

        assert!(recovery.disarm());
        assert!(!recovery.disarm());
        assert_eq!(recovery.attempts(), 0);
    }
}
