//! Two-state shutdown/reboot switch.
//!
//! `request` only arms the transition; the caller schedules `commit` after the exit
//! animation delay. Once armed the transition always completes.

use crate::model::DesktopMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownSequencer {
    mode: DesktopMode,
    pending: bool,
    shutdown_count: u32,
}

impl ShutdownSequencer {
    pub fn mode(&self) -> DesktopMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == DesktopMode::Running
    }

    /// Whether a requested shutdown is waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of completed `Running -> ShuttingDown` transitions; display-only.
    pub fn shutdown_count(&self) -> u32 {
        self.shutdown_count
    }

    /// Arms a shutdown. Returns `true` when the caller must schedule [`Self::commit`].
    pub fn request(&mut self) -> bool {
        if self.pending || !self.is_running() {
            return false;
        }
        self.pending = true;
        true
    }

    /// Performs the armed `Running -> ShuttingDown` transition.
    pub fn commit(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.mode = DesktopMode::ShuttingDown;
        self.shutdown_count = self.shutdown_count.saturating_add(1);
        true
    }

    /// Returns to `Running` once the shutdown view reports completion.
    pub fn complete(&mut self) -> bool {
        if self.mode != DesktopMode::ShuttingDown {
            return false;
        }
        self.mode = DesktopMode::Running;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_counts_shutdowns() {
        let mut sequencer = ShutdownSequencer::default();
        assert!(sequencer.is_running());

        assert!(sequencer.request());
        assert!(sequencer.is_running());
        assert!(sequencer.commit());
        assert_eq!(sequencer.mode(), DesktopMode::ShuttingDown);
        assert_eq!(sequencer.shutdown_count(), 1);

        assert!(sequencer.complete());
        assert!(sequencer.is_running());

        assert!(sequencer.request());
        assert!(sequencer.commit());
        assert_eq!(sequencer.shutdown_count(), 2);
    }

    #[test]
    fn repeated_requests_arm_once() {
        let mut sequencer = ShutdownSequencer::default();
        assert!(sequencer.request());
        assert!(!sequencer.request());
        assert!(sequencer.commit());
        assert!(!sequencer.commit());
        assert!(!sequencer.request());
        assert_eq!(sequencer.shutdown_count(), 1);
    }

    #[test]
    fn commit_and_complete_require_matching_state() {
        let mut sequencer = ShutdownSequencer::default();
        assert!(!sequencer.commit());
        assert!(!sequencer.complete());
        assert_eq!(sequencer.mode(), DesktopMode::Running);
    }
}
