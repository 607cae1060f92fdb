use std::time::Duration;

use desktop_app_contract::{AppInstance, ApplicationId};
use serde::{Deserialize, Serialize};

use crate::{registry::WindowRegistry, shutdown::ShutdownSequencer};

/// Grace window between a close request and removal of the entry.
pub const DEFAULT_CLOSE_GRACE_MS: u64 = 100;
/// Delay between a shutdown request and the switch to the shutdown view.
pub const DEFAULT_SHUTDOWN_DELAY_MS: u64 = 600;
/// How long the shutdown view stays up before signalling completion.
pub const DEFAULT_REBOOT_SCREEN_MS: u64 = 3_000;

/// Opaque creation tag for a window entry; never reused within one desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

#[derive(Debug, Clone, PartialEq)]
/// Registry record for one running hosted application instance.
pub struct WindowEntry<H> {
    pub app_id: ApplicationId,
    pub stack_order: u32,
    pub minimized: bool,
    pub closing: bool,
    pub generation: Generation,
    pub display_name: String,
    pub icon: String,
    pub instance: AppInstance<H>,
}

impl<H> WindowEntry<H> {
    /// Whether the entry accepts pointer input.
    pub fn is_interactive(&self) -> bool {
        !self.minimized
    }
}

/// Identifies one deferred removal. Only deletes the entry it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemovalTicket {
    pub app_id: ApplicationId,
    pub generation: Generation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Read-only row handed to the taskbar.
pub struct TaskbarEntry {
    pub app_id: ApplicationId,
    pub display_name: String,
    pub icon: String,
    pub minimized: bool,
    pub focused: bool,
    pub closing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Global desktop mode.
pub enum DesktopMode {
    #[default]
    Running,
    ShuttingDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Desktop timing configuration loaded from the app catalog manifest.
pub struct DesktopConfig {
    pub close_grace_ms: u64,
    pub shutdown_delay_ms: u64,
    pub reboot_screen_ms: u64,
}

impl DesktopConfig {
    pub fn close_grace(self) -> Duration {
        Duration::from_millis(self.close_grace_ms)
    }

    pub fn shutdown_delay(self) -> Duration {
        Duration::from_millis(self.shutdown_delay_ms)
    }

    pub fn reboot_screen(self) -> Duration {
        Duration::from_millis(self.reboot_screen_ms)
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            close_grace_ms: DEFAULT_CLOSE_GRACE_MS,
            shutdown_delay_ms: DEFAULT_SHUTDOWN_DELAY_MS,
            reboot_screen_ms: DEFAULT_REBOOT_SCREEN_MS,
        }
    }
}

#[derive(Debug, Clone)]
/// Complete mutable state of one desktop.
pub struct DesktopState<H> {
    pub registry: WindowRegistry<H>,
    pub sequencer: ShutdownSequencer,
    pub booted: bool,
}

impl<H> Default for DesktopState<H> {
    fn default() -> Self {
        Self {
            registry: WindowRegistry::default(),
            sequencer: ShutdownSequencer::default(),
            booted: false,
        }
    }
}

impl<H> DesktopState<H> {
    pub fn mode(&self) -> DesktopMode {
        self.sequencer.mode()
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        self.registry.taskbar_entries()
    }
}
