//! Authoritative mapping of running application instances to their display state.
//!
//! Every operation is a synchronous state transition. Operations addressed to an unknown
//! application id are no-ops and report that through their return value.

use std::collections::BTreeMap;

use desktop_app_contract::{AppMountContext, ApplicationId, TeardownHook};

use crate::{
    catalog::AppDescriptor,
    model::{Generation, RemovalTicket, TaskbarEntry, WindowEntry},
    z_order::next_stack_order,
};

#[derive(Debug, Clone, PartialEq)]
/// Result of [`WindowRegistry::open`].
pub enum OpenOutcome {
    /// A new entry was created and its factory invoked.
    Created(Generation),
    /// A live entry already existed; it was raised and restored.
    Focused(Generation),
    /// A closing entry was replaced by a fresh instance.
    Replaced {
        generation: Generation,
        retired: Option<TeardownHook>,
    },
}

#[derive(Debug, Clone)]
pub struct WindowRegistry<H> {
    entries: BTreeMap<ApplicationId, WindowEntry<H>>,
    next_generation: u64,
}

impl<H> Default for WindowRegistry<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_generation: 1,
        }
    }
}

impl<H> WindowRegistry<H> {
    /// Launch-or-focus.
    ///
    /// With no entry for the descriptor's id, invokes the factory exactly once with the context
    /// `mount_context` builds for the new generation and stores the instance on top of the
    /// stack. A live entry is raised and un-minimized without touching its instance. An entry
    /// still inside its close grace window is replaced immediately; its pending removal no
    /// longer matches and is ignored.
    pub fn open(
        &mut self,
        descriptor: &AppDescriptor<H>,
        mount_context: impl FnOnce(Generation) -> AppMountContext,
    ) -> OpenOutcome {
        let app_id = &descriptor.app_id;
        let stack_order = self.allocate();

        if let Some(entry) = self.entries.get_mut(app_id) {
            if !entry.closing {
                entry.stack_order = stack_order;
                entry.minimized = false;
                return OpenOutcome::Focused(entry.generation);
            }
        }

        let generation = self.next_generation();
        let instance = descriptor.module.mount(mount_context(generation));
        let entry = WindowEntry {
            app_id: app_id.clone(),
            stack_order,
            minimized: false,
            closing: false,
            generation,
            display_name: descriptor.display_name.clone(),
            icon: descriptor.icon.clone(),
            instance,
        };

        match self.entries.insert(app_id.clone(), entry) {
            Some(previous) => OpenOutcome::Replaced {
                generation,
                retired: previous.instance.teardown,
            },
            None => OpenOutcome::Created(generation),
        }
    }

    /// Raises `app_id` above every other entry, leaving `minimized` untouched.
    pub fn focus(&mut self, app_id: &ApplicationId) -> bool {
        let stack_order = self.allocate();
        match self.entries.get_mut(app_id) {
            Some(entry) => {
                entry.stack_order = stack_order;
                true
            }
            None => false,
        }
    }

    /// Hides `app_id` without changing its stack position.
    pub fn minimize(&mut self, app_id: &ApplicationId) -> bool {
        match self.entries.get_mut(app_id) {
            Some(entry) => {
                entry.minimized = true;
                true
            }
            None => false,
        }
    }

    /// Flips `minimized` and raises the entry in one step (taskbar restore-and-focus).
    pub fn toggle_minimize(&mut self, app_id: &ApplicationId) -> bool {
        let stack_order = self.allocate();
        match self.entries.get_mut(app_id) {
            Some(entry) => {
                entry.minimized = !entry.minimized;
                entry.stack_order = stack_order;
                true
            }
            None => false,
        }
    }

    /// Marks `app_id` as closing and returns the ticket its deferred removal must present.
    ///
    /// The entry stays present and rendered until [`Self::finalize_removal`] runs. A second
    /// close while the first is pending yields no new ticket.
    pub fn close(&mut self, app_id: &ApplicationId) -> Option<RemovalTicket> {
        let entry = self.entries.get_mut(app_id)?;
        if entry.closing {
            return None;
        }
        entry.closing = true;
        Some(RemovalTicket {
            app_id: app_id.clone(),
            generation: entry.generation,
        })
    }

    /// Deletes the entry named by `ticket` if it is still the same instance.
    pub fn finalize_removal(&mut self, ticket: &RemovalTicket) -> Option<WindowEntry<H>> {
        if self.is_current(&ticket.app_id, ticket.generation) {
            self.entries.remove(&ticket.app_id)
        } else {
            None
        }
    }

    /// Removes every entry, returning the teardown hooks of the discarded instances.
    ///
    /// The generation counter survives so removals scheduled before the clear stay stale.
    pub fn clear(&mut self) -> Vec<TeardownHook> {
        std::mem::take(&mut self.entries)
            .into_values()
            .filter_map(|entry| entry.instance.teardown)
            .collect()
    }

    /// Whether `app_id` is present and still the instance created as `generation`.
    pub fn is_current(&self, app_id: &ApplicationId, generation: Generation) -> bool {
        self.entries
            .get(app_id)
            .is_some_and(|entry| entry.generation == generation)
    }

    pub fn get(&self, app_id: &ApplicationId) -> Option<&WindowEntry<H>> {
        self.entries.get(app_id)
    }

    pub fn contains(&self, app_id: &ApplicationId) -> bool {
        self.entries.contains_key(app_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &WindowEntry<H>> {
        self.entries.values()
    }

    /// Entries in paint order: lowest stack order first, topmost last.
    pub fn paint_order(&self) -> Vec<&WindowEntry<H>> {
        let mut entries: Vec<&WindowEntry<H>> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.stack_order);
        entries
    }

    /// Topmost entry that is neither minimized nor closing.
    pub fn focused(&self) -> Option<&ApplicationId> {
        self.entries
            .values()
            .filter(|entry| !entry.minimized && !entry.closing)
            .max_by_key(|entry| entry.stack_order)
            .map(|entry| &entry.app_id)
    }

    /// Taskbar rows in launch order.
    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        let focused = self.focused().cloned();
        let mut entries: Vec<&WindowEntry<H>> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.generation);
        entries
            .into_iter()
            .map(|entry| TaskbarEntry {
                app_id: entry.app_id.clone(),
                display_name: entry.display_name.clone(),
                icon: entry.icon.clone(),
                minimized: entry.minimized,
                focused: focused.as_ref() == Some(&entry.app_id),
                closing: entry.closing,
            })
            .collect()
    }

    fn allocate(&self) -> u32 {
        next_stack_order(self.entries.values().map(|entry| entry.stack_order))
    }

    fn next_generation(&mut self) -> Generation {
        let generation = Generation(self.next_generation);
        self.next_generation = self.next_generation.saturating_add(1);
        generation
    }
}
