//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived state container, the runtime effect queue and the launch
//! channel. UI composition stays in [`crate::components`].

use std::rc::Rc;

use desktop_app_contract::LaunchRequester;
use leptos::*;

use crate::{
    apps::ViewCatalog,
    effect_executor,
    model::DesktopState,
    reducer::{bind_launcher, reduce_desktop, DesktopAction, Dispatch, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Long-lived reactive owner. Each hosted app instance is mounted under its own child of
    /// it, disposed when the instance is torn down.
    pub owner: Owner,
    /// Injected application table.
    pub catalog: StoredValue<ViewCatalog>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState<View>>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
}

impl DesktopRuntimeContext {
    /// Runs `action` through the reducer and queues the resulting effects.
    pub fn dispatch_action(self, action: DesktopAction) {
        let sink = self.sink();
        let mut outcome = Ok(Vec::new());
        with_owner(self.owner, || {
            self.catalog.with_value(|catalog| {
                self.state.update(|desktop| {
                    outcome = reduce_desktop(desktop, catalog, &sink, action);
                });
            });
        });

        match outcome {
            Ok(new_effects) if !new_effects.is_empty() => {
                self.effects.update(|queue| queue.extend(new_effects));
            }
            Ok(_) => {}
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    }

    /// Dispatch sink handed to the reducer for binding hosted-app callbacks.
    pub fn sink(self) -> Dispatch {
        Rc::new(move |action| self.dispatch_action(action))
    }

    /// Launch channel for collaborators that open applications by signal.
    pub fn launcher(self) -> LaunchRequester {
        bind_launcher(&self.sink())
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots the desktop.
pub fn DesktopProvider(
    /// Application table the desktop hosts.
    catalog: ViewCatalog,
    children: Children,
) -> impl IntoView {
    let owner = Owner::current().expect("DesktopProvider owner");
    let runtime = DesktopRuntimeContext {
        owner,
        catalog: store_value(catalog),
        state: create_rw_signal(DesktopState::default()),
        effects: create_rw_signal(Vec::<RuntimeEffect>::new()),
    };

    provide_context(runtime);
    provide_context(runtime.launcher());

    effect_executor::install(runtime);
    runtime.dispatch_action(DesktopAction::Boot);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

/// Returns the launch channel provided by [`DesktopProvider`].
pub fn use_launcher() -> LaunchRequester {
    use_context::<LaunchRequester>().unwrap_or_else(LaunchRequester::disconnected)
}
