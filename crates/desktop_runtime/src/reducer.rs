//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use std::{rc::Rc, time::Duration};

use desktop_app_contract::{
    AppMountContext, ApplicationId, Hook, LaunchRequester, LaunchSignal, TeardownHook,
    WindowCallbacks,
};
use leptos::logging;
use thiserror::Error;

use crate::{
    catalog::AppCatalog,
    model::{DesktopState, Generation, RemovalTicket},
    registry::OpenOutcome,
};

/// Sink the reducer binds hosted-app callbacks and the launch channel to.
pub type Dispatch = Rc<dyn Fn(DesktopAction)>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open every auto-launch application. Only the first boot has an effect.
    Boot,
    /// Launch-or-focus an application (shortcut activation).
    OpenApp { app_id: ApplicationId },
    /// Cross-component launch request for the application bound to `signal`.
    RaiseLaunchSignal { signal: LaunchSignal },
    /// Raise a window (hosted app `on_interact`).
    FocusWindow {
        app_id: ApplicationId,
        generation: Generation,
    },
    /// Hide a window (hosted app `on_minimize`).
    MinimizeWindow {
        app_id: ApplicationId,
        generation: Generation,
    },
    /// Taskbar button: flip minimized and raise.
    ToggleTaskbarWindow { app_id: ApplicationId },
    /// Start the deferred close of a window (hosted app `on_close`).
    CloseWindow {
        app_id: ApplicationId,
        generation: Generation,
    },
    /// Grace timer fired for a close request.
    FinalizeClose { ticket: RemovalTicket },
    /// Taskbar shutdown affordance.
    RequestShutdown,
    /// Shutdown delay elapsed.
    CommitShutdown,
    /// Shutdown view finished; reboot into an empty desktop.
    CompleteReboot,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Dispatch [`DesktopAction::FinalizeClose`] after `delay`.
    ScheduleRemoval {
        ticket: RemovalTicket,
        delay: Duration,
    },
    /// Dispatch [`DesktopAction::CommitShutdown`] after `delay`.
    ScheduleShutdown { delay: Duration },
    /// Invoke teardown hooks of discarded instances.
    RunTeardown(Vec<TeardownHook>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The requested application is not part of the injected catalog.
    #[error("application `{0}` is not in the catalog")]
    UnknownApplication(ApplicationId),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Actions naming an application that has no window are no-ops, and so are hosted-app
/// requests from an instance that has since been replaced. Hosted-app callbacks created while
/// opening a window are bound to `dispatch`.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownApplication`] when asked to open an id missing from
/// `catalog`.
pub fn reduce_desktop<H>(
    state: &mut DesktopState<H>,
    catalog: &AppCatalog<H>,
    dispatch: &Dispatch,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Boot => {
            if state.booted {
                return Ok(effects);
            }
            state.booted = true;
            let auto_launch: Vec<ApplicationId> = catalog
                .auto_launch_apps()
                .map(|descriptor| descriptor.app_id.clone())
                .collect();
            for app_id in auto_launch {
                open_app(state, catalog, dispatch, app_id, &mut effects)?;
            }
        }
        DesktopAction::OpenApp { app_id } => {
            open_app(state, catalog, dispatch, app_id, &mut effects)?;
        }
        DesktopAction::RaiseLaunchSignal { signal } => match catalog.by_launch_signal(&signal) {
            Some(descriptor) => {
                let app_id = descriptor.app_id.clone();
                open_app(state, catalog, dispatch, app_id, &mut effects)?;
            }
            None => logging::warn!("no application listens for launch signal `{signal}`"),
        },
        DesktopAction::FocusWindow { app_id, generation } => {
            if !(state.registry.is_current(&app_id, generation)
                && state.registry.focus(&app_id))
            {
                logging::debug_warn!(
                    "focus ignored for `{app_id}`: no window of generation {}",
                    generation.0
                );
            }
        }
        DesktopAction::MinimizeWindow { app_id, generation } => {
            if !(state.registry.is_current(&app_id, generation)
                && state.registry.minimize(&app_id))
            {
                logging::debug_warn!(
                    "minimize ignored for `{app_id}`: no window of generation {}",
                    generation.0
                );
            }
        }
        DesktopAction::ToggleTaskbarWindow { app_id } => {
            if !state.registry.toggle_minimize(&app_id) {
                logging::debug_warn!("taskbar toggle ignored for `{app_id}`: no window");
            }
        }
        DesktopAction::CloseWindow { app_id, generation } => {
            if !state.registry.is_current(&app_id, generation) {
                logging::debug_warn!(
                    "close ignored for `{app_id}`: no window of generation {}",
                    generation.0
                );
            } else if let Some(ticket) = state.registry.close(&app_id) {
                effects.push(RuntimeEffect::ScheduleRemoval {
                    ticket,
                    delay: catalog.config().close_grace(),
                });
            }
        }
        DesktopAction::FinalizeClose { ticket } => {
            match state.registry.finalize_removal(&ticket) {
                Some(entry) => {
                    push_teardown(&mut effects, entry.instance.teardown.into_iter().collect())
                }
                None => logging::debug_warn!(
                    "stale removal for `{}` ignored (generation {})",
                    ticket.app_id,
                    ticket.generation.0
                ),
            }
        }
        DesktopAction::RequestShutdown => {
            if state.sequencer.request() {
                effects.push(RuntimeEffect::ScheduleShutdown {
                    delay: catalog.config().shutdown_delay(),
                });
            }
        }
        DesktopAction::CommitShutdown => {
            if state.sequencer.commit() {
                push_teardown(&mut effects, state.registry.clear());
            }
        }
        DesktopAction::CompleteReboot => {
            if state.sequencer.complete() {
                push_teardown(&mut effects, state.registry.clear());
            }
        }
    }

    Ok(effects)
}

/// Binds the three lifecycle callbacks of one instance of `app_id` to `dispatch`.
///
/// The callbacks carry `generation`, so they stop having any effect once that instance is
/// removed or replaced.
pub fn bind_window_callbacks(
    app_id: &ApplicationId,
    generation: Generation,
    dispatch: &Dispatch,
) -> WindowCallbacks {
    let bind = |make: fn(ApplicationId, Generation) -> DesktopAction| {
        let app_id = app_id.clone();
        let dispatch = Rc::clone(dispatch);
        Hook::new(move || dispatch(make(app_id.clone(), generation)))
    };

    WindowCallbacks {
        on_interact: bind(|app_id, generation| DesktopAction::FocusWindow { app_id, generation }),
        on_minimize: bind(|app_id, generation| DesktopAction::MinimizeWindow {
            app_id,
            generation,
        }),
        on_close: bind(|app_id, generation| DesktopAction::CloseWindow { app_id, generation }),
    }
}

/// Builds the launch channel handed to collaborators.
pub fn bind_launcher(dispatch: &Dispatch) -> LaunchRequester {
    let dispatch = Rc::clone(dispatch);
    LaunchRequester::new(move |signal| dispatch(DesktopAction::RaiseLaunchSignal { signal }))
}

fn open_app<H>(
    state: &mut DesktopState<H>,
    catalog: &AppCatalog<H>,
    dispatch: &Dispatch,
    app_id: ApplicationId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if !state.sequencer.is_running() {
        logging::debug_warn!("open of `{app_id}` ignored while shutting down");
        return Ok(());
    }

    let descriptor = catalog
        .get(&app_id)
        .ok_or_else(|| ReducerError::UnknownApplication(app_id.clone()))?;
    let outcome = state.registry.open(descriptor, |generation| AppMountContext {
        callbacks: bind_window_callbacks(&app_id, generation, dispatch),
        launcher: bind_launcher(dispatch),
        app_id: app_id.clone(),
    });

    if let OpenOutcome::Replaced {
        retired: Some(hook),
        ..
    } = outcome
    {
        effects.push(RuntimeEffect::RunTeardown(vec![hook]));
    }
    Ok(())
}

fn push_teardown(effects: &mut Vec<RuntimeEffect>, hooks: Vec<TeardownHook>) {
    if !hooks.is_empty() {
        effects.push(RuntimeEffect::RunTeardown(hooks));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use desktop_app_contract::{AppInstance, AppModule};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{catalog::AppDescriptor, model::DesktopMode};

    struct Harness {
        state: DesktopState<WindowCallbacks>,
        catalog: AppCatalog<WindowCallbacks>,
        dispatch: Dispatch,
        queued: Rc<RefCell<Vec<DesktopAction>>>,
    }

    impl Harness {
        fn new(catalog: AppCatalog<WindowCallbacks>) -> Self {
            let queued = Rc::new(RefCell::new(Vec::new()));
            let dispatch: Dispatch = Rc::new({
                let queued = queued.clone();
                move |action| queued.borrow_mut().push(action)
            });
            Self {
                state: DesktopState::default(),
                catalog,
                dispatch,
                queued,
            }
        }

        fn apply(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
            reduce_desktop(&mut self.state, &self.catalog, &self.dispatch, action)
                .expect("reduce")
        }

        fn drain(&mut self) -> Vec<RuntimeEffect> {
            let queued: Vec<DesktopAction> = self.queued.borrow_mut().drain(..).collect();
            queued
                .into_iter()
                .flat_map(|action| self.apply(action))
                .collect()
        }

        fn callbacks(&self, raw_id: &str) -> WindowCallbacks {
            self.state
                .registry
                .get(&ApplicationId::trusted(raw_id))
                .expect("entry")
                .instance
                .surface
                .clone()
        }
    }

    fn callbacks_module() -> AppModule<WindowCallbacks> {
        AppModule::new(|context: AppMountContext| AppInstance::new(context.callbacks))
    }

    fn catalog() -> AppCatalog<WindowCallbacks> {
        AppCatalog::new(vec![
            AppDescriptor::new(
                ApplicationId::trusted("portfolio.showcase"),
                "My Showcase",
                "showcase",
                AppModule::new(|context: AppMountContext| {
                    let launcher = context.launcher.clone();
                    let callbacks = context.callbacks;
                    AppInstance::new(WindowCallbacks {
                        on_interact: Hook::new(move || launcher.raise("open-ai-terminal")),
                        ..callbacks
                    })
                }),
            )
            .with_shortcut_column(0)
            .with_auto_launch(),
            AppDescriptor::new(
                ApplicationId::trusted("games.chess"),
                "Chess",
                "chess",
                callbacks_module(),
            )
            .with_shortcut_column(0),
            AppDescriptor::new(
                ApplicationId::trusted("tools.ai-terminal"),
                "Command Line",
                "console",
                callbacks_module(),
            )
            .with_launch_signal("open-ai-terminal"),
        ])
        .expect("catalog")
    }

    fn id(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    #[test]
    fn boot_auto_launches_once() {
        let mut harness = Harness::new(catalog());
        harness.apply(DesktopAction::Boot);
        harness.apply(DesktopAction::Boot);

        assert_eq!(harness.state.registry.len(), 1);
        assert!(harness.state.registry.contains(&id("portfolio.showcase")));
    }

    #[test]
    fn bound_callbacks_route_back_into_the_registry() {
        let mut harness = Harness::new(catalog());
        harness.apply(DesktopAction::OpenApp {
            app_id: id("games.chess"),
        });
        harness.apply(DesktopAction::Boot);
        let chess = harness.callbacks("games.chess");

        chess.interact();
        assert!(harness.drain().is_empty());
        assert_eq!(harness.state.registry.focused(), Some(&id("games.chess")));

        chess.minimize();
        harness.drain();
        assert!(
            harness
                .state
                .registry
                .get(&id("games.chess"))
                .expect("chess")
                .minimized
        );

        chess.close();
        let effects = harness.drain();
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleRemoval {
                ticket: RemovalTicket {
                    app_id: id("games.chess"),
                    generation: Generation(1),
                },
                delay: Duration::from_millis(100),
            }]
        );
    }

    #[test]
    fn launch_channel_opens_signal_bound_app() {
        let mut harness = Harness::new(catalog());
        harness.apply(DesktopAction::Boot);

        harness.callbacks("portfolio.showcase").interact();
        harness.drain();

        assert!(harness.state.registry.contains(&id("tools.ai-terminal")));
        assert_eq!(
            harness.state.registry.focused(),
            Some(&id("tools.ai-terminal"))
        );
    }

    #[test]
    fn unknown_signal_and_unknown_window_are_noops() {
        let mut harness = Harness::new(catalog());
        let effects = harness.apply(DesktopAction::RaiseLaunchSignal {
            signal: LaunchSignal::new("open-doom"),
        });
        assert!(effects.is_empty());

        let generation = Generation(1);
        for action in [
            DesktopAction::FocusWindow { app_id: id("games.chess"), generation },
            DesktopAction::MinimizeWindow { app_id: id("games.chess"), generation },
            DesktopAction::ToggleTaskbarWindow { app_id: id("games.chess") },
            DesktopAction::CloseWindow { app_id: id("games.chess"), generation },
        ] {
            assert!(harness.apply(action).is_empty());
        }
        assert!(harness.state.registry.is_empty());
    }

    #[test]
    fn callbacks_of_a_replaced_instance_are_ignored() {
        let mut harness = Harness::new(catalog());
        let chess = id("games.chess");
        harness.apply(DesktopAction::OpenApp { app_id: chess.clone() });
        let retired = harness.callbacks("games.chess");
        retired.close();
        harness.drain();

        harness.apply(DesktopAction::OpenApp { app_id: chess.clone() });
        harness.apply(DesktopAction::OpenApp { app_id: id("tools.ai-terminal") });
        let before = harness.state.registry.get(&chess).cloned().expect("replacement");
        assert_eq!(before.generation, Generation(2));

        retired.close();
        retired.minimize();
        retired.interact();
        assert!(harness.drain().is_empty());

        let after = harness.state.registry.get(&chess).expect("replacement");
        assert!(!after.closing);
        assert!(!after.minimized);
        assert_eq!(after.stack_order, before.stack_order);
        assert_eq!(harness.state.registry.focused(), Some(&id("tools.ai-terminal")));

        harness.callbacks("games.chess").close();
        assert_eq!(harness.drain().len(), 1);
        assert!(harness.state.registry.get(&chess).expect("replacement").closing);
    }

    #[test]
    fn opening_unknown_application_is_an_error() {
        let mut harness = Harness::new(catalog());
        let err = reduce_desktop(
            &mut harness.state,
            &harness.catalog,
            &harness.dispatch,
            DesktopAction::OpenApp {
                app_id: id("games.doom"),
            },
        )
        .unwrap_err();

        assert_eq!(err, ReducerError::UnknownApplication(id("games.doom")));
        assert!(harness.state.registry.is_empty());
    }

    #[test]
    fn finalized_close_runs_the_instance_teardown() {
        let torn_down = Rc::new(Cell::new(0));
        let catalog = AppCatalog::new(vec![AppDescriptor::new(
            id("portfolio.credits"),
            "Credits",
            "credits",
            AppModule::new({
                let torn_down = torn_down.clone();
                move |context: AppMountContext| {
                    let torn_down = torn_down.clone();
                    AppInstance::new(context.callbacks)
                        .with_teardown(move || torn_down.set(torn_down.get() + 1))
                }
            }),
        )])
        .expect("catalog");
        let mut harness = Harness::new(catalog);
        harness.apply(DesktopAction::OpenApp {
            app_id: id("portfolio.credits"),
        });
        let effects = harness.apply(DesktopAction::CloseWindow {
            app_id: id("portfolio.credits"),
            generation: Generation(1),
        });
        let Some(RuntimeEffect::ScheduleRemoval { ticket, .. }) = effects.into_iter().next() else {
            panic!("expected a scheduled removal");
        };

        for effect in harness.apply(DesktopAction::FinalizeClose { ticket }) {
            if let RuntimeEffect::RunTeardown(hooks) = effect {
                hooks.iter().for_each(Hook::run);
            }
        }

        assert!(harness.state.registry.is_empty());
        assert_eq!(torn_down.get(), 1);
    }

    #[test]
    fn shutdown_is_deferred_idempotent_and_reboots_empty() {
        let torn_down = Rc::new(Cell::new(0));
        let base = catalog();
        let catalog = AppCatalog::new(
            base.descriptors()
                .iter()
                .cloned()
                .chain([AppDescriptor::new(
                    id("portfolio.credits"),
                    "Credits",
                    "credits",
                    AppModule::new({
                        let torn_down = torn_down.clone();
                        move |context: AppMountContext| {
                            let torn_down = torn_down.clone();
                            AppInstance::new(context.callbacks)
                                .with_teardown(move || torn_down.set(torn_down.get() + 1))
                        }
                    }),
                )])
                .collect(),
        )
        .expect("catalog");
        let mut harness = Harness::new(catalog);
        harness.apply(DesktopAction::Boot);
        harness.apply(DesktopAction::OpenApp {
            app_id: id("portfolio.credits"),
        });

        assert_eq!(
            harness.apply(DesktopAction::RequestShutdown),
            vec![RuntimeEffect::ScheduleShutdown {
                delay: Duration::from_millis(600)
            }]
        );
        assert!(harness.apply(DesktopAction::RequestShutdown).is_empty());
        assert_eq!(harness.state.mode(), DesktopMode::Running);

        let effects = harness.apply(DesktopAction::CommitShutdown);
        assert_eq!(harness.state.mode(), DesktopMode::ShuttingDown);
        assert_eq!(harness.state.sequencer.shutdown_count(), 1);
        assert!(harness.state.registry.is_empty());
        for effect in effects {
            if let RuntimeEffect::RunTeardown(hooks) = effect {
                hooks.iter().for_each(Hook::run);
            }
        }
        assert_eq!(torn_down.get(), 1);

        harness.apply(DesktopAction::OpenApp {
            app_id: id("games.chess"),
        });
        assert!(harness.state.registry.is_empty());

        harness.apply(DesktopAction::CompleteReboot);
        assert_eq!(harness.state.mode(), DesktopMode::Running);
        assert!(harness.state.registry.is_empty());

        harness.apply(DesktopAction::Boot);
        assert!(harness.state.registry.is_empty());
    }
}
