//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use std::time::Duration;

use leptos::*;

use crate::{
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::ScheduleRemoval { ticket, delay } => {
            // Fire-and-forget: the ticket's generation decides whether it still applies.
            schedule(runtime, DesktopAction::FinalizeClose { ticket }, delay);
        }
        RuntimeEffect::ScheduleShutdown { delay } => {
            schedule(runtime, DesktopAction::CommitShutdown, delay);
        }
        RuntimeEffect::RunTeardown(hooks) => {
            logging::log!("tearing down {} hosted app instance(s)", hooks.len());
            for hook in hooks {
                hook.run();
            }
        }
    }
}

fn schedule(runtime: DesktopRuntimeContext, action: DesktopAction, delay: Duration) {
    let label = format!("{action:?}");
    if let Err(err) = set_timeout_with_handle(move || runtime.dispatch_action(action), delay) {
        logging::warn!("failed to schedule {label}: {err:?}");
    }
}
