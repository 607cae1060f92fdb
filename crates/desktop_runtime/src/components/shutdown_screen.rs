use super::*;

/// Headline for the shutdown view. The displayed sequence number starts at 2 on the first
/// shutdown, the initial boot being session #1.
fn shutdown_headline(shutdown_count: u32) -> String {
    match shutdown_count {
        0 => "Shutting down...".to_string(),
        n => format!("Shutting down... (shutdown #{})", n.saturating_add(1)),
    }
}

#[component]
pub(super) fn ShutdownScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let shutdown_count = runtime
        .state
        .with_untracked(|desktop| desktop.sequencer.shutdown_count());
    let delay = runtime
        .catalog
        .with_value(|catalog| catalog.config().reboot_screen());
    let timer_failed = create_rw_signal(false);

    match set_timeout_with_handle(
        move || runtime.dispatch_action(DesktopAction::CompleteReboot),
        delay,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => {
            logging::warn!("reboot timer unavailable: {err:?}");
            timer_failed.set(true);
        }
    }

    view! {
        <div class="shutdown-screen" role="status" aria-live="polite">
            <p class="shutdown-headline">{shutdown_headline(shutdown_count)}</p>
            <p class="shutdown-subline">"The desktop will restart in a moment."</p>
            <Show when=move || timer_failed.get() fallback=|| ()>
                <button
                    type="button"
                    class="app-action"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::CompleteReboot)
                >
                    "Restart now"
                </button>
            </Show>
        </div>
    }
}
