use desktop_app_contract::{ApplicationId, LaunchSignal};

use super::*;
use crate::model::TaskbarEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SignalLauncher {
    label: String,
    icon: String,
    signal: LaunchSignal,
}

fn taskbar_window_button_class(entry: &TaskbarEntry) -> String {
    let mut class = String::from("taskbar-window-button");
    if entry.focused {
        class.push_str(" focused");
    }
    if entry.minimized {
        class.push_str(" minimized");
    }
    if entry.closing {
        class.push_str(" closing");
    }
    class
}

fn taskbar_window_aria_label(entry: &TaskbarEntry) -> String {
    if entry.minimized {
        format!("{} (minimized)", entry.display_name)
    } else {
        entry.display_name.clone()
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let launcher = use_launcher();
    let state = runtime.state;

    let entries = create_memo(move |_| state.with(|desktop| desktop.taskbar_entries()));
    let shutdown_pending =
        create_memo(move |_| state.with(|desktop| desktop.sequencer.is_pending()));
    let signal_launchers = runtime.catalog.with_value(|catalog| {
        catalog
            .descriptors()
            .iter()
            .filter_map(|descriptor| {
                descriptor.launch_signal.clone().map(|signal| SignalLauncher {
                    label: descriptor.display_name.clone(),
                    icon: descriptor.icon.clone(),
                    signal,
                })
            })
            .collect::<Vec<_>>()
    });

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <button
                type="button"
                class="taskbar-shutdown"
                aria-label="Shut down"
                disabled=move || shutdown_pending.get()
                on:click=move |_| runtime.dispatch_action(DesktopAction::RequestShutdown)
            >
                "Shut down"
            </button>

            <div class="taskbar-launchers" role="group" aria-label="Launchers">
                {signal_launchers
                    .into_iter()
                    .map(|entry| {
                        let launcher = launcher.clone();
                        let SignalLauncher { label, icon, signal } = entry;
                        view! {
                            <button
                                type="button"
                                class="taskbar-launcher"
                                title=label.clone()
                                on:click=move |_| launcher.raise(signal.as_str())
                            >
                                <span class=format!("taskbar-app-icon icon-{icon}") aria-hidden="true"></span>
                                <span class="taskbar-app-label">{label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="taskbar-running-strip" role="group" aria-label="Running windows">
                <For
                    each=move || entries.get()
                    key=|entry| entry.app_id.clone()
                    let:entry
                >
                    <TaskbarWindowButton app_id=entry.app_id entries />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(
    app_id: ApplicationId,
    entries: Memo<Vec<TaskbarEntry>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let entry = create_memo({
        let app_id = app_id.clone();
        move |_| {
            entries.with(|entries| entries.iter().find(|entry| entry.app_id == app_id).cloned())
        }
    });
    let describe = move |render: fn(&TaskbarEntry) -> String| {
        move || entry.with(|entry| entry.as_ref().map(render).unwrap_or_default())
    };

    view! {
        <button
            type="button"
            class=describe(taskbar_window_button_class)
            aria-label=describe(taskbar_window_aria_label)
            aria-pressed=move || {
                entry
                    .with(|entry| entry.as_ref().is_some_and(|e| e.focused))
                    .to_string()
            }
            on:click=move |_| {
                runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                    app_id: app_id.clone(),
                })
            }
        >
            <span
                class=move || entry.with(|entry| {
                    entry
                        .as_ref()
                        .map(|e| format!("taskbar-app-icon icon-{}", e.icon))
                        .unwrap_or_default()
                })
                aria-hidden="true"
            ></span>
            <span class="taskbar-app-label">
                {move || entry.with(|entry| entry.as_ref().map(|e| e.display_name.clone()))}
            </span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(minimized: bool, focused: bool) -> TaskbarEntry {
        TaskbarEntry {
            app_id: ApplicationId::trusted("games.chess"),
            display_name: "Chess".to_string(),
            icon: "chess".to_string(),
            minimized,
            focused,
            closing: false,
        }
    }

    #[test]
    fn window_button_marks_focus_and_minimized_state() {
        assert_eq!(
            taskbar_window_button_class(&entry(false, true)),
            "taskbar-window-button focused"
        );
        assert_eq!(
            taskbar_window_button_class(&entry(true, false)),
            "taskbar-window-button minimized"
        );
        assert_eq!(taskbar_window_aria_label(&entry(true, false)), "Chess (minimized)");
        assert_eq!(taskbar_window_aria_label(&entry(false, true)), "Chess");
    }
}
