use super::*;
use crate::shortcuts::{layout_shortcuts, ShortcutPlacement};

#[component]
pub(super) fn ShortcutGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    // The descriptor table never changes, so the grid is laid out once.
    let placements = runtime.catalog.with_value(|catalog| layout_shortcuts(catalog));

    view! {
        <div class="desktop-shortcut-grid" role="list" aria-label="Desktop shortcuts">
            {placements
                .into_iter()
                .map(|placement| view! { <DesktopShortcut placement /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn DesktopShortcut(placement: ShortcutPlacement) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let launch = placement.launch_action();
    let on_keydown = dispatch_on_activation_key(runtime, launch.clone());
    let ShortcutPlacement {
        app_id,
        label,
        icon,
        left_px,
        top_px,
        ..
    } = placement;

    view! {
        <button
            type="button"
            role="listitem"
            class="desktop-shortcut"
            data-app-id=app_id.to_string()
            style=format!("left:{left_px}px;top:{top_px}px;")
            title=format!("Open {label}")
            on:dblclick=move |_| runtime.dispatch_action(launch.clone())
            on:keydown=on_keydown
        >
            <span class=format!("desktop-shortcut-icon icon-{icon}") aria-hidden="true"></span>
            <span class="desktop-shortcut-label">{label}</span>
        </button>
    }
}
