//! Desktop compositor UI: window layer, shortcut grid, taskbar and shutdown view.

mod shortcut_grid;
mod shutdown_screen;
mod taskbar;
mod window_layer;

use leptos::*;

use self::{
    shortcut_grid::ShortcutGrid, shutdown_screen::ShutdownScreen, taskbar::Taskbar,
    window_layer::WindowLayer,
};

use crate::{model::DesktopMode, reducer::DesktopAction};

pub use crate::runtime_context::{
    use_desktop_runtime, use_launcher, DesktopProvider, DesktopRuntimeContext,
};

/// Returns whether the keyboard event should activate the focused shortcut or button.
fn is_activation_key(ev: &web_sys::KeyboardEvent) -> bool {
    matches!(ev.key().as_str(), "Enter" | " " | "Spacebar")
}

#[component]
/// Renders the desktop while running and the shutdown view otherwise.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let running = create_memo(move |_| {
        runtime.state.with(|desktop| desktop.mode()) == DesktopMode::Running
    });

    view! {
        <Show when=move || running.get() fallback=|| view! { <ShutdownScreen /> }>
            <div id="desktop-shell-root" class="desktop-shell" tabindex="-1">
                <div class="desktop-backdrop">
                    <ShortcutGrid />
                    <WindowLayer />
                </div>
                <Taskbar />
            </div>
        </Show>
    }
}

/// Inline style for a hosted window slot.
///
/// Minimized windows stay mounted; they only stop painting and receiving input.
fn window_slot_style(stack_order: u32, minimized: bool) -> String {
    if minimized {
        format!("z-index:{stack_order};pointer-events:none;opacity:0;")
    } else {
        format!("z-index:{stack_order};")
    }
}

fn window_slot_class(minimized: bool, closing: bool) -> String {
    let mut class = String::from("desktop-window-slot");
    if minimized {
        class.push_str(" minimized");
    }
    if closing {
        class.push_str(" closing");
    }
    class
}

fn dispatch_on_activation_key(
    runtime: DesktopRuntimeContext,
    action: DesktopAction,
) -> impl Fn(web_sys::KeyboardEvent) {
    move |ev| {
        if is_activation_key(&ev) {
            ev.prevent_default();
            runtime.dispatch_action(action.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn minimized_slot_is_transparent_to_input_but_keeps_its_layer() {
        assert_eq!(window_slot_style(4, false), "z-index:4;");
        assert_eq!(
            window_slot_style(4, true),
            "z-index:4;pointer-events:none;opacity:0;"
        );
    }

    #[test]
    fn slot_class_reflects_lifecycle_flags() {
        assert_eq!(window_slot_class(false, false), "desktop-window-slot");
        assert_eq!(
            window_slot_class(true, true),
            "desktop-window-slot minimized closing"
        );
    }
}
