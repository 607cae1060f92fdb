use desktop_app_contract::ApplicationId;

use super::*;
use crate::model::Generation;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowFrameKey {
    app_id: ApplicationId,
    generation: Generation,
}

#[component]
pub(super) fn WindowLayer() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let frames = create_memo(move |_| {
        runtime.state.with(|desktop| {
            desktop
                .registry
                .paint_order()
                .into_iter()
                .map(|entry| WindowFrameKey {
                    app_id: entry.app_id.clone(),
                    generation: entry.generation,
                })
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="desktop-window-layer">
            <For each=move || frames.get() key=|frame| frame.clone() let:frame>
                <WindowFrame frame />
            </For>
        </div>
    }
}

/// One mounted hosted surface. Keyed by generation so a replaced instance remounts.
#[component]
fn WindowFrame(frame: WindowFrameKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let WindowFrameKey { app_id, generation } = frame;

    let surface = runtime.state.with_untracked(|desktop| {
        desktop
            .registry
            .get(&app_id)
            .filter(|entry| entry.generation == generation)
            .map(|entry| entry.instance.surface.clone())
    });
    let presentation = create_memo(move |_| {
        runtime.state.with(|desktop| {
            desktop
                .registry
                .get(&app_id)
                .filter(|entry| entry.generation == generation)
                .map(|entry| (entry.stack_order, entry.is_interactive(), entry.closing))
        })
    });

    view! {
        <div
            class=move || {
                presentation
                    .get()
                    .map(|(_, interactive, closing)| window_slot_class(!interactive, closing))
                    .unwrap_or_default()
            }
            style=move || {
                presentation
                    .get()
                    .map(|(stack_order, interactive, _)| {
                        window_slot_style(stack_order, !interactive)
                    })
                    .unwrap_or_default()
            }
            aria-hidden=move || {
                presentation
                    .get()
                    .map_or(true, |(_, interactive, _)| !interactive)
                    .to_string()
            }
            data-generation=generation.0.to_string()
        >
            {surface}
        </div>
    }
}
