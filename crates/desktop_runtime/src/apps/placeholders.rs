use std::time::Duration;

use desktop_app_contract::{AppInstance, AppMountContext, ViewInstance, WindowCallbacks};
use leptos::*;

const CREDITS_REEL: &[(&str, &str)] = &[
    ("Design & development", "Portfolio desktop team"),
    ("Window manager", "Reactive runtime built on Leptos"),
    ("Pixel art", "Community icon sets"),
    ("Special thanks", "Everyone who double-clicked a shortcut"),
];
const CREDITS_FRAME_MS: u64 = 1800;

const GALLERY_CAPTIONS: &[&str] = &[
    "Sunrise over the bay",
    "Workbench, late evening",
    "Conference badge collection",
    "First prototype on the desk",
];

#[component]
fn HostedWindow(
    title: &'static str,
    callbacks: WindowCallbacks,
    #[prop(optional)] variant: &'static str,
    children: Children,
) -> impl IntoView {
    let interact = callbacks.clone();
    let minimize = callbacks.clone();
    let close = callbacks;

    view! {
        <section
            class=format!("hosted-window {variant}")
            role="dialog"
            aria-label=title
            on:pointerdown=move |_| interact.interact()
        >
            <header class="titlebar">
                <span class="titlebar-title">{title}</span>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            minimize.minimize();
                        }
                    >
                        "_"
                    </button>
                    <button
                        type="button"
                        aria-label="Close window"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            close.close();
                        }
                    >
                        "x"
                    </button>
                </div>
            </header>
            <div class="hosted-window-body">{children()}</div>
        </section>
    }
}

pub(super) fn mount_showcase_app(context: AppMountContext) -> ViewInstance {
    let launcher = context.launcher;
    let surface = view! {
        <HostedWindow title="My Showcase" callbacks=context.callbacks variant="app-showcase">
            <h1>"Welcome"</h1>
            <p>"Double-click a desktop shortcut to open a project, or ask the command line."</p>
            <button
                type="button"
                class="app-action"
                on:click=move |_| launcher.raise("open-ai-terminal")
            >
                "Open command line"
            </button>
        </HostedWindow>
    }
    .into_view();
    AppInstance::new(surface)
}

pub(super) fn mount_nordle_app(context: AppMountContext) -> ViewInstance {
    placeholder_game("Nordle", "Guess the five-letter word in six tries.", context)
}

pub(super) fn mount_chess_app(context: AppMountContext) -> ViewInstance {
    placeholder_game("Chess", "Play a casual game against the built-in engine.", context)
}

pub(super) fn mount_snake_app(context: AppMountContext) -> ViewInstance {
    placeholder_game("Snake", "Use the arrow keys to steer and collect the pellets.", context)
}

fn placeholder_game(
    title: &'static str,
    blurb: &'static str,
    context: AppMountContext,
) -> ViewInstance {
    let surface = view! {
        <HostedWindow title=title callbacks=context.callbacks variant="app-game">
            <div class="app-game-board" data-app-id=context.app_id.to_string()>
                <p>{blurb}</p>
            </div>
        </HostedWindow>
    }
    .into_view();
    AppInstance::new(surface)
}

pub(super) fn mount_photos_app(context: AppMountContext) -> ViewInstance {
    let index = create_rw_signal(0usize);
    let step = move |delta: usize| {
        index.update(|i| *i = (*i + delta) % GALLERY_CAPTIONS.len());
    };

    let surface = view! {
        <HostedWindow title="Image Gallery" callbacks=context.callbacks variant="app-gallery">
            <figure class="app-gallery-frame">
                <figcaption>{move || GALLERY_CAPTIONS[index.get()]}</figcaption>
            </figure>
            <div class="app-toolbar" role="group" aria-label="Gallery navigation">
                <button
                    type="button"
                    class="app-action"
                    on:click=move |_| step(GALLERY_CAPTIONS.len() - 1)
                >
                    "Previous"
                </button>
                <span>{move || format!("{} / {}", index.get() + 1, GALLERY_CAPTIONS.len())}</span>
                <button type="button" class="app-action" on:click=move |_| step(1)>
                    "Next"
                </button>
            </div>
        </HostedWindow>
    }
    .into_view();
    AppInstance::new(surface)
}

pub(super) fn mount_credits_app(context: AppMountContext) -> ViewInstance {
    let frame = create_rw_signal(0usize);
    let reel = set_interval_with_handle(
        move || frame.update(|i| *i = (*i + 1) % CREDITS_REEL.len()),
        Duration::from_millis(CREDITS_FRAME_MS),
    );

    let surface = view! {
        <HostedWindow title="Credits" callbacks=context.callbacks variant="app-credits">
            <div class="app-credits-reel" aria-live="polite">
                <h2>{move || CREDITS_REEL[frame.get()].0}</h2>
                <p>{move || CREDITS_REEL[frame.get()].1}</p>
            </div>
        </HostedWindow>
    }
    .into_view();

    // The reel keeps running while minimized; only teardown stops it.
    match reel {
        Ok(handle) => AppInstance::new(surface).with_teardown(move || handle.clear()),
        Err(err) => {
            logging::warn!("credits reel timer unavailable: {err:?}");
            AppInstance::new(surface)
        }
    }
}

pub(super) fn mount_ai_terminal_app(context: AppMountContext) -> ViewInstance {
    let transcript = create_rw_signal(vec![terminal_reply("help")]);
    let input = create_rw_signal(String::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let command = input.get_untracked();
        if command.trim().is_empty() {
            return;
        }
        transcript.update(|lines| {
            if command.trim() == "clear" {
                lines.clear();
                return;
            }
            lines.push(format!("> {}", command.trim()));
            lines.push(terminal_reply(&command));
        });
        input.set(String::new());
    };

    let surface = view! {
        <HostedWindow title="Command Line" callbacks=context.callbacks variant="app-terminal">
            <ul class="app-terminal-transcript" aria-live="polite">
                {move || {
                    transcript
                        .get()
                        .into_iter()
                        .map(|line| view! { <li>{line}</li> })
                        .collect_view()
                }}
            </ul>
            <form class="app-terminal-prompt" on:submit=submit>
                <span aria-hidden="true">"$"</span>
                <input
                    class="app-field"
                    type="text"
                    aria-label="Command"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
            </form>
        </HostedWindow>
    }
    .into_view();
    AppInstance::new(surface)
}

fn terminal_reply(command: &str) -> String {
    match command.trim() {
        "help" => "Commands: help, whoami, clear. Anything else goes to the assistant.".to_string(),
        "whoami" => "guest@portfolio".to_string(),
        other => format!("assistant is offline; could not answer `{other}`"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn terminal_replies_to_builtin_commands_and_defers_the_rest() {
        assert_eq!(terminal_reply(" whoami "), "guest@portfolio");
        assert!(terminal_reply("help").starts_with("Commands:"));
        assert_eq!(
            terminal_reply("tell me a joke"),
            "assistant is offline; could not answer `tell me a joke`"
        );
    }
}
