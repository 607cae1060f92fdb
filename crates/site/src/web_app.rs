use desktop_runtime::{builtin_catalog, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Portfolio Desktop" />
        <Meta name="description" content="A retro desktop-style portfolio site." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    match builtin_catalog() {
        Ok(catalog) => view! {
            <DesktopProvider catalog>
                <DesktopShell />
            </DesktopProvider>
        }
        .into_view(),
        Err(err) => {
            logging::error!("desktop catalog rejected: {err}");
            view! {
                <section class="desktop-boot-error" role="alert">
                    <h1>"The desktop failed to start"</h1>
                    <p>{err.to_string()}</p>
                </section>
            }
            .into_view()
        }
    }
}
