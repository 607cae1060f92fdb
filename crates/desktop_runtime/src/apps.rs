//! Built-in hosted applications and their binding to the embedded catalog manifest.

mod placeholders;

use std::cell::Cell;

use desktop_app_contract::{
    AppInstance, AppModule, AppMountContext, ApplicationId, ViewInstance, ViewModule,
};
use leptos::{as_child_of_current_owner, View};

use crate::catalog::{AppCatalog, CatalogError};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

/// Catalog type hosted by the browser runtime.
pub type ViewCatalog = AppCatalog<View>;

/// Returns the build-time generated catalog manifest JSON.
pub fn builtin_app_catalog_json() -> &'static str {
    APP_CATALOG_JSON
}

/// Resolves the built-in module for a catalog row.
pub fn builtin_module(app_id: &ApplicationId) -> Option<ViewModule> {
    let mount: fn(AppMountContext) -> ViewInstance = match app_id.as_str() {
        "portfolio.showcase" => placeholders::mount_showcase_app,
        "portfolio.credits" => placeholders::mount_credits_app,
        "games.nordle" => placeholders::mount_nordle_app,
        "games.chess" => placeholders::mount_chess_app,
        "games.snake" => placeholders::mount_snake_app,
        "media.photos" => placeholders::mount_photos_app,
        "tools.ai-terminal" => placeholders::mount_ai_terminal_app,
        _ => return None,
    };
    Some(owned_module(mount))
}

/// Mounts every instance under a fresh child of the current reactive owner. The child is
/// disposed together with the instance teardown, after the app's own hook.
fn owned_module(mount: fn(AppMountContext) -> ViewInstance) -> ViewModule {
    AppModule::new(move |context| {
        let (instance, disposer) = as_child_of_current_owner(mount)(context);
        let scope = Cell::new(Some(disposer));
        let app_teardown = instance.teardown;
        AppInstance::new(instance.surface).with_teardown(move || {
            if let Some(hook) = &app_teardown {
                hook.run();
            }
            drop(scope.take());
        })
    })
}

/// Builds the catalog the site injects into [`crate::DesktopProvider`].
///
/// # Errors
///
/// Returns [`CatalogError`] when the embedded manifest names an application without a
/// built-in module or fails validation.
pub fn builtin_catalog() -> Result<ViewCatalog, CatalogError> {
    AppCatalog::from_manifest_json(APP_CATALOG_JSON, builtin_module)
}
