pub mod apps;
pub mod catalog;
pub mod components;
mod effect_executor;
pub mod model;
pub mod reducer;
pub mod registry;
mod runtime_context;
pub mod shortcuts;
pub mod shutdown;
pub mod z_order;

pub use apps::{builtin_catalog, ViewCatalog};
pub use catalog::{AppCatalog, AppDescriptor, CatalogError};
pub use components::{
    use_desktop_runtime, use_launcher, DesktopProvider, DesktopRuntimeContext, DesktopShell,
};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, Dispatch, ReducerError, RuntimeEffect};
pub use registry::{OpenOutcome, WindowRegistry};
pub use shortcuts::{layout_shortcuts, ShortcutPlacement};
pub use shutdown::ShutdownSequencer;
