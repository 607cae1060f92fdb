//! Application descriptor table injected into the desktop at construction.
//!
//! The table is configuration: it is validated once when the desktop is built and never
//! changes afterwards. Built-in rows come from `app_catalog.toml`, embedded by `build.rs`.

use std::collections::HashSet;

use desktop_app_contract::{AppModule, ApplicationId, LaunchSignal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DesktopConfig;

/// Supported `schema_version` of the catalog manifest.
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One `[[apps]]` row of the catalog manifest.
pub struct AppManifest {
    pub app_id: String,
    pub display_name: String,
    pub icon: String,
    #[serde(default)]
    pub shortcut_column: Option<u8>,
    #[serde(default)]
    pub auto_launch: bool,
    #[serde(default)]
    pub launch_signal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Parsed catalog manifest document.
pub struct CatalogManifest {
    pub schema_version: u32,
    #[serde(default)]
    pub desktop: DesktopConfig,
    pub apps: Vec<AppManifest>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while assembling an [`AppCatalog`].
pub enum CatalogError {
    #[error("malformed catalog manifest: {0}")]
    Malformed(String),
    #[error("unsupported catalog schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
    #[error("{0}")]
    InvalidAppId(String),
    #[error("application `{0}` is registered more than once")]
    DuplicateApp(ApplicationId),
    #[error("launch signal `{0}` is bound to more than one application")]
    DuplicateLaunchSignal(LaunchSignal),
    #[error("no app module is registered for `{0}`")]
    MissingModule(ApplicationId),
}

/// Static description of one installable application type.
pub struct AppDescriptor<H> {
    pub app_id: ApplicationId,
    pub display_name: String,
    pub icon: String,
    /// Desktop grid column of the shortcut; `None` hides the shortcut.
    pub shortcut_column: Option<u8>,
    /// Opened once at initialization without user action.
    pub auto_launch: bool,
    /// Named signal that opens this application through the launch channel.
    pub launch_signal: Option<LaunchSignal>,
    pub module: AppModule<H>,
}

impl<H> AppDescriptor<H> {
    pub fn new(
        app_id: ApplicationId,
        display_name: impl Into<String>,
        icon: impl Into<String>,
        module: AppModule<H>,
    ) -> Self {
        Self {
            app_id,
            display_name: display_name.into(),
            icon: icon.into(),
            shortcut_column: None,
            auto_launch: false,
            launch_signal: None,
            module,
        }
    }

    pub fn with_shortcut_column(mut self, column: u8) -> Self {
        self.shortcut_column = Some(column);
        self
    }

    pub fn with_auto_launch(mut self) -> Self {
        self.auto_launch = true;
        self
    }

    pub fn with_launch_signal(mut self, signal: impl Into<String>) -> Self {
        self.launch_signal = Some(LaunchSignal::new(signal));
        self
    }
}

impl<H> Clone for AppDescriptor<H> {
    fn clone(&self) -> Self {
        Self {
            app_id: self.app_id.clone(),
            display_name: self.display_name.clone(),
            icon: self.icon.clone(),
            shortcut_column: self.shortcut_column,
            auto_launch: self.auto_launch,
            launch_signal: self.launch_signal.clone(),
            module: self.module.clone(),
        }
    }
}

impl<H> std::fmt::Debug for AppDescriptor<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("app_id", &self.app_id)
            .field("display_name", &self.display_name)
            .field("shortcut_column", &self.shortcut_column)
            .field("auto_launch", &self.auto_launch)
            .field("launch_signal", &self.launch_signal)
            .finish_non_exhaustive()
    }
}

/// Validated, read-only application table plus desktop timing configuration.
pub struct AppCatalog<H> {
    descriptors: Vec<AppDescriptor<H>>,
    config: DesktopConfig,
}

impl<H> AppCatalog<H> {
    /// Builds a catalog, rejecting duplicate ids and duplicate launch signals.
    pub fn new(descriptors: Vec<AppDescriptor<H>>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut signals = HashSet::new();
        for descriptor in &descriptors {
            if !ids.insert(descriptor.app_id.clone()) {
                return Err(CatalogError::DuplicateApp(descriptor.app_id.clone()));
            }
            if let Some(signal) = &descriptor.launch_signal {
                if !signals.insert(signal.clone()) {
                    return Err(CatalogError::DuplicateLaunchSignal(signal.clone()));
                }
            }
        }

        Ok(Self {
            descriptors,
            config: DesktopConfig::default(),
        })
    }

    /// Builds a catalog from manifest JSON, binding each row to the module `resolve` returns.
    pub fn from_manifest_json(
        raw: &str,
        resolve: impl Fn(&ApplicationId) -> Option<AppModule<H>>,
    ) -> Result<Self, CatalogError> {
        let manifest: CatalogManifest =
            serde_json::from_str(raw).map_err(|err| CatalogError::Malformed(err.to_string()))?;
        Self::from_manifest(manifest, resolve)
    }

    pub fn from_manifest(
        manifest: CatalogManifest,
        resolve: impl Fn(&ApplicationId) -> Option<AppModule<H>>,
    ) -> Result<Self, CatalogError> {
        if manifest.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::UnsupportedSchema {
                found: manifest.schema_version,
                expected: CATALOG_SCHEMA_VERSION,
            });
        }

        let mut descriptors = Vec::with_capacity(manifest.apps.len());
        for row in manifest.apps {
            let app_id = ApplicationId::new(row.app_id).map_err(CatalogError::InvalidAppId)?;
            let module =
                resolve(&app_id).ok_or_else(|| CatalogError::MissingModule(app_id.clone()))?;
            descriptors.push(AppDescriptor {
                app_id,
                display_name: row.display_name,
                icon: row.icon,
                shortcut_column: row.shortcut_column,
                auto_launch: row.auto_launch,
                launch_signal: row.launch_signal.map(LaunchSignal::new),
                module,
            });
        }

        Ok(Self::new(descriptors)?.with_config(manifest.desktop))
    }

    pub fn with_config(mut self, config: DesktopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> DesktopConfig {
        self.config
    }

    /// Descriptors in table order.
    pub fn descriptors(&self) -> &[AppDescriptor<H>] {
        &self.descriptors
    }

    pub fn get(&self, app_id: &ApplicationId) -> Option<&AppDescriptor<H>> {
        self.descriptors.iter().find(|entry| &entry.app_id == app_id)
    }

    pub fn by_launch_signal(&self, signal: &LaunchSignal) -> Option<&AppDescriptor<H>> {
        self.descriptors
            .iter()
            .find(|entry| entry.launch_signal.as_ref() == Some(signal))
    }

    pub fn auto_launch_apps(&self) -> impl Iterator<Item = &AppDescriptor<H>> {
        self.descriptors.iter().filter(|entry| entry.auto_launch)
    }
}

impl<H> Clone for AppCatalog<H> {
    fn clone(&self) -> Self {
        Self {
            descriptors: self.descriptors.clone(),
            config: self.config,
        }
    }
}

impl<H> std::fmt::Debug for AppCatalog<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCatalog")
            .field("descriptors", &self.descriptors)
            .field("config", &self.config)
            .finish()
    }
}
