use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopTiming {
    close_grace_ms: u64,
    shutdown_delay_ms: u64,
    reboot_screen_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppRow {
    app_id: String,
    display_name: String,
    icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shortcut_column: Option<u8>,
    #[serde(default)]
    auto_launch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    launch_signal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogManifest {
    schema_version: u32,
    desktop: DesktopTiming,
    apps: Vec<AppRow>,
}

fn is_namespaced_id(raw: &str) -> bool {
    let parts: Vec<&str> = raw.split('.').collect();
    parts.len() >= 2
        && parts.iter().all(|part| {
            part.starts_with(|c: char| c.is_ascii_lowercase())
                && !part.ends_with('-')
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("app_catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: CatalogManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut seen = HashSet::new();
    for app in &manifest.apps {
        if !is_namespaced_id(&app.app_id) {
            panic!("invalid app id `{}` in {}", app.app_id, path.display());
        }
        if !seen.insert(app.app_id.as_str()) {
            panic!("duplicate app id `{}` in {}", app.app_id, path.display());
        }
        if app.shortcut_column.is_none() && app.launch_signal.is_none() {
            panic!(
                "app `{}` in {} has neither a shortcut column nor a launch signal",
                app.app_id,
                path.display()
            );
        }
    }

    let json = serde_json::to_string_pretty(&manifest).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated application catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
