//! Desktop shortcut placement.
//!
//! Placement is derived from the descriptor table only, never from registry state: each
//! shortcut-exposed descriptor names a grid column and takes the next free row of that
//! column in table order.

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

use crate::{catalog::AppCatalog, reducer::DesktopAction};

/// Left offset of the first shortcut column, in px.
pub const GRID_LEFT_PX: i32 = 6;
/// Horizontal distance between shortcut columns, in px.
pub const COLUMN_SPACING_PX: i32 = 90;
/// Vertical distance between shortcut rows, in px.
pub const ROW_SPACING_PX: i32 = 104;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutPlacement {
    pub app_id: ApplicationId,
    pub label: String,
    pub icon: String,
    pub column: u8,
    pub row: u16,
    pub left_px: i32,
    pub top_px: i32,
}

impl ShortcutPlacement {
    /// Action dispatched when the shortcut is activated.
    pub fn launch_action(&self) -> DesktopAction {
        DesktopAction::OpenApp {
            app_id: self.app_id.clone(),
        }
    }
}

/// Lays out one shortcut per shortcut-exposed descriptor.
pub fn layout_shortcuts<H>(catalog: &AppCatalog<H>) -> Vec<ShortcutPlacement> {
    let mut rows_used: Vec<u16> = Vec::new();
    let mut placements = Vec::new();

    for descriptor in catalog.descriptors() {
        let Some(column) = descriptor.shortcut_column else {
            continue;
        };
        let slot = usize::from(column);
        if rows_used.len() <= slot {
            rows_used.resize(slot + 1, 0);
        }
        let row = rows_used[slot];
        rows_used[slot] = row.saturating_add(1);

        placements.push(ShortcutPlacement {
            app_id: descriptor.app_id.clone(),
            label: descriptor.display_name.clone(),
            icon: descriptor.icon.clone(),
            column,
            row,
            left_px: GRID_LEFT_PX + i32::from(column) * COLUMN_SPACING_PX,
            top_px: i32::from(row) * ROW_SPACING_PX,
        });
    }

    placements
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppInstance, AppModule};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::AppDescriptor;

    fn descriptor(raw_id: &str, label: &str) -> AppDescriptor<()> {
        AppDescriptor::new(
            ApplicationId::trusted(raw_id),
            label,
            "icon",
            AppModule::new(|_| AppInstance::new(())),
        )
    }

    #[test]
    fn primary_column_stacks_in_table_order_and_secondary_column_is_offset() {
        let catalog = AppCatalog::new(vec![
            descriptor("portfolio.showcase", "My Showcase").with_shortcut_column(0),
            descriptor("games.snake", "Snake").with_shortcut_column(1),
            descriptor("games.nordle", "Nordle").with_shortcut_column(0),
            descriptor("tools.ai-terminal", "Command Line"),
            descriptor("games.chess", "Chess").with_shortcut_column(0),
        ])
        .expect("catalog");

        let layout = layout_shortcuts(&catalog);
        let positions: Vec<(&str, i32, i32)> = layout
            .iter()
            .map(|p| (p.label.as_str(), p.left_px, p.top_px))
            .collect();

        assert_eq!(
            positions,
            vec![
                ("My Showcase", 6, 0),
                ("Snake", 96, 0),
                ("Nordle", 6, 104),
                ("Chess", 6, 208),
            ]
        );
    }

    #[test]
    fn tall_column_keeps_a_constant_row_pitch() {
        let catalog = AppCatalog::new(
            (0..300)
                .map(|n| descriptor(&format!("games.level-{n}"), "Level").with_shortcut_column(0))
                .collect(),
        )
        .expect("catalog");

        let layout = layout_shortcuts(&catalog);

        assert_eq!(layout.len(), 300);
        assert_eq!(layout[256].row, 256);
        assert_eq!(layout[299].top_px, 299 * ROW_SPACING_PX);
        assert!(layout.windows(2).all(|pair| pair[1].top_px - pair[0].top_px == ROW_SPACING_PX));
    }

    #[test]
    fn shortcut_launch_action_opens_bound_app() {
        let catalog =
            AppCatalog::new(vec![descriptor("games.chess", "Chess").with_shortcut_column(2)])
                .expect("catalog");

        let layout = layout_shortcuts(&catalog);

        assert_eq!(layout[0].left_px, 186);
        assert_eq!(
            layout[0].launch_action(),
            DesktopAction::OpenApp {
                app_id: ApplicationId::trusted("games.chess")
            }
        );
    }
}
