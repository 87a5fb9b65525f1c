//! Placement of the detached status menu relative to its trigger control.
//!
//! The menu is drawn on a top-level layer, so its coordinates are computed
//! in viewport space from the trigger's rectangle. The geometry here is
//! pure; the rendering side re-runs it every frame the menu is open, which
//! keeps the placement live across window resizes and scrolling in any
//! ancestor, and lets the measured height replace the estimate one frame
//! after opening.

use egui::{Pos2, Rect};

use shared::domain::UserId;

pub const MENU_GAP: f32 = 8.0;
pub const MENU_SIDE_PADDING: f32 = 8.0;
/// Height assumed before the menu has been measured, and the ceiling used
/// when deciding whether the space below suffices.
pub const MENU_HEIGHT_CEILING: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrientation {
    Below,
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub orientation: MenuOrientation,
}

impl MenuPlacement {
    pub fn pos(&self) -> Pos2 {
        Pos2::new(self.left, self.top)
    }
}

/// Compute where the menu goes. Defaults to hanging below the anchor; flips
/// above only when the space below cannot fit the menu (capped at
/// [`MENU_HEIGHT_CEILING`]) and there is more room above than below. When
/// neither side has room the menu stays below and scrolls internally within
/// [`menu_max_height`]. The left edge follows the anchor, clamped so the
/// anchor-width menu keeps [`MENU_SIDE_PADDING`] clear of both viewport
/// edges.
pub fn place_menu(anchor: Rect, viewport: Rect, measured_height: Option<f32>) -> MenuPlacement {
    let menu_height = measured_height.unwrap_or(MENU_HEIGHT_CEILING);

    let mut orientation = MenuOrientation::Below;
    let mut top = anchor.bottom() + MENU_GAP;

    let space_below = viewport.bottom() - anchor.bottom() - MENU_GAP;
    let space_above = anchor.top() - viewport.top() - MENU_GAP;

    if space_below < menu_height.min(MENU_HEIGHT_CEILING) && space_above > space_below {
        orientation = MenuOrientation::Above;
        top = (anchor.top() - menu_height - MENU_GAP).max(viewport.top() + MENU_GAP);
    }

    let width = anchor.width();
    let left = anchor
        .left()
        .min(viewport.right() - width - MENU_SIDE_PADDING)
        .max(viewport.left() + MENU_SIDE_PADDING);

    MenuPlacement {
        top,
        left,
        width,
        orientation,
    }
}

/// Internal scroll bound for the menu body (40% of the viewport height), so
/// a cramped viewport gets a scrollable menu instead of overflow.
pub fn menu_max_height(viewport: Rect) -> f32 {
    viewport.height() * 0.4
}

/// Per-open-menu state. Exists only while a menu is open; dropping it on
/// close releases everything the menu acquired. One menu at a time per
/// screen.
pub struct StatusMenuState {
    pub user_id: UserId,
    pub anchor: Rect,
    /// Filled in after the first painted frame; `None` means the placement
    /// still uses the height estimate.
    pub measured_height: Option<f32>,
    /// Where the menu ended up last frame; the trigger renders its chevron
    /// accordingly.
    pub orientation: MenuOrientation,
}

impl StatusMenuState {
    pub fn open(user_id: UserId, anchor: Rect) -> Self {
        Self {
            user_id,
            anchor,
            measured_height: None,
            orientation: MenuOrientation::Below,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn viewport(width: f32, height: f32) -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(width, height))
    }

    fn anchor_at(left: f32, top: f32, width: f32, height: f32) -> Rect {
        Rect::from_min_size(pos2(left, top), egui::vec2(width, height))
    }

    #[test]
    fn default_orientation_hangs_below_the_anchor() {
        let anchor = anchor_at(100.0, 100.0, 160.0, 32.0);
        let placement = place_menu(anchor, viewport(1280.0, 800.0), None);
        assert_eq!(placement.orientation, MenuOrientation::Below);
        assert_eq!(placement.top, anchor.bottom() + MENU_GAP);
        assert_eq!(placement.left, anchor.left());
        assert_eq!(placement.width, anchor.width());
    }

    #[test]
    fn flips_above_when_space_below_runs_out() {
        // 800-tall viewport, anchor leaving 60 units below and 300 above.
        let anchor = anchor_at(100.0, 308.0, 160.0, 424.0);
        assert_eq!(800.0 - anchor.bottom() - MENU_GAP, 60.0);
        assert_eq!(anchor.top() - MENU_GAP, 300.0);

        let placement = place_menu(anchor, viewport(1280.0, 800.0), None);
        assert_eq!(placement.orientation, MenuOrientation::Above);
        assert_eq!(
            placement.top,
            anchor.top() - MENU_HEIGHT_CEILING - MENU_GAP
        );
    }

    #[test]
    fn stays_below_when_above_is_even_tighter() {
        // Neither side fits the estimate, but above is worse than below.
        let anchor = anchor_at(100.0, 48.0, 160.0, 32.0);
        let placement = place_menu(anchor, viewport(1280.0, 180.0), None);
        assert_eq!(placement.orientation, MenuOrientation::Below);
    }

    #[test]
    fn measured_height_can_keep_the_menu_below() {
        // 120 units below: the 220 estimate would flip, a measured 100 fits.
        let anchor = anchor_at(100.0, 340.0, 160.0, 332.0);
        assert_eq!(800.0 - anchor.bottom() - MENU_GAP, 120.0);

        let with_estimate = place_menu(anchor, viewport(1280.0, 800.0), None);
        assert_eq!(with_estimate.orientation, MenuOrientation::Above);

        let with_measured = place_menu(anchor, viewport(1280.0, 800.0), Some(100.0));
        assert_eq!(with_measured.orientation, MenuOrientation::Below);
    }

    #[test]
    fn flipped_menu_never_rises_past_the_top_gap() {
        let anchor = anchor_at(100.0, 150.0, 160.0, 600.0);
        let placement = place_menu(anchor, viewport(1280.0, 800.0), None);
        assert_eq!(placement.orientation, MenuOrientation::Above);
        assert_eq!(placement.top, MENU_GAP);
    }

    #[test]
    fn left_edge_is_clamped_inside_both_side_paddings() {
        let near_right = anchor_at(1200.0, 100.0, 160.0, 32.0);
        let placement = place_menu(near_right, viewport(1280.0, 800.0), None);
        assert_eq!(placement.left, 1280.0 - 160.0 - MENU_SIDE_PADDING);

        let past_left = anchor_at(-20.0, 100.0, 160.0, 32.0);
        let placement = place_menu(past_left, viewport(1280.0, 800.0), None);
        assert_eq!(placement.left, MENU_SIDE_PADDING);
    }

    #[test]
    fn scroll_bound_tracks_the_viewport() {
        assert_eq!(menu_max_height(viewport(1280.0, 800.0)), 320.0);
    }
}
