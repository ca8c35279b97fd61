//! Input normalization: key names, click targets, and pixel → cell conversion.

use ratzilla::event::KeyCode;
use ratzilla::ratatui::layout::Rect;

/// A raw key press, reduced to what the game distinguishes.
///
/// Keys the game has no name for are kept as [`Key::Other`] so they still
/// occupy a slot in the sequence window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Char(char),
    Other,
}

impl From<&KeyCode> for Key {
    fn from(code: &KeyCode) -> Self {
        match code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Char(c) => Key::Char(*c),
            _ => Key::Other,
        }
    }
}

/// Input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// A click/tap on a registered target, identified by its action id.
    Click(u16),
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-row target at `row`, ignored if the row is outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register every row of `area` as one target.
    pub fn add_area_target(&mut self, area: Rect, action_id: u16) {
        if area.width > 0 && area.height > 0 {
            self.add_click_target(area, action_id);
        }
    }

    /// Register targets for a horizontal tab bar from the rendered label widths.
    ///
    /// `tab_widths` holds `(display_width, action_id)` per padded label. Each
    /// target covers its label plus half of the neighbouring separators; the
    /// first and last tabs stretch to the edges of the bar.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let (_, action_id) = tab_widths[i];

            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };

            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + tab_widths[i].0;
                cur_end + (starts[i + 1] - cur_end) / 2
            };

            let w = right.min(total_width).saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Hit-test a cell against all targets. Later registrations sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Whether a screen width (in columns) should use the stacked layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 80
}

/// Convert a pixel Y coordinate (relative to the grid top) to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Convert a pixel X coordinate (relative to the grid left) to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    if cell >= cells {
        None
    } else {
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_letter_keys_map() {
        assert_eq!(Key::from(&KeyCode::Up), Key::Up);
        assert_eq!(Key::from(&KeyCode::Right), Key::Right);
        assert_eq!(Key::from(&KeyCode::Char('b')), Key::Char('b'));
        assert_eq!(Key::from(&KeyCode::Char('B')), Key::Char('B'));
        assert_eq!(Key::from(&KeyCode::Enter), Key::Enter);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);

        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(0, 5), Some(1));
        assert_eq!(cs.hit_test(7, 6), None);
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 99);
        cs.add_row_target(area, 15, 98);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 97);
        assert_eq!(cs.hit_test(6, 12), Some(97));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn area_target_covers_all_rows() {
        let mut cs = ClickState::new();
        cs.add_area_target(Rect::new(0, 2, 20, 3), 7);
        assert_eq!(cs.hit_test(0, 2), Some(7));
        assert_eq!(cs.hit_test(19, 4), Some(7));
        assert_eq!(cs.hit_test(0, 5), None);

        cs.add_area_target(Rect::new(0, 0, 0, 3), 8);
        assert_eq!(cs.targets.len(), 1);
    }

    #[test]
    fn clear_removes_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn tab_targets_split_separators() {
        // [6][3][6][3][6] in an 80-wide bar
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(6, 10), (6, 11), (6, 12)], 3, 0, 5, 80, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(6, 5), Some(10));
        assert_eq!(cs.hit_test(7, 5), Some(11));
        assert_eq!(cs.hit_test(15, 5), Some(11));
        assert_eq!(cs.hit_test(16, 5), Some(12));
        assert_eq!(cs.hit_test(79, 5), Some(12));
    }

    #[test]
    fn tab_targets_respect_offset_and_height() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(6, 10), (6, 11)], 1, 5, 3, 30, 2);
        assert_eq!(cs.hit_test(5, 4), Some(10));
        assert_eq!(cs.hit_test(4, 3), None);
        assert_eq!(cs.hit_test(34, 3), Some(11));
    }

    #[test]
    fn tab_targets_empty_or_zero_width() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        cs.register_tab_targets(&[(4, 1)], 3, 0, 0, 0, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(40));
        assert!(is_narrow_layout(79));
        assert!(!is_narrow_layout(80));
    }

    #[test]
    fn pixel_to_row_basic() {
        // 30 rows in 450px → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
    }

    #[test]
    fn pixel_conversion_rejects_bad_input() {
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_x_to_col(10.0, 800.0, 0), None);
    }

    #[test]
    fn pixel_to_col_basic() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
    }

    #[test]
    fn click_pipeline_hits_registered_row() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 40;
        cs.terminal_rows = 50;
        cs.add_click_target(Rect::new(0, 9, 40, 1), 1);
        cs.add_click_target(Rect::new(0, 10, 40, 1), 2);

        let grid_height = 50.0 * 15.0;
        let row = pixel_y_to_row(10.0 * 15.0 + 7.0, grid_height, cs.terminal_rows).unwrap();
        let col = pixel_x_to_col(123.0, 400.0, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(2));
    }
}
