//! Semantic action IDs for collector click targets.
//!
//! Registered during render and dispatched back via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const GENERATE: u16 = 0;
pub const SECONDARY_TRIGGER: u16 = 1;
pub const TOGGLE_LORE: u16 = 2;

// ── Collection scrolling ────────────────────────────────────────
pub const SCROLL_UP: u16 = 20;
pub const SCROLL_DOWN: u16 = 21;

// ── External links (base + link index) ──────────────────────────
pub const OPEN_LINK_BASE: u16 = 50;
pub const OPEN_LINK_MAX: u16 = 99;

// ── Per-pill download (base + collection index) ─────────────────
pub const DOWNLOAD_BASE: u16 = 1000;

/// Action id for the download row of the pill at `index`, if it fits.
pub fn download_action(index: usize) -> Option<u16> {
    u16::try_from(index)
        .ok()
        .and_then(|i| DOWNLOAD_BASE.checked_add(i))
}

/// Action id for the external link at `index`, if it fits.
pub fn link_action(index: usize) -> Option<u16> {
    let id = (OPEN_LINK_BASE as usize).checked_add(index)?;
    (id <= OPEN_LINK_MAX as usize).then_some(id as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_ids_start_at_base() {
        assert_eq!(download_action(0), Some(DOWNLOAD_BASE));
        assert_eq!(download_action(7), Some(DOWNLOAD_BASE + 7));
        assert_eq!(download_action(usize::MAX), None);
        assert_eq!(download_action((u16::MAX - DOWNLOAD_BASE) as usize + 1), None);
    }

    #[test]
    fn link_ids_are_bounded() {
        assert_eq!(link_action(0), Some(OPEN_LINK_BASE));
        assert_eq!(link_action(49), Some(OPEN_LINK_MAX));
        assert_eq!(link_action(50), None);
    }
}
