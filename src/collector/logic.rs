//! Collector game logic: state transitions over [`SessionState`].
//!
//! Every function runs to completion inside one input or frame callback.

use crate::input::Key;
use crate::rng::RandomSource;

use super::generate::{roll_collectible, roll_threshold};
use super::state::{Collectible, SessionState, StatusBanner, UnlockKey};

/// Ticks of pressed-button feedback after a primary click.
const CLICK_FLASH_TICKS: u32 = 2;

/// Advance the clock: count down the banner and visual flashes.
pub fn tick(state: &mut SessionState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    state.anim_frame = state.anim_frame.wrapping_add(delta_ticks);
    state.click_flash = state.click_flash.saturating_sub(delta_ticks);

    if let Some(banner) = &mut state.status {
        banner.ticks_left = banner.ticks_left.saturating_sub(delta_ticks);
        if banner.ticks_left == 0 {
            state.status = None;
        }
    }
}

/// Show `message` on the banner, replacing whatever was there.
///
/// The banner carries its own countdown, so replacing it also drops the
/// previous message's pending clear.
pub fn announce(state: &mut SessionState, message: impl Into<String>) {
    state.status = Some(StatusBanner {
        text: message.into(),
        ticks_left: state.rules.status_ticks.max(1),
    });
}

/// Unlock a secret. Already-unlocked secrets only re-announce.
pub fn unlock(state: &mut SessionState, key: UnlockKey) {
    let message = format!("Easter egg unlocked: {}!", key.id().to_uppercase());
    if !state.is_unlocked(key) {
        for flag in state.unlocks.iter_mut().filter(|f| f.key == key) {
            flag.unlocked = true;
        }
        log::info!("secret unlocked: {}", key.id());
        state.add_log(&message, true);
    }
    announce(state, message);
}

/// Primary trigger: one click of progress.
pub fn advance_progress(state: &mut SessionState, rng: &mut dyn RandomSource) {
    state.click_flash = CLICK_FLASH_TICKS;
    add_progress(state, rng, 1);
}

/// Add `amount` progress. Reaching the threshold completes a cycle: one new
/// pill, progress back to 0, and a fresh threshold.
pub fn add_progress(state: &mut SessionState, rng: &mut dyn RandomSource, amount: u32) {
    state.progress = state.progress.saturating_add(amount);
    if state.progress >= state.threshold {
        let pill = create_collectible(state, rng);
        collect(state, pill);
        state.progress = 0;
        state.threshold =
            roll_threshold(rng, state.rules.threshold_min, state.rules.threshold_max);
    }
}

/// Roll a new pill and apply its side effects. The pill is not stored.
pub fn create_collectible(state: &mut SessionState, rng: &mut dyn RandomSource) -> Collectible {
    let pill = roll_collectible(rng, state.rules.rare_chance);
    check_balanced_color(state, &pill);
    pill
}

/// A normal pill whose three color channels match unlocks the sparkle secret.
pub fn check_balanced_color(state: &mut SessionState, pill: &Collectible) {
    if !pill.is_rare() && pill.color.is_balanced() {
        unlock(state, UnlockKey::BalancedColor);
    }
}

/// Append a pill to the collection and announce it.
pub fn collect(state: &mut SessionState, pill: Collectible) {
    let message = if pill.is_rare() {
        format!("New UNIQUE pill unlocked: {}!", pill.name)
    } else {
        format!("New pill unlocked: {}!", pill.name)
    };
    log::debug!("collected {} {} ({})", pill.name, pill.color, pill.identifier);
    state.add_log(&message, pill.is_rare());
    state.collectibles.push(pill);
    announce(state, message);
}

/// Raw key press: feed the sequence watcher.
///
/// Returns true if this key completed the secret sequence.
pub fn observe_key(state: &mut SessionState, key: Key) -> bool {
    if !state.sequence.push(key) {
        return false;
    }
    unlock(state, UnlockKey::Sequence);
    state.threshold = 1;
    true
}

/// Secondary trigger (the coffee cup).
pub fn trigger_secondary(state: &mut SessionState, rng: &mut dyn RandomSource) {
    state.secondary_count = state.secondary_count.saturating_add(1);
    if state.secondary_count == state.rules.secondary_target {
        unlock(state, UnlockKey::RepeatedTrigger);
        add_progress(state, rng, state.rules.secondary_bonus);
    }
}

pub fn toggle_lore(state: &mut SessionState) {
    state.show_lore = !state.show_lore;
}

/// Scroll the collection list by `delta` lines, stopping at the ends.
///
/// An offset left past `max_scroll` (the viewport grew) is pulled back first,
/// so the press moves from where the list is actually shown.
pub fn scroll_collection(state: &mut SessionState, delta: i32, max_scroll: u16) {
    let current = state.scroll.min(max_scroll) as i32;
    state.scroll = (current + delta).clamp(0, max_scroll as i32) as u16;
}

/// The plain-text export of a pill, as offered by the download row.
pub fn export_text(pill: &Collectible) -> String {
    format!(
        "NFT Details:\nName: {}\nID: {}\nColor: {}",
        pill.name, pill.identifier, pill.color
    )
}

pub fn export_file_name(pill: &Collectible) -> String {
    format!("{}.txt", pill.name)
}
