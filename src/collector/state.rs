/// PillVerse Collector state definitions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::sequence::SequenceWatcher;

/// A 24-bit RGB color, displayed as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PillColor(u32);

impl PillColor {
    pub const MAX: u32 = 0xFF_FFFF;

    /// Build a color from the low 24 bits of `value`.
    pub fn new(value: u32) -> Self {
        Self(value & Self::MAX)
    }

    #[cfg(test)]
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Six lowercase hex digits, zero-padded, without the `#`.
    pub fn hex(&self) -> String {
        format!("{:06x}", self.0)
    }

    /// All three channels equal (a perfect gray).
    pub fn is_balanced(&self) -> bool {
        let (r, g, b) = self.rgb();
        r == g && g == b
    }
}

impl fmt::Display for PillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0:?}")]
    Length(String),
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

impl FromStr for PillColor {
    type Err = ColorParseError;

    /// Accepts `rrggbb` or `#rrggbb`, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorParseError::Length(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digits(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(PillColor::new)
            .map_err(|_| ColorParseError::Digits(s.to_string()))
    }
}

/// The elemental pill kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RareKind {
    Fire,
    Thunder,
    Lightning,
}

impl RareKind {
    pub fn all() -> &'static [RareKind] {
        &[RareKind::Fire, RareKind::Thunder, RareKind::Lightning]
    }

    pub fn name(&self) -> &'static str {
        match self {
            RareKind::Fire => "FIRE",
            RareKind::Thunder => "THUNDER",
            RareKind::Lightning => "LIGHTNING",
        }
    }

    pub fn color(&self) -> PillColor {
        match self {
            RareKind::Fire => PillColor::new(0xFF4500),
            RareKind::Thunder => PillColor::new(0x00FFFF),
            RareKind::Lightning => PillColor::new(0xFFFF00),
        }
    }
}

/// A generated pill. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collectible {
    pub color: PillColor,
    pub identifier: String,
    pub name: String,
    pub rarity: Option<RareKind>,
}

impl Collectible {
    pub fn is_rare(&self) -> bool {
        self.rarity.is_some()
    }

    /// First eight identifier characters, as shown on the card.
    pub fn short_id(&self) -> &str {
        let end = self
            .identifier
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.identifier.len());
        &self.identifier[..end]
    }
}

/// The hidden secrets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockKey {
    Sequence,
    RepeatedTrigger,
    BalancedColor,
}

impl UnlockKey {
    pub fn all() -> &'static [UnlockKey] {
        &[
            UnlockKey::Sequence,
            UnlockKey::RepeatedTrigger,
            UnlockKey::BalancedColor,
        ]
    }

    /// Short id used in announcements.
    pub fn id(&self) -> &'static str {
        match self {
            UnlockKey::Sequence => "konami",
            UnlockKey::RepeatedTrigger => "coffee",
            UnlockKey::BalancedColor => "sparkle",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            UnlockKey::Sequence => "Up, Up, Down, Down, Left, Right, Left, Right, B, A",
            UnlockKey::RepeatedTrigger => "Click the coffee cup 5 times",
            UnlockKey::BalancedColor => "Generate a pill with a perfect RGB balance",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockFlag {
    pub key: UnlockKey,
    pub hint: &'static str,
    pub unlocked: bool,
}

impl UnlockFlag {
    pub fn new(key: UnlockKey) -> Self {
        Self {
            key,
            hint: key.hint(),
            unlocked: false,
        }
    }
}

/// The transient banner and the ticks left before it clears itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBanner {
    pub text: String,
    pub ticks_left: u32,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Tunables copied out of the page config at session start.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub threshold_min: u32,
    pub threshold_max: u32,
    pub rare_chance: f64,
    pub status_ticks: u32,
    pub secondary_target: u32,
    pub secondary_bonus: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            threshold_min: 35,
            threshold_max: 200,
            rare_chance: 0.05,
            status_ticks: 20,
            secondary_target: 5,
            secondary_bonus: 50,
        }
    }
}

/// Everything that changes during a session.
pub struct SessionState {
    pub rules: Rules,
    /// Clicks since the last pill.
    pub progress: u32,
    /// Clicks needed for the next pill. Always at least 1.
    pub threshold: u32,
    /// Append-only.
    pub collectibles: Vec<Collectible>,
    pub unlocks: Vec<UnlockFlag>,
    pub status: Option<StatusBanner>,
    pub sequence: SequenceWatcher,
    /// Presses of the coffee control.
    pub secondary_count: u32,
    pub show_lore: bool,
    /// Collection list scroll offset, in lines.
    pub scroll: u16,
    /// Collection lines visible in the last drawn frame.
    pub collection_rows: u16,
    pub log: Vec<LogEntry>,
    /// Ticks of pressed-button feedback remaining.
    pub click_flash: u32,
    pub anim_frame: u32,
}

impl SessionState {
    /// A fresh session. `threshold` is the first rolled threshold.
    pub fn new(rules: Rules, threshold: u32) -> Self {
        let mut state = Self {
            rules,
            progress: 0,
            threshold: threshold.max(1),
            collectibles: Vec::new(),
            unlocks: UnlockKey::all().iter().map(|&k| UnlockFlag::new(k)).collect(),
            status: None,
            sequence: SequenceWatcher::konami(),
            secondary_count: 0,
            show_lore: false,
            scroll: 0,
            collection_rows: 0,
            log: Vec::new(),
            click_flash: 0,
            anim_frame: 0,
        };
        state.add_log("Welcome to the PillVerse, engineer.", true);
        state
    }

    /// Always equal to `collectibles.len()`.
    pub fn total_collected(&self) -> usize {
        self.collectibles.len()
    }

    pub fn flag(&self, key: UnlockKey) -> &UnlockFlag {
        // unlocks is built from UnlockKey::all(), so every key is present
        let idx = UnlockKey::all().iter().position(|&k| k == key).unwrap_or(0);
        &self.unlocks[idx]
    }

    pub fn is_unlocked(&self, key: UnlockKey) -> bool {
        self.flag(key).unlocked
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocks.iter().filter(|f| f.unlocked).count()
    }

    /// Progress as a fraction of the threshold, clamped to `[0, 1]`.
    pub fn progress_ratio(&self) -> f64 {
        (self.progress as f64 / self.threshold.max(1) as f64).clamp(0.0, 1.0)
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}
