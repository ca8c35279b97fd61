//! PillVerse collector: click until a pill drops, and find the three secrets.

pub mod actions;
pub mod generate;
pub mod logic;
pub mod render;
pub mod sequence;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::{CollectorConfig, ExternalLink, IconSet};
use crate::host::{ExportFile, Host, HostError};
use crate::input::{ClickState, InputEvent, Key};
use crate::rng::RandomSource;
use crate::time::{ms_to_ticks, TICKS_PER_SEC};

use state::{Rules, SessionState};

/// Everything the view needs that isn't session state.
#[derive(Clone, Debug, Default)]
pub struct Presentation {
    pub icons: IconSet,
    pub links: Vec<ExternalLink>,
    pub downloads_enabled: bool,
}

impl From<&CollectorConfig> for Rules {
    fn from(config: &CollectorConfig) -> Self {
        Self {
            threshold_min: config.threshold_min,
            threshold_max: config.threshold_max,
            rare_chance: config.rare_chance,
            status_ticks: ms_to_ticks(config.status_duration_ms, TICKS_PER_SEC),
            secondary_target: config.secondary_target,
            secondary_bonus: config.secondary_bonus,
        }
    }
}

/// Owns the session and the collaborators it needs.
pub struct CollectorGame {
    pub state: SessionState,
    pub presentation: Presentation,
    rng: Box<dyn RandomSource>,
    host: Box<dyn Host>,
}

impl CollectorGame {
    pub fn new(
        config: &CollectorConfig,
        mut rng: Box<dyn RandomSource>,
        host: Box<dyn Host>,
    ) -> Self {
        let rules = Rules::from(config);
        let threshold =
            generate::roll_threshold(rng.as_mut(), rules.threshold_min, rules.threshold_max);
        Self {
            state: SessionState::new(rules, threshold),
            presentation: Presentation {
                icons: config.variant,
                links: config.links.clone(),
                downloads_enabled: config.downloads_enabled,
            },
            rng,
            host,
        }
    }

    /// Handle an input event. Returns true if it changed anything.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(*key),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        // Every key feeds the watcher, bound or not.
        let matched = logic::observe_key(&mut self.state, key);

        let handled = match key {
            Key::Char(' ') | Key::Enter => {
                logic::advance_progress(&mut self.state, self.rng.as_mut());
                true
            }
            Key::Char('c') => {
                logic::trigger_secondary(&mut self.state, self.rng.as_mut());
                true
            }
            Key::Char('l') => {
                logic::toggle_lore(&mut self.state);
                true
            }
            Key::Up | Key::Char('k') => self.scroll(-1),
            Key::Down | Key::Char('j') => self.scroll(1),
            _ => false,
        };
        matched || handled
    }

    fn handle_click(&mut self, id: u16) -> bool {
        match id {
            actions::GENERATE => {
                logic::advance_progress(&mut self.state, self.rng.as_mut());
                true
            }
            actions::SECONDARY_TRIGGER => {
                logic::trigger_secondary(&mut self.state, self.rng.as_mut());
                true
            }
            actions::TOGGLE_LORE => {
                logic::toggle_lore(&mut self.state);
                true
            }
            actions::SCROLL_UP => self.scroll(-1),
            actions::SCROLL_DOWN => self.scroll(1),
            actions::OPEN_LINK_BASE..=actions::OPEN_LINK_MAX => {
                self.open_link((id - actions::OPEN_LINK_BASE) as usize)
            }
            _ if id >= actions::DOWNLOAD_BASE => {
                self.download((id - actions::DOWNLOAD_BASE) as usize)
            }
            _ => false,
        }
    }

    /// Scroll within the bounds the last frame drew. Returns true only if the
    /// shown offset moved.
    fn scroll(&mut self, delta: i32) -> bool {
        let max = render::max_scroll(
            render::collection_line_count(&self.state),
            self.state.collection_rows,
        );
        let before = self.state.scroll.min(max);
        logic::scroll_collection(&mut self.state, delta, max);
        self.state.scroll != before
    }

    fn open_link(&mut self, index: usize) -> bool {
        let Some(link) = self.presentation.links.get(index) else {
            return false;
        };
        if let Err(err) = self.host.open_link(&link.url) {
            log::warn!("could not open {}: {}", link.url, err);
        }
        true
    }

    fn download(&mut self, index: usize) -> bool {
        let Some(pill) = self.state.collectibles.get(index) else {
            return false;
        };
        let file = ExportFile {
            file_name: logic::export_file_name(pill),
            contents: logic::export_text(pill),
        };
        match self.host.offer_download(&file) {
            Ok(()) => {
                log::info!("offered {}", file.file_name);
                self.state
                    .add_log(&format!("Downloaded {}", file.file_name), false);
                true
            }
            // The row is shown but inert until downloads are switched on.
            Err(HostError::DownloadsDisabled) => false,
            Err(err) => {
                log::warn!("download of {} failed: {}", file.file_name, err);
                self.state
                    .add_log(&format!("Download failed: {}", file.file_name), true);
                true
            }
        }
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        self.state.collection_rows =
            render::render(&self.state, &self.presentation, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::rng::SeededSource;
    use sequence::KONAMI;
    use state::UnlockKey;

    /// Shares the recorder with the game so tests can inspect host calls.
    struct SharedHost(Rc<RecordingHost>);

    impl Host for SharedHost {
        fn offer_download(&self, file: &ExportFile) -> Result<(), HostError> {
            self.0.offer_download(file)
        }

        fn open_link(&self, url: &str) -> Result<(), HostError> {
            self.0.open_link(url)
        }
    }

    fn game_with(config: &CollectorConfig) -> (CollectorGame, Rc<RecordingHost>) {
        let recorder = Rc::new(RecordingHost {
            downloads_enabled: config.downloads_enabled,
            ..Default::default()
        });
        let game = CollectorGame::new(
            config,
            Box::new(SeededSource::new(42)),
            Box::new(SharedHost(recorder.clone())),
        );
        (game, recorder)
    }

    fn game() -> CollectorGame {
        game_with(&CollectorConfig::default()).0
    }

    fn press(game: &mut CollectorGame, key: Key) -> bool {
        game.handle_input(&InputEvent::Key(key))
    }

    fn click(game: &mut CollectorGame, id: u16) -> bool {
        game.handle_input(&InputEvent::Click(id))
    }

    #[test]
    fn rules_follow_config() {
        let config = CollectorConfig {
            status_duration_ms: 1500,
            secondary_bonus: 7,
            ..Default::default()
        };
        let rules = Rules::from(&config);
        assert_eq!(rules.status_ticks, 15);
        assert_eq!(rules.secondary_bonus, 7);
    }

    #[test]
    fn initial_threshold_is_in_range() {
        let game = game();
        assert!((35..=200).contains(&game.state.threshold));
    }

    #[test]
    fn space_enter_and_click_all_advance() {
        let mut game = game();
        assert!(press(&mut game, Key::Char(' ')));
        assert!(press(&mut game, Key::Enter));
        assert!(click(&mut game, actions::GENERATE));
        assert_eq!(game.state.progress, 3);
    }

    #[test]
    fn konami_via_input_then_one_click_drops_a_pill() {
        let mut game = game();
        for key in KONAMI {
            press(&mut game, key);
        }
        assert!(game.state.is_unlocked(UnlockKey::Sequence));
        assert_eq!(game.state.threshold, 1);

        click(&mut game, actions::GENERATE);
        assert_eq!(game.state.total_collected(), 1);
    }

    #[test]
    fn coffee_key_and_tab_share_one_counter() {
        let mut game = game();
        for _ in 0..2 {
            press(&mut game, Key::Char('c'));
        }
        for _ in 0..3 {
            click(&mut game, actions::SECONDARY_TRIGGER);
        }
        assert_eq!(game.state.secondary_count, 5);
        assert!(game.state.is_unlocked(UnlockKey::RepeatedTrigger));
    }

    #[test]
    fn lore_toggles_from_key_and_click() {
        let mut game = game();
        press(&mut game, Key::Char('l'));
        assert!(game.state.show_lore);
        click(&mut game, actions::TOGGLE_LORE);
        assert!(!game.state.show_lore);
    }

    #[test]
    fn unbound_key_is_not_handled() {
        let mut game = game();
        assert!(!press(&mut game, Key::Char('z')));
        assert!(!press(&mut game, Key::Other));
    }

    /// Collect `n` pills and pretend a frame showed `rows` collection lines.
    fn game_with_pills(n: usize, rows: u16) -> CollectorGame {
        let mut game = game();
        for _ in 0..n {
            game.state.threshold = 1;
            click(&mut game, actions::GENERATE);
        }
        game.state.collection_rows = rows;
        game
    }

    #[test]
    fn scroll_stops_at_the_last_visible_page() {
        // 10 pills = 30 lines in a 15-line viewport
        let mut game = game_with_pills(10, 15);
        assert!(!press(&mut game, Key::Up));
        assert!(press(&mut game, Key::Char('j')));
        assert_eq!(game.state.scroll, 1);
        for _ in 0..100 {
            press(&mut game, Key::Down);
        }
        assert_eq!(game.state.scroll, 15);
        assert!(!press(&mut game, Key::Down));
    }

    #[test]
    fn every_up_press_after_the_bottom_moves_the_list() {
        let mut game = game_with_pills(10, 15);
        for _ in 0..100 {
            press(&mut game, Key::Char('j'));
        }
        let mut dead_presses = 0;
        for _ in 0..15 {
            let before = game.state.scroll;
            if !press(&mut game, Key::Char('k')) || game.state.scroll == before {
                dead_presses += 1;
            }
        }
        assert_eq!(dead_presses, 0);
        assert_eq!(game.state.scroll, 0);
    }

    #[test]
    fn short_collection_does_not_scroll() {
        let mut game = game_with_pills(3, 15);
        assert!(!press(&mut game, Key::Down));
        assert!(!click(&mut game, actions::SCROLL_DOWN));
        assert_eq!(game.state.scroll, 0);
    }

    #[test]
    fn taller_viewport_pulls_a_stale_offset_back() {
        let mut game = game_with_pills(10, 15);
        for _ in 0..100 {
            press(&mut game, Key::Down);
        }
        // window resized: now 25 of 30 lines fit
        game.state.collection_rows = 25;
        assert!(press(&mut game, Key::Up));
        assert_eq!(game.state.scroll, 4);
    }

    #[test]
    fn disabled_download_is_inert() {
        let (mut game, recorder) = game_with(&CollectorConfig::default());
        game.state.threshold = 1;
        click(&mut game, actions::GENERATE);
        let log_len = game.state.log.len();

        assert!(!click(&mut game, actions::DOWNLOAD_BASE));
        assert!(recorder.downloads.borrow().is_empty());
        assert_eq!(game.state.log.len(), log_len);
    }

    #[test]
    fn enabled_download_exports_pill_text() {
        let config = CollectorConfig {
            downloads_enabled: true,
            ..Default::default()
        };
        let (mut game, recorder) = game_with(&config);
        game.state.threshold = 1;
        click(&mut game, actions::GENERATE);

        assert!(click(&mut game, actions::DOWNLOAD_BASE));
        let downloads = recorder.downloads.borrow();
        assert_eq!(downloads.len(), 1);
        let pill = &game.state.collectibles[0];
        assert_eq!(downloads[0].file_name, format!("{}.txt", pill.name));
        assert!(downloads[0].contents.contains(&pill.identifier));
    }

    #[test]
    fn download_for_missing_pill_is_ignored() {
        let mut game = game();
        assert!(!click(&mut game, actions::DOWNLOAD_BASE + 3));
    }

    #[test]
    fn link_tabs_open_configured_urls() {
        let (mut game, recorder) = game_with(&CollectorConfig::default());
        assert!(click(&mut game, actions::OPEN_LINK_BASE + 1));
        assert_eq!(recorder.links.borrow().as_slice(), ["https://twitter.com"]);
        assert!(!click(&mut game, actions::OPEN_LINK_BASE + 9));
    }

    #[test]
    fn tick_expires_the_banner() {
        let mut game = game();
        game.state.threshold = 1;
        click(&mut game, actions::GENERATE);
        assert!(game.state.status.is_some());
        game.tick(20);
        assert!(game.state.status.is_none());
    }
}
