mod collector;
mod config;
mod host;
mod input;
mod logging;
mod rng;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use collector::CollectorGame;
use config::{CollectorConfig, ConfigError, CONFIG_ELEMENT_ID};
use host::BrowserHost;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent, Key};
use ratzilla::event::{MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use rng::SeededSource;
use time::{GameTime, TICKS_PER_SEC};

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_y = mouse_y as f64 - rect.top();
    let click_x = mouse_x as f64 - rect.left();

    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    log::trace!("click: pixel=({}, {}) cell=({}, {})", mouse_x, mouse_y, col, row);
    Some((col, row))
}

/// Read the inline JSON config, if the page has one.
fn load_config() -> Result<CollectorConfig, ConfigError> {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match text {
        Some(text) if !text.trim().is_empty() => CollectorConfig::from_json(&text),
        _ => Ok(CollectorConfig::default()),
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let loaded = load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    if logging::init(level).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    if let Err(err) = &loaded {
        log::warn!("ignoring page config: {}", err);
    }

    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
    log::info!("starting PillVerse (seed {})", seed);

    let game = Rc::new(RefCell::new(CollectorGame::new(
        &config,
        Box::new(SeededSource::new(seed)),
        Box::new(BrowserHost::new(config.downloads_enabled)),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let game_time = Rc::new(RefCell::new(GameTime::new(TICKS_PER_SEC)));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let key = Key::from(&key_event.code);
            game.borrow_mut().handle_input(&InputEvent::Key(key));
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = game_time.borrow_mut().update(now_ms());
            if ticks > 0 {
                game.borrow_mut().tick(ticks);
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow_mut().render(f, size, &click_state);
        }
    });

    Ok(())
}
