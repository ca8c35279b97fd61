//! Collector rendering: nav bar, lore, progress, secrets, collection, log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::{
    download_action, link_action, GENERATE, SCROLL_DOWN, SCROLL_UP, SECONDARY_TRIGGER,
    TOGGLE_LORE,
};
use super::state::{Collectible, SessionState};
use super::Presentation;

const LORE: &[&str] = &[
    "In the year 2077, pharmaceutical engineering reached its peak with the creation of the \
     PillVerse - a quantum realm where each pill contains its own unique universe.",
    "As a PillVerse Engineer, your mission is to generate and collect these extraordinary \
     pills, each with its own unique signature and properties.",
    "Legend speaks of hidden secrets within the PillVerse, waiting to be discovered by the \
     most dedicated collectors...",
];

/// Lines each pill occupies in the collection list.
const CARD_LINES: usize = 3;

/// Draw the whole screen. Returns the number of collection lines visible
/// this frame.
pub fn render(
    state: &SessionState,
    pres: &Presentation,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) -> u16 {
    let (main_area, log_area) = if is_narrow_layout(area.width) {
        (area, None)
    } else {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    };

    let lore_height = if state.show_lore {
        lore_height(main_area.width)
    } else {
        0
    };
    let secrets_height = state.unlocks.len() as u16 + 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // nav
            Constraint::Length(lore_height),    // lore (toggled)
            Constraint::Length(2),              // title + total
            Constraint::Length(5),              // progress
            Constraint::Length(secrets_height), // secrets
            Constraint::Min(5),                 // collection
            Constraint::Length(2),              // footer
        ])
        .split(main_area);

    render_nav(pres, f, chunks[0], click_state);
    if state.show_lore {
        render_lore(f, chunks[1]);
    }
    render_header(state, pres, f, chunks[2]);
    render_progress(state, f, chunks[3], click_state);
    render_secrets(state, pres, f, chunks[4]);
    let collection_rows = render_collection(state, pres, f, chunks[5], click_state);
    render_footer(f, chunks[6]);

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }

    // Banner goes last so it sits on top of everything else.
    if let Some(text) = state.status_text() {
        render_status(text, f, area);
    }

    collection_rows
}

/// Number of lines in the collection list, including the empty placeholder.
pub fn collection_line_count(state: &SessionState) -> usize {
    if state.collectibles.is_empty() {
        1
    } else {
        state.collectibles.len() * CARD_LINES
    }
}

/// Largest scroll offset that still changes what a `visible`-row viewport
/// shows.
pub fn max_scroll(line_count: usize, visible: u16) -> u16 {
    let max = line_count.saturating_sub(visible as usize);
    u16::try_from(max).unwrap_or(u16::MAX)
}

fn lore_height(width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1);
    let lines = lore_paragraph().line_count(inner) as u16;
    lines + 2
}

fn lore_paragraph() -> Paragraph<'static> {
    let mut lines: Vec<Line> = LORE[..LORE.len() - 1]
        .iter()
        .map(|p| Line::from(Span::styled(*p, Style::default().fg(Color::White))))
        .collect();
    lines.push(Line::from(Span::styled(
        LORE[LORE.len() - 1],
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));
    Paragraph::new(lines).wrap(Wrap { trim: true })
}

fn render_nav(
    pres: &Presentation,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let brand = format!(" {} PillVerse", pres.icons.brand());
    let brand_width = Line::from(brand.as_str()).width() as u16;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(brand_width + 1), Constraint::Min(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            brand,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))),
        cols[0],
    );

    let link_style = Style::default().fg(Color::LightMagenta);
    let mut bar = TabBar::new(" ")
        .tab("Lore", Style::default().fg(Color::White), TOGGLE_LORE)
        .tab(
            pres.icons.coffee(),
            Style::default().fg(Color::Yellow),
            SECONDARY_TRIGGER,
        );
    for (i, link) in pres.links.iter().enumerate() {
        if let Some(id) = link_action(i) {
            bar = bar.tab(format!("{} {}", pres.icons.link(i), link.label), link_style, id);
        }
    }

    let mut cs = click_state.borrow_mut();
    bar.render(f, cols[1], &mut cs);
}

fn render_lore(f: &mut Frame, area: Rect) {
    let widget = lore_paragraph().block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" The PillVerse Saga "),
    );
    f.render_widget(widget, area);
}

fn render_header(state: &SessionState, pres: &Presentation, f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "The PillVerse Collector",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} Total Pills: {}", pres.icons.trophy(), state.total_collected()),
            Style::default().fg(Color::White),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_progress(
    state: &SessionState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // The threshold is a secret: only the ratio leaks through the gauge.
    f.render_widget(
        Paragraph::new(format!("Clicks: {}/???", state.progress))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center),
        rows[0],
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::LightMagenta).bg(Color::DarkGray))
            .ratio(state.progress_ratio())
            .label(""),
        rows[1],
    );

    let button_style = if state.click_flash > 0 {
        Style::default()
            .fg(Color::White)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Magenta)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "  CLICK TO GENERATE  ",
            button_style,
        )))
        .alignment(Alignment::Center),
        rows[2],
    );

    // Anywhere in the panel counts as a press.
    click_state.borrow_mut().add_area_target(area, GENERATE);
}

fn render_secrets(state: &SessionState, pres: &Presentation, f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{} Secrets discovered: {}/{}",
            pres.icons.sparkle(),
            state.unlocked_count(),
            state.unlocks.len()
        ),
        Style::default().fg(Color::White),
    ))];
    for flag in &state.unlocks {
        let line = if flag.unlocked {
            Line::from(vec![
                Span::styled(
                    format!("  {} ", pres.icons.sparkle()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(flag.hint, Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(Span::styled(
                format!("  {} ???", pres.icons.lock()),
                Style::default().fg(Color::DarkGray),
            ))
        };
        lines.push(line);
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

fn card_lines<'a>(
    cl: &mut ClickableList<'a>,
    index: usize,
    pill: &'a Collectible,
    pres: &Presentation,
    anim_frame: u32,
) {
    let (r, g, b) = pill.color.rgb();
    let mut title = vec![
        Span::styled("██ ", Style::default().fg(Color::Rgb(r, g, b))),
        Span::styled(
            pill.name.as_str(),
            Style::default()
                .fg(if pill.is_rare() { Color::LightRed } else { Color::White })
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if pill.is_rare() {
        // Pulse the badge every half second.
        let badge = if (anim_frame / 5) % 2 == 0 {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        title.push(Span::raw(" "));
        title.push(Span::styled(" UNIQUE ", badge));
    }
    cl.push(Line::from(title));

    cl.push(Line::from(Span::styled(
        format!("   ID: {}...", pill.short_id()),
        Style::default().fg(Color::Gray),
    )));

    let label = if pres.downloads_enabled {
        "   [D] Download"
    } else {
        "   [D] NFT Coming Soon!"
    };
    let line = Line::from(Span::styled(label, Style::default().fg(Color::DarkGray)));
    match download_action(index) {
        Some(id) => cl.push_clickable(line, id),
        None => cl.push(Line::from(Span::styled("   ---", Style::default().fg(Color::DarkGray)))),
    }
}

fn render_collection(
    state: &SessionState,
    pres: &Presentation,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) -> u16 {
    let mut cl = ClickableList::new();
    if state.collectibles.is_empty() {
        cl.push(Line::from(Span::styled(
            "  No pills yet. Keep clicking.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, pill) in state.collectibles.iter().enumerate() {
        card_lines(&mut cl, i, pill, pres, state.anim_frame);
    }

    let visible = area.height.saturating_sub(2);
    let max_scroll = max_scroll(cl.len(), visible);
    let scroll = state.scroll.min(max_scroll);

    let title = format!(" Collection ({}) ", state.total_collected());
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(title);
    if max_scroll > 0 {
        block = block.title_bottom(Line::from(" ▲ k / j ▼ ").alignment(Alignment::Right));
    }

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, scroll);
    if max_scroll > 0 {
        // Border rows double as scroll buttons.
        cs.add_row_target(area, area.y, SCROLL_UP);
        cs.add_row_target(area, area.y + area.height.saturating_sub(1), SCROLL_DOWN);
    }
    drop(cs);

    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(widget, area);
    visible
}

fn render_footer(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "© 2077 PillVerse. The PillVerse and the PillVerse Logo are trademarks of PillVerse, INC.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "1984 | Version 1.0.0 | Space: generate  l: lore  j/k: scroll",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_log(state: &SessionState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Top-right banner rect for a message of `text_width` cells.
fn status_rect(text_width: u16, area: Rect) -> Rect {
    let width = text_width.saturating_add(4).min(area.width);
    let height = 3.min(area.height);
    Rect::new(area.x + area.width - width, area.y, width, height)
}

fn render_status(text: &str, f: &mut Frame, area: Rect) {
    let rect = status_rect(Line::from(text).width() as u16, area);
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Green)),
        ),
        rect,
    );
}
