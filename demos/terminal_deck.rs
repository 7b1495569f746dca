//! Terminal Deck - Swipe through flashcards with the mouse
//!
//! Drag the top card left ("Retry soon") or right ("Learned") past the commit
//! threshold and release. A quick click flips the card. Press `q` to quit.
//!
//! Run with: cargo run --example terminal_deck
//! Debug logs: RUST_LOG=flashdeck=debug cargo run --example terminal_deck 2> deck.log

use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::event::KeyCode;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use flashdeck::state::input::{disable_mouse, enable_mouse, poll_event, InputEvent};
use flashdeck::{
    create_presentation_derived, Card, CardPresentation, DeckConfig, DeckManager, Point, PointerTracker, Rgba,
    SwipeDirection,
};

const SEED: &str = include_str!("cards.json");
const CARD_WIDTH: f32 = 44.0;
const CARD_HEIGHT: u16 = 12;
const TOP_MARGIN: u16 = 3;

fn to_color(color: Rgba) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn fit(text: &str, width: usize) -> String {
    let mut line: String = text.chars().take(width).collect();
    let len = line.chars().count();
    line.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    line
}

/// Greedy word wrap into at most `max_lines` lines.
fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                return lines;
            }
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    lines
}

/// Cell rectangle a card occupies on screen.
#[derive(Debug, Clone, Copy)]
struct CardRect {
    left: u16,
    top: u16,
    width: u16,
}

impl CardRect {
    fn contains(&self, point: Point, config: &DeckConfig) -> bool {
        let column = point.x / config.input.cell_width;
        let row = point.y / config.input.cell_height;
        column >= self.left as f32
            && column < (self.left + self.width) as f32
            && row >= self.top as f32
            && row < (self.top + CARD_HEIGHT) as f32
    }
}

/// Where `view` lands on a terminal `columns` wide, or `None` if it cannot fit.
fn card_rect(view: &CardPresentation, config: &DeckConfig, columns: u16) -> Option<CardRect> {
    let width = (CARD_WIDTH * view.scale).round().max(8.0) as u16;
    if width + 2 > columns {
        return None;
    }
    let shift = (view.horizontal_offset / config.input.cell_width).round() as i32;
    let left = ((columns as i32 - width as i32) / 2 + shift).clamp(0, (columns - width) as i32);
    let top = (TOP_MARGIN as i32 + (view.vertical_offset / config.input.cell_height).round() as i32).max(1);
    Some(CardRect {
        left: left as u16,
        top: top as u16,
        width,
    })
}

fn draw_card(
    out: &mut impl Write,
    card: &Card,
    view: &CardPresentation,
    config: &DeckConfig,
    columns: u16,
) -> std::io::Result<()> {
    let Some(rect) = card_rect(view, config, columns) else {
        return Ok(());
    };
    let (left, top, inner) = (rect.left, rect.top, rect.width as usize - 2);

    // Faded cards draw in grey
    let fg = if view.opacity < 0.5 { Color::DarkGrey } else { Color::Black };
    queue!(out, SetBackgroundColor(to_color(view.tint)), SetForegroundColor(fg))?;

    let mut body: Vec<String> = Vec::new();
    if view.is_interactive() {
        if view.is_flipped() {
            body.push(card.back_heading());
            body.push(String::new());
            body.extend(wrap(&card.back_content, inner, 7));
        } else if view.text_opacity > 0.3 {
            body.push(card.title.clone());
            body.push(String::new());
            body.extend(wrap(&card.content, inner, 7));
        }
        if view.left_label_opacity > 0.5 {
            body.insert(0, format!("<< {}", SwipeDirection::Left.label()));
        } else if view.right_label_opacity > 0.5 {
            body.insert(0, format!("{} >>", SwipeDirection::Right.label()));
        }
    }

    for row in 0..CARD_HEIGHT {
        let text = body.get(row as usize).map(String::as_str).unwrap_or("");
        queue!(out, cursor::MoveTo(left, top + row), Print(format!(" {} ", fit(text, inner))))?;
    }

    if view.is_interactive() {
        let hint = if view.is_flipped() { Card::BACK_HINT } else { Card::FRONT_HINT };
        queue!(out, cursor::MoveTo(left, top + CARD_HEIGHT - 1), Print(format!(" {} ", fit(hint, inner))))?;
    }

    queue!(out, ResetColor)
}

fn render(deck: &DeckManager, views: &[CardPresentation]) -> std::io::Result<()> {
    let mut out = stdout();
    let (columns, _) = terminal::size()?;
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(out, Print(format!("{} cards left | q to quit", deck.len())))?;

    let cards = deck.cards();
    // Bottom of the stack first so the top card paints last
    for view in views.iter().rev() {
        if let Some(card) = cards.iter().find(|card| card.id == view.card_id) {
            draw_card(&mut out, card, view, deck.config(), columns)?;
        }
    }

    if views.is_empty() {
        queue!(out, cursor::MoveTo(2, TOP_MARGIN), Print("All cards reviewed."))?;
    }
    out.flush()
}

fn run(deck: &DeckManager) -> std::io::Result<()> {
    let presentation = create_presentation_derived(deck);
    let mut tracker = PointerTracker::new();
    let input_config = deck.config().input;

    render(deck, &presentation.get())?;
    loop {
        match poll_event(Duration::from_millis(16), &input_config)? {
            Some(InputEvent::Pointer(pointer)) => {
                let (columns, _) = terminal::size()?;
                let top = presentation.get().first().and_then(|view| card_rect(view, deck.config(), columns));
                tracker.route_hit(deck, pointer, |point| {
                    top.is_some_and(|rect| rect.contains(point, deck.config()))
                });
            }
            Some(InputEvent::Key(key)) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                return Ok(());
            }
            Some(InputEvent::Resize(_, _)) => {}
            _ => continue,
        }
        render(deck, &presentation.get())?;
    }
}

fn setup_terminal() -> std::io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
    enable_mouse()
}

/// Undo every setup step; each is attempted even if an earlier one fails.
fn restore_terminal() -> std::io::Result<()> {
    let mouse = disable_mouse();
    let screen = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    raw.and(screen).and(mouse)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let deck = DeckManager::from_json(
        SEED,
        DeckConfig::default(),
        Box::new(|id, direction| log::info!("Card {} swiped {}", id, direction)),
    )?;

    // Restore even if setup failed partway
    let result = setup_terminal().and_then(|()| run(&deck));
    restore_terminal()?;

    result?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
