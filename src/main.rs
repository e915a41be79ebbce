use std::env;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use couch_stats::export;
use couch_stats::share;
use couch_stats::state::{AppState, EditBuffer, FormField, Theme};
use couch_stats::statgen;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.editing.is_some() {
            self.on_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.cycle_focused(true),
            KeyCode::Char('h') | KeyCode::Left => self.cycle_focused(false),
            KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('r') => self.randomize(),
            KeyCode::Char('x') => self.export_card(),
            KeyCode::Char('c') => self.copy_link(),
            _ => {}
        }
    }

    fn on_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.editing = None;
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                if let Some(buf) = &mut self.state.editing {
                    buf.input.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(buf) = &mut self.state.editing {
                    buf.input.push(ch);
                }
            }
            _ => {}
        }
    }

    /// Left/right on the two select-style fields; re-selecting a sport resets
    /// its stat sheet, same as the original dropdown.
    fn cycle_focused(&mut self, forward: bool) {
        match self.state.focused_field() {
            FormField::Sport => {
                let sport = if forward {
                    self.state.card.sport.next()
                } else {
                    self.state.card.sport.prev()
                };
                self.state.card.select_sport(sport);
                self.state.clamp_focus();
                self.state
                    .push_log(format!("[INFO] Sport set to {}", sport.label()));
            }
            FormField::Theme => {
                self.state.card.theme = if forward {
                    self.state.card.theme.next()
                } else {
                    self.state.card.theme.prev()
                };
            }
            _ => {}
        }
    }

    fn begin_edit(&mut self) {
        let field = self.state.focused_field();
        let input = match field {
            // Enter on a select field just advances it.
            FormField::Sport | FormField::Theme => {
                self.cycle_focused(true);
                return;
            }
            FormField::Name => self.state.card.name.clone(),
            FormField::Team => self.state.card.team.clone(),
            FormField::Photo => self
                .state
                .card
                .photo
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            FormField::Stat(idx) => {
                let Some(key) = self.state.stat_key(idx) else {
                    return;
                };
                self.state
                    .card
                    .stats
                    .get(key)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }
        };
        self.state.editing = Some(EditBuffer { field, input });
    }

    fn commit_edit(&mut self) {
        let Some(buf) = self.state.editing.take() else {
            return;
        };
        match buf.field {
            FormField::Sport | FormField::Theme => {}
            FormField::Name => self.state.card.name = buf.input,
            FormField::Team => self.state.card.team = buf.input,
            FormField::Photo => self.set_photo(buf.input),
            FormField::Stat(idx) => {
                if let Some(key) = self.state.stat_key(idx) {
                    self.state.card.update_stat(key, &buf.input);
                }
            }
        }
    }

    fn set_photo(&mut self, input: String) {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            // No file selected is a no-op; a previously set photo is cleared.
            if self.state.card.photo.take().is_some() {
                self.state.push_log("[INFO] Photo cleared");
            }
            return;
        }
        let path = std::path::PathBuf::from(trimmed);
        match export::photo_data_uri(&path) {
            Ok(_) => {
                self.state
                    .push_log(format!("[INFO] Photo set: {}", path.display()));
                self.state.card.photo = Some(path);
            }
            Err(err) => self.state.push_log(format!("[WARN] Photo rejected: {err:#}")),
        }
    }

    fn randomize(&mut self) {
        let sport = self.state.card.sport;
        self.state.card.stats = statgen::generate_stats(sport, &mut rand::thread_rng());
        self.state
            .push_log(format!("[INFO] Randomized {} stats", sport.label()));
    }

    fn export_card(&mut self) {
        let photo_uri = match &self.state.card.photo {
            Some(path) => match export::photo_data_uri(path) {
                Ok(uri) => Some(uri),
                Err(err) => {
                    self.state.push_log(format!("[WARN] Photo skipped: {err:#}"));
                    None
                }
            },
            None => None,
        };
        match export::export_card(&self.state.card, photo_uri.as_deref()) {
            Ok(path) => {
                self.state.last_export = Some(path.display().to_string());
                self.state
                    .push_log(format!("[INFO] Exported {}", path.display()));
            }
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }

    fn copy_link(&mut self) {
        match export::copy_share_link(&self.state.card) {
            Ok(link) => {
                self.state.last_share = Some(link.clone());
                self.state
                    .push_log(format!("[INFO] Link copied to clipboard: {link}"));
            }
            Err(err) => {
                self.state
                    .push_log(format!("[WARN] Copy link failed: {err:#}"));
                // Still surface the link so it can be copied by hand.
                if let Ok(link) = share::share_url(&self.state.card) {
                    self.state.push_log(format!("[INFO] Share link: {link}"));
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut app = App::new();
    hydrate_from_args(&mut app.state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

/// One-shot hydration from a share link passed as the CLI argument. Decode
/// failures keep the defaults and leave a console diagnostic; the link is
/// never re-read after startup.
fn hydrate_from_args(state: &mut AppState) {
    let Some(arg) = env::args().nth(1) else {
        return;
    };
    let Some(raw) = share::extract_data_param(&arg) else {
        state.push_log("[WARN] Share link has no data parameter");
        return;
    };
    let payload = match share::decode(&raw) {
        Ok(payload) => payload,
        Err(err) => {
            state.push_log(format!("[WARN] Failed to parse shared data: {err:#}"));
            return;
        }
    };
    match payload.version {
        Some(v) if v == share::PAYLOAD_VERSION => {}
        Some(v) => state.push_log(format!(
            "[WARN] Share payload version {v}, expected {}; loading best-effort",
            share::PAYLOAD_VERSION
        )),
        None => state.push_log("[WARN] Untagged share payload, assuming legacy schema"),
    }
    match share::apply_share(&mut state.card, &payload) {
        Ok(()) => state.push_log("[INFO] Loaded card from share link"),
        Err(err) => state.push_log(format!("[WARN] Failed to parse shared data: {err:#}")),
    }
    state.clamp_focus();
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(
        env::var("TICK_MILLIS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50),
    );

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(40)])
        .split(chunks[1]);

    render_form(frame, body[0], &app.state);
    render_preview(frame, body[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!(
        "  __   COUCH STATS | {} | {}",
        state.card.sport.label(),
        state.card.theme.label()
    );
    let line2 = " (__)___".to_string();
    let line3 = " |_____|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.editing.is_some() {
        "Enter Commit | Esc Cancel | Backspace Delete".to_string()
    } else {
        "j/k/↑/↓ Move | h/l/←/→ Cycle | Enter Edit | r Randomize | x Export PNG | c Copy Link | ? Help | q Quit"
            .to_string()
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Card Form").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = state.form_fields();
    let mut lines: Vec<Line> = Vec::with_capacity(fields.len());
    for (idx, field) in fields.iter().enumerate() {
        let focused = idx == state.focus;
        let (label, value) = field_display(state, *field);
        let value = match &state.editing {
            Some(buf) if buf.field == *field => format!("{}▏", buf.input),
            _ => value,
        };
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("{prefix}{label:<10} {value}"), style));
    }

    let form = Paragraph::new(lines);
    frame.render_widget(form, inner);
}

fn field_display(state: &AppState, field: FormField) -> (String, String) {
    match field {
        FormField::Sport => ("Sport".to_string(), state.card.sport.label().to_string()),
        FormField::Theme => ("Theme".to_string(), state.card.theme.label().to_string()),
        FormField::Name => ("Name".to_string(), state.card.name.clone()),
        FormField::Team => ("Team".to_string(), state.card.team.clone()),
        FormField::Photo => (
            "Photo".to_string(),
            state
                .card
                .photo
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
        ),
        FormField::Stat(idx) => {
            let key = state.stat_key(idx).unwrap_or("?");
            let value = state
                .card
                .stats
                .get(key)
                .map(|v| v.to_string())
                .unwrap_or_default();
            (key.to_uppercase(), value)
        }
    }
}

fn render_preview(frame: &mut Frame, area: Rect, state: &AppState) {
    let accent = accent_color(state.card.theme);
    let block = Block::default()
        .title("Preview")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let card = &state.card;
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::styled(
        format!(" {}", card.name),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(
        format!(" {} · {}", card.team, card.sport.tag().to_uppercase()),
        Style::default().fg(Color::DarkGray),
    ));
    let photo_line = match &card.photo {
        Some(path) => format!(" [photo] {}", path.display()),
        None => " [no photo]".to_string(),
    };
    lines.push(Line::styled(
        photo_line,
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::raw(""));

    for (key, value) in card.stats.entries() {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<10}", key.to_uppercase()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " For entertainment only - Couch Stats",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ));

    let preview = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(preview, inner);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Espn => Color::Rgb(204, 0, 0),
        Theme::EspnFantasy => Color::Rgb(0, 132, 61),
        Theme::Yahoo => Color::Rgb(96, 1, 210),
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Couch Stats - Help",
        "",
        "Form:",
        "  j/k or ↑/↓   Move between fields",
        "  h/l or ←/→   Cycle sport/theme",
        "  Enter        Edit the focused field",
        "  Esc          Cancel an edit",
        "",
        "Card:",
        "  r            Randomize stats",
        "  x            Export PNG (2x, transparent)",
        "  c            Copy share link",
        "",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Tip: start with a share link argument to load a card:",
        "  couch_stats 'https://couchstats.app/card?data=...'",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
