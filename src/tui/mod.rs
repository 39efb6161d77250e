//! Ratatui-based terminal console.
//!
//! One tab per QA check: a field list on the left (select-and-edit), the
//! check's result panel on the right. Panels stay hidden until the first
//! successful calculation and never hide again. The submission itself runs
//! inline in the key handler; the status line announces it first.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Terminal,
};

use crate::cli::TuiArgs;
use crate::data::QaClient;
use crate::domain::{AppSettings, FormSpec, PASS_LABEL, registry};
use crate::error::AppError;
use crate::io::export::export_results;
use crate::io::prefs::{Preferences, load_settings, store_dark_mode};
use crate::render::ResultPanel;

pub mod theme;

use theme::Theme;

/// Start the console.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    client: QaClient,
    export_dir: PathBuf,
    prefs: Preferences,
    settings: AppSettings,
    theme: Theme,
    tab: usize,
    selected_field: usize,
    editing: bool,
    edit_buffer: String,
    status: String,
    /// Raw field text per check, keyed by field key.
    inputs: Vec<HashMap<String, String>>,
    /// Result panel per check.
    panels: Vec<ResultPanel>,
}

impl App {
    fn new(args: TuiArgs) -> Result<Self, AppError> {
        let client = QaClient::from_env(args.base_url);
        let prefs_path = args.prefs.unwrap_or_else(Preferences::default_path);
        let mut prefs = Preferences::load(prefs_path)?;
        let settings = load_settings(&mut prefs)?;

        let n = registry().len();
        Ok(Self {
            status: format!("Backend: {}", client.base_url()),
            client,
            export_dir: args.export_dir,
            prefs,
            settings,
            theme: Theme::of(settings),
            tab: 0,
            selected_field: 0,
            editing: false,
            edit_buffer: String::new(),
            inputs: vec![HashMap::new(); n],
            panels: vec![ResultPanel::new(); n],
        })
    }

    fn spec(&self) -> &'static FormSpec {
        &registry()[self.tab]
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.editing {
            return self.handle_field_edit(code);
        }

        let checks = registry().len();
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab | KeyCode::Right => {
                self.tab = (self.tab + 1) % checks;
                self.selected_field = 0;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.tab = (self.tab + checks - 1) % checks;
                self.selected_field = 0;
            }
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < self.spec().fields.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Enter => {
                let field = &self.spec().fields[self.selected_field];
                self.edit_buffer = self.inputs[self.tab]
                    .get(field.key)
                    .cloned()
                    .unwrap_or_default();
                self.editing = true;
                self.status = format!("Editing {} (Enter applies, Esc cancels).", field.label);
            }
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('t') => self.toggle_theme()?,
            _ => {}
        }

        Ok(false)
    }

    fn handle_field_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                let field = &self.spec().fields[self.selected_field];
                self.inputs[self.tab].insert(field.key.to_string(), self.edit_buffer.clone());
                self.status = format!("{} = {}", field.label, self.edit_buffer);
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    self.edit_buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn submit(&mut self) {
        let spec = self.spec();
        self.status = format!("Submitting {}...", spec.kind.id());

        // Blocking call; on failure the panel keeps its previous results and
        // the status line carries the one generic notification.
        match crate::app::pipeline::submit_check(
            &self.client,
            spec,
            &self.inputs[self.tab],
            &mut self.panels[self.tab],
        ) {
            Ok(()) => self.status = format!("{} calculated.", spec.title()),
            Err(err) => self.status = format!("Error: {err}"),
        }
    }

    fn export(&mut self) {
        let spec = self.spec();
        match export_results(spec, &self.panels[self.tab], &self.export_dir) {
            Ok(path) => self.status = format!("Exported {}", path.display()),
            Err(err) => self.status = format!("Error: {err}"),
        }
    }

    fn toggle_theme(&mut self) -> Result<(), AppError> {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.theme = Theme::of(self.settings);
        store_dark_mode(&mut self.prefs, self.settings.dark_mode)?;
        self.status = format!(
            "Theme: {}.",
            if self.settings.dark_mode { "dark" } else { "light" }
        );
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg).fg(self.theme.fg)),
            size,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_tabs(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = registry()
            .iter()
            .map(|s| Line::from(s.title()))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.tab)
            .style(Style::default().fg(self.theme.dim))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title(Span::styled("linqa", Style::default().fg(self.theme.accent)))
                    .borders(Borders::ALL),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_inputs(frame, chunks[0]);
        self.draw_results(frame, chunks[1]);
    }

    fn draw_inputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec = self.spec();
        let values = &self.inputs[self.tab];

        let items: Vec<ListItem> = spec
            .fields
            .iter()
            .map(|f| {
                let value = values.get(f.key).map(String::as_str).unwrap_or("");
                ListItem::new(format!("{:<28} {}", f.label, value))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .fg(self.theme.highlight_fg)
                    .bg(self.theme.highlight_bg),
            )
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing {
            let field = &spec.fields[self.selected_field];
            let hint = Paragraph::new(format!("{}: {}_", field.label, self.edit_buffer))
                .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec = self.spec();
        let panel = &self.panels[self.tab];

        let block = Block::default().title("Results").borders(Borders::ALL);

        if !panel.is_visible() {
            let msg = Paragraph::new("No results yet — press s to calculate.")
                .style(Style::default().fg(self.theme.dim))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for rf in spec.results {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<24} ", rf.label), Style::default().fg(self.theme.dim)),
                Span::raw(panel.get(rf.field_id).to_string()),
            ]));
        }

        if let Some(status_id) = spec.pass_fail {
            let verdict = panel.get(status_id);
            let color = if verdict == PASS_LABEL {
                self.theme.pass
            } else {
                self.theme.fail
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<24} ", "Status"), Style::default().fg(self.theme.dim)),
                Span::styled(
                    verdict.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = format!(
            "←/→ check  ↑/↓ field  Enter edit  s submit  x export  t {}  q quit",
            theme::toggle_label(self.settings)
        );
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(self.theme.dim)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(self.theme.accent)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
