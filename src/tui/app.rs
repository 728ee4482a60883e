use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tracing::{error, info, warn};

use super::dashboard::confirmbox::show_remove_folder_box;
use super::dashboard::detailbox::show_detail_box;
use super::dashboard::folder_form_state::FolderFormState;
use super::dashboard::helpbox::get_help_box_content;
use super::dashboard::listitems::get_item_list;
use super::dashboard::picker_state::{PaletteState, PickerState};
use super::dashboard::pickerbox::{show_folder_form, show_palette_box, show_picker_box};
use super::functions::{build_rows, row_card, row_kind, Row};
use super::terminal::{self, Term};
use super::theme::{self, Theme};
use crate::config::io::SettingsStore;
use crate::dashboard::{dispatch, Dashboard, Message, OpenRequest, Outcome};
use crate::discovery::{discover_all, DiscoveryOptions};
use crate::error::{DashboardError, Result};
use crate::filter::quick_match;
use crate::models::{DiscoveredHosts, Host, HostKind};
use crate::remote::{self, RemoteContext};
use crate::settings::reconcile;

pub enum Mode {
    Normal,
    /// typing a filter; hotkeys disabled
    Filter,
    Picker(PickerState),
    SectionColor(PaletteState),
    AddFolder(FolderFormState),
    ConfirmRemove { host: String, folder: String, button: usize },
}

/// Side effects the event loop performs outside of the app state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Open(OpenRequest),
    Edit(PathBuf),
    Rediscover,
    Quit,
}

pub struct App {
    pub store: SettingsStore,
    pub discovered: DiscoveredHosts,
    pub dashboard: Dashboard,
    pub context: RemoteContext,
    pub rows: Vec<Row>,
    pub list_state: ListState,
    pub folder_cursor: usize,
    pub filter: String,
    pub mode: Mode,
    pub status: Option<String>,
    pub theme: Theme,
    viewport_h: usize,
}

impl App {
    pub fn new(store: SettingsStore, discovered: DiscoveredHosts, context: RemoteContext, theme: Theme) -> Self {
        let dashboard = Dashboard::build(&discovered, &store.settings, context);
        let mut app = App {
            store,
            discovered,
            dashboard,
            context,
            rows: Vec::new(),
            list_state: ListState::default(),
            folder_cursor: 0,
            filter: String::new(),
            mode: Mode::Normal,
            status: None,
            theme,
            viewport_h: 10,
        };
        app.refresh_view();
        app
    }

    /// Rebuild the view model and rows from the store; keeps the selection
    /// in range.
    pub fn refresh_view(&mut self) {
        self.dashboard = Dashboard::build(&self.discovered, &self.store.settings, self.context);
        let hosts: Vec<&Host> = self.discovered.iter().collect();
        self.rows = build_rows(&self.dashboard, &hosts, &self.filter, quick_match);
        let selected = match (self.rows.len(), self.list_state.selected()) {
            (0, _) => None,
            (n, Some(i)) => Some(i.min(n - 1)),
            (_, None) => Some(0),
        };
        self.list_state.select(selected);
    }

    /// Discover again, add new hosts to the store, and redraw.
    pub fn rediscover(&mut self, opts: DiscoveryOptions) {
        self.store.reload();
        self.discovered = discover_all(&self.store.settings, opts);
        let added = reconcile(&mut self.store.settings, &self.discovered);
        if !added.is_empty() {
            if let Err(e) = self.store.save() {
                warn!(error = %e, "failed to save reconciled settings");
            }
        }
        self.status = Some(format!("{} hosts discovered, {} new", self.discovered.len(), added.len()));
        self.refresh_view();
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.list_state.selected().and_then(|i| self.rows.get(i).copied())
    }

    fn selected_kind(&self) -> Option<HostKind> {
        self.selected_row().and_then(|r| row_kind(&self.dashboard, &r))
    }

    /// (kind, host, folder) that Enter would open.
    pub fn selected_target(&self) -> Option<(HostKind, String, String)> {
        let row = self.selected_row()?;
        let card = row_card(&self.dashboard, &row)?;
        let folder = match row {
            Row::Folder(_, _, f) => card.folders.get(f)?,
            _ => card.folders.get(self.folder_cursor.min(card.folders.len().saturating_sub(1)))?,
        };
        Some((card.kind, card.name.clone(), folder.clone()))
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.rows.len() as isize - 1);
        self.list_state.select(Some(next as usize));
        self.folder_cursor = 0;
    }

    fn move_folder_cursor(&mut self, delta: isize) {
        let Some(row @ Row::Card(..)) = self.selected_row() else { return; };
        let Some(card) = row_card(&self.dashboard, &row) else { return; };
        let max = card.folders.len().saturating_sub(1) as isize;
        self.folder_cursor = (self.folder_cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Apply a message and turn its outcome into a redraw, a popup or an effect.
    pub fn send(&mut self, message: Message) -> Option<Effect> {
        match dispatch(message, &mut self.store, &self.discovered) {
            Ok(Outcome::Render) => {
                self.refresh_view();
                None
            }
            Ok(Outcome::Rediscover) => Some(Effect::Rediscover),
            Ok(Outcome::Open(req)) => Some(Effect::Open(req)),
            Ok(Outcome::Edit(path)) => Some(Effect::Edit(path)),
            Ok(Outcome::Reply(reply)) => {
                let kind = reply.host_type.unwrap_or(HostKind::Ssh);
                self.mode = Mode::Picker(PickerState::new(&reply.host, kind, &reply.current_icon, &reply.current_color));
                None
            }
            Ok(Outcome::Ignored(reason)) => {
                self.status = Some(reason);
                None
            }
            Err(e) => {
                self.status = Some(e.to_string());
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Effect::Quit);
        }
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.handle_normal(key),
            Mode::Filter => {
                self.handle_filter(key);
                None
            }
            Mode::Picker(state) => self.handle_picker(key, state),
            Mode::SectionColor(state) => self.handle_palette(key, state),
            Mode::AddFolder(form) => self.handle_folder_form(key, form),
            Mode::ConfirmRemove { host, folder, button } => self.handle_confirm(key, host, folder, button),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) -> Option<Effect> {
        self.status = None;
        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(self.viewport_h as isize)),
            KeyCode::PageDown => self.move_selection(self.viewport_h as isize),
            KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Left => self.move_folder_cursor(-1),
            KeyCode::Right => self.move_folder_cursor(1),
            KeyCode::Esc if !self.filter.is_empty() => {
                self.filter.clear();
                self.refresh_view();
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Effect::Quit),
            KeyCode::Enter => match self.selected_row() {
                Some(Row::Section(kind)) => return self.toggle_collapse(kind),
                Some(_) => return self.open_selected(false),
                None => {}
            },
            KeyCode::Char('o') => return self.open_selected(true),
            KeyCode::Char('c') => {
                if let Some(kind) = self.selected_kind() {
                    return self.toggle_collapse(kind);
                }
            }
            KeyCode::Char('l') => {
                let layout = self.store.settings.layout.toggled();
                return self.send(Message::UpdateLayout { layout });
            }
            KeyCode::Char('i') => {
                let card = self.selected_row().and_then(|r| row_card(&self.dashboard, &r).cloned());
                match card {
                    Some(card) if card.customizable() => {
                        return self.send(Message::GetHostSettings { host: card.name, host_type: Some(card.kind) });
                    }
                    Some(_) => self.status = Some("Docker containers use a fixed icon".to_string()),
                    None => {}
                }
            }
            KeyCode::Char('s') => {
                if let Some(kind) = self.selected_kind() {
                    self.mode = Mode::SectionColor(PaletteState::new(kind, self.store.settings.section_color(kind)));
                }
            }
            KeyCode::Char('a') => {
                let card = self.selected_row().and_then(|r| row_card(&self.dashboard, &r).cloned());
                match card {
                    Some(card) if card.customizable() => self.mode = Mode::AddFolder(FolderFormState::new(&card.name)),
                    Some(_) => self.status = Some("Docker containers always open at /".to_string()),
                    None => {}
                }
            }
            KeyCode::Char('x') => match self.selected_target() {
                Some((HostKind::Docker, _, _)) => self.status = Some("Docker containers always open at /".to_string()),
                Some((_, host, folder)) => self.mode = Mode::ConfirmRemove { host, folder, button: 1 },
                None => {}
            },
            KeyCode::Char('e') => return self.send(Message::OpenSettings),
            KeyCode::Char('E') => return self.send(Message::OpenSshConfig),
            KeyCode::Char('r') => return self.send(Message::Refresh),
            KeyCode::Char('/') => {
                self.mode = Mode::Filter;
                self.filter.clear();
                self.refresh_view();
            }
            _ => {}
        }
        None
    }

    fn handle_filter(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.filter.clear(),
            KeyCode::Enter => {}
            KeyCode::Backspace => {
                self.filter.pop();
                self.mode = Mode::Filter;
            }
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.mode = Mode::Filter;
            }
            _ => self.mode = Mode::Filter,
        }
        self.list_state.select(Some(0));
        self.folder_cursor = 0;
        self.refresh_view();
    }

    fn handle_picker(&mut self, key: KeyEvent, mut state: PickerState) -> Option<Effect> {
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Enter => {
                return self.send(Message::UpdateHostIcon {
                    icon: state.icon(),
                    color: state.color().to_string(),
                    host: state.host,
                    host_type: Some(state.kind),
                });
            }
            KeyCode::Tab | KeyCode::BackTab => state.toggle_focus(),
            KeyCode::Left => state.move_by(-1, 0),
            KeyCode::Right => state.move_by(1, 0),
            KeyCode::Up => state.move_by(0, -1),
            KeyCode::Down => state.move_by(0, 1),
            _ => {}
        }
        self.mode = Mode::Picker(state);
        None
    }

    fn handle_palette(&mut self, key: KeyEvent, mut state: PaletteState) -> Option<Effect> {
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Enter => {
                return self.send(Message::UpdateSectionColor {
                    section: state.kind.to_string(),
                    color: state.color().to_string(),
                });
            }
            KeyCode::Left => state.move_by(-1, 0),
            KeyCode::Right => state.move_by(1, 0),
            KeyCode::Up => state.move_by(0, -1),
            KeyCode::Down => state.move_by(0, 1),
            _ => {}
        }
        self.mode = Mode::SectionColor(state);
        None
    }

    fn handle_folder_form(&mut self, key: KeyEvent, mut form: FolderFormState) -> Option<Effect> {
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Enter => match form.validated() {
                Ok(folder) => return self.send(Message::AddFolder { host: form.host, folder }),
                Err(e) => form.error = Some(e),
            },
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
        self.mode = Mode::AddFolder(form);
        None
    }

    fn handle_confirm(&mut self, key: KeyEvent, host: String, folder: String, button: usize) -> Option<Effect> {
        let button = match key.code {
            KeyCode::Esc | KeyCode::Char('n') => return None,
            KeyCode::Char('y') => 0,
            KeyCode::Enter => button,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.mode = Mode::ConfirmRemove { host, folder, button: 1 - button };
                return None;
            }
            _ => {
                self.mode = Mode::ConfirmRemove { host, folder, button };
                return None;
            }
        };
        if button == 0 {
            self.folder_cursor = 0;
            return self.send(Message::RemoveFolder { host, folder });
        }
        None
    }

    fn toggle_collapse(&mut self, kind: HostKind) -> Option<Effect> {
        let collapsed = !self.store.settings.section_collapsed(kind);
        let effect = self.send(Message::UpdateSectionCollapsed { section: kind.to_string(), collapsed });
        // keep the cursor on the section header
        if let Some(i) = self.rows.iter().position(|r| *r == Row::Section(kind)) {
            self.list_state.select(Some(i));
        }
        effect
    }

    fn open_selected(&mut self, new_window: bool) -> Option<Effect> {
        let (kind, host, folder) = self.selected_target()?;
        self.send(Message::OpenFolder { host, folder, new_window, host_type: kind })
    }

    fn draw(&mut self, f: &mut Frame) {
        let size = f.area();
        let theme = &self.theme;
        f.render_widget(Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)), size);

        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(4)])
            .split(size);
        let hchunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(vchunks[0]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(hchunks[0]);

        // Filter bar
        let filter_label = if matches!(self.mode, Mode::Filter) {
            format!("{}|", self.filter)
        } else if self.filter.is_empty() {
            "(press '/' to start)".to_string()
        } else {
            self.filter.clone()
        };
        let filter_para = Paragraph::new(Line::from(vec![
            Span::styled("Filter ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(filter_label),
        ]))
        .block(
            Block::default()
                .title("Filter")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        );
        f.render_widget(filter_para, left[0]);

        // Host list
        let list_area = left[1];
        self.viewport_h = (list_area.height.saturating_sub(2) as usize).max(1);
        let mut title = format!("DaSSHboard · {} hosts · {:?}", self.dashboard.total(), self.dashboard.layout);
        if self.context != RemoteContext::Local {
            title.push_str(&format!(" · inside {}", self.context.label()));
        }
        let items = get_item_list(&self.dashboard, &self.rows, self.list_state.selected(), self.folder_cursor, theme);
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent)),
            )
            .highlight_symbol("➜ ")
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, list_area, &mut self.list_state);

        let selected = self.list_state.selected().unwrap_or(0);
        let mut sb_state = ScrollbarState::new(self.rows.len().max(1)).position(selected);
        f.render_stateful_widget(Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight), list_area, &mut sb_state);

        let row = self.selected_row();
        show_detail_box(row.as_ref(), &self.dashboard, &self.discovered, f, hchunks[1], theme);

        let help = get_help_box_content(row.as_ref(), self.selected_kind(), self.status.as_deref(), theme);
        f.render_widget(help, vchunks[1]);

        match &self.mode {
            Mode::Picker(state) => show_picker_box(state, f, size, theme),
            Mode::SectionColor(state) => show_palette_box(state, f, size, theme),
            Mode::AddFolder(form) => show_folder_form(form, f, size, theme),
            Mode::ConfirmRemove { host, folder, button } => show_remove_folder_box(host, folder, *button, f, size, theme),
            Mode::Normal | Mode::Filter => {}
        }
    }
}

/// Run the dashboard until the user quits.
pub fn run_tui(store: SettingsStore, discovered: DiscoveredHosts, opts: DiscoveryOptions) -> Result<()> {
    let context = remote::detect_remote_context();
    let mut app = App::new(store, discovered, context, theme::load());
    let mut terminal = terminal::setup()?;
    let result = event_loop(&mut terminal, &mut app, opts);
    terminal::restore();
    result
}

fn event_loop(terminal: &mut Term, app: &mut App, opts: DiscoveryOptions) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f)).map_err(|e| DashboardError::Terminal(e.to_string()))?;

        if !event::poll(Duration::from_millis(150)).map_err(|e| DashboardError::Terminal(e.to_string()))? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(|e| DashboardError::Terminal(e.to_string()))? else {
            continue;
        };
        match app.handle_key(key) {
            None => {}
            Some(Effect::Quit) => return Ok(()),
            Some(Effect::Rediscover) => {
                app.status = Some("Discovering hosts...".to_string());
                terminal.draw(|f| app.draw(f)).map_err(|e| DashboardError::Terminal(e.to_string()))?;
                app.rediscover(opts);
            }
            Some(Effect::Open(req)) => {
                let editor = app.store.settings.editor_command.clone();
                match remote::open_folder(&editor, req.kind, &req.host, &req.folder, req.new_window) {
                    Ok(()) => app.status = Some(format!("Opened {}:{}", req.host, req.folder)),
                    Err(e) => {
                        error!(error = %e, "failed to open folder");
                        app.status = Some(e.to_string());
                    }
                }
            }
            Some(Effect::Edit(path)) => {
                let editor = remote::local_editor(&app.store.settings.editor_command);
                let edited = terminal::suspended(terminal, || remote::edit_file(&editor, &path));
                match edited {
                    Ok(()) => {
                        info!(path = %path.display(), "file edited, reloading");
                        app.rediscover(opts);
                    }
                    Err(e) => app.status = Some(e.to_string()),
                }
            }
        }
    }
}
