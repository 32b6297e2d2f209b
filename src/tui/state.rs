//! Interactive application state
//!
//! All model data is owned here; the list widgets address it by index
//! only, so deletions can never leave a dangling reference behind. One
//! key event is processed at a time and every mutation is followed by a
//! fire-and-forget save.

use crate::preset::PresetSet;
use crate::store::{ConfigData, ConfigStore};
use crate::utils::is_http_url;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::warn;

/// Which screen owns the keyboard. Transitions are handled exhaustively
/// so a new screen cannot be silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Url,
    Presets,
    EditPreset,
    AddOption,
    NewPreset,
}

/// Focus inside the add-option form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOptionFocus {
    Flag,
    Comment,
}

/// Work the event loop must run outside the draw cycle, with the
/// terminal handed back to the shell.
#[derive(Debug, Clone)]
pub enum PendingAction {
    Download { url: String },
}

pub struct App {
    pub view: View,
    pub should_quit: bool,
    pub pending: Option<PendingAction>,

    // model
    pub presets: PresetSet,
    pub url_history: Vec<String>,
    pub name_history: Vec<String>,
    pub store: ConfigStore,
    pub extra_args: Vec<String>,

    // url screen
    pub url_input: String,
    pub current_url: String,
    pub history_cursor: Option<usize>,

    // presets screen
    pub preset_list: ListState,

    // edit screen
    pub edit_index: usize,
    pub option_list: ListState,

    // add-option form
    pub flag_input: String,
    pub comment_input: String,
    pub add_focus: AddOptionFocus,

    // new-preset prompt
    pub name_input: String,

    pub show_help: bool,
    pub status: Option<String>,
}

impl App {
    /// Loads persisted state from the store, falling back to built-in
    /// defaults when nothing is saved or the file is unreadable.
    pub fn new(store: ConfigStore, extra_args: Vec<String>) -> Self {
        let loaded = store.load().unwrap_or_else(|e| {
            warn!("failed to load config: {e}, starting from defaults");
            ConfigData::default()
        });
        let presets = PresetSet::from_loaded(loaded.presets);

        let mut preset_list = ListState::default();
        preset_list.select(Some(0));

        Self {
            view: View::Url,
            should_quit: false,
            pending: None,
            presets,
            url_history: loaded.history.urls,
            name_history: loaded.history.names,
            store,
            extra_args,
            url_input: String::new(),
            current_url: String::new(),
            history_cursor: None,
            preset_list,
            edit_index: 0,
            option_list: ListState::default(),
            flag_input: String::new(),
            comment_input: String::new(),
            add_focus: AddOptionFocus::Flag,
            name_input: String::new(),
            show_help: false,
            status: None,
        }
    }

    pub fn autosave(&self) {
        self.store
            .autosave(&self.url_history, &self.name_history, self.presets.presets());
    }

    /// Appends a finished download to the history and persists it.
    pub fn record_download(&mut self, url: &str, name: &str) {
        self.url_history.push(url.to_string());
        self.name_history.push(name.to_string());
        self.history_cursor = None;
        self.status = Some(format!("Downloaded: {name}"));
        self.autosave();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.view {
            View::Url => self.handle_url_key(key),
            View::Presets => self.handle_presets_key(key),
            View::EditPreset => self.handle_edit_key(key),
            View::AddOption => self.handle_add_option_key(key),
            View::NewPreset => self.handle_new_preset_key(key),
        }
    }

    fn handle_url_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.view = View::Presets,
            KeyCode::Enter => self.submit_url(),
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.url_input.clear();
                self.current_url.clear();
                self.history_cursor = None;
            }
            KeyCode::Backspace => {
                self.url_input.pop();
                self.history_cursor = None;
            }
            KeyCode::Char(c) => {
                self.url_input.push(c);
                self.history_cursor = None;
            }
            _ => {}
        }
    }

    fn submit_url(&mut self) {
        if self.url_input.is_empty() {
            return;
        }
        self.current_url = self.url_input.clone();
        if is_http_url(&self.current_url) {
            self.status = None;
            self.pending = Some(PendingAction::Download {
                url: self.current_url.clone(),
            });
        } else {
            self.status = Some(format!("Not a valid URL: {}", self.current_url));
        }
    }

    /// Steps the URL input back through the history, newest entry first.
    fn recall_older(&mut self) {
        if self.url_history.is_empty() {
            return;
        }
        let cursor = match self.history_cursor {
            None => self.url_history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_cursor = Some(cursor);
        self.url_input = self.url_history[cursor].clone();
    }

    fn recall_newer(&mut self) {
        let Some(cursor) = self.history_cursor else {
            return;
        };
        if cursor + 1 < self.url_history.len() {
            self.history_cursor = Some(cursor + 1);
            self.url_input = self.url_history[cursor + 1].clone();
        } else {
            self.history_cursor = None;
            self.url_input.clear();
        }
    }

    fn handle_presets_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::Url,
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.preset_list, self.presets.len(), -1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.preset_list, self.presets.len(), 1);
            }
            KeyCode::Char(' ') => {
                if let Some(index) = self.preset_list.selected() {
                    self.presets.toggle_active(index);
                    self.autosave();
                }
            }
            KeyCode::Char('D') => {
                if let Some(index) = self.preset_list.selected() {
                    if self.presets.delete(index) {
                        clamp_selection(&mut self.preset_list, self.presets.len());
                        self.autosave();
                    } else {
                        self.status = Some("Cannot delete the last preset".to_string());
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.name_input.clear();
                self.view = View::NewPreset;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.presets.reset_all();
                self.preset_list.select(Some(0));
                self.autosave();
            }
            KeyCode::Enter => {
                if let Some(index) = self.preset_list.selected() {
                    if index < self.presets.len() {
                        self.open_editor(index);
                    }
                }
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn open_editor(&mut self, index: usize) {
        self.edit_index = index;
        let count = self.option_count();
        self.option_list
            .select(if count > 0 { Some(0) } else { None });
        self.view = View::EditPreset;
    }

    fn option_count(&self) -> usize {
        self.presets
            .get(self.edit_index)
            .map_or(0, |p| p.options.len())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::Presets,
            KeyCode::Up | KeyCode::Char('k') => {
                let count = self.option_count();
                move_selection(&mut self.option_list, count, -1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.option_count();
                move_selection(&mut self.option_list, count, 1);
            }
            KeyCode::Char(' ') => {
                if let Some(index) = self.option_list.selected() {
                    if let Some(preset) = self.presets.get_mut(self.edit_index) {
                        preset.toggle_option(index);
                        self.autosave();
                    }
                }
            }
            KeyCode::Char('D') => {
                if let Some(index) = self.option_list.selected() {
                    if let Some(preset) = self.presets.get_mut(self.edit_index) {
                        preset.delete_option(index);
                    }
                    let count = self.option_count();
                    clamp_selection(&mut self.option_list, count);
                    self.autosave();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.presets.reset_to_default(self.edit_index) {
                    let count = self.option_count();
                    self.option_list
                        .select(if count > 0 { Some(0) } else { None });
                    self.autosave();
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.flag_input.clear();
                self.comment_input.clear();
                self.add_focus = AddOptionFocus::Flag;
                self.view = View::AddOption;
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn handle_add_option_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::EditPreset,
            KeyCode::Tab | KeyCode::Down => {
                self.add_focus = match self.add_focus {
                    AddOptionFocus::Flag => AddOptionFocus::Comment,
                    AddOptionFocus::Comment => AddOptionFocus::Flag,
                };
            }
            KeyCode::Up => {
                self.add_focus = match self.add_focus {
                    AddOptionFocus::Flag => AddOptionFocus::Comment,
                    AddOptionFocus::Comment => AddOptionFocus::Flag,
                };
            }
            KeyCode::Enter => self.submit_option(),
            KeyCode::Backspace => {
                self.focused_input_mut().pop();
            }
            KeyCode::Char(c) => {
                self.focused_input_mut().push(c);
            }
            _ => {}
        }
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.add_focus {
            AddOptionFocus::Flag => &mut self.flag_input,
            AddOptionFocus::Comment => &mut self.comment_input,
        }
    }

    fn submit_option(&mut self) {
        // an empty flag is a silent no-op, matching the model contract
        let Some(preset) = self.presets.get_mut(self.edit_index) else {
            self.view = View::EditPreset;
            return;
        };
        if preset.add_option(&self.flag_input, &self.comment_input) {
            let count = preset.options.len();
            self.option_list.select(Some(count - 1));
            self.flag_input.clear();
            self.comment_input.clear();
            self.view = View::EditPreset;
            self.autosave();
        }
    }

    fn handle_new_preset_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::Presets,
            KeyCode::Enter => {
                if !self.name_input.is_empty() {
                    let index = self.presets.add(&self.name_input);
                    self.preset_list.select(Some(index));
                    self.name_input.clear();
                    self.autosave();
                    self.open_editor(index);
                }
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                self.name_input.push(c);
            }
            _ => {}
        }
    }
}

fn move_selection(list: &mut ListState, len: usize, delta: i32) {
    if len == 0 {
        list.select(None);
        return;
    }
    let current = list.selected().unwrap_or(0).min(len - 1);
    let next = if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(len - 1)
    };
    list.select(Some(next));
}

fn clamp_selection(list: &mut ListState, len: usize) {
    if len == 0 {
        list.select(None);
    } else if list.selected().map_or(true, |i| i >= len) {
        list.select(Some(len - 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigStore;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::open_at(dir.path()).expect("open");
        (App::new(store, Vec::new()), dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_starts_on_url_view_with_defaults() {
        let (app, _dir) = test_app();
        assert_eq!(app.view, View::Url);
        assert_eq!(app.presets.len(), 3);
    }

    #[test]
    fn test_valid_url_queues_download() {
        let (mut app, _dir) = test_app();
        for c in "https://example.com/v".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.pending, Some(PendingAction::Download { .. })));
    }

    #[test]
    fn test_invalid_url_reports_status() {
        let (mut app, _dir) = test_app();
        for c in "example.com".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.pending.is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_history_recall_newest_first() {
        let (mut app, _dir) = test_app();
        app.url_history = vec!["http://a".into(), "http://b".into()];
        app.name_history = vec!["A".into(), "B".into()];

        press(&mut app, KeyCode::Up);
        assert_eq!(app.url_input, "http://b");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.url_input, "http://a");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.url_input, "http://b");
        press(&mut app, KeyCode::Down);
        assert!(app.url_input.is_empty());
    }

    #[test]
    fn test_delete_last_preset_refused_in_ui() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Presets);

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.presets.len(), 1);
        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.presets.len(), 1);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_add_option_flow() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter); // edit "Defaults"
        assert_eq!(app.view, View::EditPreset);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.view, View::AddOption);
        for c in "--verbose".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "chatty".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.view, View::EditPreset);
        let options = &app.presets.get(0).unwrap().options;
        assert_eq!(options.last().unwrap().flag, "--verbose");
        assert_eq!(options.last().unwrap().comment, "chatty");
    }

    #[test]
    fn test_add_option_empty_flag_stays_put() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));
        let before = app.presets.get(0).unwrap().options.len();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::AddOption);
        assert_eq!(app.presets.get(0).unwrap().options.len(), before);
    }

    #[test]
    fn test_new_preset_flow() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.view, View::NewPreset);
        for c in "Archive".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.view, View::EditPreset);
        assert_eq!(app.presets.len(), 4);
        assert_eq!(app.presets.get(3).unwrap().name, "Archive");
        assert!(!app.presets.get(3).unwrap().active);
    }

    #[test]
    fn test_record_download_keeps_history_parallel() {
        let (mut app, _dir) = test_app();
        app.record_download("http://a", "A");
        app.record_download("http://b", "B");
        assert_eq!(app.url_history.len(), app.name_history.len());
        assert_eq!(app.name_history, vec!["A".to_string(), "B".to_string()]);
    }
}
