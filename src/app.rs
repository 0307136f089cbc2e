//! Application state and event dispatch.
//!
//! Every terminal event is turned into an [`AppEvent`] and routed to the
//! controller that owns the state it touches: shortcuts first, then the
//! search field for text editing.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::Config;
use crate::core::Result;
use crate::dataset::Category;
use crate::filter::{filter, FilteredCategory};
use crate::input::{Action, KeyBinding, Scope, ShortcutId, ShortcutRegistry};
use crate::search::SearchController;
use crate::theme::ThemeController;
use crate::ui;

#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    Key(KeyEvent),
    /// New terminal size (columns, rows).
    Resize(u16, u16),
}

pub struct App<'a> {
    dataset: &'a [Category],
    search: SearchController,
    theme: ThemeController,
    shortcuts: ShortcutRegistry,
    bound: Vec<ShortcutId>,
    focus_hint: String,
    toggle_hint: String,
    quit_hint: String,
    show_footer: bool,
    scroll: usize,
    results_height: usize,
    quit: bool,
}

impl<'a> App<'a> {
    pub fn new(dataset: &'a [Category], theme: ThemeController, config: &Config) -> Result<Self> {
        let mut app = App {
            dataset,
            search: SearchController::new(),
            theme,
            shortcuts: ShortcutRegistry::new(),
            bound: Vec::new(),
            focus_hint: String::new(),
            toggle_hint: String::new(),
            quit_hint: String::new(),
            show_footer: true,
            scroll: 0,
            results_height: 0,
            quit: false,
        };
        app.rebind(config)?;
        Ok(app)
    }

    /// Drops every shortcut this app registered and registers the ones
    /// described by `config`. Safe to call repeatedly.
    pub fn rebind(&mut self, config: &Config) -> Result<()> {
        let bindings = config.keys.bindings()?;
        for id in self.bound.drain(..) {
            self.shortcuts.unregister(id);
        }

        let mut table = vec![
            (bindings.focus_search, Action::FocusSearch, Scope::Global),
            (
                KeyBinding::with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Action::Quit,
                Scope::Global,
            ),
            (bindings.toggle_theme, Action::ToggleTheme, Scope::Sheet),
            (bindings.quit, Action::Quit, Scope::Sheet),
            (KeyBinding::unmodified(KeyCode::Up), Action::ScrollUp, Scope::Global),
            (KeyBinding::unmodified(KeyCode::Down), Action::ScrollDown, Scope::Global),
            (KeyBinding::unmodified(KeyCode::PageUp), Action::PageUp, Scope::Global),
            (KeyBinding::unmodified(KeyCode::PageDown), Action::PageDown, Scope::Global),
            (KeyBinding::unmodified(KeyCode::Char('k')), Action::ScrollUp, Scope::Sheet),
            (KeyBinding::unmodified(KeyCode::Char('j')), Action::ScrollDown, Scope::Sheet),
            (KeyBinding::unmodified(KeyCode::Home), Action::Top, Scope::Sheet),
            (KeyBinding::unmodified(KeyCode::End), Action::Bottom, Scope::Sheet),
            (KeyBinding::unmodified(KeyCode::Char('g')), Action::Top, Scope::Sheet),
            (KeyBinding::unmodified(KeyCode::Char('G')), Action::Bottom, Scope::Sheet),
        ];
        for index in 0..self.dataset.len().min(9) {
            let digit = char::from(b'1' + index as u8);
            table.push((
                KeyBinding::unmodified(KeyCode::Char(digit)),
                Action::JumpTo(index),
                Scope::Sheet,
            ));
        }

        for (binding, action, scope) in table {
            let id = self.shortcuts.register(binding, action, scope);
            self.bound.push(id);
        }
        self.focus_hint = config.keys.focus_search.clone();
        self.toggle_hint = config.keys.toggle_theme.clone();
        self.quit_hint = config.keys.quit.clone();
        self.show_footer = config.ui.show_footer;
        debug!("Registered {} shortcuts", self.bound.len());
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(_, rows) => {
                self.results_height = ui::results_height(rows, self.show_footer);
                self.scroll = self.scroll.min(self.max_scroll());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Shortcuts are resolved before text editing so the focus trigger never
        // reaches the search field as a character.
        if let Some(action) = self.shortcuts.resolve(&key, self.search.is_focused()) {
            self.apply(action);
            return;
        }

        if self.search.is_focused() {
            let before = self.search.query().to_string();
            self.search.handle_key(key);
            if self.search.query() != before {
                self.scroll = 0;
            }
        }
    }

    fn apply(&mut self, action: Action) {
        debug!(?action, "dispatching action");
        match action {
            Action::FocusSearch => self.search.request_focus(),
            Action::ToggleTheme => {
                self.theme.toggle();
            }
            Action::Quit => self.quit = true,
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page()),
            Action::PageDown => self.scroll = (self.scroll + self.page()).min(self.max_scroll()),
            Action::Top => self.scroll = 0,
            Action::Bottom => self.scroll = self.max_scroll(),
            Action::JumpTo(index) => self.jump_to(index),
        }
    }

    /// Scrolls the results so the section of the `index`-th dataset category
    /// is at the top. Nothing moves if that category is filtered out.
    pub fn jump_to(&mut self, index: usize) {
        let Some(target) = self.dataset.get(index) else {
            return;
        };
        let view = self.visible();
        let offset = ui::section_offsets(&view)
            .into_iter()
            .find(|(name, _)| *name == target.name)
            .map(|(_, offset)| offset);
        match offset {
            Some(offset) => self.scroll = offset.min(self.max_scroll()),
            None => debug!("Category {} not in current view", target.name),
        }
    }

    /// The filtered view for the current query.
    pub fn visible(&self) -> Vec<FilteredCategory<'a>> {
        filter(self.dataset, self.search.query())
    }

    fn page(&self) -> usize {
        self.results_height.max(1)
    }

    fn max_scroll(&self) -> usize {
        let total = ui::line_count(&self.visible());
        total.saturating_sub(self.results_height)
    }

    pub fn dataset(&self) -> &'a [Category] {
        self.dataset
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn focus_hint(&self) -> &str {
        &self.focus_hint
    }

    pub fn toggle_hint(&self) -> &str {
        &self.toggle_hint
    }

    pub fn quit_hint(&self) -> &str {
        &self.quit_hint
    }

    pub fn show_footer(&self) -> bool {
        self.show_footer
    }

    pub fn shortcut_count(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
