use crate::catalog::{CatalogController, DraftEditor, Intent, Product, ProductId};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::store::RemoteStore;
use crate::ui;
use crate::ui::components::{ConfirmDialog, KeyResult, ProductForm};
use crate::ui::views::catalog;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  List,
  Form,
}

/// Main application state
pub struct App {
  config: Config,
  api_url: String,

  controller: CatalogController,
  editor: DraftEditor,

  // UI-only state
  form: ProductForm,
  confirm: ConfirmDialog<ProductId>,
  selected: usize,
  focus: Focus,

  should_quit: bool,
}

impl App {
  pub fn new(config: Config, api_url: String, store: Arc<dyn RemoteStore>) -> Self {
    Self {
      config,
      api_url,
      controller: CatalogController::new(store),
      editor: DraftEditor::new(),
      form: ProductForm::new(),
      confirm: ConfirmDialog::new(),
      selected: 0,
      focus: Focus::List,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(100));

    // Initial data load
    self.controller.refresh();

    let result = self.event_loop(&mut terminal, &mut events).await;

    // Cleanup terminal even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key),
        Some(Event::Tick) => self.tick(),
        Some(Event::Resize) => {}
        None => break,
      }
    }
    Ok(())
  }

  /// Apply finished store calls and follow any edit session change
  fn tick(&mut self) {
    if self.controller.poll() {
      self.clamp_selection();
      self.sync_editor();
    }
  }

  fn dispatch(&mut self, intent: Intent) {
    self.controller.dispatch(intent);
    self.sync_editor();
  }

  fn sync_editor(&mut self) {
    let target = self.controller.edit_target();
    if self.editor.sync(target, self.controller.edit_generation()) {
      debug!(editing = self.editor.is_editing(), "draft re-seeded");
      self.form.reload(&self.editor);
      if self.editor.is_editing() {
        self.focus = Focus::Form;
      }
    }
  }

  fn clamp_selection(&mut self) {
    let len = self.controller.products().len();
    if self.selected >= len {
      self.selected = len.saturating_sub(1);
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // The confirmation gate is modal
    match self.confirm.handle_key(key) {
      KeyResult::Event(id) => {
        self.dispatch(Intent::DeleteRequested(id));
        return;
      }
      KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    match self.focus {
      Focus::List => self.handle_list_key(key),
      Focus::Form => self.handle_form_key(key),
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') => {
        self.should_quit = true;
        return;
      }
      KeyCode::Char('j') | KeyCode::Down => {
        self.move_selection(1);
        return;
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.move_selection(-1);
        return;
      }
      KeyCode::Tab => {
        self.focus = Focus::Form;
        return;
      }
      KeyCode::Char('n') => {
        if self.editor.is_editing() {
          self.dispatch(Intent::CancelRequested);
        }
        self.focus = Focus::Form;
        return;
      }
      _ => {}
    }

    let products = self.controller.products();
    match catalog::intent_for_key(key, products, self.selected_index()) {
      Some(Intent::DeleteRequested(id)) => {
        let name = products
          .iter()
          .find(|p| p.id == id)
          .map(|p| p.name.clone())
          .unwrap_or_else(|| id.to_string());
        self.confirm.ask(format!("Delete '{}'? This cannot be undone.", name), id);
      }
      Some(intent) => self.dispatch(intent),
      None => {}
    }
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.focus = Focus::List;
      return;
    }

    match self.form.handle_key(key, &mut self.editor) {
      KeyResult::Event(intent) => {
        if intent == Intent::CancelRequested {
          self.focus = Focus::List;
        }
        self.dispatch(intent);
      }
      KeyResult::Handled | KeyResult::NotHandled => {}
    }
  }

  fn move_selection(&mut self, delta: i32) {
    let len = self.controller.products().len();
    if len > 0 {
      self.selected = (self.selected as i32 + delta).rem_euclid(len as i32) as usize;
    }
  }

  fn selected_index(&self) -> Option<usize> {
    if self.controller.products().is_empty() {
      None
    } else {
      Some(self.selected)
    }
  }

  // Accessors for UI rendering
  pub fn title(&self) -> &str {
    self.config.title()
  }

  pub fn api_url(&self) -> &str {
    &self.api_url
  }

  pub fn controller(&self) -> &CatalogController {
    &self.controller
  }

  pub fn products(&self) -> &[Product] {
    self.controller.products()
  }

  pub fn editor(&self) -> &DraftEditor {
    &self.editor
  }

  pub fn form(&self) -> &ProductForm {
    &self.form
  }

  pub fn confirm(&self) -> &ConfirmDialog<ProductId> {
    &self.confirm
  }

  pub fn focus(&self) -> Focus {
    self.focus
  }

  pub fn selected(&self) -> Option<usize> {
    self.selected_index()
  }
}
