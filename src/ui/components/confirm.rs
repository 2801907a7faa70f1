use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Modal yes/no gate holding the value it guards.
///
/// While active it swallows every key; only `y` releases the value.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<T> {
  pending: Option<(String, T)>,
}

impl<T> Default for ConfirmDialog<T> {
  fn default() -> Self {
    Self { pending: None }
  }
}

impl<T> ConfirmDialog<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.pending.is_some()
  }

  /// Ask `question`, holding `value` until answered
  pub fn ask(&mut self, question: String, value: T) {
    self.pending = Some((question, value));
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<T> {
    if !self.is_active() {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => match self.pending.take() {
        Some((_, value)) => KeyResult::Event(value),
        None => KeyResult::Handled,
      },
      KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
        self.pending = None;
        KeyResult::Handled
      }
      _ => KeyResult::Handled,
    }
  }

  /// Render the dialog overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let Some((question, _)) = &self.pending else {
      return;
    };

    let width = (question.chars().count() as u16 + 4)
      .max(30)
      .min(area.width.saturating_sub(4));
    let height = 4.min(area.height);

    // Center the overlay
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Red))
      .title(" Confirm ");

    let text = vec![
      Line::from(question.as_str()),
      Line::from(vec![
        Span::styled("<y>", Style::default().fg(Color::Cyan)),
        Span::styled(" yes   ", Style::default().fg(Color::DarkGray)),
        Span::styled("<n>", Style::default().fg(Color::Cyan)),
        Span::styled(" no", Style::default().fg(Color::DarkGray)),
      ]),
    ];

    let paragraph = Paragraph::new(text)
      .block(block)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, overlay_area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_yes_releases_value() {
    let mut dialog = ConfirmDialog::new();
    dialog.ask("Delete Widget?".to_string(), 7);

    assert_eq!(dialog.handle_key(key(KeyCode::Char('j'))), KeyResult::Handled);
    assert!(dialog.is_active());
    assert_eq!(dialog.handle_key(key(KeyCode::Char('y'))), KeyResult::Event(7));
    assert!(!dialog.is_active());
  }

  #[test]
  fn test_decline_drops_value() {
    let mut dialog = ConfirmDialog::new();
    dialog.ask("Delete Widget?".to_string(), 7);

    assert_eq!(dialog.handle_key(key(KeyCode::Esc)), KeyResult::Handled);
    assert!(!dialog.is_active());
    assert_eq!(
      dialog.handle_key(key(KeyCode::Char('y'))),
      KeyResult::NotHandled
    );
  }
}
