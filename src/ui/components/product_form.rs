use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::catalog::{DraftEditor, Field, Intent};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

fn filter_for(field: Field) -> fn(char) -> bool {
  match field {
    Field::Name => |c| Field::Name.accepts(c),
    Field::Description => |c| Field::Description.accepts(c),
    Field::Price => |c| Field::Price.accepts(c),
    Field::Stock => |c| Field::Stock.accepts(c),
  }
}

/// Form over the draft editor.
///
/// Only the focused field has a live [`TextInput`]; every change is pushed to
/// the editor as a single-field update.
#[derive(Debug, Clone)]
pub struct ProductForm {
  focus: Field,
  input: TextInput,
  hint: Option<String>,
}

impl Default for ProductForm {
  fn default() -> Self {
    Self {
      focus: Field::Name,
      input: TextInput::new().with_filter(filter_for(Field::Name)),
      hint: None,
    }
  }
}

impl ProductForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn focus(&self) -> Field {
    self.focus
  }

  /// Constraint message from the last refused submit
  pub fn hint(&self) -> Option<&str> {
    self.hint.as_deref()
  }

  /// Pick up a freshly seeded draft
  pub fn reload(&mut self, editor: &DraftEditor) {
    self.hint = None;
    self.focus_field(Field::Name, editor);
  }

  fn focus_field(&mut self, field: Field, editor: &DraftEditor) {
    self.focus = field;
    self.input = TextInput::new().with_filter(filter_for(field));
    self.input.set_value(editor.draft().get(field));
  }

  /// Handle a key while the form has focus
  pub fn handle_key(&mut self, key: KeyEvent, editor: &mut DraftEditor) -> KeyResult<Intent> {
    match key.code {
      KeyCode::Tab | KeyCode::Down => {
        self.focus_field(self.focus.next(), editor);
        KeyResult::Handled
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus_field(self.focus.prev(), editor);
        KeyResult::Handled
      }
      KeyCode::Enter => match editor.submit() {
        Ok(intent) => {
          self.hint = None;
          KeyResult::Event(intent)
        }
        Err(e) => {
          self.hint = Some(e.to_string());
          KeyResult::Handled
        }
      },
      KeyCode::Esc => {
        let intent = editor.reset();
        self.reload(editor);
        match intent {
          Some(intent) => KeyResult::Event(intent),
          None => KeyResult::Handled,
        }
      }
      _ => match self.input.handle_key(key) {
        InputResult::Changed => {
          self.hint = None;
          editor.set_field(self.focus, self.input.value().to_string());
          KeyResult::Handled
        }
        InputResult::Consumed => KeyResult::Handled,
        InputResult::NotHandled => KeyResult::NotHandled,
      },
    }
  }

  pub fn render(&self, frame: &mut Frame, area: Rect, editor: &DraftEditor, focused: bool) {
    let (title, submit_label, reset_label) = if editor.is_editing() {
      (" Edit Product ", "Update Product", "Cancel")
    } else {
      (" Add New Product ", "Add Product", "Reset")
    };

    let border = if focused { Color::Yellow } else { Color::Blue };
    let block = Block::default()
      .title(title)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border));

    let mut lines = Vec::new();
    for field in Field::ALL {
      let active = focused && field == self.focus();
      let label_style = if active {
        Style::default().fg(Color::Yellow).bold()
      } else {
        Style::default().fg(Color::Gray)
      };
      lines.push(Line::from(Span::styled(
        format!("{} *", field.label()),
        label_style,
      )));

      let value = editor.draft().get(field);
      if active {
        let split = value
          .char_indices()
          .nth(self.input.cursor_position())
          .map(|(i, _)| i)
          .unwrap_or(value.len());
        lines.push(Line::from(vec![
          Span::raw("  "),
          Span::raw(value[..split].to_string()),
          Span::styled("_", Style::default().fg(Color::Yellow)),
          Span::raw(value[split..].to_string()),
        ]));
      } else if value.is_empty() {
        lines.push(Line::from(Span::styled(
          format!("  {}", placeholder(field)),
          Style::default().fg(Color::DarkGray),
        )));
      } else {
        lines.push(Line::from(format!("  {}", value)));
      }
      lines.push(Line::default());
    }

    lines.push(Line::from(vec![
      Span::styled("<Enter>", Style::default().fg(Color::Cyan)),
      Span::styled(format!(" {}   ", submit_label), Style::default().fg(Color::Gray)),
      Span::styled("<Esc>", Style::default().fg(Color::Cyan)),
      Span::styled(format!(" {}", reset_label), Style::default().fg(Color::Gray)),
    ]));

    if let Some(hint) = self.hint() {
      lines.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::Red),
      )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
  }
}

fn placeholder(field: Field) -> &'static str {
  match field {
    Field::Name => "Enter product name",
    Field::Description => "Enter product description",
    Field::Price => "0.00",
    Field::Stock => "0",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::draft::Draft;
  use crate::catalog::{Product, ProductId};
  use crossterm::event::KeyModifiers;
  use rust_decimal::Decimal;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_str(form: &mut ProductForm, editor: &mut DraftEditor, s: &str) {
    for c in s.chars() {
      form.handle_key(key(KeyCode::Char(c)), editor);
    }
  }

  #[test]
  fn test_typing_fills_focused_field_only() {
    let mut editor = DraftEditor::new();
    let mut form = ProductForm::new();

    type_str(&mut form, &mut editor, "Lamp");
    form.handle_key(key(KeyCode::Tab), &mut editor);
    form.handle_key(key(KeyCode::Tab), &mut editor);
    assert_eq!(form.focus(), Field::Price);
    type_str(&mut form, &mut editor, "-12.5x");

    assert_eq!(editor.draft().name, "Lamp");
    assert_eq!(editor.draft().description, "");
    assert_eq!(editor.draft().price, "12.5");
  }

  #[test]
  fn test_enter_with_blank_field_sets_hint() {
    let mut editor = DraftEditor::new();
    let mut form = ProductForm::new();
    type_str(&mut form, &mut editor, "Lamp");

    assert_eq!(
      form.handle_key(key(KeyCode::Enter), &mut editor),
      KeyResult::Handled
    );
    assert_eq!(form.hint(), Some("Description is required"));
  }

  #[test]
  fn test_enter_submits_draft() {
    let mut editor = DraftEditor::new();
    let mut form = ProductForm::new();
    for value in ["A", "B", "1.00", "2"] {
      type_str(&mut form, &mut editor, value);
      form.handle_key(key(KeyCode::Tab), &mut editor);
    }

    let expected = Draft {
      id: None,
      name: "A".to_string(),
      description: "B".to_string(),
      price: "1.00".to_string(),
      stock: "2".to_string(),
    };
    assert_eq!(
      form.handle_key(key(KeyCode::Enter), &mut editor),
      KeyResult::Event(Intent::SaveRequested(expected))
    );
  }

  #[test]
  fn test_esc_cancels_edit_but_only_clears_new() {
    let product = Product {
      id: ProductId::new("7"),
      name: "Widget".to_string(),
      description: "Blue".to_string(),
      price: Decimal::new(95, 1),
      stock: 3,
    };
    let mut editor = DraftEditor::new();
    let mut form = ProductForm::new();
    editor.sync(Some(&product), 1);
    form.reload(&editor);

    assert_eq!(
      form.handle_key(key(KeyCode::Esc), &mut editor),
      KeyResult::Event(Intent::CancelRequested)
    );

    type_str(&mut form, &mut editor, "New");
    assert_eq!(
      form.handle_key(key(KeyCode::Esc), &mut editor),
      KeyResult::Handled
    );
    assert_eq!(editor.draft(), &Draft::empty());
  }
}
