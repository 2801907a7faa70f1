//! Product list.
//!
//! Rendering is a pure function of the product slice; the view never holds
//! product data. Keys map to intents for the controller.

use crate::catalog::{Intent, Product};
use crate::ui::renderfns::truncate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub const EMPTY_MESSAGE: &str = "No products found. Add your first product!";

/// Title with the item count taken from the slice at render time
pub fn title(products: &[Product], loading: bool) -> String {
  if loading {
    " Products (loading...) ".to_string()
  } else {
    format!(" Products ({}) ", products.len())
  }
}

pub fn draw_catalog(
  frame: &mut Frame,
  area: Rect,
  products: &[Product],
  selected: Option<usize>,
  loading: bool,
  focused: bool,
) {
  let border = if focused { Color::Yellow } else { Color::Blue };
  let block = Block::default()
    .title(title(products, loading))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  if products.is_empty() {
    let content = if loading { "Loading products..." } else { EMPTY_MESSAGE };
    let paragraph = Paragraph::new(content)
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = products
    .iter()
    .map(|product| {
      let line = Line::from(vec![
        Span::styled(
          format!("{:<24}", truncate(&product.name, 24)),
          Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
          format!("{:>10}", format!("${}", product.price)),
          Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
          format!("Stock: {:<6}", product.stock),
          stock_style(product.stock),
        ),
        Span::raw(" "),
        Span::styled(
          truncate(&product.description, 60),
          Style::default().fg(Color::Gray),
        ),
      ]);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  let mut state = ListState::default();
  state.select(selected);

  frame.render_stateful_widget(list, area, &mut state);
}

fn stock_style(stock: u32) -> Style {
  if stock == 0 {
    Style::default().fg(Color::Red)
  } else {
    Style::default().fg(Color::Green)
  }
}

/// Map a key on the selected row to an intent
pub fn intent_for_key(key: KeyEvent, products: &[Product], selected: Option<usize>) -> Option<Intent> {
  let item = selected.and_then(|idx| products.get(idx));
  match key.code {
    KeyCode::Char('r') => Some(Intent::RefreshRequested),
    KeyCode::Char('e') | KeyCode::Enter => item.map(|p| Intent::EditRequested(p.clone())),
    KeyCode::Char('d') | KeyCode::Delete => item.map(|p| Intent::DeleteRequested(p.id.clone())),
    _ => None,
  }
}
