use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the footer bar with key hints for the focused pane
pub fn draw_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
  let mut spans = vec![Span::raw(" ")];

  for (i, (key, label)) in hints.iter().enumerate() {
    if i > 0 {
      spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(
      format!("<{}>", key),
      Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
      format!(" {}", label),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}
