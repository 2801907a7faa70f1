use crate::catalog::Provenance;
use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with title, API host and data source
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: &str,
  api_url: &str,
  provenance: Option<Provenance>,
  refreshed_at: Option<DateTime<Local>>,
) {
  let mut spans = vec![
    Span::styled(format!(" {} ", title), Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", extract_host(api_url)),
      Style::default().fg(Color::White),
    ),
  ];

  if let Some(provenance) = provenance {
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      format!(" Data source: {} ", provenance_badge(provenance)),
      Style::default().fg(provenance_color(provenance)).bold(),
    ));
  }

  if let Some(at) = refreshed_at {
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      format!(" refreshed {} ", at.format("%H:%M:%S")),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

fn provenance_badge(provenance: Provenance) -> String {
  match provenance {
    Provenance::Cache => format!("{} ⚡", provenance.label()),
    Provenance::Primary => provenance.label().to_string(),
  }
}

fn provenance_color(provenance: Provenance) -> Color {
  match provenance {
    Provenance::Cache => Color::Yellow,
    Provenance::Primary => Color::Green,
  }
}

/// Extract host (and port) from the API URL
fn extract_host(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}
