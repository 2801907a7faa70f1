pub mod components;
pub mod renderfns;
pub mod views;

use crate::app::{App, Focus};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let controller = app.controller();
  let error_height = if controller.error().is_some() { 1 } else { 0 };

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),            // Header
      Constraint::Length(error_height), // Error line
      Constraint::Min(1),               // Main content
      Constraint::Length(1),            // Footer
    ])
    .split(frame.area());

  renderfns::draw_header(
    frame,
    chunks[0],
    app.title(),
    app.api_url(),
    controller.provenance(),
    controller.refreshed_at(),
  );

  if let Some(error) = controller.error() {
    let line = Paragraph::new(format!(" Error: {}", error))
      .style(Style::default().fg(Color::White).bg(Color::Red));
    frame.render_widget(line, chunks[1]);
  }

  let body = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(chunks[2]);

  views::catalog::draw_catalog(
    frame,
    body[0],
    app.products(),
    app.selected(),
    controller.loading(),
    app.focus() == Focus::List,
  );
  app
    .form()
    .render(frame, body[1], app.editor(), app.focus() == Focus::Form);

  renderfns::draw_footer(frame, chunks[3], footer_hints(app));

  app.confirm().render_overlay(frame, chunks[2]);
}

fn footer_hints(app: &App) -> &'static [(&'static str, &'static str)] {
  if app.confirm().is_active() {
    return &[("y", "confirm"), ("n", "keep")];
  }
  match app.focus() {
    Focus::List => &[
      ("j/k", "nav"),
      ("e", "edit"),
      ("d", "delete"),
      ("n", "new"),
      ("r", "refresh"),
      ("Tab", "form"),
      ("q", "quit"),
    ],
    Focus::Form => &[
      ("Tab", "next field"),
      ("Enter", "save"),
      ("Esc", "reset"),
      ("Ctrl-L", "list"),
      ("Ctrl-C", "quit"),
    ],
  }
}
