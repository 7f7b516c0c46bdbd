//! TUI rendering: header, current screen, status bar.

pub mod dashboard;
pub mod faq;
pub mod registration;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use reserve_core::{state::View, store::EntryStore};

use crate::app::App;

pub const ACCENT: Color = Color::Cyan;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: EntryStore>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app.view());
  match app.view() {
    View::Dashboard => dashboard::draw(f, rows[1], app),
    View::Registration => registration::draw(f, rows[1], app),
    View::Faq => faq::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, current: View) {
  let mut spans = vec![Span::styled(
    " La Réserve ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (i, view) in View::ALL.into_iter().enumerate() {
    let style = if view == current {
      Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!(" F{} {} ", i + 1, view.label()), style));
  }

  let date = Local::now().format("%Y-%m-%d").to_string();
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray));

  // Left-right header: pad the middle.
  let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.chars().count());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let state = app.session.state();
  let (mode_label, hints) = match app.view() {
    View::Dashboard if state.pending_delete.is_some() => ("CONFIRM", "y supprimer  n annuler"),
    View::Dashboard if app.search_active => {
      ("SEARCH", "Tapez pour filtrer  Enter valider  Esc effacer")
    }
    View::Dashboard => (
      "LIST",
      "jk naviguer  / chercher  f statut  t cotisation  s/S statut  m/M c/C notes  d supprimer  q quitter",
    ),
    View::Registration => (
      "FORM",
      "Tab/↑↓ champ  Espace cocher  Enter envoyer  Esc retour",
    ),
    View::Faq => ("FAQ", "jk naviguer  Enter ouvrir/fermer  Esc retour  q quitter"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(ACCENT)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

/// A rectangle of `width` x `height` centred in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}
