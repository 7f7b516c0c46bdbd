//! Dashboard: counters, filters and the candidate list.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use reserve_core::{
  candidate::{Candidate, Criterion, Score},
  filter::{ContributionFilter, StatusFilter},
  store::EntryStore,
};

use super::{ACCENT, centered};
use crate::{app::App, commands::truncate};

const PREVIEW_CHARS: usize = 80;

pub fn draw<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3), // counters
      Constraint::Length(1), // filters
      Constraint::Min(0),    // list
    ])
    .split(area);

  draw_counters(f, rows[0], app);
  draw_filters(f, rows[1], app);
  draw_list(f, rows[2], app);

  if let Some(id) = app.session.state().pending_delete {
    let name = app
      .session
      .registry()
      .get(id)
      .map(Candidate::display_name)
      .unwrap_or_default();
    draw_confirm(f, area, &name);
  }
}

// ─── Counters ─────────────────────────────────────────────────────────────────

fn draw_counters<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let stats = app.session.stats();
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(area);

  let counters = [
    ("Profils", stats.total, Color::White),
    ("Cotisants", stats.contributors, Color::Yellow),
    ("Connecté·es", stats.connected, Color::Green),
  ];
  for ((label, value, color), col) in counters.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let line = Line::from(vec![
      Span::styled(
        format!("{value} "),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ),
      Span::styled(label, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line).block(block), *col);
  }
}

// ─── Filters ──────────────────────────────────────────────────────────────────

fn draw_filters<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let filter = &app.session.state().filter;

  let search = if app.search_active {
    format!("/{}_", filter.search)
  } else if filter.search.is_empty() {
    "/ rechercher".to_owned()
  } else {
    format!("/{}", filter.search)
  };
  let search_style = if app.search_active || !filter.search.is_empty() {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  let active = |on: bool| {
    if on { Style::default().fg(ACCENT) } else { Style::default().fg(Color::Gray) }
  };

  let line = Line::from(vec![
    Span::styled(format!(" {search:<30}"), search_style),
    Span::styled("  [f] ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      filter.status.label(),
      active(filter.status != StatusFilter::All),
    ),
    Span::styled("  [t] ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      filter.contribution.label(),
      active(filter.contribution != ContributionFilter::All),
    ),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── List ─────────────────────────────────────────────────────────────────────

fn draw_list<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let visible = app.session.visible();
  let total = app.session.registry().candidates().len();

  let title = if app.session.state().filter.is_empty() {
    format!(" Candidat·es ({total}) ")
  } else {
    format!(" Candidat·es ({}/{total}) ", visible.len())
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if visible.is_empty() {
    let text = if total == 0 { "Aucun profil – inscrivez-vous !" } else { "Aucun profil trouvé" };
    f.render_widget(
      Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  }

  let width = area.width.saturating_sub(4) as usize;
  let items: Vec<ListItem> = visible.iter().map(|c| item(c, width)).collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
      .highlight_symbol("▌"),
    area,
    &mut state,
  );
}

/// Two lines per candidate: identity and evaluation, then contact and the
/// start of their motivation.
fn item(c: &Candidate, width: usize) -> ListItem<'static> {
  let mut head = vec![Span::styled(
    c.display_name(),
    Style::default().add_modifier(Modifier::BOLD),
  )];
  if c.profile.contributor {
    head.push(Span::styled(" €", Style::default().fg(Color::Yellow)));
  }
  let status_color = if c.status.is_known() { ACCENT } else { Color::Red };
  head.push(Span::styled(
    format!("  {}", c.status.label()),
    Style::default().fg(status_color),
  ));
  for criterion in [Criterion::Motivation, Criterion::Curiosity] {
    head.push(Span::styled(
      format!("  {} {}", criterion.initial(), stars(c.score(criterion))),
      Style::default().fg(Color::Gray),
    ));
  }

  let mut detail = Vec::new();
  if !c.profile.email.is_empty() {
    detail.push(Span::styled(c.profile.email.clone(), Style::default().fg(Color::Gray)));
    detail.push(Span::raw("  "));
  }
  let motivation = c.profile.motivation.replace('\n', " ");
  if !motivation.trim().is_empty() {
    let room = width.saturating_sub(c.profile.email.chars().count() + 2);
    detail.push(Span::styled(
      truncate(motivation.trim(), PREVIEW_CHARS.min(room.max(1))),
      Style::default().fg(Color::DarkGray),
    ));
  }

  ListItem::new(vec![Line::from(head), Line::from(detail)])
}

fn stars(score: Score) -> String {
  let filled = score.get() as usize;
  format!("{}{}", "★".repeat(filled), "☆".repeat(Score::MAX as usize - filled))
}

// ─── Delete confirmation ──────────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, area: Rect, name: &str) {
  let popup = centered(area, 44, 5);
  let block = Block::default()
    .title(" Supprimer ce profil ? ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let lines = vec![
    Line::from(Span::styled(
      name.to_owned(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(vec![
      Span::styled("[y]", Style::default().fg(Color::Red)),
      Span::raw(" supprimer   "),
      Span::styled("[n]", Style::default().fg(ACCENT)),
      Span::raw(" annuler"),
    ]),
  ];

  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(lines).block(block), popup);
}
