//! FAQ screen: one question per line, at most one answer open.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use reserve_core::{faq::FAQ, store::EntryStore};

use super::ACCENT;
use crate::app::App;

pub fn draw<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let expanded = app.session.state().expanded_faq;

  let block = Block::default()
    .title(" Questions fréquentes ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut lines = Vec::new();
  for (i, entry) in FAQ.iter().enumerate() {
    let open = expanded == Some(i);
    let arrow = if open { "▾ " } else { "▸ " };
    let style = if i == app.faq_cursor {
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    lines.push(Line::from(vec![
      Span::styled(arrow, Style::default().fg(ACCENT)),
      Span::styled(entry.question, style),
    ]));
    if open {
      lines.extend(entry.answer.lines().map(|l| {
        Line::from(Span::styled(
          format!("    {l}"),
          Style::default().fg(Color::Gray),
        ))
      }));
      lines.push(Line::from(""));
    }
  }

  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}
