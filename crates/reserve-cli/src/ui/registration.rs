//! Registration form.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use reserve_core::store::EntryStore;

use super::ACCENT;
use crate::app::{App, FormRow};

const LABEL_WIDTH: usize = 16;

pub fn draw<S: EntryStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let draft = &app.session.state().draft;
  let focused = app.focused_row();

  let block = Block::default()
    .title(" Rejoindre la réserve ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut lines = vec![
    Line::from(Span::styled(
      "Aucun champ n'est obligatoire. Motivation et curiosité comptent plus que le CV.",
      Style::default().fg(Color::Gray),
    )),
    Line::from(""),
  ];

  for row in app.form_rows() {
    let is_focused = row == focused;
    let marker = if is_focused { "▌" } else { " " };
    let label_style = if is_focused {
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };

    let line = match row {
      FormRow::Text(field) => {
        let value = draft.text(field);
        let (text, style) = if value.is_empty() {
          (field.placeholder().to_owned(), Style::default().fg(Color::DarkGray))
        } else {
          (value.replace('\n', " "), Style::default())
        };
        let cursor = if is_focused { "_" } else { "" };
        Line::from(vec![
          Span::styled(marker, Style::default().fg(ACCENT)),
          Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
          Span::styled(text, style),
          Span::styled(cursor, Style::default().fg(ACCENT)),
        ])
      }
      FormRow::Contributor => {
        let check = if draft.contributor { "[x]" } else { "[ ]" };
        Line::from(vec![
          Span::styled(marker, Style::default().fg(ACCENT)),
          Span::styled(format!("{:<LABEL_WIDTH$}", "Cotisation"), label_style),
          Span::raw(format!("{check} ")),
          Span::styled(
            "Cotisation crypto éthique (12,50€/an)",
            Style::default().fg(Color::Yellow),
          ),
        ])
      }
      FormRow::Submit => {
        let enabled = draft.can_submit();
        let style = match (enabled, is_focused) {
          (false, _) => Style::default().fg(Color::DarkGray),
          (true, true) => Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
          (true, false) => Style::default().fg(ACCENT),
        };
        let mut spans = vec![
          Span::styled(marker, Style::default().fg(ACCENT)),
          Span::styled(" Rejoindre la réserve ", style),
        ];
        if !enabled {
          spans.push(Span::styled(
            "  IBAN requis pour les cotisants",
            Style::default().fg(Color::Red),
          ));
        }
        lines.push(Line::from(""));
        Line::from(spans)
      }
    };
    lines.push(line);
  }

  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}
