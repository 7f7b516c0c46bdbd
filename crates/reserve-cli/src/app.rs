//! Terminal UI state and key dispatcher.
//!
//! Everything that changes candidates or filters goes through
//! [`Session::dispatch`]; this module only tracks cursor positions and turns
//! key presses into [`Action`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reserve_core::{
  candidate::{CandidateId, Criterion, ProfileField, Status},
  faq::FAQ,
  session::Session,
  state::{Action, View},
  store::EntryStore,
};

// ─── Form rows ────────────────────────────────────────────────────────────────

/// A focusable line of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
  Text(ProfileField),
  Contributor,
  Submit,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  pub session: Session<S>,

  /// Cursor position within the *filtered* candidate list.
  pub list_cursor: usize,

  /// Whether the user is typing into the search line.
  pub search_active: bool,

  /// Focused row of the registration form, as an index into [`App::form_rows`].
  pub form_cursor: usize,

  /// Highlighted question on the FAQ screen.
  pub faq_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl<S: EntryStore> App<S> {
  pub fn new(session: Session<S>) -> Self {
    Self {
      session,
      list_cursor: 0,
      search_active: false,
      form_cursor: 0,
      faq_cursor: 0,
      status_msg: String::new(),
    }
  }

  pub fn view(&self) -> View { self.session.state().view }

  /// The id of the candidate under the list cursor, if any.
  pub fn cursor_candidate(&self) -> Option<CandidateId> {
    self
      .session
      .visible()
      .get(self.list_cursor)
      .map(|c| c.id)
  }

  /// The form rows currently shown; the IBAN row only exists for
  /// contributors.
  pub fn form_rows(&self) -> Vec<FormRow> {
    let mut rows: Vec<FormRow> = ProfileField::ALL
      .into_iter()
      .filter(|f| *f != ProfileField::Iban)
      .map(FormRow::Text)
      .collect();
    rows.push(FormRow::Contributor);
    if self.session.state().draft.contributor {
      rows.push(FormRow::Text(ProfileField::Iban));
    }
    rows.push(FormRow::Submit);
    rows
  }

  pub fn focused_row(&self) -> FormRow {
    let rows = self.form_rows();
    rows
      .get(self.form_cursor)
      .copied()
      .unwrap_or(FormRow::Submit)
  }

  // ── Dispatch ──────────────────────────────────────────────────────────────

  async fn dispatch(&mut self, action: Action) {
    match self.session.dispatch(action).await {
      Ok(Some(warning)) => self.status_msg = format!("Non sauvegardé : {warning}"),
      Ok(None) => {}
      Err(e) => self.status_msg = format!("Erreur : {e}"),
    }
    self.clamp_cursors();
  }

  fn clamp_cursors(&mut self) {
    let visible = self.session.visible().len();
    self.list_cursor = self.list_cursor.min(visible.saturating_sub(1));
    let rows = self.form_rows().len();
    self.form_cursor = self.form_cursor.min(rows.saturating_sub(1));
  }

  async fn navigate(&mut self, view: View) {
    self.search_active = false;
    self.status_msg.clear();
    self.dispatch(Action::Navigate(view)).await;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }
    self.status_msg.clear();

    // Global: function keys switch screens even while typing.
    match key.code {
      KeyCode::F(1) => return self.navigate_and_continue(View::Dashboard).await,
      KeyCode::F(2) => return self.navigate_and_continue(View::Registration).await,
      KeyCode::F(3) => return self.navigate_and_continue(View::Faq).await,
      _ => {}
    }

    if self.search_active {
      self.handle_search_key(key).await;
      return true;
    }

    match self.view() {
      View::Dashboard => self.handle_dashboard_key(key).await,
      View::Registration => {
        self.handle_form_key(key).await;
        true
      }
      View::Faq => self.handle_faq_key(key).await,
    }
  }

  async fn navigate_and_continue(&mut self, view: View) -> bool {
    self.navigate(view).await;
    true
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    let mut search = self.session.state().filter.search.clone();
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        search.clear();
      }
      KeyCode::Enter => {
        self.search_active = false;
        return;
      }
      KeyCode::Backspace => {
        search.pop();
      }
      KeyCode::Char(c) => search.push(c),
      _ => return,
    }
    self.list_cursor = 0;
    self.dispatch(Action::SetSearch(search)).await;
  }

  async fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
    // A pending deletion captures the keyboard until answered.
    if self.session.state().pending_delete.is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Char('o') => {
          self.dispatch(Action::ConfirmDelete).await;
          if self.status_msg.is_empty() {
            self.status_msg = "Profil supprimé".into();
          }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
          self.dispatch(Action::CancelDelete).await;
        }
        _ => {}
      }
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Char('2') | KeyCode::Char('i') => self.navigate(View::Registration).await,
      KeyCode::Char('3') | KeyCode::Char('?') => self.navigate(View::Faq).await,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.session.visible().len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Filters
      KeyCode::Char('/') => {
        self.search_active = true;
        self.status_msg.clear();
      }
      KeyCode::Char('f') => {
        let next = self.session.state().filter.status.next();
        self.list_cursor = 0;
        self.dispatch(Action::SetStatusFilter(next)).await;
      }
      KeyCode::Char('t') => {
        let next = self.session.state().filter.contribution.next();
        self.list_cursor = 0;
        self.dispatch(Action::SetContributionFilter(next)).await;
      }

      // Edits on the selected candidate
      KeyCode::Char('s') | KeyCode::Char('S') => {
        if let Some(c) = self.cursor_entry() {
          let status = if key.code == KeyCode::Char('s') { c.1.next() } else { c.1.prev() };
          self.dispatch(Action::SetStatus(c.0, status)).await;
        }
      }
      KeyCode::Char(ch @ ('m' | 'M' | 'c' | 'C')) => {
        let criterion =
          if ch.eq_ignore_ascii_case(&'m') { Criterion::Motivation } else { Criterion::Curiosity };
        if let Some(id) = self.cursor_candidate()
          && let Some(current) = self.session.registry().get(id).map(|c| c.score(criterion))
        {
          let score =
            if ch.is_ascii_lowercase() { current.incremented() } else { current.decremented() };
          self.dispatch(Action::SetScore(id, criterion, score)).await;
        }
      }
      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(id) = self.cursor_candidate() {
          self.dispatch(Action::RequestDelete(id)).await;
        }
      }

      _ => {}
    }
    true
  }

  /// `(id, status)` of the candidate under the cursor.
  fn cursor_entry(&self) -> Option<(CandidateId, Status)> {
    self
      .session
      .visible()
      .get(self.list_cursor)
      .map(|c| (c.id, c.status.clone()))
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let rows = self.form_rows().len();
    match key.code {
      KeyCode::Esc => self.navigate(View::Dashboard).await,
      KeyCode::Down | KeyCode::Tab => self.form_cursor = (self.form_cursor + 1) % rows,
      KeyCode::Up | KeyCode::BackTab => self.form_cursor = (self.form_cursor + rows - 1) % rows,
      _ => match self.focused_row() {
        FormRow::Text(field) => self.edit_field(field, key).await,
        FormRow::Contributor => {
          if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
            let toggled = !self.session.state().draft.contributor;
            self.dispatch(Action::SetContributor(toggled)).await;
          }
        }
        FormRow::Submit => {
          if key.code == KeyCode::Enter {
            self.submit().await;
          }
        }
      },
    }
  }

  async fn edit_field(&mut self, field: ProfileField, key: KeyEvent) {
    let mut value = self.session.state().draft.text(field).to_owned();
    match key.code {
      KeyCode::Char(c) => value.push(c),
      KeyCode::Backspace => {
        value.pop();
      }
      KeyCode::Enter => {
        self.form_cursor = (self.form_cursor + 1) % self.form_rows().len();
        return;
      }
      _ => return,
    }
    self.dispatch(Action::EditDraft(field, value)).await;
  }

  async fn submit(&mut self) {
    if !self.session.state().draft.can_submit() {
      self.status_msg = "L'IBAN est requis pour les cotisants".into();
      return;
    }
    let before = self.session.stats().total;
    self.dispatch(Action::Submit).await;
    if self.session.stats().total > before {
      self.form_cursor = 0;
      if self.status_msg.is_empty() {
        self.status_msg = "Inscription enregistrée".into();
      }
    }
  }

  async fn handle_faq_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('1') | KeyCode::Esc => self.navigate(View::Dashboard).await,
      KeyCode::Char('2') => self.navigate(View::Registration).await,
      KeyCode::Down | KeyCode::Char('j') => {
        if self.faq_cursor + 1 < FAQ.len() {
          self.faq_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.faq_cursor = self.faq_cursor.saturating_sub(1),
      KeyCode::Enter | KeyCode::Char(' ') => {
        self.dispatch(Action::ToggleFaq(self.faq_cursor)).await;
      }
      _ => {}
    }
    true
  }
}
