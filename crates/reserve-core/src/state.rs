//! UI state and its single update function.
//!
//! [`UiState::apply`] is the only place UI state changes. Actions that would
//! change the candidate collection do not touch it here; they come back as a
//! [`Command`] for the [`Session`](crate::session::Session) to execute
//! against the registry.

use crate::{
  candidate::{CandidateId, CandidatePatch, Criterion, Profile, ProfileField, Score, Status},
  faq::FAQ,
  filter::{CandidateFilter, ContributionFilter, StatusFilter},
};

// ─── View ────────────────────────────────────────────────────────────────────

/// The three screens. Any one is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
  #[default]
  Dashboard,
  Registration,
  Faq,
}

impl View {
  pub const ALL: [View; 3] = [View::Dashboard, View::Registration, View::Faq];

  pub fn label(self) -> &'static str {
    match self {
      Self::Dashboard => "Tableau de bord",
      Self::Registration => "S'inscrire",
      Self::Faq => "FAQ",
    }
  }
}

// ─── Actions and commands ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Navigate(View),
  SetSearch(String),
  SetStatusFilter(StatusFilter),
  SetContributionFilter(ContributionFilter),
  EditDraft(ProfileField, String),
  SetContributor(bool),
  Submit,
  SetStatus(CandidateId, Status),
  SetScore(CandidateId, Criterion, Score),
  /// First half of a deletion; nothing is removed until [`Action::ConfirmDelete`].
  RequestDelete(CandidateId),
  ConfirmDelete,
  CancelDelete,
  ToggleFaq(usize),
}

/// A change to the candidate collection requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Create(Profile),
  Update(CandidateId, CandidatePatch),
  Delete(CandidateId),
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct UiState {
  pub view:           View,
  pub filter:         CandidateFilter,
  /// The registration form; never persisted.
  pub draft:          Profile,
  /// A deletion awaiting confirmation.
  pub pending_delete: Option<CandidateId>,
  /// Index into [`FAQ`] of the open entry.
  pub expanded_faq:   Option<usize>,
}

impl UiState {
  pub fn apply(&mut self, action: Action) -> Option<Command> {
    match action {
      Action::Navigate(view) => {
        self.view = view;
        self.pending_delete = None;
      }
      Action::SetSearch(search) => self.filter.search = search,
      Action::SetStatusFilter(status) => self.filter.status = status,
      Action::SetContributionFilter(contribution) => self.filter.contribution = contribution,
      Action::EditDraft(field, value) => *self.draft.text_mut(field) = value,
      Action::SetContributor(contributor) => self.draft.contributor = contributor,
      Action::Submit => {
        if self.draft.can_submit() {
          return Some(Command::Create(self.draft.clone()));
        }
      }
      Action::SetStatus(id, status) => {
        return Some(Command::Update(id, CandidatePatch::status(status)));
      }
      Action::SetScore(id, criterion, score) => {
        return Some(Command::Update(id, CandidatePatch::score(criterion, score)));
      }
      Action::RequestDelete(id) => self.pending_delete = Some(id),
      Action::ConfirmDelete => return self.pending_delete.take().map(Command::Delete),
      Action::CancelDelete => self.pending_delete = None,
      Action::ToggleFaq(index) if index < FAQ.len() => {
        self.expanded_faq = if self.expanded_faq == Some(index) { None } else { Some(index) };
      }
      Action::ToggleFaq(_) => {}
    }
    None
  }

  /// Called once a [`Command::Create`] went through: clear the form and go
  /// back to the list.
  pub fn submitted(&mut self) {
    self.draft = Profile::default();
    self.view = View::Dashboard;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_on_dashboard() {
    let state = UiState::default();
    assert_eq!(state.view, View::Dashboard);
    assert!(state.filter.is_empty());
  }

  #[test]
  fn navigation_is_unconditional() {
    let mut state = UiState::default();
    for view in [View::Faq, View::Registration, View::Dashboard, View::Faq] {
      assert_eq!(state.apply(Action::Navigate(view)), None);
      assert_eq!(state.view, view);
    }
  }

  #[test]
  fn submit_is_refused_without_iban() {
    let mut state = UiState::default();
    state.apply(Action::SetContributor(true));
    state.apply(Action::EditDraft(ProfileField::Iban, "  ".into()));
    assert_eq!(state.apply(Action::Submit), None);

    state.apply(Action::EditDraft(ProfileField::Iban, "FR76".into()));
    let Some(Command::Create(profile)) = state.apply(Action::Submit) else {
      panic!("expected a create command")
    };
    assert_eq!(profile.iban, "FR76");
    // The draft is kept until the session reports success.
    assert_eq!(state.draft.iban, "FR76");
  }

  #[test]
  fn confirm_without_request_does_nothing() {
    let mut state = UiState::default();
    assert_eq!(state.apply(Action::ConfirmDelete), None);

    state.apply(Action::RequestDelete(CandidateId(4)));
    state.apply(Action::CancelDelete);
    assert_eq!(state.apply(Action::ConfirmDelete), None);

    state.apply(Action::RequestDelete(CandidateId(4)));
    assert_eq!(
      state.apply(Action::ConfirmDelete),
      Some(Command::Delete(CandidateId(4)))
    );
    assert_eq!(state.pending_delete, None);
  }

  #[test]
  fn faq_entries_toggle_one_at_a_time() {
    let mut state = UiState::default();
    state.apply(Action::ToggleFaq(1));
    assert_eq!(state.expanded_faq, Some(1));
    state.apply(Action::ToggleFaq(3));
    assert_eq!(state.expanded_faq, Some(3));
    state.apply(Action::ToggleFaq(3));
    assert_eq!(state.expanded_faq, None);
    state.apply(Action::ToggleFaq(99));
    assert_eq!(state.expanded_faq, None);
  }
}
