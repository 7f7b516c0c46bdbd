//! [`Session`]: UI state plus the registry it drives.

use crate::{
  PersistWarning, Result,
  candidate::Candidate,
  registry::{Registry, Stats},
  state::{Action, Command, UiState},
  store::EntryStore,
};

pub struct Session<S> {
  state:    UiState,
  registry: Registry<S>,
}

impl<S: EntryStore> Session<S> {
  pub fn new(registry: Registry<S>) -> Self { Self { state: UiState::default(), registry } }

  pub fn state(&self) -> &UiState { &self.state }

  pub fn registry(&self) -> &Registry<S> { &self.registry }

  /// The candidates passing the current filter, in creation order.
  pub fn visible(&self) -> Vec<&Candidate> {
    self.state.filter.apply(self.registry.candidates())
  }

  pub fn stats(&self) -> Stats { self.registry.stats() }

  /// Apply `action` and run any command it produces.
  ///
  /// `Ok(Some(_))` means the change was made but could not be saved.
  pub async fn dispatch(&mut self, action: Action) -> Result<Option<PersistWarning>> {
    let Some(command) = self.state.apply(action) else {
      return Ok(None);
    };

    let warning = match command {
      Command::Create(profile) => {
        let created = self.registry.create(profile).await?;
        self.state.submitted();
        created.warning
      }
      Command::Update(id, patch) => self.registry.update(id, patch).await.warning,
      Command::Delete(id) => self.registry.delete(id).await.warning,
    };
    Ok(warning)
  }
}
