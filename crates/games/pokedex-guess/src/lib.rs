pub mod config;
pub mod feedback;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pokedex_core::catalog::Catalog;
use pokedex_core::entity::{Entity, EntityId};
use pokedex_core::search::SearchEngine;
use pokedex_core::timer::OneShotTimer;

use config::GuessConfig;
use feedback::Feedback;

/// Where a guessing session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessPhase {
    /// No target yet; the catalog has not arrived.
    Idle,
    AwaitingGuess,
    /// Higher/Lower is on screen and submissions are locked until it reverts.
    ShowingFeedback,
    /// The target was found. Terminal for this session.
    Solved,
}

/// What changed during one [`GuessingGame::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advanced {
    /// The search box's suggestions changed.
    pub search: bool,
    /// Higher/Lower feedback expired and the guess button is back to `GUESS`.
    pub reverted: bool,
}

impl Advanced {
    pub fn any(self) -> bool {
        self.search || self.reverted
    }
}

/// Guess-the-number game: find the hidden entity by its id using
/// Higher/Lower hints.
///
/// One instance is one session; entering the game view again means building a
/// new instance.
pub struct GuessingGame {
    session_id: Uuid,
    config: GuessConfig,
    phase: GuessPhase,
    target: Option<Arc<Entity>>,
    current_guess: Option<Arc<Entity>>,
    feedback: Feedback,
    guess_count: u32,
    revert: OneShotTimer,
    search: Option<SearchEngine>,
}

impl GuessingGame {
    pub fn with_config(config: GuessConfig) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            config,
            phase: GuessPhase::Idle,
            target: None,
            current_guess: None,
            feedback: Feedback::Prompt,
            guess_count: 0,
            revert: OneShotTimer::new(),
            search: None,
        }
    }

    /// The catalog arrived: pick a target uniformly at random.
    ///
    /// Returns `false` without changing anything if a target already exists or
    /// the catalog is empty.
    pub fn catalog_loaded<R: Rng>(&mut self, catalog: Arc<Catalog>, rng: &mut R) -> bool {
        if !self.can_start(&catalog) {
            return false;
        }
        let index = rng.random_range(0..catalog.len());
        let Some(target) = catalog.at(index).map(Arc::clone) else {
            return false;
        };
        self.start(catalog, target);
        true
    }

    /// Like [`Self::catalog_loaded`] but with a known target, for seeded play.
    pub fn catalog_loaded_with_target(&mut self, catalog: Arc<Catalog>, target: EntityId) -> bool {
        if !self.can_start(&catalog) {
            return false;
        }
        let Some(target) = catalog.get(target).map(Arc::clone) else {
            tracing::warn!(target, "Requested target is not in the catalog");
            return false;
        };
        self.start(catalog, target);
        true
    }

    fn can_start(&self, catalog: &Catalog) -> bool {
        if self.target.is_some() {
            tracing::warn!(session = %self.session_id, "Target already chosen, not re-picking");
            return false;
        }
        if catalog.is_empty() {
            tracing::warn!(session = %self.session_id, "Empty catalog, game stays idle");
            return false;
        }
        true
    }

    fn start(&mut self, catalog: Arc<Catalog>, target: Arc<Entity>) {
        tracing::info!(session = %self.session_id, "Guessing game target chosen");
        tracing::debug!(session = %self.session_id, target = target.id, "Target id");
        self.search = Some(SearchEngine::new(catalog, &self.config.search));
        self.target = Some(target);
        self.phase = GuessPhase::AwaitingGuess;
    }

    /// The embedded search box, once the catalog is loaded.
    pub fn search(&self) -> Option<&SearchEngine> {
        self.search.as_ref()
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchEngine> {
        self.search.as_mut()
    }

    /// Pick a suggestion in the embedded search box and take it as the guess.
    ///
    /// Outside `AwaitingGuess`/`ShowingFeedback` the search box is left as it
    /// is and `None` is returned.
    pub fn select_suggestion(&mut self, id: EntityId) -> Option<Arc<Entity>> {
        if !self.accepts_selection() {
            tracing::debug!(session = %self.session_id, phase = ?self.phase, id, "Suggestion ignored");
            return None;
        }
        let entity = self.search.as_mut()?.select(id)?;
        self.guess_selected(Arc::clone(&entity));
        Some(entity)
    }

    /// Record a new current guess and put the neutral prompt back.
    ///
    /// Does not change phase or count; a running feedback lock keeps running.
    pub fn guess_selected(&mut self, entity: Arc<Entity>) {
        if !self.accepts_selection() {
            tracing::debug!(session = %self.session_id, phase = ?self.phase, "Selection ignored");
            return;
        }
        tracing::debug!(session = %self.session_id, guess = entity.id, "Guess selected");
        self.current_guess = Some(entity);
        self.feedback = Feedback::Prompt;
    }

    fn accepts_selection(&self) -> bool {
        matches!(
            self.phase,
            GuessPhase::AwaitingGuess | GuessPhase::ShowingFeedback
        )
    }

    /// Submit the current guess.
    ///
    /// Returns the feedback for an accepted submission, or `None` when the
    /// submission is ignored (no guess, feedback still showing, or solved).
    pub fn submit(&mut self) -> Option<Feedback> {
        if self.phase != GuessPhase::AwaitingGuess {
            tracing::debug!(session = %self.session_id, phase = ?self.phase, "Submission ignored");
            return None;
        }
        let (guess, target) = match (&self.current_guess, &self.target) {
            (Some(guess), Some(target)) => (guess.id, target.id),
            _ => {
                tracing::debug!(session = %self.session_id, "Submission ignored, no guess");
                return None;
            },
        };

        let feedback = Feedback::for_guess(guess, target);
        self.guess_count += 1;
        self.feedback = feedback;
        if feedback.is_timed() {
            self.phase = GuessPhase::ShowingFeedback;
            self.revert.arm(self.config.feedback_delay());
        } else {
            self.phase = GuessPhase::Solved;
            tracing::info!(
                session = %self.session_id,
                guesses = self.guess_count,
                "Guessing game solved"
            );
        }
        tracing::debug!(
            session = %self.session_id,
            guess,
            feedback = feedback.label(),
            count = self.guess_count,
            "Guess submitted"
        );
        Some(feedback)
    }

    /// Advance the search box and the feedback timer.
    pub fn advance(&mut self, dt: Duration) -> Advanced {
        let search = self.search.as_mut().is_some_and(|s| s.advance(dt));
        let reverted = self.revert.advance(dt) && self.phase == GuessPhase::ShowingFeedback;
        if reverted {
            self.phase = GuessPhase::AwaitingGuess;
            self.feedback = Feedback::Prompt;
            tracing::debug!(session = %self.session_id, "Feedback reverted, submissions open");
        }
        Advanced { search, reverted }
    }

    /// Whether the guess button is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == GuessPhase::AwaitingGuess && self.current_guess.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.phase == GuessPhase::ShowingFeedback
    }

    pub fn phase(&self) -> GuessPhase {
        self.phase
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn current_guess(&self) -> Option<&Arc<Entity>> {
        self.current_guess.as_ref()
    }

    /// The target, only once it has been found.
    pub fn revealed_target(&self) -> Option<&Arc<Entity>> {
        match self.phase {
            GuessPhase::Solved => self.target.as_ref(),
            _ => None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}
