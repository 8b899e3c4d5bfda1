use serde::{Deserialize, Serialize};

use pokedex_core::entity::EntityId;

/// What the guess button currently says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Neutral prompt, ready for a submission.
    #[default]
    Prompt,
    /// The guess is below the target; go higher.
    Higher,
    /// The guess is above the target; go lower.
    Lower,
    Correct,
}

/// Accent colour for the guess button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Neutral,
    Red,
    Blue,
    Green,
}

impl Tone {
    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

impl Feedback {
    /// Compare a guessed id against the target id.
    pub fn for_guess(guess: EntityId, target: EntityId) -> Self {
        match guess.cmp(&target) {
            std::cmp::Ordering::Greater => Self::Lower,
            std::cmp::Ordering::Less => Self::Higher,
            std::cmp::Ordering::Equal => Self::Correct,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Prompt => "GUESS",
            Self::Higher => "Higher",
            Self::Lower => "Lower",
            Self::Correct => "Correct",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Prompt => Tone::Neutral,
            Self::Higher => Tone::Red,
            Self::Lower => Tone::Blue,
            Self::Correct => Tone::Green,
        }
    }

    /// Higher/Lower are shown for a fixed time and lock submissions meanwhile.
    pub fn is_timed(self) -> bool {
        matches!(self, Self::Higher | Self::Lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_above_target_says_lower() {
        assert_eq!(Feedback::for_guess(25, 4), Feedback::Lower);
    }

    #[test]
    fn guess_below_target_says_higher() {
        assert_eq!(Feedback::for_guess(1, 25), Feedback::Higher);
    }

    #[test]
    fn exact_guess_is_correct() {
        assert_eq!(Feedback::for_guess(25, 25), Feedback::Correct);
    }

    #[test]
    fn labels_and_tones() {
        assert_eq!(Feedback::default().label(), "GUESS");
        assert_eq!(Feedback::Lower.tone(), Tone::Blue);
        assert_eq!(Feedback::Higher.tone(), Tone::Red);
        assert_eq!(Feedback::Correct.tone(), Tone::Green);
        assert!(!Feedback::Correct.is_timed());
        assert_eq!(Feedback::Prompt.tone().name(), "neutral");
        assert_eq!(Feedback::Higher.tone().name(), "red");
    }
}
