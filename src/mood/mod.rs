pub mod random;
pub mod resolver;

use serde::{Deserialize, Serialize};

pub use random::{ConstantSource, RandomSource, RngSource, SequenceSource};
pub use resolver::MoodResolver;

/// How a cat feels about its neighbours, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Calm,
    Hisses,
    WantsToFight,
}

impl Mood {
    /// Raise the mood to `target` if that is more severe; never lowers it
    pub fn escalate(&mut self, target: Mood) {
        if target > *self {
            *self = target;
        }
    }

    /// Get display name for the mood
    pub fn name(&self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Hisses => "hisses",
            Mood::WantsToFight => "wants to fight",
        }
    }
}

/// Number of cats in each mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoodCounts {
    pub calm: usize,
    pub hisses: usize,
    pub wants_to_fight: usize,
}

impl MoodCounts {
    pub fn tally<'a>(moods: impl IntoIterator<Item = &'a Mood>) -> Self {
        moods.into_iter().fold(Self::default(), |mut counts, mood| {
            match mood {
                Mood::Calm => counts.calm += 1,
                Mood::Hisses => counts.hisses += 1,
                Mood::WantsToFight => counts.wants_to_fight += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.calm + self.hisses + self.wants_to_fight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moods_are_ordered() {
        assert!(Mood::Calm < Mood::Hisses);
        assert!(Mood::Hisses < Mood::WantsToFight);
    }

    #[test]
    fn test_escalate_never_lowers() {
        let mut mood = Mood::Calm;
        mood.escalate(Mood::Hisses);
        assert_eq!(mood, Mood::Hisses);
        mood.escalate(Mood::Calm);
        assert_eq!(mood, Mood::Hisses);
        mood.escalate(Mood::WantsToFight);
        mood.escalate(Mood::Hisses);
        assert_eq!(mood, Mood::WantsToFight);
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Mood::WantsToFight).unwrap(), "\"wants_to_fight\"");
        let mood: Mood = serde_json::from_str("\"hisses\"").unwrap();
        assert_eq!(mood, Mood::Hisses);
    }

    #[test]
    fn test_tally() {
        let moods = [Mood::Calm, Mood::WantsToFight, Mood::WantsToFight, Mood::Hisses];
        let counts = MoodCounts::tally(&moods);
        assert_eq!(counts.calm, 1);
        assert_eq!(counts.hisses, 1);
        assert_eq!(counts.wants_to_fight, 2);
        assert_eq!(counts.total(), 4);
    }
}
