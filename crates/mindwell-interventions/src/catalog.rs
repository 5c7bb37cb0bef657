use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clock::ClockConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    Anxiety,
    Stress,
    Mood,
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anxiety" => Ok(Category::Anxiety),
            "stress" => Ok(Category::Stress),
            "mood" => Ok(Category::Mood),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// An exercise on the intervention menu.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Intervention {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    /// Display label, e.g. "3-5 minutes".
    pub duration: String,
    pub evidence: String,
    /// Whether the exercise runs on an [`crate::clock::InterventionClock`].
    pub timed: bool,
}

impl Intervention {
    /// Default clock settings for timed exercises.
    pub fn clock_config(&self) -> Option<ClockConfig> {
        (self.id == BOX_BREATHING).then(ClockConfig::default)
    }
}

pub const BOX_BREATHING: &str = "box-breathing";
pub const GROUNDING_54321: &str = "grounding-54321";

static INTERVENTIONS: LazyLock<Vec<Intervention>> = LazyLock::new(|| {
    vec![
        intervention(
            BOX_BREATHING,
            "Box Breathing",
            Category::Anxiety,
            "4-4-4-4 breathing pattern to reduce anxiety and promote calm",
            "5 minutes",
            "Reduces cortisol by 25% in 5 minutes",
            true,
        ),
        intervention(
            GROUNDING_54321,
            "5-4-3-2-1 Grounding",
            Category::Anxiety,
            "Sensory grounding technique for panic interruption",
            "3-5 minutes",
            "92% effective for acute anxiety episodes",
            false,
        ),
        intervention(
            "progressive-relaxation",
            "Progressive Muscle Relaxation",
            Category::Stress,
            "Sequential muscle tension and release technique",
            "10 minutes",
            "Reduces muscle tension by 40%",
            false,
        ),
        intervention(
            "thought-record",
            "Quick Thought Record",
            Category::Mood,
            "CBT-based worry challenging tool",
            "5-10 minutes",
            "Improves mood regulation in 78% of users",
            false,
        ),
    ]
});

fn intervention(
    id: &str,
    name: &str,
    category: Category,
    description: &str,
    duration: &str,
    evidence: &str,
    timed: bool,
) -> Intervention {
    Intervention {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        duration: duration.to_string(),
        evidence: evidence.to_string(),
        timed,
    }
}

pub fn all_interventions() -> &'static [Intervention] {
    &INTERVENTIONS
}

pub fn get_intervention(id: &str) -> Option<&'static Intervention> {
    INTERVENTIONS.iter().find(|i| i.id == id)
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Intervention> {
    INTERVENTIONS.iter().filter(move |i| i.category == category)
}

/// One sense in the 5-4-3-2-1 grounding exercise.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroundingStep {
    pub count: u8,
    pub sense: String,
    pub instruction: String,
}

/// The five grounding steps, from five things seen down to one tasted.
pub fn grounding_steps() -> &'static [GroundingStep] {
    static STEPS: LazyLock<Vec<GroundingStep>> = LazyLock::new(|| {
        [
            (5, "See", "Name 5 things you can see around you"),
            (4, "Touch", "Name 4 things you can touch"),
            (3, "Hear", "Name 3 things you can hear"),
            (2, "Smell", "Name 2 things you can smell"),
            (1, "Taste", "Name 1 thing you can taste"),
        ]
        .into_iter()
        .map(|(count, sense, instruction)| GroundingStep {
            count,
            sense: sense.to_string(),
            instruction: instruction.to_string(),
        })
        .collect()
    });
    &STEPS
}
