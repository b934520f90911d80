//! Storyboard steps shown while a run progresses.

use serde::{Deserialize, Serialize};

use super::status::StepStatus;

/// Static definition of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDefinition {
    /// 1-based ordinal.
    pub id: u8,
    /// Display title.
    pub title: &'static str,
    /// What the stage does.
    pub description: &'static str,
}

/// The five stages, in execution order.
pub const STAGES: [StageDefinition; 5] = [
    StageDefinition {
        id: 1,
        title: "Concept Analysis",
        description: "Analyzing the concept and breaking it down into key components",
    },
    StageDefinition {
        id: 2,
        title: "Content Structure",
        description: "Organizing the learning material in a logical sequence",
    },
    StageDefinition {
        id: 3,
        title: "Visual Storyboarding",
        description: "Creating visual representations for each key concept",
    },
    StageDefinition {
        id: 4,
        title: "Script Generation",
        description: "Creating narration script with appropriate language for the target audience",
    },
    StageDefinition {
        id: 5,
        title: "Animation Rendering",
        description: "Generating the final animation with synchronized narration",
    },
];

/// Number of stages in a run.
pub const STAGE_COUNT: usize = STAGES.len();

/// In-memory view of one stage for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardStep {
    /// 1-based ordinal.
    pub id: u8,
    /// Display title.
    pub title: String,
    /// What the stage does.
    pub description: String,
    /// Generated description, empty until the stage completes.
    pub visual_description: String,
    /// Current status.
    pub status: StepStatus,
}

impl From<&StageDefinition> for StoryboardStep {
    fn from(def: &StageDefinition) -> Self {
        Self {
            id: def.id,
            title: def.title.to_string(),
            description: def.description.to_string(),
            visual_description: String::new(),
            status: StepStatus::Pending,
        }
    }
}

/// Returns all steps in the pending state with empty descriptions.
#[must_use]
pub fn initial_steps() -> Vec<StoryboardStep> {
    STAGES.iter().map(StoryboardStep::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_steps() {
        let steps = initial_steps();
        assert_eq!(steps.len(), STAGE_COUNT);
        assert!(steps.iter().all(|s| s.status == StepStatus::Pending));
        assert!(steps.iter().all(|s| s.visual_description.is_empty()));

        let ids: Vec<u8> = steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(steps[0].title, "Concept Analysis");
        assert_eq!(steps[4].title, "Animation Rendering");
    }
}
