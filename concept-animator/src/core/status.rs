//! Status and level enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Lifecycle status of a persisted animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Created, no stage has started yet.
    Pending,
    /// The stage loop is running.
    Processing,
    /// A video reference was produced.
    Completed,
    /// The run ended without a video reference.
    Failed,
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns true if the status represents a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::Completed | Self::Failed => 2,
        }
    }

    /// Returns true if a record may move from `self` to `next`.
    ///
    /// Transitions only go forward; terminal states accept nothing, and
    /// re-writing the current non-terminal status is allowed.
    #[must_use]
    pub fn can_transition_to(&self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        next.rank() >= self.rank()
    }
}

/// Display status of a storyboard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not started in this run.
    Pending,
    /// Currently running.
    Active,
    /// Finished, description available.
    Complete,
}

impl Default for StepStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Audience complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    /// Elementary school.
    Elementary,
    /// Middle school.
    Middle,
    /// High school.
    High,
    /// College / university.
    College,
    /// Adult learners.
    Adult,
}

impl Default for EducationLevel {
    fn default() -> Self {
        Self::Middle
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elementary" => Ok(Self::Elementary),
            "middle" => Ok(Self::Middle),
            "high" => Ok(Self::High),
            "college" => Ok(Self::College),
            "adult" => Ok(Self::Adult),
            other => Err(ValidationError::new(
                "education_level",
                format!("unknown education level '{other}'"),
            )),
        }
    }
}

impl EducationLevel {
    /// All levels in library order.
    pub const ALL: [Self; 5] = [
        Self::Elementary,
        Self::Middle,
        Self::High,
        Self::College,
        Self::Adult,
    ];

    /// Returns the wire name of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::Middle => "middle",
            Self::High => "high",
            Self::College => "college",
            Self::Adult => "adult",
        }
    }

    /// Position of the level in [`EducationLevel::ALL`].
    #[must_use]
    pub fn ordinal(self) -> usize {
        match self {
            Self::Elementary => 0,
            Self::Middle => 1,
            Self::High => 2,
            Self::College => 3,
            Self::Adult => 4,
        }
    }

    /// Parses a level case-insensitively, falling back to [`EducationLevel::Middle`].
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}
