use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::scores::{Scores, Standing};

/// Request to register a new team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    /// Any non-empty text; names are compared exactly, case included.
    #[validate(length(min = 1))]
    pub name: String,
}

/// Request to adjust a team's score by a delta (usually +1 or -1).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ScoreAdjustmentRequest {
    #[validate(range(min = -1000, max = 1000))]
    pub delta: i64,
}

/// A team and its current score.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub name: String,
    pub score: u64,
}

impl From<(String, u64)> for TeamSummary {
    fn from((name, score): (String, u64)) -> Self {
        Self { name, score }
    }
}

/// Leader information derived from the scores.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StandingDto {
    /// No team scored yet.
    NoLeader,
    /// One team leads.
    Leader { team: String, score: u64 },
    /// Several teams share the lead.
    Tie { teams: Vec<String>, score: u64 },
}

impl From<Standing> for StandingDto {
    fn from(value: Standing) -> Self {
        match value {
            Standing::NoLeader => StandingDto::NoLeader,
            Standing::Leader { team, score } => StandingDto::Leader { team, score },
            Standing::Tie { teams, score } => StandingDto::Tie { teams, score },
        }
    }
}

/// Full scoreboard in display order.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardResponse {
    pub teams: Vec<TeamSummary>,
    pub standing: StandingDto,
    /// Present when the change was applied but could not be saved to disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ScoreboardResponse {
    pub fn new(scores: Scores, standing: Standing, warning: Option<String>) -> Self {
        Self {
            teams: teams_to_summaries(scores),
            standing: standing.into(),
            warning,
        }
    }
}

/// Result of a score adjustment, returning the updated tally.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreUpdateResponse {
    pub team: TeamSummary,
    pub standing: StandingDto,
    /// Present when the change was applied but could not be saved to disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub fn teams_to_summaries(scores: Scores) -> Vec<TeamSummary> {
    scores.into_iter().map(Into::into).collect()
}
