use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{team::StandingDto, timer::TimerStatus},
    state::game::{GameMode, ModeChoice},
};

/// Publicly visible game mode, named after the word bank keys.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameModeDto {
    /// Drawing game.
    Pictionary,
    /// Charades game.
    Mimic,
}

impl From<GameMode> for GameModeDto {
    fn from(value: GameMode) -> Self {
        match value {
            GameMode::Drawing => GameModeDto::Pictionary,
            GameMode::Charades => GameModeDto::Mimic,
        }
    }
}

impl From<GameModeDto> for GameMode {
    fn from(value: GameModeDto) -> Self {
        match value {
            GameModeDto::Pictionary => GameMode::Drawing,
            GameModeDto::Mimic => GameMode::Charades,
        }
    }
}

/// Mode requested by the client: one of the modes or a wheel spin.
#[derive(Debug, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelection {
    /// Drawing game.
    Pictionary,
    /// Charades game.
    Mimic,
    /// Let the wheel decide.
    Random,
}

impl From<ModeSelection> for ModeChoice {
    fn from(value: ModeSelection) -> Self {
        match value {
            ModeSelection::Pictionary => ModeChoice::Explicit(GameMode::Drawing),
            ModeSelection::Mimic => ModeChoice::Explicit(GameMode::Charades),
            ModeSelection::Random => ModeChoice::Random,
        }
    }
}

/// Request to select the game mode.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectModeRequest {
    pub mode: ModeSelection,
}

/// Response returned once a mode has been selected.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModeResponse {
    pub mode: GameModeDto,
}

/// Response carrying a freshly drawn word.
#[derive(Debug, Serialize, ToSchema)]
pub struct WordResponse {
    pub mode: GameModeDto,
    pub word: String,
}

/// Full view of the live session, as rendered by the game screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<GameModeDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    pub timer: TimerStatus,
    /// Countdown length used when starting the timer without an explicit duration.
    pub timer_duration_seconds: u32,
    pub standing: StandingDto,
}

/// Generic action acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
}
