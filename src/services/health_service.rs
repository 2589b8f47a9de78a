use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness along with the roster size and connected listeners.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let teams = state.read_scoreboard(|board| board.scores().len()).await;
    HealthResponse::ok(teams, state.events().listeners())
}
