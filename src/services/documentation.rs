use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the party games backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::session::get_session,
        crate::routes::session::reset_session,
        crate::routes::session::select_mode,
        crate::routes::session::change_mode,
        crate::routes::session::draw_word,
        crate::routes::session::set_timer_duration,
        crate::routes::session::start_timer,
        crate::routes::session::stop_timer,
        crate::routes::session::timer_status,
        crate::routes::teams::list_teams,
        crate::routes::teams::create_team,
        crate::routes::teams::delete_team,
        crate::routes::teams::adjust_score,
        crate::routes::teams::reset_scores,
        crate::routes::teams::standing,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::session::GameModeDto,
            crate::dto::session::ModeSelection,
            crate::dto::session::SelectModeRequest,
            crate::dto::session::ModeResponse,
            crate::dto::session::WordResponse,
            crate::dto::session::SessionSnapshot,
            crate::dto::session::ActionResponse,
            crate::dto::timer::TimerState,
            crate::dto::timer::TimerStatus,
            crate::dto::timer::StartTimerRequest,
            crate::dto::timer::TimerDurationRequest,
            crate::dto::timer::TimerDurationResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::ScoreAdjustmentRequest,
            crate::dto::team::TeamSummary,
            crate::dto::team::StandingDto,
            crate::dto::team::ScoreboardResponse,
            crate::dto::team::ScoreUpdateResponse,
            crate::dto::sse::ModeSelectedEvent,
            crate::dto::sse::WordDrawnEvent,
            crate::dto::sse::TimerStartedEvent,
            crate::dto::sse::TeamCreatedEvent,
            crate::dto::sse::TeamDeletedEvent,
            crate::dto::sse::ScoreUpdatedEvent,
            crate::dto::sse::ScoresResetEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "session", description = "Game mode, word draws and countdown"),
        (name = "teams", description = "Team roster and scores"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/sse/public",
            "/session",
            "/session/mode",
            "/session/word",
            "/session/timer",
            "/session/timer/start",
            "/teams",
            "/teams/{name}",
            "/teams/{name}/score",
            "/scores/reset",
            "/scores/standing",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
