use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod health;
pub mod session;
pub mod sse;
pub mod teams;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(sse::router())
        .merge(session::router())
        .merge(teams::router())
        .merge(docs::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::score_store::MemoryScoreStore,
        state::{AppState, words::WordBank},
    };

    async fn test_app() -> Router {
        test_app_with_store().await.0
    }

    async fn test_app_with_store() -> (Router, MemoryScoreStore) {
        let words = WordBank::new(vec!["witch hat".into()], vec!["zombie walk".into()]);
        let store = MemoryScoreStore::default();
        let state = AppState::new(AppConfig::default(), words, Arc::new(store.clone())).await;
        (router(state), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let app = test_app().await;
        let res = send(&app, Method::GET, "/healthcheck", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn word_draw_needs_a_mode_first() {
        let app = test_app().await;

        let res = send(&app, Method::POST, "/session/word", None).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = send(
            &app,
            Method::POST,
            "/session/mode",
            Some(json!({ "mode": "pictionary" })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send(&app, Method::POST, "/session/word", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["mode"], "pictionary");
        assert_eq!(body["word"], "witch hat");
    }

    #[tokio::test]
    async fn timer_starts_without_a_body() {
        let app = test_app().await;

        let res = send(&app, Method::POST, "/session/timer/start", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["state"], "running");
        assert_eq!(body["duration_seconds"], 60);

        let res = send(
            &app,
            Method::PUT,
            "/session/timer/duration",
            Some(json!({ "seconds": 31 })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn team_scoring_round_trip() {
        let app = test_app().await;

        let res = send(&app, Method::POST, "/teams", Some(json!({ "name": "Ghouls" }))).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send(&app, Method::POST, "/teams", Some(json!({ "name": "Ghouls" }))).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = send(&app, Method::POST, "/teams", Some(json!({ "name": "" }))).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = send(
            &app,
            Method::POST,
            "/teams/Ghouls/score",
            Some(json!({ "delta": 2 })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["team"]["score"], 2);
        assert_eq!(body["standing"]["kind"], "leader");

        let res = send(&app, Method::DELETE, "/teams/Nobody", None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = send(&app, Method::GET, "/teams", None).await;
        let body = json_body(res).await;
        assert_eq!(body["teams"], json!([{ "name": "Ghouls", "score": 2 }]));
    }

    #[tokio::test]
    async fn deleting_a_team_persists_the_survivors() {
        let (app, store) = test_app_with_store().await;
        for name in ["Ghouls", "Bats"] {
            let res = send(&app, Method::POST, "/teams", Some(json!({ "name": name }))).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = send(&app, Method::DELETE, "/teams/Ghouls", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await["teams"],
            json!([{ "name": "Bats", "score": 0 }])
        );
        assert_eq!(
            store.snapshot().keys().map(String::as_str).collect::<Vec<_>>(),
            ["Bats"]
        );
    }

    #[tokio::test]
    async fn team_names_matching_scoreboard_actions_are_ordinary_teams() {
        let (app, store) = test_app_with_store().await;

        for name in ["reset", "standing", "score"] {
            let res = send(&app, Method::POST, "/teams", Some(json!({ "name": name }))).await;
            assert_eq!(res.status(), StatusCode::OK, "add {name}");

            let res = send(
                &app,
                Method::POST,
                &format!("/teams/{name}/score"),
                Some(json!({ "delta": 1 })),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK, "score {name}");
            assert_eq!(json_body(res).await["team"]["score"], 1);

            let res = send(&app, Method::DELETE, &format!("/teams/{name}"), None).await;
            assert_eq!(res.status(), StatusCode::OK, "delete {name}");
        }

        let res = send(&app, Method::GET, "/teams", None).await;
        assert_eq!(json_body(res).await["teams"], json!([]));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn scoreboard_actions_live_under_scores() {
        let app = test_app().await;
        send(&app, Method::POST, "/teams", Some(json!({ "name": "Owls" }))).await;
        send(
            &app,
            Method::POST,
            "/teams/Owls/score",
            Some(json!({ "delta": 3 })),
        )
        .await;

        let res = send(&app, Method::GET, "/scores/standing", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await,
            json!({ "kind": "leader", "team": "Owls", "score": 3 })
        );

        let res = send(&app, Method::POST, "/scores/reset", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["teams"], json!([{ "name": "Owls", "score": 0 }]));
        assert_eq!(body["standing"]["kind"], "no_leader");
    }
}
