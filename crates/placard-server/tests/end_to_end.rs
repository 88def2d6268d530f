//! End-to-end flow: a client session dispatching button presses through
//! the preview server to an in-process frame host built on the
//! interaction core.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use placard_client::{DispatchOutcome, Dispatcher, FrameSession, HttpTransport};
use placard_core::{resolve_context, RenderCycle, RequestContext, ResolveParams};
use placard_server::{app, AppState};
use placard_types::{
    ButtonDescriptor, ButtonType, Frame, FramePayload, InteractionStatus,
};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Frame handler for the in-process host: resolves the inbound payload
/// with the interaction core, derives the press count, and answers with
/// the next frame document carrying the new count in its state blob.
async fn host_frame_handler(Json(payload): Json<FramePayload>) -> Json<serde_json::Value> {
    let previous_state: Option<u32> = payload.state.as_deref().and_then(|s| s.parse().ok());
    let status = if payload.button_index.is_some() {
        InteractionStatus::Response
    } else {
        InteractionStatus::Initial
    };

    let context = RequestContext {
        initial_path: "/frame".to_string(),
        payload: Some(payload),
        previous_button_values: vec![Some("next".to_string())],
        previous_state,
        request_url: "http://host.internal/frame".to_string(),
        status,
        url: "http://host.internal/frame".to_string(),
        verified: true,
    };
    let mut resolved = resolve_context(ResolveParams {
        context,
        cycle: RenderCycle::Full,
        initial_state: 0u32,
        prior_state: None,
    });
    let presses = *resolved
        .derive_state(|count| async move { Ok(count + 1) })
        .await
        .unwrap();

    Json(json!({
        "imageUrl": format!("https://host.example/img/{presses}.png"),
        "postUrl": "http://host.internal/frame",
        "state": presses.to_string(),
    }))
}

async fn spawn_frame_host() -> SocketAddr {
    let host = Router::new()
        .route("/frame", post(host_frame_handler))
        .route(
            "/out",
            post(|| async {
                (
                    StatusCode::FOUND,
                    [(header::LOCATION, "https://away.example/landing")],
                )
                    .into_response()
            }),
        );
    spawn(host).await
}

fn displayed_frame(host: SocketAddr) -> Frame {
    Frame {
        image_url: "https://host.example/img/1.png".to_string(),
        image_aspect_ratio: "1.91:1".to_string(),
        title: Some("demo".to_string()),
        input: None,
        buttons: vec![
            ButtonDescriptor {
                index: 1,
                title: "next".to_string(),
                button_type: ButtonType::Post,
                target: None,
                value: Some("next".to_string()),
            },
            ButtonDescriptor {
                index: 2,
                title: "leave".to_string(),
                button_type: ButtonType::PostRedirect,
                target: Some(format!("http://{host}/out")),
                value: None,
            },
        ],
        post_url: format!("http://{host}/frame"),
        state: Some("1".to_string()),
    }
}

#[tokio::test]
async fn session_advances_through_server_and_host() {
    let host_addr = spawn_frame_host().await;
    let server_addr = spawn(app(AppState::new(Duration::from_secs(2)).unwrap())).await;

    let dispatcher = Dispatcher::new(HttpTransport::new(format!("http://{server_addr}")));
    let mut session = FrameSession::new();
    let frame = displayed_frame(host_addr);

    // Plain post: advances the history with a retrievable result whose
    // state the host derived from the echoed blob (1 press -> 2).
    let outcome = dispatcher
        .dispatch(&mut session, &frame, &frame.buttons[0])
        .await
        .unwrap();
    let first_id = match outcome {
        DispatchOutcome::Advanced { id } => id,
        other => panic!("expected an advance, got {other:?}"),
    };
    assert_eq!(session.history.current(), Some(&first_id));

    let record: serde_json::Value =
        reqwest::get(format!("http://{server_addr}/api/frames/{first_id}"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    assert_eq!(record["kind"], "frame");
    assert_eq!(record["frame"]["state"], "2");
    assert_eq!(record["frame"]["imageUrl"], "https://host.example/img/2.png");

    // Redirecting post: advances and stages the leaving confirmation.
    let outcome = dispatcher
        .dispatch(&mut session, &frame, &frame.buttons[1])
        .await
        .unwrap();
    let (second_id, staged) = match outcome {
        DispatchOutcome::ConfirmationRequested { id: Some(id), url } => (id, url),
        other => panic!("expected a staged confirmation, got {other:?}"),
    };
    assert_eq!(staged, "https://away.example/landing");
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.history.current(), Some(&second_id));
    assert!(session.prompt.is_open());

    // A second redirect press while the prompt is open is a no-op.
    let outcome = dispatcher
        .dispatch(&mut session, &frame, &frame.buttons[1])
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(session.history.len(), 2);

    // Continue: the staged URL comes back for the embedding to open.
    assert_eq!(
        session.prompt.confirm().as_deref(),
        Some("https://away.example/landing")
    );

    // Positional replay, then divergence truncates the branch.
    assert_eq!(session.history.back(), Some(&first_id));
    let outcome = dispatcher
        .dispatch(&mut session, &frame, &frame.buttons[0])
        .await
        .unwrap();
    let third_id = match outcome {
        DispatchOutcome::Advanced { id } => id,
        other => panic!("expected an advance, got {other:?}"),
    };
    assert_eq!(session.history.len(), 2);
    assert_eq!(
        session.history.entries(),
        &[first_id, third_id.clone()][..]
    );
    assert_eq!(session.history.current(), Some(&third_id));
}

#[tokio::test]
async fn failed_actions_leave_the_session_retryable() {
    let server_addr = spawn(app(AppState::new(Duration::from_secs(1)).unwrap())).await;

    // Nothing listens on the frame URL: the proxy answers 502 and the
    // session must stay untouched.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let dispatcher = Dispatcher::new(HttpTransport::new(format!("http://{server_addr}")));
    let mut session = FrameSession::new();
    session.input_text = "still typing".to_string();

    let frame = displayed_frame(dead_addr);

    let err = dispatcher
        .dispatch(&mut session, &frame, &frame.buttons[0])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("502"));
    assert!(session.history.is_empty());
    assert_eq!(session.input_text, "still typing");
}
