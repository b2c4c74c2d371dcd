//! Local upstream servers for probe tests.

use std::convert::Infallible;
use std::time::Duration;

use axum::{body::Body, http::StatusCode, routing::get, Router};
use futures_util::stream;

/// Start a stub upstream on an ephemeral port and return its base URL.
///
/// - `/` answers 200 with a 4-byte body and an `x-upstream` header
/// - `/slow` answers after 500ms
/// - `/missing` answers 404
/// - `/stall` sends its head and one byte at once, the rest after 2s
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/", get(|| async { ([("x-upstream", "stub")], "pong") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "late"
            }),
        )
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
        .route("/stall", get(|| async { Body::from_stream(stalled_body()) }));

    serve(app).await
}

/// Serve `app` on 127.0.0.1 with an ephemeral port.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A URL on a local port nothing listens on.
pub async fn unused_local_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn stalled_body() -> impl futures_util::Stream<Item = Result<&'static str, Infallible>> {
    stream::unfold(0u8, |step| async move {
        match step {
            0 => Some((Ok("a"), 1)),
            1 => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Some((Ok("b"), 2))
            }
            _ => None,
        }
    })
}
