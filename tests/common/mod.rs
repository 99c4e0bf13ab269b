//! Local stand-in for the FDSN event service.

#![allow(dead_code)]

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use quakeboard::catalog::{CatalogClient, Endpoints};
use quakeboard::session::FetchSession;
use quakeboard::utils::{DisplayZone, TimeDisplay};

pub const METADATA_JSON: &str = r#"{
    "catalogs": ["ak", "ci", "us"],
    "contributors": ["ak", "us"],
    "producttypes": ["origin", "phase-data", "shakemap", "dyfi"],
    "eventtypes": ["earthquake", "quarry blast"],
    "magnitudetypes": ["mb", "md", "ml", "mw", "mww"]
}"#;

pub const EVENTS_JSON: &str = r#"{
    "type": "FeatureCollection",
    "metadata": {"generated": 1388620800000, "count": 2},
    "features": [
        {"type": "Feature", "id": "ak11155107",
         "properties": {"place": "26km S of Redoubt Volcano, Alaska", "mag": 1.1, "time": 1388620296020},
         "geometry": {"type": "Point", "coordinates": [-152.7, 60.2, 90.1]}},
        {"type": "Feature", "id": "x",
         "properties": {"place": "Region A", "mag": 4.5, "time": 1388534400000},
         "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 10.0]}}
    ]
}"#;

/// How a fixture endpoint answers.
#[derive(Clone)]
pub enum Reply {
    Json(&'static str),
    Status(u16),
    /// Never answers.
    Never,
    Delayed(Duration, &'static str),
}

impl Reply {
    async fn respond(self) -> Response {
        match self {
            Reply::Json(body) => json(body),
            Reply::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Reply::Never => std::future::pending::<Response>().await,
            Reply::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                json(body)
            }
        }
    }
}

fn json(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Serve `/application.json` and `/query` on an ephemeral port; returns the base URL.
pub async fn spawn_catalog(metadata: Reply, query: Reply) -> String {
    let router = Router::new()
        .route(
            "/application.json",
            get(move || metadata.clone().respond()),
        )
        .route("/query", get(move || query.clone().respond()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fixture server");
    });
    format!("http://{}", addr)
}

/// ISO-like times keep assertions independent of the host zone and of how
/// templates escape slashes.
pub fn test_time_display() -> TimeDisplay {
    TimeDisplay::new(DisplayZone::Utc, "%Y-%m-%d %H:%M:%S").expect("valid time format")
}

pub fn session_for(base: &str) -> FetchSession {
    FetchSession::new(
        CatalogClient::new(None, Some(Duration::from_secs(10))).expect("client"),
        Endpoints::new(base, "2014-01-01", "2014-01-02").expect("endpoints"),
        test_time_display(),
    )
}
