// src/exporter.rs

//! HTTP `/metrics` endpoint over one shared sensor session.

use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::error;

use crate::common::{ByteSource, PollOutcome};
use crate::exposition;
use crate::sensor::SensorSession;

/// One sensor, one port: scrapes take turns.
pub type SharedSession<S> = Arc<Mutex<SensorSession<S>>>;

/// Renders one poll in the Prometheus text format.
///
/// Uses a fresh recorder per call, so only the gauges of this poll appear.
pub fn render(outcome: &PollOutcome) -> String {
    let recorder = PrometheusBuilder::new().build_recorder();
    metrics::with_local_recorder(&recorder, || {
        for (gauge, value) in exposition::gauge_values(outcome) {
            gauge.describe();
            metrics::gauge!(gauge.name).set(value);
        }
    });
    recorder.handle().render()
}

/// Router serving `/metrics`, polling `session` once per scrape.
pub fn router<S>(session: SensorSession<S>) -> Router
where
    S: ByteSource + Send + 'static,
    S::Error: Send + 'static,
{
    let state: SharedSession<S> = Arc::new(Mutex::new(session));
    Router::new().route("/metrics", get(scrape::<S>)).with_state(state)
}

/// `/metrics` handler. A source fault answers 503 and leaves the server up.
pub async fn scrape<S>(State(session): State<SharedSession<S>>) -> Response
where
    S: ByteSource + Send + 'static,
    S::Error: Send + 'static,
{
    // Serial reads block, keep them off the async workers
    let polled = tokio::task::spawn_blocking(move || {
        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        session.poll()
    })
    .await;

    match polled {
        Ok(Ok(outcome)) => ([(header::CONTENT_TYPE, exposition::CONTENT_TYPE)], render(&outcome)).into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "Sensor read failed");
            (StatusCode::SERVICE_UNAVAILABLE, format!("sensor unavailable: {e}\n")).into_response()
        }
        Err(e) => {
            error!(error = %e, "Poll task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
