//! HTTP handlers for the statistics endpoints.

use crate::analytics::engine;
use crate::store::records::RecordStore;
use axum::extract::Extension;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

/// `GET /analytics`: full nested report.
pub async fn handle_analytics(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    match engine::analytics_report(&store).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => err.response().into_response(),
    }
}

/// `GET /stats`: flat key metrics only.
pub async fn handle_stats(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    match engine::stats_summary(&store).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => err.response().into_response(),
    }
}
