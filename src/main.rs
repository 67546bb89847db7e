use axum::extract::Extension;
use axum::routing::get;
use axum::Router;
use hospital_registry::analytics::handlers::{handle_analytics, handle_stats};
use hospital_registry::config::{Config, HTTP_PORT};
use hospital_registry::entities::handlers::{
    handle_create_diagnosis, handle_create_doctor, handle_create_hospital, handle_create_patient,
    handle_create_relation, handle_diagnosis_page, handle_doctor_page, handle_hospital_page,
    handle_index, handle_patient_page, handle_relation_page,
};
use hospital_registry::store::kv::RedisStore;
use hospital_registry::store::records::RecordStore;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Connecting to Redis at {}:{}",
        config.redis_host,
        config.redis_port
    );

    // 1. Store layer:
    let redis = RedisStore::connect(&config.redis_url()).await?;
    let store = Arc::new(RecordStore::new(Arc::new(redis)));

    // 2. One-time counter setup, idempotent across restarts:
    store.init_db().await?;

    // 3. HTTP Router:
    let app = Router::new()
        .route("/", get(handle_index))
        .route(
            "/hospital",
            get(handle_hospital_page).post(handle_create_hospital),
        )
        .route("/doctor", get(handle_doctor_page).post(handle_create_doctor))
        .route(
            "/patient",
            get(handle_patient_page).post(handle_create_patient),
        )
        .route(
            "/diagnosis",
            get(handle_diagnosis_page).post(handle_create_diagnosis),
        )
        .route(
            "/doctor-patient",
            get(handle_relation_page).post(handle_create_relation),
        )
        .route("/analytics", get(handle_analytics))
        .route("/stats", get(handle_stats))
        .layer(Extension(store));

    // 4. Start HTTP server:
    let addr = SocketAddr::from(([0, 0, 0, 0], HTTP_PORT));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
