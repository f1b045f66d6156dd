use std::net::SocketAddr;
use std::sync::Arc;
use innova_api::{app, state::{AppState, AuthConfig}};
use innova_booking::SlotMenu;
use innova_core::{AreaCatalog, ReservationStore};
use innova_store::{Config, HttpBackend, InMemoryBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innova_api=debug,innova_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting InnovaBuilding scheduling API on port {}", config.server.port);

    let (areas, reservations): (Arc<dyn AreaCatalog>, Arc<dyn ReservationStore>) = if config.backend.is_in_memory() {
        tracing::warn!(
            areas = config.backend.seed_areas.len(),
            "No backend URL configured, serving from the in-memory store"
        );
        let backend = Arc::new(InMemoryBackend::with_areas(config.backend.seed_areas.clone()));
        let areas: Arc<dyn AreaCatalog> = backend.clone();
        let reservations: Arc<dyn ReservationStore> = backend;
        (areas, reservations)
    } else {
        tracing::info!(base_url = %config.backend.base_url, "Using REST backend");
        let mut backend = HttpBackend::new(&config.backend)?;
        if let Some(zone) = config.scheduling.building_timezone()? {
            tracing::info!(timezone = %zone, "Converting backend timestamps to building time");
            backend = backend.with_timezone(zone);
        }
        let backend = Arc::new(backend);
        let areas: Arc<dyn AreaCatalog> = backend.clone();
        let reservations: Arc<dyn ReservationStore> = backend;
        (areas, reservations)
    };

    let slots = SlotMenu::new(config.scheduling.first_slot_hour, config.scheduling.last_slot_hour)?;

    let app_state = AppState {
        areas,
        reservations,
        slots,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
