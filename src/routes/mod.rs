use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{fare, health, promo, tracking};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Booking form: fare quotes and promo widget
    let fare_routes = Router::new()
        .route("/estimate", post(fare::estimate_fare))
        .route("/estimate", get(fare::estimate_fare_query));

    let promo_routes = Router::new()
        .route("/", get(promo::list_promos))
        .route("/validate", post(promo::validate_promo));

    // Rider and passenger tracking pages poll this while a ride awaits pickup
    let tracking_routes = Router::new().route("/eta", get(tracking::live_eta));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/vehicles", get(fare::list_vehicles))
        .nest("/api/fares", fare_routes)
        .nest("/api/promos", promo_routes)
        .nest("/api/tracking", tracking_routes)
        .with_state(state)
}
