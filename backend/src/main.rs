//! Backend entry-point: wires the in-memory store, domain services, REST
//! endpoints, and health probes.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::{
    BookingService, ItemCatalogService, ItemRequestService, UserAccountService,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::{self, HttpState};
use backend::outbound::persistence::{
    MemoryBookingRepository, MemoryCommentRepository, MemoryItemRepository,
    MemoryItemRequestRepository, MemoryStore, MemoryUserRepository,
};

fn build_http_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(MemoryUserRepository::new(Arc::clone(&store)));
    let items = Arc::new(MemoryItemRepository::new(Arc::clone(&store)));
    let bookings = Arc::new(MemoryBookingRepository::new(Arc::clone(&store)));
    let comments = Arc::new(MemoryCommentRepository::new(Arc::clone(&store)));
    let requests = Arc::new(MemoryItemRequestRepository::new(store));
    let clock: Arc<dyn mockable::Clock> = Arc::new(DefaultClock);

    let booking_service = Arc::new(BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&items),
        Arc::clone(&users),
        Arc::clone(&clock),
    ));
    let user_service = Arc::new(UserAccountService::new(
        Arc::clone(&users),
        Arc::clone(&bookings),
    ));
    let item_service = Arc::new(ItemCatalogService::new(
        Arc::clone(&items),
        Arc::clone(&users),
        Arc::clone(&bookings),
        comments,
        Arc::clone(&requests),
        Arc::clone(&clock),
    ));
    let request_service = Arc::new(ItemRequestService::new(requests, items, users, clock));

    HttpState {
        // Method-call clone so the concrete Arc unsize-coerces at the field.
        bookings: booking_service.clone(),
        bookings_query: booking_service,
        users: user_service,
        items: item_service,
        requests: request_service,
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let http_state = web::Data::new(build_http_state());
    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .app_data(server_health_state.clone())
            .configure(http::configure)
            .service(ready)
            .service(live)
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
