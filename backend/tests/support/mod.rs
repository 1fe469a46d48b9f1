//! Shared fixture for the HTTP integration suites: a fully wired application
//! over the in-memory adapters with an injectable clock.

// Each suite compiles its own copy; not every suite drives every helper.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use backend::domain::{
    BookingService, ItemCatalogService, ItemRequestService, UserAccountService,
};
use backend::inbound::http::HttpState;
use backend::inbound::http::validation::SHARER_USER_ID_HEADER;
use backend::outbound::persistence::{
    MemoryBookingRepository, MemoryCommentRepository, MemoryItemRepository,
    MemoryItemRequestRepository, MemoryStore, MemoryUserRepository,
};

/// The fixture's reference instant.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// `noon()` shifted by whole hours.
pub fn hour(offset: i64) -> DateTime<Utc> {
    noon() + chrono::TimeDelta::hours(offset)
}

/// Wire the full service stack over fresh in-memory stores.
pub fn state_with_clock(clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(MemoryUserRepository::new(Arc::clone(&store)));
    let items = Arc::new(MemoryItemRepository::new(Arc::clone(&store)));
    let bookings = Arc::new(MemoryBookingRepository::new(Arc::clone(&store)));
    let comments = Arc::new(MemoryCommentRepository::new(Arc::clone(&store)));
    let requests = Arc::new(MemoryItemRequestRepository::new(store));

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

    web::Data::new(HttpState {
        // Method-call clone so the concrete Arc unsize-coerces at the field.
        bookings: booking_service.clone(),
        bookings_query: booking_service,
        users: user_service,
        items: item_service,
        requests: request_service,
    })
}

/// Drive one request and decode the JSON body (or `Null` when empty).
pub async fn call<S, B>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// POST with the sharer header and a JSON body.
pub fn post(path: &str, user_id: i64, body: &Value) -> Request {
    actix_test::TestRequest::post()
        .uri(path)
        .insert_header((SHARER_USER_ID_HEADER, user_id.to_string()))
        .set_json(body)
        .to_request()
}

/// Body-less PATCH with the sharer header.
pub fn patch(path: &str, user_id: i64) -> Request {
    actix_test::TestRequest::patch()
        .uri(path)
        .insert_header((SHARER_USER_ID_HEADER, user_id.to_string()))
        .to_request()
}

/// PATCH with the sharer header and a JSON body.
pub fn patch_json(path: &str, user_id: i64, body: &Value) -> Request {
    actix_test::TestRequest::patch()
        .uri(path)
        .insert_header((SHARER_USER_ID_HEADER, user_id.to_string()))
        .set_json(body)
        .to_request()
}

/// GET with the sharer header.
pub fn get(path: &str, user_id: i64) -> Request {
    actix_test::TestRequest::get()
        .uri(path)
        .insert_header((SHARER_USER_ID_HEADER, user_id.to_string()))
        .to_request()
}

/// Register a user and return the assigned id.
pub async fn register_user<S, B>(app: &S, name: &str, email: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": name, "email": email }))
        .to_request();
    let (status, body) = call(app, request).await;
    assert_eq!(status, StatusCode::OK, "user registration failed: {body}");
    body.get("id").and_then(Value::as_i64).expect("user id")
}

/// List an available item for `owner_id` and return the assigned id.
pub async fn list_item<S, B>(app: &S, owner_id: i64, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = json!({ "name": name, "description": format!("a {name}"), "available": true });
    let (status, body) = call(app, post("/items", owner_id, &body)).await;
    assert_eq!(status, StatusCode::OK, "item listing failed: {body}");
    body.get("id").and_then(Value::as_i64).expect("item id")
}

/// Request a booking of `item_id` for the given window.
pub async fn book<S, B>(
    app: &S,
    booker_id: i64,
    item_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = json!({
        "itemId": item_id,
        "start": start.to_rfc3339(),
        "end": end.to_rfc3339(),
    });
    call(app, post("/bookings", booker_id, &body)).await
}
