//! End-to-end coverage for user accounts, the item catalogue, comments, and
//! item requests over the in-memory adapters.

mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use serde_json::{Value, json};

use backend::inbound::http;
use backend::test_support::{FixtureClock, MutableClock};

use support::{
    book, call, get, hour, list_item, noon, patch, patch_json, post, register_user,
    state_with_clock,
};

#[actix_web::test]
async fn duplicate_emails_conflict_but_own_email_may_be_restated() {
    let state = state_with_clock(Arc::new(FixtureClock::at(noon())));
    let app =
        actix_test::init_service(App::new().app_data(state).configure(http::configure)).await;

    let ana = register_user(&app, "ana", "ana@example.com").await;
    register_user(&app, "ben", "ben@example.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "imposter", "email": "ana@example.com" }))
        .to_request();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));

    // Restating one's own email is not a conflict.
    let (status, updated) = call(
        &app,
        patch_json(
            &format!("/users/{ana}"),
            ana,
            &json!({ "name": "ana maria", "email": "ana@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated.get("name").and_then(Value::as_str),
        Some("ana maria")
    );

    // Moving onto someone else's email is.
    let (status, _) = call(
        &app,
        patch_json(
            &format!("/users/{ana}"),
            ana,
            &json!({ "email": "ben@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn search_matches_available_items_case_insensitively() {
    let state = state_with_clock(Arc::new(FixtureClock::at(noon())));
    let app =
        actix_test::init_service(App::new().app_data(state).configure(http::configure)).await;

    let owner = register_user(&app, "olive", "olive@example.com").await;
    let drill = list_item(&app, owner, "Cordless Drill").await;
    list_item(&app, owner, "ladder").await;

    // An unavailable match stays out of the results.
    let body = json!({ "name": "Broken Drill", "description": "parts only", "available": false });
    let (status, _) = call(&app, post("/items", owner, &body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, found) = call(&app, get("/items/search?text=dRiLl", owner)).await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().expect("array body");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("id").and_then(Value::as_i64), Some(drill));

    // Blank text yields no results rather than everything.
    let (status, found) = call(&app, get("/items/search?text=", owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn commenting_requires_a_finished_booking() {
    let clock = Arc::new(MutableClock::new(noon()));
    let state = state_with_clock(clock.clone());
    let app =
        actix_test::init_service(App::new().app_data(state).configure(http::configure)).await;

    let owner = register_user(&app, "olive", "olive@example.com").await;
    let booker = register_user(&app, "bella", "bella@example.com").await;
    let item = list_item(&app, owner, "drill").await;

    let (status, booking) = book(&app, booker, item, hour(1), hour(2)).await;
    assert_eq!(status, StatusCode::OK);
    let booking_id = booking.get("id").and_then(Value::as_i64).expect("id");
    let (status, _) = call(
        &app,
        patch(&format!("/bookings/{booking_id}?approved=true"), owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The booking has not ended yet.
    let comment = json!({ "text": "great drill" });
    let (status, body) = call(
        &app,
        post(&format!("/items/{item}/comment"), booker, &comment),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("not_available")
    );

    clock.advance_seconds(3 * 3600);
    let (status, posted) = call(
        &app,
        post(&format!("/items/{item}/comment"), booker, &comment),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        posted.get("authorName").and_then(Value::as_str),
        Some("bella")
    );

    // Everyone sees comments on the detail view.
    let stranger = register_user(&app, "sam", "sam@example.com").await;
    let (status, details) = call(&app, get(&format!("/items/{item}"), stranger)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        details.pointer("/comments/0/text").and_then(Value::as_str),
        Some("great drill")
    );
}

#[actix_web::test]
async fn owner_detail_view_carries_booking_projections() {
    let state = state_with_clock(Arc::new(FixtureClock::at(noon())));
    let app =
        actix_test::init_service(App::new().app_data(state).configure(http::configure)).await;

    let owner = register_user(&app, "olive", "olive@example.com").await;
    let booker = register_user(&app, "bella", "bella@example.com").await;
    let item = list_item(&app, owner, "drill").await;

    let (_, booking) = book(&app, booker, item, hour(2), hour(4)).await;
    let booking_id = booking.get("id").and_then(Value::as_i64).expect("id");
    let (status, _) = call(
        &app,
        patch(&format!("/bookings/{booking_id}?approved=true"), owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, details) = call(&app, get(&format!("/items/{item}"), owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        details
            .pointer("/nextBooking/bookerId")
            .and_then(Value::as_i64),
        Some(booker)
    );
    assert!(details.get("lastBooking").is_some_and(Value::is_null));

    // Non-owners never see the projections.
    let (status, details) = call(&app, get(&format!("/items/{item}"), booker)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(details.get("nextBooking").is_some_and(Value::is_null));
}

#[actix_web::test]
async fn item_requests_join_their_answering_items() {
    let state = state_with_clock(Arc::new(FixtureClock::at(noon())));
    let app =
        actix_test::init_service(App::new().app_data(state).configure(http::configure)).await;

    let requester = register_user(&app, "rita", "rita@example.com").await;
    let owner = register_user(&app, "olive", "olive@example.com").await;

    let (status, filed) = call(
        &app,
        post("/requests", requester, &json!({ "description": "need a drill" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let request_id = filed.get("id").and_then(Value::as_i64).expect("id");
    assert_eq!(filed.pointer("/items").and_then(Value::as_array).map(Vec::len), Some(0));

    // An owner lists an item answering the request.
    let body = json!({
        "name": "drill",
        "description": "cordless drill",
        "available": true,
        "requestId": request_id,
    });
    let (status, item) = call(&app, post("/items", owner, &body)).await;
    assert_eq!(status, StatusCode::OK);
    let item_id = item.get("id").and_then(Value::as_i64).expect("id");

    let (status, fetched) = call(&app, get(&format!("/requests/{request_id}"), owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched.pointer("/items/0/id").and_then(Value::as_i64),
        Some(item_id)
    );

    // Own listing carries it; the browse listing hides one's own requests.
    let (status, own) = call(&app, get("/requests", requester)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own.pointer("/0/id").and_then(Value::as_i64), Some(request_id));

    let (status, others) = call(&app, get("/requests/all", requester)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(others.as_array().map(Vec::len), Some(0));

    let (status, others) = call(&app, get("/requests/all", owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        others.pointer("/0/id").and_then(Value::as_i64),
        Some(request_id)
    );
}

#[actix_web::test]
async fn users_with_bookings_cannot_be_deleted() {
    let state = state_with_clock(Arc::new(FixtureClock::at(noon())));
    let app =
        actix_test::init_service(App::new().app_data(state).configure(http::configure)).await;

    let owner = register_user(&app, "olive", "olive@example.com").await;
    let booker = register_user(&app, "bella", "bella@example.com").await;
    let idle = register_user(&app, "sam", "sam@example.com").await;
    let item = list_item(&app, owner, "drill").await;

    let (status, _) = book(&app, booker, item, hour(1), hour(3)).await;
    assert_eq!(status, StatusCode::OK);

    // Both sides of the booking are pinned.
    for user in [booker, owner] {
        let request = actix_test::TestRequest::delete()
            .uri(&format!("/users/{user}"))
            .to_request();
        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    }

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/users/{idle}"))
        .to_request();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, get(&format!("/users/{idle}"), owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
