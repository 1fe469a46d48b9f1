//! Item-request API handlers.

use actix_web::{HttpRequest, get, post, web};
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use crate::domain::RequestId;
use crate::domain::ports::{ItemRequestPayload, NewItemRequest};

use super::error::ApiResult;
use super::items::ItemDto;
use super::state::HttpState;
use super::validation::{PageParams, require_user_id};

/// Item request representation on the wire.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// What the requester is looking for.
    pub description: String,
    /// The filing user.
    pub requester_id: i64,
    /// Creation instant.
    pub created: DateTime<Utc>,
    /// Items listed in answer to this request.
    pub items: Vec<ItemDto>,
}

impl From<ItemRequestPayload> for ItemRequestDto {
    fn from(payload: ItemRequestPayload) -> Self {
        Self {
            id: payload.id.value(),
            description: payload.description,
            requester_id: payload.requester_id.value(),
            created: payload.created,
            items: payload.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of `POST /requests`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateRequestBody {
    /// What the requester is looking for; must not be blank.
    pub description: String,
}

/// File an item request.
#[utoipa::path(
    post,
    path = "/requests",
    request_body = CreateRequestBody,
    params(("X-Sharer-User-Id" = i64, Header, description = "Filing user")),
    responses(
        (status = 200, description = "Request filed", body = ItemRequestDto),
        (status = 400, description = "Blank description"),
        (status = 404, description = "Unknown user")
    ),
    tags = ["requests"],
    operation_id = "createItemRequest"
)]
#[post("/requests")]
pub async fn create_request(
    request: HttpRequest,
    state: web::Data<HttpState>,
    body: web::Json<CreateRequestBody>,
) -> ApiResult<web::Json<ItemRequestDto>> {
    let requester_id = require_user_id(&request)?;
    let payload = state
        .requests
        .create_request(NewItemRequest {
            requester_id,
            description: body.into_inner().description,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// The calling user's own requests, newest first.
#[utoipa::path(
    get,
    path = "/requests",
    params(
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Filing user")
    ),
    responses(
        (status = 200, description = "Own requests with answering items", body = [ItemRequestDto]),
        (status = 404, description = "Unknown user")
    ),
    tags = ["requests"],
    operation_id = "listOwnRequests"
)]
#[get("/requests")]
pub async fn list_own_requests(
    request: HttpRequest,
    state: web::Data<HttpState>,
    page: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<ItemRequestDto>>> {
    let requester_id = require_user_id(&request)?;
    let page = PageRequest::try_from(page.into_inner())?;
    let payloads = state.requests.list_own_requests(requester_id, page).await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}

/// Everyone else's requests, newest first.
#[utoipa::path(
    get,
    path = "/requests/all",
    params(
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Browsing user")
    ),
    responses(
        (status = 200, description = "Other users' requests", body = [ItemRequestDto]),
        (status = 404, description = "Unknown user")
    ),
    tags = ["requests"],
    operation_id = "listOtherRequests"
)]
#[get("/requests/all")]
pub async fn list_other_requests(
    request: HttpRequest,
    state: web::Data<HttpState>,
    page: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<ItemRequestDto>>> {
    let user_id = require_user_id(&request)?;
    let page = PageRequest::try_from(page.into_inner())?;
    let payloads = state.requests.list_other_requests(user_id, page).await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}

/// One request with its answering items.
#[utoipa::path(
    get,
    path = "/requests/{id}",
    params(
        ("id" = i64, Path, description = "Request identifier"),
        ("X-Sharer-User-Id" = i64, Header, description = "Browsing user")
    ),
    responses(
        (status = 200, description = "Request with answering items", body = ItemRequestDto),
        (status = 404, description = "Unknown request or user")
    ),
    tags = ["requests"],
    operation_id = "getItemRequest"
)]
#[get("/requests/{id}")]
pub async fn get_request(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ItemRequestDto>> {
    let user_id = require_user_id(&request)?;
    let payload = state
        .requests
        .get_request(RequestId::new(path.into_inner()), user_id)
        .await?;
    Ok(web::Json(payload.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use crate::domain::ports::{
        ItemPayload, MockBookingCommand, MockBookingQuery, MockItemRequestUseCases,
        MockItemUseCases, MockUserUseCases,
    };
    use crate::domain::{ItemId, UserId};

    use super::super::validation::SHARER_USER_ID_HEADER;
    use super::*;

    fn state_with_requests(requests: MockItemRequestUseCases) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            bookings: Arc::new(MockBookingCommand::new()),
            bookings_query: Arc::new(MockBookingQuery::new()),
            users: Arc::new(MockUserUseCases::new()),
            items: Arc::new(MockItemUseCases::new()),
            requests: Arc::new(requests),
        })
    }

    fn filed_payload() -> ItemRequestPayload {
        ItemRequestPayload {
            id: RequestId::new(4),
            description: "need a drill".to_owned(),
            requester_id: UserId::new(2),
            created: Utc
                .with_ymd_and_hms(2024, 1, 10, 9, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
            items: vec![ItemPayload {
                id: ItemId::new(10),
                name: "drill".to_owned(),
                description: "cordless drill".to_owned(),
                available: true,
                owner_id: UserId::new(1),
                request_id: Some(RequestId::new(4)),
            }],
        }
    }

    #[actix_web::test]
    async fn filing_round_trips_with_answering_items() {
        let mut requests = MockItemRequestUseCases::new();
        requests
            .expect_create_request()
            .withf(|request| request.requester_id == UserId::new(2))
            .returning(|_| Ok(filed_payload()));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with_requests(requests))
                .service(create_request),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/requests")
                .insert_header((SHARER_USER_ID_HEADER, "2"))
                .set_json(json!({"description": "need a drill"}))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON body");
        assert_eq!(value.get("requesterId").and_then(Value::as_i64), Some(2));
        assert_eq!(
            value.pointer("/items/0/requestId").and_then(Value::as_i64),
            Some(4)
        );
    }

    #[actix_web::test]
    async fn all_listing_is_registered_before_the_id_route() {
        let mut requests = MockItemRequestUseCases::new();
        requests
            .expect_list_other_requests()
            .returning(|_, _| Ok(vec![filed_payload()]));
        // Both routes mounted: /requests/all must not be captured by {id}.
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with_requests(requests))
                .service(list_other_requests)
                .service(get_request),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/requests/all")
                .insert_header((SHARER_USER_ID_HEADER, "2"))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON body");
        assert!(value.is_array());
    }
}
