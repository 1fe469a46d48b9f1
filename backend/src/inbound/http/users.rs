//! User API handlers.

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::{CreateUserRequest, UpdateUserRequest, UserPayload};

use super::error::ApiResult;
use super::state::HttpState;

/// User representation on the wire.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl From<UserPayload> for UserDto {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: payload.id.value(),
            name: payload.name,
            email: payload.email,
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserBody {
    /// Display name; must not be blank.
    pub name: String,
    /// Contact email; unique across users.
    pub email: String,
}

/// Body of `PATCH /users/{id}`; absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserBody {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 200, description = "User registered", body = UserDto),
        (status = 400, description = "Malformed name or email"),
        (status = 409, description = "Email already registered")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Json<CreateUserBody>,
) -> ApiResult<web::Json<UserDto>> {
    let body = body.into_inner();
    let payload = state
        .users
        .create_user(CreateUserRequest {
            name: body.name,
            email: body.email,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "No such user")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserDto>> {
    let payload = state.users.get_user(UserId::new(path.into_inner())).await?;
    Ok(web::Json(payload.into()))
}

/// Partially update a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 404, description = "No such user"),
        (status = 409, description = "Email already registered")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserDto>> {
    let body = body.into_inner();
    let payload = state
        .users
        .update_user(UpdateUserRequest {
            user_id: UserId::new(path.into_inner()),
            name: body.name,
            email: body.email,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// List every user, id ascending.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users", body = [UserDto])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserDto>>> {
    let payloads = state.users.list_users().await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}

/// Delete a user without bookings.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "No such user"),
        (status = 409, description = "User still participates in bookings")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<actix_web::HttpResponse> {
    state.users.delete_user(UserId::new(path.into_inner())).await?;
    Ok(actix_web::HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use mockall::predicate::eq;
    use serde_json::{Value, json};

    use crate::domain::Error;
    use crate::domain::ports::{
        MockBookingCommand, MockBookingQuery, MockItemRequestUseCases, MockItemUseCases,
        MockUserUseCases,
    };

    use super::*;

    fn state_with_users(users: MockUserUseCases) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            bookings: Arc::new(MockBookingCommand::new()),
            bookings_query: Arc::new(MockBookingQuery::new()),
            users: Arc::new(users),
            items: Arc::new(MockItemUseCases::new()),
            requests: Arc::new(MockItemRequestUseCases::new()),
        })
    }

    #[actix_web::test]
    async fn create_round_trips_the_payload_as_json() {
        let mut users = MockUserUseCases::new();
        users.expect_create_user().returning(|request| {
            Ok(UserPayload {
                id: UserId::new(1),
                name: request.name,
                email: request.email,
            })
        });
        let app = actix_test::init_service(
            App::new().app_data(state_with_users(users)).service(create_user),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(json!({"name": "ana", "email": "ana@example.com"}))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON body");
        assert_eq!(value.get("id").and_then(Value::as_i64), Some(1));
        assert_eq!(value.get("name").and_then(Value::as_str), Some("ana"));
    }

    #[actix_web::test]
    async fn duplicate_email_surfaces_as_409_with_a_code() {
        let mut users = MockUserUseCases::new();
        users
            .expect_create_user()
            .returning(|_| Err(Error::conflict("email ana@example.com is already registered")));
        let app = actix_test::init_service(
            App::new().app_data(state_with_users(users)).service(create_user),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(json!({"name": "ana", "email": "ana@example.com"}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON body");
        assert_eq!(value.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn delete_passes_the_path_id_through() {
        let mut users = MockUserUseCases::new();
        users
            .expect_delete_user()
            .with(eq(UserId::new(7)))
            .returning(|_| Ok(()));
        let app = actix_test::init_service(
            App::new().app_data(state_with_users(users)).service(delete_user),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/users/7").to_request(),
        )
        .await;
        assert!(response.status().is_success());
    }
}
