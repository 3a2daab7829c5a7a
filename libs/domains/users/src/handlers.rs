use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::ValidatedJson;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{UserError, UserResult};
use crate::models::UserDto;
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router with all HTTP endpoints.
///
/// The handler layer owns nothing but the verb-to-service mapping and the
/// DTO boundary; all persistence side effects happen behind the service.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/filter", get(filter_by_name))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// OpenAPI documentation for the users endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, filter_by_name, create_user, update_user, delete_user),
    components(schemas(UserDto)),
    tags((name = "users", description = "Operations related to user management"))
)]
pub struct UsersApiDoc;

/// Query parameters for name filtering
#[derive(Debug, Deserialize, IntoParams)]
pub struct NameFilter {
    /// Login name to look up
    pub name: String,
}

/// Get all users
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    responses(
        (status = 200, description = "All users as a JSON array", body = Vec<UserDto>)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserDto>>> {
    let users = service.list_all().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user with the provided ID", body = UserDto),
        (status = 404, description = "No user with the provided ID exists")
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<i64>,
) -> UserResult<Json<UserDto>> {
    let user = service.get_by_id(id).await?;
    Ok(Json(user.into()))
}

/// Get a user by login name
#[utoipa::path(
    get,
    path = "/filter",
    tag = "users",
    params(NameFilter),
    responses(
        (status = 200, description = "The user with the provided login name", body = UserDto),
        (status = 404, description = "No user with the provided login name exists")
    )
)]
async fn filter_by_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(filter): Query<NameFilter>,
) -> UserResult<Json<UserDto>> {
    let user = service.get_by_name(&filter.name).await?;
    Ok(Json(user.into()))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "users",
    request_body = UserDto,
    responses(
        (status = 201, description = "The new user, with assigned id and timestamps", body = UserDto),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Login name or email address already in use")
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UserDto>,
) -> UserResult<impl IntoResponse> {
    let created: UserDto = service.upsert(input.into()).await?.into();

    let id = created
        .id
        .ok_or_else(|| UserError::Internal("Persisted user has no id".to_string()))?;
    let location = format!("/api/users/{}", id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// Update an existing user by ID
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserDto,
    responses(
        (status = 200, description = "The updated user", body = UserDto),
        (status = 400, description = "Validation failed, or path and body IDs do not match"),
        (status = 404, description = "No user with the provided ID exists"),
        (status = 409, description = "Login name or email address already in use")
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UserDto>,
) -> UserResult<Json<UserDto>> {
    if input.id != Some(id) {
        return Err(UserError::Validation(
            "User ID in path and body do not match.".to_string(),
        ));
    }

    let updated = service.upsert(input.into()).await?;
    Ok(Json(updated.into()))
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "The user was deleted"),
        (status = 404, description = "No user with the provided ID exists")
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<i64>,
) -> UserResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        router(UserService::new(InMemoryUserRepository::new()))
    }

    fn jdoe() -> Value {
        json!({
            "name": "jdoe",
            "emailAddress": "j@x.com",
            "firstName": "Jane",
            "lastName": "Doe"
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value, Option<String>) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body, location)
    }

    #[tokio::test]
    async fn test_create_returns_201_with_location_and_assigned_fields() {
        let app = app();

        let (status, body, location) = send(&app, "POST", "/", Some(jdoe())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(location.as_deref(), Some("/api/users/1"));
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "jdoe");
        assert_eq!(body["emailAddress"], "j@x.com");
        assert!(!body["createdAt"].is_null());
        assert!(!body["updatedAt"].is_null());
    }

    #[tokio::test]
    async fn test_create_with_duplicate_name_is_conflict() {
        let app = app();
        send(&app, "POST", "/", Some(jdoe())).await;

        let duplicate = json!({
            "name": "jdoe",
            "emailAddress": "different@x.com",
            "firstName": "John",
            "lastName": "Doe"
        });
        let (status, body, _) = send(&app, "POST", "/", Some(duplicate)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CONFLICT");
        assert!(body["message"].as_str().unwrap().contains("jdoe"));
    }

    #[tokio::test]
    async fn test_create_with_invalid_body_reports_field_details() {
        let app = app();

        let invalid = json!({
            "name": "not a valid name!",
            "emailAddress": "j@x.com",
            "firstName": "Jane",
            "lastName": "Doe"
        });
        let (status, body, _) = send(&app, "POST", "/", Some(invalid)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"].get("name").is_some());
    }

    #[tokio::test]
    async fn test_create_with_invalid_email_is_rejected() {
        let app = app();

        let invalid = json!({
            "name": "jdoe",
            "emailAddress": "not-an-email",
            "firstName": "Jane",
            "lastName": "Doe"
        });
        let (status, body, _) = send(&app, "POST", "/", Some(invalid)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].get("email_address").is_some());
    }

    #[tokio::test]
    async fn test_list_returns_all_users() {
        let app = app();
        send(&app, "POST", "/", Some(jdoe())).await;
        send(
            &app,
            "POST",
            "/",
            Some(json!({
                "name": "asmith",
                "emailAddress": "a@x.com",
                "firstName": "Alex",
                "lastName": "Smith"
            })),
        )
        .await;

        let (status, body, _) = send(&app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["name"], "jdoe");
        assert_eq!(users[1]["name"], "asmith");
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let app = app();
        let (_, created, _) = send(&app, "POST", "/", Some(jdoe())).await;

        let (status, fetched, _) = send(&app, "GET", "/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let app = app();

        let (status, body, _) = send(&app, "GET", "/999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_filter_by_name() {
        let app = app();
        send(&app, "POST", "/", Some(jdoe())).await;

        let (status, body, _) = send(&app, "GET", "/filter?name=jdoe", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);

        let (status, _, _) = send(&app, "GET", "/filter?name=ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_filter_without_name_parameter_is_400() {
        let app = app();

        let request = Request::builder()
            .method("GET")
            .uri("/filter")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_changes_fields_and_keeps_id() {
        let app = app();
        let (_, created, _) = send(&app, "POST", "/", Some(jdoe())).await;

        let mut update = created.clone();
        update["lastName"] = json!("Smith");
        let (status, updated, _) = send(&app, "PUT", "/1", Some(update)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["lastName"], "Smith");
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn test_update_with_mismatched_ids_is_400() {
        let app = app();
        send(&app, "POST", "/", Some(jdoe())).await;

        let mut body = jdoe();
        body["id"] = json!(1);
        let (status, response, _) = send(&app, "PUT", "/2", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            response["message"]
                .as_str()
                .unwrap()
                .contains("path and body")
        );
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_is_404() {
        let app = app();

        let mut body = jdoe();
        body["id"] = json!(999);
        let (status, _, _) = send(&app, "PUT", "/999", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let app = app();
        send(&app, "POST", "/", Some(jdoe())).await;

        let (status, body, _) = send(&app, "DELETE", "/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _, _) = send(&app, "GET", "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, "DELETE", "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let app = app();

        let request = Request::builder()
            .method("GET")
            .uri("/abc")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
