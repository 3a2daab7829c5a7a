use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "API for managing user accounts of the campus service"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::UsersApiDoc)
    )
)]
pub struct ApiDoc;
