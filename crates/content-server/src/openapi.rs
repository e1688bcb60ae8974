use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Content Module API",
        version = "0.1.0",
        description = "CRUD endpoints for content entries (title, description, subtitle, thumb, source)."
    ),
    servers(
        (url = "/api/content-module", description = "Default mount prefix")
    ),
    paths(
        crate::routes::list_contents,
        crate::routes::create_content,
        crate::routes::show_content,
        crate::routes::update_content,
        crate::routes::delete_content,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::CreateContentRequest,
        crate::dto::UpdateContentRequest,
        crate::dto::ContentResource,
        crate::dto::ContentEnvelope,
        crate::dto::ContentCollection,
        crate::dto::PaginationLinks,
        crate::dto::PaginationMeta,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "contents", description = "Content management"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
