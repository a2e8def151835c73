pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod media;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "1.0.0",
        description = "Backend for a personal portfolio site: projects, certificates, jobs, \
            technologies, tags, socials, experiences, image uploads, and translations"
    ),
    tags(
        (name = "Auth", description = "Administrator authentication"),
        (name = "Projects", description = "Project CRUD with technology and tag associations"),
        (name = "Certificates", description = "Certificate CRUD"),
        (name = "Jobs", description = "Job CRUD"),
        (name = "Technologies", description = "Technology CRUD"),
        (name = "Tags", description = "Tag CRUD"),
        (name = "Socials", description = "Social link CRUD"),
        (name = "Experiences", description = "Work experience CRUD"),
        (name = "I18n", description = "Translation file management"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::routes())
        .split_for_parts();

    let app = router
        .route("/static/images/{key}", get(handlers::media::serve_image))
        .layer(media::upload_body_limit())
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api));

    // Collection routes are registered at `/` under each nest (e.g. `/projects/`),
    // so normalize trailing slashes before routing to keep those paths reachable.
    axum::Router::new().fallback_service(NormalizePath::trim_trailing_slash(app))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}
