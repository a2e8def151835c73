use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/projects", project_routes())
        .nest("/certificates", certificate_routes())
        .nest("/jobs", job_routes())
        .nest("/technologies", technology_routes())
        .nest("/tags", tag_routes())
        .nest("/socials", social_routes())
        .nest("/experiences", experience_routes())
        .nest("/i18n", i18n_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn project_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::projects::list_projects,
            handlers::projects::create_project
        ))
        .routes(routes!(
            handlers::projects::get_project,
            handlers::projects::update_project,
            handlers::projects::delete_project
        ))
}

fn certificate_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::certificates::list_certificates,
            handlers::certificates::create_certificate
        ))
        .routes(routes!(
            handlers::certificates::get_certificate,
            handlers::certificates::update_certificate,
            handlers::certificates::delete_certificate
        ))
}

fn job_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::jobs::list_jobs, handlers::jobs::create_job))
        .routes(routes!(
            handlers::jobs::get_job,
            handlers::jobs::update_job,
            handlers::jobs::delete_job
        ))
}

fn technology_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::technologies::list_technologies,
            handlers::technologies::create_technology
        ))
        .routes(routes!(
            handlers::technologies::get_technology,
            handlers::technologies::update_technology,
            handlers::technologies::delete_technology
        ))
}

fn tag_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::tags::list_tags, handlers::tags::create_tag))
        .routes(routes!(
            handlers::tags::get_tag,
            handlers::tags::update_tag,
            handlers::tags::delete_tag
        ))
}

fn social_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::socials::list_socials,
            handlers::socials::create_social
        ))
        .routes(routes!(
            handlers::socials::get_social,
            handlers::socials::update_social,
            handlers::socials::delete_social
        ))
}

fn experience_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::experiences::list_experiences,
            handlers::experiences::create_experience
        ))
        .routes(routes!(
            handlers::experiences::get_experience,
            handlers::experiences::update_experience,
            handlers::experiences::delete_experience
        ))
}

fn i18n_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::i18n::list_languages))
        .routes(routes!(
            handlers::i18n::get_language,
            handlers::i18n::update_language
        ))
}
