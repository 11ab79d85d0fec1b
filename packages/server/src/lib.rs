pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mathematics Tournament Portal API",
        version = "1.0.0",
        description = "Registration and triage backend for the mathematics tournament"
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::current_session,
        handlers::auth::evaluate_guard,
        handlers::event::list_events,
        handlers::event::active_event,
        handlers::event::create_event,
        handlers::event::update_event,
        handlers::registration::create_registration,
        handlers::registration::contact,
        handlers::registration::list_registrations,
        handlers::registration::update_status,
        handlers::dashboard::school_dashboard,
        handlers::dashboard::admin_dashboard,
        handlers::winner::list_winners,
        handlers::winner::create_winner,
    ),
    tags(
        (name = "Auth", description = "Sign-in, sessions, and the route guard"),
        (name = "Events", description = "Tournament events"),
        (name = "Registrations", description = "Public submissions and admin triage"),
        (name = "Dashboards", description = "Role-scoped review views"),
        (name = "Winners", description = "Past tournament results"),
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

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}
