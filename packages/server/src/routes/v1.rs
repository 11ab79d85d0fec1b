use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/events", event_routes())
        .nest("/registrations", registration_routes())
        .nest("/winners", winner_routes())
        .nest("/dashboard", dashboard_routes())
        .route("/contact", post(handlers::registration::contact))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::current_session))
        .route("/guard", get(handlers::auth::evaluate_guard))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route("/active", get(handlers::event::active_event))
        .route("/{id}", patch(handlers::event::update_event))
}

fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::registration::list_registrations)
                .post(handlers::registration::create_registration),
        )
        .route("/{id}/status", patch(handlers::registration::update_status))
}

fn winner_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::winner::list_winners).post(handlers::winner::create_winner),
    )
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/school", get(handlers::dashboard::school_dashboard))
        .route("/admin", get(handlers::dashboard::admin_dashboard))
}
