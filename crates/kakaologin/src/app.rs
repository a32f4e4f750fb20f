use axum::{routing::get, Router};
use kakaologin_auth::{auth_routes, AuthState};
use kakaologin_core::pages::Page;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        health::livez,
        pages::{challenge, index, mypage},
    },
    state::AppState,
};

/// Directory holding `img/` and `css/`.
const PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let auth: Router = auth_routes().with_state(AuthState::clone(&state.auth));

    Router::new()
        .route(Page::Home.path(), get(index))
        .route(Page::MyPage.path(), get(mypage))
        .route(Page::Challenge.path(), get(challenge))
        .route("/livez", get(livez))
        .nest_service("/img", ServeDir::new(format!("{PUBLIC_DIR}/img")))
        .nest_service("/css", ServeDir::new(format!("{PUBLIC_DIR}/css")))
        .with_state(state)
        .merge(auth)
        .layer(TraceLayer::new_for_http())
}
