//! Server-rendered pages.
//!
//! `/`, `/mypage` and `/challenge` share a header driven by the session:
//! nickname, avatar, login state and rank.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use kakaologin_auth::Session;
use kakaologin_core::pages::{Notice, PageView};
use serde::Deserialize;

use crate::{handlers::AppError, state::AppState};

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

/// Query flags set by the auth redirects.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub msg: Option<String>,
}

impl PageQuery {
    fn notice(&self) -> Option<Notice> {
        self.msg.as_deref().and_then(Notice::from_msg)
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    view: PageView,
    notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "mypage.html")]
struct MyPageTemplate {
    view: PageView,
    notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "challenge.html")]
struct ChallengeTemplate {
    view: PageView,
    notice: Option<Notice>,
}

/// Build the shared view model. Logged-in users get their rank looked up.
async fn page_view(state: &AppState, session: &Session) -> Result<PageView, AppError> {
    match session.profile() {
        None => Ok(PageView::anonymous()),
        Some(profile) => {
            let ranking = state.users().get_level(&profile.id).await?;
            Ok(PageView::authenticated(profile, ranking))
        }
    }
}

/// Handler for the home page (GET /).
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    Ok(HtmlTemplate(IndexTemplate {
        view: page_view(&state, &session).await?,
        notice: query.notice(),
    }))
}

/// Handler for the member page (GET /mypage).
pub async fn mypage(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    Ok(HtmlTemplate(MyPageTemplate {
        view: page_view(&state, &session).await?,
        notice: query.notice(),
    }))
}

/// Handler for the challenge page (GET /challenge).
pub async fn challenge(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    Ok(HtmlTemplate(ChallengeTemplate {
        view: page_view(&state, &session).await?,
        notice: query.notice(),
    }))
}
