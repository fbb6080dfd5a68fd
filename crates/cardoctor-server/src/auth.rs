use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::RuntimeMode;
use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie carrying the signed credential.
pub const TOKEN_COOKIE: &str = "token";

/// Attributes shared by the session cookie and its removal cookie.
///
/// Production front ends live on another site, so the cookie must be
/// `Secure; SameSite=None` there; local development uses `SameSite=Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    pub fn for_mode(mode: RuntimeMode) -> Self {
        if mode.is_production() {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
            }
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .build()
    }

    /// An already-expired, empty `token` cookie with the same attributes.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

/// Middleware that verifies the `token` cookie and stores the decoded
/// [`Identity`](cardoctor_core::Identity) in the request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    // An emptied cookie counts as no cookie
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|c| c.value())
        .filter(|v| !v.is_empty());

    match state.tokens.verify(token) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %request.uri().path(), error = ?err, "session rejected");
            ApiError(err).into_response()
        }
    }
}
