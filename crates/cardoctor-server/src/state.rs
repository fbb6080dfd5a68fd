use cardoctor_core::TokenIssuer;
use cardoctor_db::Database;

use crate::auth::CookiePolicy;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Signs and verifies the `token` session cookie.
    pub tokens: TokenIssuer,
    /// Attributes applied to every session cookie this server sets or clears.
    pub cookies: CookiePolicy,
}
