use std::future::{ready, Ready};

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, FromRequest, HttpRequest,
};

use crate::{auth::claims::Claims, auth::jwt::JwtService, errors::AppError};

pub const SESSION_COOKIE: &str = "session";

/// Builds the HttpOnly session cookie carrying the signed token.
pub fn session_cookie(token: &str, session_hours: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(session_hours))
        .finish()
}

/// An immediately-expiring cookie that clears the session on logout.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(0))
        .finish()
}

/// Extractor for authenticated handlers. Validates the session cookie and
/// exposes the verified claims.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = authenticate(req);
        ready(claims.map(AuthenticatedUser))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Claims, AppError> {
    let jwt_service = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or_else(|| {
        AppError::Unauthorized("Login required to access this resource".to_string())
    })?;

    jwt_service
        .validate_token(cookie.value())
        .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))
}
