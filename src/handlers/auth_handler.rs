use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{expired_session_cookie, session_cookie, AuthenticatedUser, JwtService},
    errors::AppResult,
    models::dto::{LoginRequest, MessageResponse, RegisterRequest, UserResponse},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/current_user", web::get().to(current_user));
}

async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .register(&payload.email, &payload.password)
        .await?;

    log::info!("Registered new user '{}'", user.email);
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

async fn login(
    state: web::Data<AppState>,
    jwt_service: web::Data<JwtService>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let token = jwt_service.create_token(&user)?;
    let cookie = session_cookie(&token, jwt_service.expiration_hours());

    log::info!("User '{}' logged in", user.email);
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(UserResponse::from(&user)))
}

async fn logout(auth: AuthenticatedUser) -> HttpResponse {
    log::info!("User '{}' logged out", auth.0.email);
    HttpResponse::Ok()
        .cookie(expired_session_cookie())
        .json(MessageResponse::new("Logout successful"))
}

async fn current_user(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let user = state.user_service.get_user(&auth.0.sub).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": UserResponse::from(&user),
    })))
}
