//! Authentication HTTP Handlers
//!
//! 이메일/비밀번호 기반 가입과 로그인, 리프레시 토큰 교환, 내 정보 조회,
//! 로그아웃 엔드포인트입니다.
//!
//! - `POST /api/auth/register`
//! - `POST /api/auth/login`
//! - `POST /api/auth/refresh`
//! - `GET  /api/auth/me` (Bearer 필요)
//! - `POST /api/auth/logout` (Bearer 필요)
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::{AuthenticatedUser, LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::AuthService;

/// 회원가입 핸들러
///
/// 가입과 동시에 토큰 쌍을 발급하므로 별도 로그인 없이 바로 사용할 수 있습니다.
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth_service
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    log::info!("회원가입 완료 - 사용자 ID: {}", response.user.id);
    Ok(HttpResponse::Ok().json(response))
}

/// 로컬 로그인 핸들러
///
/// 로그인에 성공하면 해당 사용자의 기존 리프레시 토큰은 모두 무효화됩니다.
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신 핸들러
#[post("/refresh")]
pub async fn refresh(
    payload: web::Json<RefreshTokenRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth_service.refresh_token(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 현재 인증된 사용자 정보 조회
#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn me(
    user: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.get_current_user(&user).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃 핸들러
///
/// 리프레시 토큰만 폐기하며, 이미 발급된 액세스 토큰은 만료까지 유효합니다.
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    user: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    auth_service.logout(&user).await?;
    Ok(HttpResponse::Ok().finish())
}
