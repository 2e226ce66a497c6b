//! HTTP 미들웨어 모듈
//!
//! - [`AuthMiddleware`] - Bearer 액세스 토큰 검증 후 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
//!   요청 extensions에 저장합니다.
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/auth")
//!         .service(handlers::auth::login)                  // 인증 불필요
//! );
//!
//! #[get("/me", wrap = "AuthMiddleware::required()")]
//! pub async fn me(user: AuthenticatedUser) -> ... { }
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
