//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 조립되어 `web::Data`로 핸들러에 주입됩니다.
//! 저장소는 트레이트 객체로 받기 때문에 MongoDB 구현과 인메모리 구현을
//! 그대로 바꿔 끼울 수 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use campstation_auth::services::{auth::{AuthService, TokenService}, users::UserService};
//!
//! let token_service = Arc::new(TokenService::new(JwtConfig::settings()));
//! let user_service = Arc::new(UserService::new(user_repo, PasswordConfig::bcrypt_cost()));
//! let auth_service = AuthService::new(user_service, token_service.clone(), token_repo);
//! ```

pub mod users;
pub mod auth;
