//! 인증 및 토큰 서비스 모듈
//!
//! - [`TokenService`] - HS256 액세스/리프레시 토큰 발급과 검증
//! - [`AuthService`] - 가입, 로그인, 토큰 갱신, 로그아웃 흐름

pub mod token_service;
pub mod auth_service;

pub use token_service::TokenService;
pub use auth_service::AuthService;
