//! # Domain Models
//!
//! 저장되지 않고 요청 처리 중에만 존재하는 값 객체들입니다.
//!
//! - [`token`] - JWT 클레임과 발급된 토큰 쌍
//! - [`auth`] - 미들웨어가 검증한 요청 주체(principal)

pub mod auth;
pub mod token;

pub use auth::AuthenticatedUser;
pub use token::{TokenClaims, TokenPair, TokenType};
