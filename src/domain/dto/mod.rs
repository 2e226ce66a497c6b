//! # Data Transfer Objects
//!
//! HTTP API의 요청/응답 계약입니다. 모든 필드는 camelCase JSON으로 직렬화됩니다.
//!
//! | 엔드포인트 | 요청 DTO | 응답 DTO |
//! |------------|----------|----------|
//! | `POST /api/auth/register` | [`RegisterRequest`] | [`AuthResponse`] |
//! | `POST /api/auth/login` | [`LoginRequest`] | [`AuthResponse`] |
//! | `POST /api/auth/refresh` | [`RefreshTokenRequest`] | [`AuthResponse`] |
//! | `GET /api/auth/me` | - | [`UserResponse`] |
//!
//! 요청 DTO는 `validator`로 검증되며, 실패 시 400 응답이 반환됩니다.

pub mod users;
pub mod tokens;

pub use users::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use tokens::RefreshTokenRequest;
