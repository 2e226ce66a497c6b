//! # Domain Layer Module
//!
//! 인증 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서와 매핑되는 영속 객체 (User, RefreshToken)
//! ├── dto       - HTTP 요청/응답 계약 (camelCase JSON)
//! └── models    - 토큰 클레임, 인증된 사용자 등 요청 처리용 값 객체
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! 엔티티는 저장소 표현을, DTO는 외부 API 표현을 담당하며
//! 비밀번호 해시나 토큰 지문처럼 외부로 나가면 안 되는 값은 DTO 변환 시 제거됩니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::{RefreshToken, Role, User};
pub use dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
pub use models::{AuthenticatedUser, TokenClaims, TokenPair, TokenType};
