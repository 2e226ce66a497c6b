//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO 검증과 응답 변환만 담당하고, 실제 로직은
//! `web::Data`로 주입된 서비스에 위임합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AuthService / UserService / TokenService     ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   UserRepository / RefreshTokenRepository      ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 상태 코드와 `{"error": ...}` 본문을 만듭니다.

pub mod auth;
