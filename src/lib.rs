//! 캠프스테이션 인증 서비스 백엔드
//!
//! 이메일/비밀번호 계정과 JWT 토큰 기반 인증을 제공하는 Rust 서비스입니다.
//! 액세스 토큰은 상태 없이 검증하고, 리프레시 토큰은 원장에 기록해
//! 사용자당 하나의 세션만 유지합니다.
//!
//! # Features
//!
//! - **계정**: 회원가입, 로그인, 내 정보 조회
//! - **JWT 인증**: HS256 액세스/리프레시 토큰, 발급자 검증
//! - **토큰 교체**: 갱신할 때마다 리프레시 토큰이 바뀌며 재사용은 거부
//! - **MongoDB**: 사용자와 리프레시 토큰 영구 저장
//! - **Redis**: 이메일 기준 사용자 조회 캐시 (선택)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← AuthService / UserService / TokenService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 트레이트 + MongoDB / 인메모리 구현
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
