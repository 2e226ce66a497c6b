//! # Configuration Module
//!
//! 인증 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 환경 변수에서 읽으며, 시작 시 `.env.<profile>` 파일이
//! 먼저 로드됩니다 (`main.rs` 참고).
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, 저장소, 패스워드 해싱 설정
//! - [`auth_config`] - JWT 서명 및 토큰 수명 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_WORKERS="4"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="1"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! export JWT_ISSUER="campstation"
//!
//! # 저장소 설정
//! export STORAGE_BACKEND="mongodb"   # mongodb | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="campstation_auth"
//! export REDIS_URL="redis://127.0.0.1:6379"
//!
//! # 보안 설정
//! export ENVIRONMENT="production"    # development, test, staging, production
//! export BCRYPT_COST="12"            # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
