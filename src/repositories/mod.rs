//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스 계층은 구체 타입이 아닌 trait 객체(`Arc<dyn ...>`)에 의존하며,
//! 시작 시 `STORAGE_BACKEND` 설정에 따라 구현체가 선택됩니다.
//!
//! | Trait | MongoDB 구현 | 메모리 구현 |
//! |-------|--------------|-------------|
//! | [`UserRepository`] | [`MongoUserRepository`] (+ Redis 캐시) | [`InMemoryUserRepository`] |
//! | [`RefreshTokenRepository`] | [`MongoRefreshTokenRepository`] | [`InMemoryRefreshTokenRepository`] |
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use campstation_auth::repositories::{InMemoryUserRepository, UserRepository};
//!
//! let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod tokens;

pub use users::{InMemoryUserRepository, MongoUserRepository, UserRepository};
pub use tokens::{InMemoryRefreshTokenRepository, MongoRefreshTokenRepository, RefreshTokenRepository};

use mongodb::error::{ErrorKind, WriteFailure};

/// MongoDB unique 인덱스 위반(E11000) 여부
pub(crate) fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    const DUPLICATE_KEY: i32 = 11000;

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}
