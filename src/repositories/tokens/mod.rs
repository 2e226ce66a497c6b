//! 리프레시 토큰 원장 리포지토리 모듈
//!
//! 발급된 리프레시 토큰을 만료 시각과 함께 보관합니다.
//! 사용자당 최대 한 건만 남도록 저장소 수준에서 보장합니다
//! (MongoDB: `user_id` unique 인덱스, 메모리: 사용자별 슬롯).
//!
//! # Usage
//!
//! ```rust,ignore
//! let record = RefreshToken::issue(user.id, &refresh_token, DateTime::now(), ttl);
//! token_repo.replace_for_user(record).await?;
//!
//! let found = token_repo.find_by_token(&refresh_token).await?;
//! ```

pub mod token_repository;
pub mod memory_token_repo;

pub use token_repository::MongoRefreshTokenRepository;
pub use memory_token_repo::InMemoryRefreshTokenRepository;

use async_trait::async_trait;
use mongodb::bson::DateTime;

use crate::domain::entities::tokens::RefreshToken;
use crate::errors::AppResult;

/// 리프레시 토큰 원장
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// 새 레코드를 저장합니다. 해당 사용자에게 이미 레코드가 있으면 `ConflictError`.
    async fn save(&self, token: RefreshToken) -> AppResult<RefreshToken>;

    /// 토큰 원문으로 레코드를 찾습니다. (지문으로 변환 후 조회)
    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    async fn delete(&self, token: &RefreshToken) -> AppResult<()>;

    /// 사용자의 모든 레코드를 삭제하고 삭제 건수를 반환합니다.
    async fn delete_by_user(&self, user_id: i64) -> AppResult<u64>;

    /// 사용자의 기존 레코드를 모두 지우고 `token`만 남깁니다. (단일 원자 연산)
    async fn replace_for_user(&self, token: RefreshToken) -> AppResult<RefreshToken>;

    /// `current`가 아직 원장에 있을 때에만 `next`로 교체합니다.
    ///
    /// 다른 요청이 먼저 `current`를 소비했으면 `false`를 반환합니다.
    async fn rotate(&self, current: &RefreshToken, next: RefreshToken) -> AppResult<bool>;

    /// `now` 이전에 만료된 레코드를 삭제하고 삭제 건수를 반환합니다.
    async fn purge_expired(&self, now: DateTime) -> AppResult<u64>;
}
