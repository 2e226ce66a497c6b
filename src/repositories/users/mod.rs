//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserRepository`] trait과 MongoDB/메모리 구현체를 제공합니다.

pub mod user_repo;
pub mod memory_user_repo;

pub use user_repo::MongoUserRepository;
pub use memory_user_repo::InMemoryUserRepository;

use async_trait::async_trait;

use crate::domain::entities::users::User;
use crate::errors::AppResult;

/// 사용자 저장소
///
/// 이메일은 호출자가 정규화(`normalize_email`)한 값을 넘긴다고 가정합니다.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// 새 사용자를 저장하고 ID가 할당된 엔티티를 반환합니다.
    ///
    /// 같은 이메일이 이미 있으면 `ConflictError`를 반환합니다.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 사용자를 삭제합니다. 이미 없으면 아무 일도 하지 않습니다.
    async fn delete(&self, user: &User) -> AppResult<()>;
}
