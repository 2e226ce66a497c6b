//! 프로세스 메모리 기반 사용자 저장소
//!
//! `STORAGE_BACKEND=memory` 로컬 실행과 테스트에서 사용합니다.
//! 이메일 중복 검사와 삽입이 한 번의 쓰기 잠금 안에서 이루어집니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};

use super::UserRepository;

#[derive(Default)]
struct UserTable {
    next_id: i64,
    by_id: HashMap<i64, User>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("사용자 저장소 잠금이 손상되었습니다".to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.by_id.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.by_id.get(&id).cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut table = self.table.write().map_err(poisoned)?;

        if table.by_id.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        table.next_id += 1;
        user.id = table.next_id;
        table.by_id.insert(user.id, user.clone());

        Ok(user)
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        let mut table = self.table.write().map_err(poisoned)?;
        table.by_id.remove(&user.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new("tester".to_string(), email.to_string(), "hash".to_string())
    }

    #[actix_web::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(user("a@x.com")).await.unwrap();
        let second = repo.create(user("b@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().email, "b@x.com");
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a@x.com")).await.unwrap();

        let result = repo.create(user("a@x.com")).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert!(repo.exists_by_email("a@x.com").await.unwrap());
        assert!(!repo.exists_by_email("z@x.com").await.unwrap());
    }

    #[actix_web::test]
    async fn test_delete_frees_email() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("a@x.com")).await.unwrap();

        repo.delete(&created).await.unwrap();
        repo.delete(&created).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.create(user("a@x.com")).await.is_ok());
    }
}
