//! 프로세스 메모리 기반 리프레시 토큰 원장
//!
//! 사용자 ID별 슬롯 하나에 레코드를 보관하므로 사용자당 최대 한 건이 유지됩니다.
//! 비교와 교체가 같은 쓰기 잠금 안에서 수행되어 `rotate`는 원자적입니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::{DateTime, oid::ObjectId};

use crate::domain::entities::tokens::RefreshToken;
use crate::errors::{AppError, AppResult};

use super::RefreshTokenRepository;

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    slots: RwLock<HashMap<i64, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 보관 중인 레코드 수
    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("토큰 원장 잠금이 손상되었습니다".to_string())
}

fn with_id(mut token: RefreshToken, id: Option<ObjectId>) -> RefreshToken {
    token.id = Some(id.unwrap_or_else(ObjectId::new));
    token
}

fn same_record(stored: &RefreshToken, other: &RefreshToken) -> bool {
    stored.token_hash == other.token_hash && (other.id.is_none() || stored.id == other.id)
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn save(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        let mut slots = self.slots.write().map_err(poisoned)?;

        if slots.contains_key(&token.user_id) {
            return Err(AppError::ConflictError("이미 활성 Refresh Token이 있는 사용자입니다".to_string()));
        }

        let token = with_id(token, None);
        slots.insert(token.user_id, token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let slots = self.slots.read().map_err(poisoned)?;

        Ok(slots.values().find(|t| t.matches(token)).cloned())
    }

    async fn delete(&self, token: &RefreshToken) -> AppResult<()> {
        let mut slots = self.slots.write().map_err(poisoned)?;

        if slots.get(&token.user_id).is_some_and(|stored| same_record(stored, token)) {
            slots.remove(&token.user_id);
        }
        Ok(())
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<u64> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        Ok(slots.remove(&user_id).map_or(0, |_| 1))
    }

    async fn replace_for_user(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        let mut slots = self.slots.write().map_err(poisoned)?;

        let existing_id = slots.get(&token.user_id).and_then(|t| t.id);
        let token = with_id(token, existing_id);
        slots.insert(token.user_id, token.clone());
        Ok(token)
    }

    async fn rotate(&self, current: &RefreshToken, next: RefreshToken) -> AppResult<bool> {
        let mut slots = self.slots.write().map_err(poisoned)?;

        let stored_id = match slots.get(&current.user_id) {
            Some(stored) if same_record(stored, current) => stored.id,
            _ => return Ok(false),
        };

        let next = with_id(next, stored_id);
        slots.insert(next.user_id, next);
        Ok(true)
    }

    async fn purge_expired(&self, now: DateTime) -> AppResult<u64> {
        let mut slots = self.slots.write().map_err(poisoned)?;

        let before = slots.len();
        slots.retain(|_, token| !token.is_expired(now));
        Ok((before - slots.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(user_id: i64, token: &str) -> RefreshToken {
        RefreshToken::issue(user_id, token, DateTime::now(), Duration::days(7))
    }

    #[actix_web::test]
    async fn test_save_and_find_by_token() {
        let repo = InMemoryRefreshTokenRepository::new();

        let saved = repo.save(record(1, "first")).await.unwrap();
        assert!(saved.id.is_some());

        let found = repo.find_by_token("first").await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert!(repo.find_by_token("unknown").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_save_rejects_second_record_for_user() {
        let repo = InMemoryRefreshTokenRepository::new();
        repo.save(record(1, "first")).await.unwrap();

        let result = repo.save(record(1, "second")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_replace_for_user_keeps_single_record() {
        let repo = InMemoryRefreshTokenRepository::new();
        repo.save(record(1, "first")).await.unwrap();
        repo.save(record(2, "other-user")).await.unwrap();

        repo.replace_for_user(record(1, "second")).await.unwrap();

        assert!(repo.find_by_token("first").await.unwrap().is_none());
        assert!(repo.find_by_token("second").await.unwrap().is_some());
        assert!(repo.find_by_token("other-user").await.unwrap().is_some());
        assert_eq!(repo.len(), 2);
    }

    #[actix_web::test]
    async fn test_rotate_is_compare_and_swap() {
        let repo = InMemoryRefreshTokenRepository::new();
        let current = repo.save(record(1, "first")).await.unwrap();

        assert!(repo.rotate(&current, record(1, "second")).await.unwrap());
        // 이미 소비된 레코드로는 다시 교체할 수 없다
        assert!(!repo.rotate(&current, record(1, "third")).await.unwrap());

        assert!(repo.find_by_token("first").await.unwrap().is_none());
        assert!(repo.find_by_token("second").await.unwrap().is_some());
        assert!(repo.find_by_token("third").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_delete_only_removes_matching_record() {
        let repo = InMemoryRefreshTokenRepository::new();
        let stale = repo.save(record(1, "first")).await.unwrap();
        repo.replace_for_user(record(1, "second")).await.unwrap();

        repo.delete(&stale).await.unwrap();
        assert!(repo.find_by_token("second").await.unwrap().is_some());

        let current = repo.find_by_token("second").await.unwrap().unwrap();
        repo.delete(&current).await.unwrap();
        assert!(repo.is_empty());
    }

    #[actix_web::test]
    async fn test_delete_by_user_and_purge_expired() {
        let repo = InMemoryRefreshTokenRepository::new();
        repo.save(record(1, "live")).await.unwrap();
        repo.save(RefreshToken::issue(2, "dead", DateTime::now(), Duration::seconds(-1)))
            .await
            .unwrap();

        assert_eq!(repo.purge_expired(DateTime::now()).await.unwrap(), 1);
        assert_eq!(repo.delete_by_user(1).await.unwrap(), 1);
        assert_eq!(repo.delete_by_user(1).await.unwrap(), 0);
        assert!(repo.is_empty());
    }
}
