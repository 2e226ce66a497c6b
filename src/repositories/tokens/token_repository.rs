//! # MongoDB 리프레시 토큰 원장
//!
//! `refresh_tokens` 컬렉션 인덱스:
//!
//! | 인덱스 | 키 | 옵션 |
//! |--------|----|------|
//! | `token_hash_unique` | `token_hash` | unique |
//! | `user_id_unique` | `user_id` | unique (사용자당 1건) |
//! | `expiry_date_ttl` | `expiry_date` | TTL 0초 (MongoDB가 백그라운드에서 정리) |
//!
//! TTL 모니터는 약 60초 주기로 동작하므로, 만료 판정 자체는 항상
//! 서비스 계층에서 `expiry_date`를 비교해 수행합니다.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, Document, doc},
    options::{IndexOptions, ReturnDocument},
};

use crate::{
    db::Database,
    domain::entities::tokens::RefreshToken,
    errors::{AppError, AppResult},
    repositories::is_duplicate_key_error,
};

use super::RefreshTokenRepository;

const COLLECTION: &str = "refresh_tokens";

pub struct MongoRefreshTokenRepository {
    db: Database,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<RefreshToken> {
        self.db.get_database().collection::<RefreshToken>(COLLECTION)
    }

    /// 레코드 자신을 가리키는 필터. `_id`가 없으면 지문으로 찾습니다.
    fn record_filter(token: &RefreshToken) -> Document {
        match token.id {
            Some(id) => doc! { "_id": id, "token_hash": token.token_hash.clone() },
            None => doc! { "token_hash": token.token_hash.clone() },
        }
    }

    async fn upsert_for_user(&self, token: &RefreshToken) -> Result<Option<RefreshToken>, mongodb::error::Error> {
        self.collection()
            .find_one_and_replace(doc! { "user_id": token.user_id }, token)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let token_hash_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        let expiry_index = IndexModel::builder()
            .keys(doc! { "expiry_date": 1 })
            .options(IndexOptions::builder()
                .expire_after(Duration::ZERO)
                .name("expiry_date_ttl".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([token_hash_index, user_id_index, expiry_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn save(&self, mut token: RefreshToken) -> AppResult<RefreshToken> {
        let result = self.collection()
            .insert_one(&token)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 활성 Refresh Token이 있는 사용자입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        token.id = result.inserted_id.as_object_id();
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        self.collection()
            .find_one(doc! { "token_hash": RefreshToken::fingerprint(token) })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, token: &RefreshToken) -> AppResult<()> {
        self.collection()
            .delete_one(Self::record_filter(token))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<u64> {
        let result = self.collection()
            .delete_many(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn replace_for_user(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        // 같은 사용자에 대한 동시 upsert는 한쪽이 E11000으로 실패하며,
        // 재시도 시에는 이미 생긴 문서를 교체한다
        let replaced = match self.upsert_for_user(&token).await {
            Err(e) if is_duplicate_key_error(&e) => {
                log::debug!("Refresh Token upsert 경합 - user_id: {}, 재시도", token.user_id);
                self.upsert_for_user(&token).await
            }
            other => other,
        }
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        replaced.ok_or_else(|| AppError::DatabaseError("Refresh Token 저장 결과가 없습니다".to_string()))
    }

    async fn rotate(&self, current: &RefreshToken, next: RefreshToken) -> AppResult<bool> {
        let swapped = self.collection()
            .find_one_and_replace(Self::record_filter(current), &next)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(swapped.is_some())
    }

    async fn purge_expired(&self, now: DateTime) -> AppResult<u64> {
        let result = self.collection()
            .delete_many(doc! { "expiry_date": { "$lt": now } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
