//! Refresh Token Entity
//!
//! 발급된 리프레시 토큰 한 건을 나타내는 원장 레코드입니다.
//! 토큰 원문은 저장하지 않고 SHA-256 지문(hex)만 보관하므로,
//! 조회 시에는 제시된 토큰 문자열을 먼저 [`RefreshToken::fingerprint`]로 변환합니다.

use chrono::Duration;
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 토큰 문자열의 SHA-256 hex (unique)
    pub token_hash: String,
    /// 소유 사용자 ID (사용자당 최대 1건)
    pub user_id: i64,
    pub issued_at: DateTime,
    pub expiry_date: DateTime,
}

impl RefreshToken {
    /// `issued_at + ttl`을 만료 시각으로 하는 새 레코드를 만듭니다.
    pub fn issue(user_id: i64, token: &str, issued_at: DateTime, ttl: Duration) -> Self {
        let expiry_date =
            DateTime::from_millis(issued_at.timestamp_millis() + ttl.num_milliseconds());

        Self {
            id: None,
            token_hash: Self::fingerprint(token),
            user_id,
            issued_at,
            expiry_date,
        }
    }

    /// 토큰 문자열의 저장용 지문
    pub fn fingerprint(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }

    /// 저장된 만료 시각이 `now`보다 앞서면 만료된 것으로 봅니다.
    pub fn is_expired(&self, now: DateTime) -> bool {
        self.expiry_date < now
    }

    pub fn matches(&self, token: &str) -> bool {
        self.token_hash == Self::fingerprint(token)
    }
}
