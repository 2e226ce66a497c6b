//! JWT 클레임 구조체와 발급된 토큰 쌍
//!
//! RFC 7519 표준 클레임에 토큰 용도(`token_type`)와 고유 ID(`jti`)를 더합니다.

use serde::{Deserialize, Serialize};

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// API 접근용 단기 토큰
    Access,
    /// 토큰 갱신용 장기 토큰
    Refresh,
}

/// JWT 토큰의 클레임(Payload)
///
/// - `sub`: 토큰의 주체 (사용자 이메일)
/// - `token_type`: `access` | `refresh`
/// - `jti`: 토큰마다 새로 생성되는 UUID v4. 같은 초에 같은 주체로 발급해도 문자열이 달라집니다.
/// - `iss`: 발급자
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp, 초)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub token_type: TokenType,
    pub jti: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// 한 번에 발급된 액세스/리프레시 토큰 쌍
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}
