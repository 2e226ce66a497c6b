//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명된 액세스/리프레시 토큰의 생성과 검증을 담당합니다.
//! 토큰 subject는 사용자 이메일이며, 폐기 목록은 조회하지 않습니다.
//! 리프레시 토큰의 폐기 여부는 원장(`RefreshTokenRepository`)이 판단합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};
use crate::errors::{AppError, AppResult};

/// JWT 서명/검증기
///
/// 키는 생성 시 한 번만 만들어 재사용합니다.
pub struct TokenService {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            settings,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// 리프레시 토큰 수명. 원장 레코드의 만료 시각 계산에도 쓰입니다.
    pub fn refresh_ttl(&self) -> Duration {
        self.settings.refresh_ttl
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_expires_in(&self) -> i64 {
        self.settings.access_ttl.num_seconds()
    }

    fn sign(&self, subject: &str, token_type: TokenType, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();

        let claims = TokenClaims {
            sub: subject.to_string(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iss: self.settings.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 단기 액세스 토큰 (기본 1시간)
    pub fn generate_access_token(&self, email: &str) -> AppResult<String> {
        self.sign(email, TokenType::Access, self.settings.access_ttl)
    }

    /// 장기 리프레시 토큰 (기본 7일)
    pub fn generate_refresh_token(&self, email: &str) -> AppResult<String> {
        self.sign(email, TokenType::Refresh, self.settings.refresh_ttl)
    }

    pub fn generate_token_pair(&self, email: &str) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(email)?,
            refresh_token: self.generate_refresh_token(email)?,
            expires_in: self.access_expires_in(),
        })
    }

    /// 서명, 발급자, 만료 시간을 검증하고 클레임을 반환합니다.
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                },
                kind => {
                    log::debug!("토큰 검증 실패: {:?}", kind);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })
    }

    /// 토큰이 유효하면 `true`
    pub fn validate_token(&self, token: &str) -> bool {
        self.verify_token(token).is_ok()
    }

    /// 액세스 토큰만 통과시킵니다. 리프레시 토큰은 Bearer 자격으로 쓸 수 없습니다.
    pub fn verify_access_token(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::AuthenticationError("액세스 토큰이 아닙니다".to_string()));
        }

        Ok(claims)
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}
