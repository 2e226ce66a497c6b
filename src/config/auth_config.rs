//! 인증 관련 설정 모듈
//!
//! JWT 서명 비밀키, 발급자, 액세스/리프레시 토큰 수명을 관리합니다.

use std::env;

use chrono::Duration;

/// JWT 토큰 설정을 관리하는 구조체
///
/// 환경 변수에서 값을 읽는 정적 getter 모음입니다.
/// 서비스에 주입할 때는 [`JwtConfig::settings`]로 한 번 스냅샷을 만들어 사용합니다.
///
/// ## 기본값
///
/// - 액세스 토큰: 1시간
/// - 리프레시 토큰: 7일
/// - 발급자: `campstation`
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 최소 256비트 길이의 랜덤 키를 권장합니다.
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "campstation-dev-secret-change-me".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위, 기본값 1)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(1)
    }

    /// 리프레시 토큰 만료 시간 (일 단위, 기본값 7)
    ///
    /// 원장에 저장되는 만료 시각도 이 값으로 계산됩니다.
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|days: &i64| *days > 0)
            .unwrap_or(7)
    }

    /// 토큰 `iss` 클레임에 들어갈 발급자 이름
    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| "campstation".to_string())
    }

    /// 현재 환경 변수로부터 [`JwtSettings`] 스냅샷을 생성합니다.
    pub fn settings() -> JwtSettings {
        JwtSettings {
            secret: Self::secret(),
            issuer: Self::issuer(),
            access_ttl: Duration::hours(Self::expiration_hours()),
            refresh_ttl: Duration::days(Self::refresh_expiration_days()),
        }
    }
}

/// 토큰 서비스가 사용하는 JWT 설정 값
///
/// 요청 처리 중에 환경 변수를 다시 읽지 않도록 시작 시점에 고정됩니다.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_token_lifetimes() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 1);
        }
        if env::var("JWT_REFRESH_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::refresh_expiration_days(), 7);
        }
    }

    #[test]
    fn test_settings_snapshot_uses_durations() {
        let settings = JwtConfig::settings();
        assert_eq!(settings.access_ttl, Duration::hours(JwtConfig::expiration_hours()));
        assert_eq!(settings.refresh_ttl, Duration::days(JwtConfig::refresh_expiration_days()));
    }

    #[test]
    fn test_debug_hides_secret() {
        let settings = JwtSettings {
            secret: "top-secret".to_string(),
            issuer: "campstation".to_string(),
            access_ttl: Duration::hours(1),
            refresh_ttl: Duration::days(7),
        };
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("top-secret"));
        assert!(printed.contains("campstation"));
    }
}
