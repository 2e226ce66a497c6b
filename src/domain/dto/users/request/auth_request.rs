//! 인증 요청관련 DTO
//!
//! 가입/로그인을 요청하는 사용자들의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청 구조체
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "이름은 1자 이상 50자 이하로 입력해주세요"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest =
            serde_json::from_str(r#"{"name":"a","email":"a@x.com","password":"pw"}"#).unwrap();
        assert!(valid.validate().is_ok());

        let bad_email: RegisterRequest =
            serde_json::from_str(r#"{"name":"a","email":"not-an-email","password":"pw"}"#).unwrap();
        assert!(bad_email.validate().is_err());

        let empty_name: RegisterRequest =
            serde_json::from_str(r#"{"name":"","email":"a@x.com","password":"pw"}"#).unwrap();
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_password() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":""}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
