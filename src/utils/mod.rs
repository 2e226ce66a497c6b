//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 문자열 검증 및 정규화
//!
//! # Examples
//!
//! ```rust,ignore
//! use campstation_auth::utils::string_utils::{normalize_email, validate_required_string};
//!
//! let name = validate_required_string("  John  ", "name")?;
//! let email = normalize_email(" John@Example.COM ");
//! ```

pub mod string_utils;
