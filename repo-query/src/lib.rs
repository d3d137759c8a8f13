//! Repository query dispatch
//!
//! 리포지토리 메서드 호출을 이름 있는 SQL 파라미터로 바인딩하고,
//! 외부 데이터 접근 facade의 적절한 연산으로 전달합니다.

pub mod config;
pub mod error;
pub mod logging;
pub mod query;

pub use config::{DispatchConfig, RepositoryDefinition};
pub use error::{DataAccessError, ErrorSeverity, QueryError};
pub use query::*;
