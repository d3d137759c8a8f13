//! Query Dispatch Error Management
//!
//! 디스패처와 facade 양쪽에서 발생하는 에러를 정의합니다.
//! facade 에러는 디스패처를 그대로 통과하며, 단건 조회의 빈 결과만 예외적으로 흡수됩니다.

use thiserror::Error;
use tracing::{error, info, warn};

/// 파라미터 이름을 확인할 수 없을 때 사용하는 메시지
pub const PARAMETER_NEEDS_TO_BE_NAMED: &str = "For queries with named parameters you need to provide names for method parameters. \
     Set an explicit parameter hint or record the declared parameter name in the method definition.";

/// facade(외부 데이터 접근 계층)가 반환하는 에러
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataAccessError {
    /// 단건 조회에서 일치하는 행이 없음
    #[error("Empty result for query '{id}'")]
    EmptyResult { id: String },

    #[error("데이터베이스 연결 실패: {0}")]
    Connection(String),

    #[error("데이터베이스 쿼리 실패: {0}")]
    Query(String),

    #[error("타임아웃: {0}")]
    Timeout(String),

    /// 결과 행을 요청한 타입으로 변환하지 못함
    #[error("결과 매핑 실패: {0}")]
    Mapping(String),
}

impl DataAccessError {
    pub fn empty_result(id: impl Into<String>) -> Self {
        DataAccessError::EmptyResult { id: id.into() }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, DataAccessError::EmptyResult { .. })
    }

    /// `EmptyResult`에 쿼리 id를 채웁니다. 다른 variant는 그대로 반환
    pub fn with_id(self, id: impl Into<String>) -> Self {
        match self {
            DataAccessError::EmptyResult { .. } => DataAccessError::EmptyResult { id: id.into() },
            other => other,
        }
    }
}

/// 디스패처 에러
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// 메서드 정의 오류 (개발 단계에서 잡아야 하는 치명적 오류)
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("'{id}' expects {expected} arguments but {actual} were given")]
    ArgumentCount {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of '{id}' must be a {expected}")]
    ArgumentKind {
        id: String,
        index: usize,
        expected: &'static str,
    },

    #[error("no query registered for '{location}.{method}'")]
    UnknownMethod { location: String, method: String },

    #[error("결과 디코딩 실패: {0}")]
    Decode(String),

    /// facade 에러는 변경 없이 전달됨
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

impl QueryError {
    /// 에러의 심각도를 반환합니다.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QueryError::DataAccess(DataAccessError::Connection(_))
            | QueryError::DataAccess(DataAccessError::Timeout(_)) => ErrorSeverity::Critical,

            QueryError::Configuration(_)
            | QueryError::UnknownMethod { .. }
            | QueryError::DataAccess(DataAccessError::Query(_)) => ErrorSeverity::High,

            QueryError::ArgumentCount { .. }
            | QueryError::ArgumentKind { .. }
            | QueryError::Decode(_)
            | QueryError::DataAccess(DataAccessError::Mapping(_)) => ErrorSeverity::Medium,

            QueryError::DataAccess(DataAccessError::EmptyResult { .. }) => ErrorSeverity::Low,
        }
    }

    /// 호출 측 프로그래밍/설정 오류인지 여부. 재시도 대상이 아님
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            QueryError::Configuration(_)
                | QueryError::ArgumentCount { .. }
                | QueryError::ArgumentKind { .. }
                | QueryError::UnknownMethod { .. }
        )
    }

    /// 에러를 로깅합니다.
    ///
    /// 심각도에 따라 적절한 로깅 레벨을 사용합니다.
    pub fn log(&self, context: &str) {
        let error_msg = self.to_string();

        match self.severity() {
            ErrorSeverity::Critical => error!("[CRITICAL] {} - {}", context, error_msg),
            ErrorSeverity::High => error!("[HIGH] {} - {}", context, error_msg),
            ErrorSeverity::Medium => warn!("[MEDIUM] {} - {}", context, error_msg),
            ErrorSeverity::Low => info!("[LOW] {} - {}", context, error_msg),
        }
    }
}

/// 에러 심각도 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Critical, // 연결 장애
    High,     // 설정 오류, 쿼리 실패
    Medium,   // 호출 인자 오류
    Low,      // 빈 결과
}

/// `RowNotFound`는 쿼리 id를 알 수 없으므로 id가 빈 `EmptyResult`가 됩니다.
/// facade 구현은 `.map_err(|e| DataAccessError::from(e).with_id(id))`로 id를 채웁니다.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for DataAccessError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DataAccessError::EmptyResult { id: String::new() },
            sqlx::Error::PoolTimedOut => {
                DataAccessError::Timeout("Database connection pool timeout".to_string())
            }
            sqlx::Error::PoolClosed => {
                DataAccessError::Connection("Database pool is closed".to_string())
            }
            sqlx::Error::Io(io_err) => DataAccessError::Connection(io_err.to_string()),
            sqlx::Error::ColumnDecode { index, source } => {
                DataAccessError::Mapping(format!("column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => DataAccessError::Mapping(source.to_string()),
            _ => DataAccessError::Query(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_error_is_wrapped_transparently() {
        let inner = DataAccessError::Query("syntax error near 'FROM'".to_string());
        let wrapped: QueryError = inner.clone().into();

        assert_eq!(wrapped.to_string(), inner.to_string());
        assert_eq!(wrapped, QueryError::DataAccess(inner));
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(
            QueryError::Configuration(PARAMETER_NEEDS_TO_BE_NAMED.to_string()).severity(),
            ErrorSeverity::High
        );
        assert_eq!(
            QueryError::from(DataAccessError::Connection("refused".into())).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            QueryError::from(DataAccessError::empty_result("UserMapper.findById")).severity(),
            ErrorSeverity::Low
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(QueryError::Configuration("x".into()).is_configuration());
        assert!(QueryError::ArgumentCount {
            id: "UserMapper.findById".into(),
            expected: 1,
            actual: 0,
        }
        .is_configuration());
        assert!(!QueryError::from(DataAccessError::Timeout("30s".into())).is_configuration());
    }

    #[test]
    fn test_with_id_fills_empty_result() {
        let anonymous = DataAccessError::EmptyResult { id: String::new() };
        let named = anonymous.with_id("UserMapper.findById");

        assert_eq!(named, DataAccessError::empty_result("UserMapper.findById"));
        assert_eq!(named.to_string(), "Empty result for query 'UserMapper.findById'");

        let timeout = DataAccessError::Timeout("30s".into());
        assert_eq!(timeout.clone().with_id("UserMapper.findById"), timeout);
    }
}
