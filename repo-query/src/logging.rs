//! 로깅 초기화
//!
//! `RUST_LOG`이 있으면 그대로 사용하고, 없으면 기본 디렉티브로 필터를 구성합니다.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global fmt subscriber.
///
/// A second call returns an error instead of panicking.
pub fn init_logging(default_directive: Option<&str>) -> Result<()> {
    let directive = default_directive.unwrap_or(DEFAULT_DIRECTIVE);
    let filter = build_filter(directive)?;

    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))
}

fn build_filter(directive: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(directive)
            .map_err(|e| anyhow::anyhow!("로깅 설정 파싱 실패 '{directive}': {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // 다른 테스트가 먼저 subscriber를 설치했을 수 있으므로 첫 결과는 무시
        let _ = init_logging(Some("repo_query=debug"));
        assert!(init_logging(None).is_err());
    }

    #[test]
    fn test_directive_parsing() {
        assert!(EnvFilter::try_new("repo_query=debug,warn").is_ok());
    }
}
