//! Query Dispatcher Configuration
//!
//! .env 파일 또는 환경 변수에서 디스패처 설정을 읽어옵니다.
//! 값이 없거나 파싱할 수 없으면 경고 후 기본값을 사용합니다.

use crate::query::page::DEFAULT_PAGE_SIZE;
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

/// 디스패처 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// 실행 ID와 바인드 파라미터를 debug 레벨로 로깅
    pub enable_query_logging: bool,

    /// 느린 facade 호출 경고 임계값 (ms)
    pub slow_query_threshold_ms: u64,

    /// 페이지 요청 없이 호출된 페이지 쿼리의 페이지 크기
    pub default_page_size: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            enable_query_logging: true,
            slow_query_threshold_ms: 1000,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DispatchConfig {
    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// 읽는 변수: `query_logging`, `slow_query_threshold_ms`, `default_page_size`
    pub fn from_env() -> Self {
        if dotenv().is_err() {
            warn!(".env 파일을 찾을 수 없어서 환경 변수를 직접 사용합니다.");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            enable_query_logging: read_or(&lookup, "query_logging", defaults.enable_query_logging),
            slow_query_threshold_ms: read_or(
                &lookup,
                "slow_query_threshold_ms",
                defaults.slow_query_threshold_ms,
            ),
            default_page_size: read_or(&lookup, "default_page_size", defaults.default_page_size)
                .max(1),
        };

        info!(
            "디스패처 설정 로드: query_logging={}, slow_query_threshold_ms={}, default_page_size={}",
            config.enable_query_logging, config.slow_query_threshold_ms, config.default_page_size
        );
        config
    }

    pub fn with_query_logging(mut self, enabled: bool) -> Self {
        self.enable_query_logging = enabled;
        self
    }

    pub fn with_slow_query_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.slow_query_threshold_ms = threshold_ms;
        self
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }
}

fn read_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} 값 '{}'을(를) 해석할 수 없어서 {}을(를) 사용합니다.", key, raw, default);
            default
        }),
        None => default,
    }
}
