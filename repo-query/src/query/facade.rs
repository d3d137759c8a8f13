//! 외부 데이터 접근 facade 인터페이스
//!
//! SQL 템플릿 해석, 실행, 결과 매핑은 이 trait의 구현체가 담당합니다.

use crate::error::DataAccessError;
use crate::query::descriptor::ValueType;
use crate::query::page::{Page, PageRequest, PageWork};
use crate::query::params::QueryParams;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Data-access facade keyed by execution identifier (`location.method`).
#[async_trait]
pub trait DataAccess: Send + Sync {
    /// UPDATE/DELETE - returns affected row count
    async fn update(&self, id: &str, params: &QueryParams) -> Result<u64, DataAccessError>;

    /// INSERT - returns a generated key or the inserted row
    async fn insert(&self, id: &str, params: &QueryParams) -> Result<Value, DataAccessError>;

    async fn query_list(
        &self,
        ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Vec<Value>, DataAccessError>;

    async fn query_page(
        &self,
        ty: &ValueType,
        id: &str,
        page: &PageRequest,
        params: &QueryParams,
    ) -> Result<Page<Value>, DataAccessError>;

    /// Drives `work` page by page over the full result.
    async fn query_big_data(
        &self,
        ty: &ValueType,
        id: &str,
        work: Arc<dyn PageWork>,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError>;

    async fn query_one_column(
        &self,
        ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError>;

    /// Fails with [`DataAccessError::EmptyResult`] when no row matches.
    async fn query_one(
        &self,
        ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError>;
}
