//! 쿼리 디스패처 모듈
//!
//! 메서드 디스크립터에 따라 facade의 실행 경로 하나를 선택하고,
//! 결과를 선언된 반환 형태로 변환합니다.

use crate::config::DispatchConfig;
use crate::error::{DataAccessError, QueryError};
use crate::query::descriptor::{MethodDescriptor, OperationKind};
use crate::query::facade::DataAccess;
use crate::query::output::QueryOutput;
use crate::query::page::PageRequest;
use crate::query::params::{Argument, BindParameters};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Call counters of one dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub total_calls: u64,
    pub failed_calls: u64,
    pub empty_results: u64,
    pub slow_calls: u64,
}

#[derive(Default)]
struct DispatchStatistics {
    total_calls: AtomicU64,
    failed_calls: AtomicU64,
    empty_results: AtomicU64,
    slow_calls: AtomicU64,
}

/// Executes one repository method against a [`DataAccess`] facade.
pub struct QueryDispatcher {
    descriptor: MethodDescriptor,
    operations: Arc<dyn DataAccess>,
    config: DispatchConfig,
    stats: DispatchStatistics,
}

impl QueryDispatcher {
    pub fn new(descriptor: MethodDescriptor, operations: Arc<dyn DataAccess>) -> Self {
        Self::with_config(descriptor, operations, DispatchConfig::default())
    }

    pub fn with_config(
        descriptor: MethodDescriptor,
        operations: Arc<dyn DataAccess>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            descriptor,
            operations,
            config,
            stats: DispatchStatistics::default(),
        }
    }

    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            total_calls: self.stats.total_calls.load(Ordering::Relaxed),
            failed_calls: self.stats.failed_calls.load(Ordering::Relaxed),
            empty_results: self.stats.empty_results.load(Ordering::Relaxed),
            slow_calls: self.stats.slow_calls.load(Ordering::Relaxed),
        }
    }

    /// Binds `arguments` and runs the matching facade operation.
    ///
    /// Binding failures return before the facade is touched.
    pub async fn execute(&self, arguments: &[Argument]) -> Result<QueryOutput, QueryError> {
        self.stats.total_calls.fetch_add(1, Ordering::Relaxed);

        let result = match BindParameters::bind(&self.descriptor, arguments) {
            Ok(parameters) => self.dispatch(parameters).await,
            Err(e) => {
                e.log(self.descriptor.execution_id());
                Err(e)
            }
        };

        if result.is_err() {
            self.stats.failed_calls.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    /// Times the facade call, failed calls included.
    async fn dispatch(&self, parameters: BindParameters) -> Result<QueryOutput, QueryError> {
        self.log_query(&parameters);

        let start = Instant::now();
        let result = self.run(&parameters).await;
        self.check_slow_query(
            self.descriptor.execution_id(),
            start.elapsed().as_millis() as u64,
        );
        result
    }

    async fn run(&self, parameters: &BindParameters) -> Result<QueryOutput, QueryError> {
        let id = self.descriptor.execution_id();
        let ty = self.descriptor.returned_type();
        let params = parameters.parameter();

        let output = match self.descriptor.operation() {
            OperationKind::Modify => {
                let updated_count = self.operations.update(id, params).await?;
                if ty.is_boolean() {
                    QueryOutput::Flag(updated_count != 0)
                } else {
                    QueryOutput::Affected(updated_count)
                }
            }
            OperationKind::Insert => QueryOutput::Inserted(self.operations.insert(id, params).await?),
            OperationKind::Select => {
                if self.descriptor.is_collection_query() || self.descriptor.is_stream_query() {
                    QueryOutput::Rows(self.operations.query_list(ty, id, params).await?)
                } else if self.descriptor.is_page_query() {
                    match parameters.page_work() {
                        None => {
                            let page = parameters.pageable().cloned().unwrap_or_else(|| {
                                PageRequest::of(0, self.config.default_page_size)
                            });
                            QueryOutput::Page(self.operations.query_page(ty, id, &page, params).await?)
                        }
                        Some(work) => QueryOutput::BigData(
                            self.operations
                                .query_big_data(ty, id, Arc::clone(work), params)
                                .await?,
                        ),
                    }
                } else if ty.is_scalar() {
                    QueryOutput::Scalar(self.operations.query_one_column(ty, id, params).await?)
                } else {
                    match self.operations.query_one(ty, id, params).await {
                        Ok(row) => QueryOutput::Row(Some(row)),
                        Err(DataAccessError::EmptyResult { .. }) => {
                            self.stats.empty_results.fetch_add(1, Ordering::Relaxed);
                            debug!("{} returned no row", id);
                            QueryOutput::Row(None)
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        };

        Ok(output)
    }

    fn log_query(&self, parameters: &BindParameters) {
        if self.config.enable_query_logging {
            debug!(
                "Executing query: {} | Params: {:?}",
                self.descriptor.execution_id(),
                parameters
            );
        }
    }

    fn check_slow_query(&self, id: &str, elapsed_ms: u64) {
        if elapsed_ms > self.config.slow_query_threshold_ms {
            self.stats.slow_calls.fetch_add(1, Ordering::Relaxed);
            warn!("Slow query detected ({} ms): {}", elapsed_ms, id);
        }
    }
}
