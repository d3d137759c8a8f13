//! 리포지토리 쿼리 레지스트리
//!
//! 리포지토리(위치) 하나의 모든 메서드 디스패처를 이름으로 관리합니다.

use crate::config::{DispatchConfig, RepositoryDefinition};
use crate::error::QueryError;
use crate::query::descriptor::MethodDescriptor;
use crate::query::dispatcher::QueryDispatcher;
use crate::query::facade::DataAccess;
use crate::query::output::QueryOutput;
use crate::query::params::Argument;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Dispatchers of one repository, sharing one facade.
pub struct RepositoryQueries {
    location: String,
    queries: HashMap<String, QueryDispatcher>,
}

impl RepositoryQueries {
    /// Every descriptor must belong to `location`; method names must be unique.
    pub fn new(
        location: impl Into<String>,
        descriptors: Vec<MethodDescriptor>,
        operations: Arc<dyn DataAccess>,
        config: DispatchConfig,
    ) -> Result<Self, QueryError> {
        let location = location.into();
        let mut queries = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let info = descriptor.config_info();
            if info.location() != location {
                return Err(QueryError::Configuration(format!(
                    "{} does not belong to repository {}",
                    descriptor.execution_id(),
                    location
                )));
            }

            let method = info.method().to_string();
            if queries.contains_key(&method) {
                return Err(QueryError::Configuration(format!(
                    "duplicate query method {}",
                    descriptor.execution_id()
                )));
            }

            let dispatcher =
                QueryDispatcher::with_config(descriptor, Arc::clone(&operations), config.clone());
            queries.insert(method, dispatcher);
        }

        info!("리포지토리 {} 등록 완료: {}개 메서드", location, queries.len());
        Ok(Self { location, queries })
    }

    pub fn from_definition(
        definition: &RepositoryDefinition,
        operations: Arc<dyn DataAccess>,
        config: DispatchConfig,
    ) -> Result<Self, QueryError> {
        Self::new(
            definition.location.clone(),
            definition.descriptors()?,
            operations,
            config,
        )
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.queries.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    pub fn dispatcher(&self, method: &str) -> Option<&QueryDispatcher> {
        self.queries.get(method)
    }

    pub async fn invoke(
        &self,
        method: &str,
        arguments: &[Argument],
    ) -> Result<QueryOutput, QueryError> {
        let dispatcher = self.queries.get(method).ok_or_else(|| QueryError::UnknownMethod {
            location: self.location.clone(),
            method: method.to_string(),
        })?;
        dispatcher.execute(arguments).await
    }
}
