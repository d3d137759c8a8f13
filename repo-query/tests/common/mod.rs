//! Recording in-memory facade shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use repo_query::{
    DataAccess, DataAccessError, Page, PageRequest, PageWork, QueryParams, ValueType,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Update { id: String, params: QueryParams },
    Insert { id: String, params: QueryParams },
    QueryList { ty: ValueType, id: String, params: QueryParams },
    QueryPage { ty: ValueType, id: String, page: PageRequest, params: QueryParams },
    QueryBigData { ty: ValueType, id: String, params: QueryParams },
    QueryOneColumn { ty: ValueType, id: String, params: QueryParams },
    QueryOne { ty: ValueType, id: String, params: QueryParams },
}

/// 호출 기록과 미리 정해진 응답을 가진 facade
pub struct RecordingFacade {
    calls: Mutex<Vec<Call>>,
    pub update_count: u64,
    pub insert_result: Value,
    pub rows: Vec<Value>,
    pub total: u64,
    pub one: Option<Value>,
    pub one_error: Option<DataAccessError>,
    pub scalar: Result<Value, DataAccessError>,
    /// query_one 응답 전 대기 시간
    pub delay: Duration,
}

impl Default for RecordingFacade {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            update_count: 1,
            insert_result: json!(42),
            rows: vec![json!({"id": 1, "name": "kim"}), json!({"id": 2, "name": "lee"})],
            total: 2,
            one: Some(json!({"id": 1, "name": "kim"})),
            one_error: None,
            scalar: Ok(json!(3)),
            delay: Duration::ZERO,
        }
    }
}

impl RecordingFacade {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(f: impl FnOnce(&mut RecordingFacade)) -> Arc<Self> {
        let mut facade = Self::default();
        f(&mut facade);
        Arc::new(facade)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl DataAccess for RecordingFacade {
    async fn update(&self, id: &str, params: &QueryParams) -> Result<u64, DataAccessError> {
        self.record(Call::Update { id: id.into(), params: params.clone() });
        Ok(self.update_count)
    }

    async fn insert(&self, id: &str, params: &QueryParams) -> Result<Value, DataAccessError> {
        self.record(Call::Insert { id: id.into(), params: params.clone() });
        Ok(self.insert_result.clone())
    }

    async fn query_list(
        &self,
        ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Vec<Value>, DataAccessError> {
        self.record(Call::QueryList { ty: ty.clone(), id: id.into(), params: params.clone() });
        Ok(self.rows.clone())
    }

    async fn query_page(
        &self,
        ty: &ValueType,
        id: &str,
        page: &PageRequest,
        params: &QueryParams,
    ) -> Result<Page<Value>, DataAccessError> {
        self.record(Call::QueryPage {
            ty: ty.clone(),
            id: id.into(),
            page: page.clone(),
            params: params.clone(),
        });
        let content = self
            .rows
            .iter()
            .skip(page.offset())
            .take(page.size())
            .cloned()
            .collect();
        Ok(Page::new(content, page.clone(), self.total))
    }

    async fn query_big_data(
        &self,
        ty: &ValueType,
        id: &str,
        work: Arc<dyn PageWork>,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError> {
        self.record(Call::QueryBigData { ty: ty.clone(), id: id.into(), params: params.clone() });

        let mut pages = 0usize;
        for (page_number, chunk) in self.rows.chunks(work.page_size().max(1)).enumerate() {
            work.on_page(chunk.to_vec(), page_number)
                .map_err(DataAccessError::Query)?;
            pages += 1;
        }
        Ok(json!({ "pages": pages, "rows": self.rows.len() }))
    }

    async fn query_one_column(
        &self,
        ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError> {
        self.record(Call::QueryOneColumn { ty: ty.clone(), id: id.into(), params: params.clone() });
        self.scalar.clone()
    }

    async fn query_one(
        &self,
        ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError> {
        self.record(Call::QueryOne { ty: ty.clone(), id: id.into(), params: params.clone() });
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(err) = &self.one_error {
            return Err(err.clone());
        }
        self.one
            .clone()
            .ok_or_else(|| DataAccessError::empty_result(id))
    }
}

/// Collects every page handed to it.
#[derive(Default)]
pub struct CollectingWork {
    pub size: usize,
    pub pages: Mutex<Vec<(usize, Vec<Value>)>>,
}

impl PageWork for CollectingWork {
    fn page_size(&self) -> usize {
        self.size
    }

    fn on_page(&self, rows: Vec<Value>, page_number: usize) -> Result<(), String> {
        self.pages.lock().push((page_number, rows));
        Ok(())
    }
}
