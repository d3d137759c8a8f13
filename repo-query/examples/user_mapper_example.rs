//! 리포지토리 디스패처 사용 예제
//!
//! JSON 정의로 UserMapper를 등록하고 메모리 facade로 각 실행 경로를 호출합니다.
//!
//! 실행 방법:
//! ```bash
//! cargo run --example user_mapper_example
//! ```

use async_trait::async_trait;
use repo_query::logging::init_logging;
use repo_query::{
    Argument, DataAccess, DataAccessError, DispatchConfig, Page, PageRequest, PageWork,
    QueryError, QueryParams, RepositoryDefinition, RepositoryQueries, ValueType,
};
use serde_json::{json, Value};
use std::sync::Arc;

const USER_MAPPER: &str = r#"
{
  "location": "UserMapper",
  "methods": [
    { "name": "updateName", "returns": { "scalar": "boolean" },
      "params": [ { "name": "id" }, { "name": "name" } ] },
    { "name": "findById", "returns": { "record": "User" }, "params": [ { "name": "id" } ] },
    { "name": "findPage", "shape": "page", "returns": { "record": "User" },
      "params": [ { "kind": "page_request" } ] }
  ]
}
"#;

/// 고정 데이터를 반환하는 facade
struct InMemoryUsers {
    users: Vec<Value>,
}

impl InMemoryUsers {
    fn find(&self, params: &QueryParams) -> Option<&Value> {
        let id = params.get("id")?;
        self.users.iter().find(|u| u.get("id") == Some(id))
    }
}

#[async_trait]
impl DataAccess for InMemoryUsers {
    async fn update(&self, _id: &str, params: &QueryParams) -> Result<u64, DataAccessError> {
        Ok(self.find(params).map_or(0, |_| 1))
    }

    async fn insert(&self, _id: &str, _params: &QueryParams) -> Result<Value, DataAccessError> {
        Ok(json!(self.users.len() + 1))
    }

    async fn query_list(
        &self,
        _ty: &ValueType,
        _id: &str,
        _params: &QueryParams,
    ) -> Result<Vec<Value>, DataAccessError> {
        Ok(self.users.clone())
    }

    async fn query_page(
        &self,
        _ty: &ValueType,
        _id: &str,
        page: &PageRequest,
        _params: &QueryParams,
    ) -> Result<Page<Value>, DataAccessError> {
        let content = self.users.iter().skip(page.offset()).take(page.size()).cloned().collect();
        Ok(Page::new(content, page.clone(), self.users.len() as u64))
    }

    async fn query_big_data(
        &self,
        _ty: &ValueType,
        _id: &str,
        work: Arc<dyn PageWork>,
        _params: &QueryParams,
    ) -> Result<Value, DataAccessError> {
        for (n, chunk) in self.users.chunks(work.page_size().max(1)).enumerate() {
            work.on_page(chunk.to_vec(), n).map_err(DataAccessError::Query)?;
        }
        Ok(json!(self.users.len()))
    }

    async fn query_one_column(
        &self,
        _ty: &ValueType,
        id: &str,
        _params: &QueryParams,
    ) -> Result<Value, DataAccessError> {
        Err(DataAccessError::empty_result(id))
    }

    async fn query_one(
        &self,
        _ty: &ValueType,
        id: &str,
        params: &QueryParams,
    ) -> Result<Value, DataAccessError> {
        self.find(params)
            .cloned()
            .ok_or_else(|| DataAccessError::empty_result(id))
    }
}

#[tokio::main]
async fn main() -> Result<(), QueryError> {
    if let Err(e) = init_logging(Some("repo_query=debug,info")) {
        eprintln!("{e}");
    }

    let facade = Arc::new(InMemoryUsers {
        users: vec![
            json!({"id": 1, "name": "kim"}),
            json!({"id": 2, "name": "lee"}),
            json!({"id": 3, "name": "park"}),
        ],
    });

    let definition = RepositoryDefinition::from_json_str(USER_MAPPER)?;
    let queries = RepositoryQueries::from_definition(&definition, facade, DispatchConfig::from_env())?;
    println!("등록된 메서드: {:?}", queries.methods());

    let updated = queries
        .invoke("updateName", &[Argument::value(1), Argument::value("choi")])
        .await?;
    println!("updateName(1) -> {:?}", updated);

    let missing = queries.invoke("findById", &[Argument::value(9)]).await?;
    println!("findById(9) -> {:?}", missing);

    let page = queries
        .invoke("findPage", &[PageRequest::of(1, 2).into()])
        .await?
        .into_page();
    println!("findPage(1, 2) -> {:?}", page.map(|p| p.into_content()));

    Ok(())
}
