//! 리포지토리 정의 파일
//!
//! 빌드 단계에서 생성된 JSON 바인딩 테이블을 읽어 메서드 디스크립터로 변환합니다.
//!
//! ```json
//! {
//!   "location": "UserMapper",
//!   "methods": [
//!     { "name": "updateName", "returns": { "scalar": "boolean" },
//!       "params": [ { "name": "id" }, { "hint": "name" } ] },
//!     { "name": "findPage", "shape": "page", "returns": { "record": "User" },
//!       "params": [ { "kind": "page_request" }, { "name": "status" } ] }
//!   ]
//! }
//! ```

use crate::error::QueryError;
use crate::query::descriptor::{
    MethodDescriptor, OperationKind, ParameterKind, ResultShape, ValueType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDefinition {
    pub location: String,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    /// 생략 시 메서드 이름 접두사로 추론
    #[serde(default)]
    pub operation: Option<OperationKind>,
    #[serde(default = "default_returns")]
    pub returns: ValueType,
    #[serde(default)]
    pub shape: ResultShape,
    #[serde(default)]
    pub params: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    #[serde(default)]
    pub kind: ParameterKind,
    /// 컴파일 시점에 기록된 파라미터 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 명시적 이름 힌트
    #[serde(default)]
    pub hint: Option<String>,
}

fn default_returns() -> ValueType {
    ValueType::Map
}

impl RepositoryDefinition {
    pub fn from_json_str(json: &str) -> Result<Self, QueryError> {
        serde_json::from_str(json)
            .map_err(|e| QueryError::Configuration(format!("invalid repository definition: {}", e)))
    }

    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QueryError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            QueryError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        debug!("리포지토리 정의 로드: {:?}", path);
        Self::from_json_str(&raw)
    }

    pub fn descriptors(&self) -> Result<Vec<MethodDescriptor>, QueryError> {
        self.methods
            .iter()
            .map(|method| method.to_descriptor(&self.location))
            .collect()
    }
}

impl MethodDefinition {
    pub fn to_descriptor(&self, location: &str) -> Result<MethodDescriptor, QueryError> {
        let mut builder = MethodDescriptor::builder(location, self.name.as_str())
            .returns(self.returns.clone())
            .shape(self.shape);

        if let Some(operation) = self.operation {
            builder = builder.operation(operation);
        }

        for p in &self.params {
            builder = builder.parameter(p.kind, p.hint.clone(), p.name.clone());
        }

        builder.build()
    }
}
