//! 메서드 디스크립터 모듈
//!
//! 리포지토리 메서드 하나에 대한 정적 메타데이터 (실행 ID, 연산 종류, 반환 타입, 파라미터 바인딩 테이블)

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of base (single-column) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Char,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    DateTime,
    Bytes,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Char => "char",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::DateTime => "date_time",
            ScalarKind::Bytes => "bytes",
        }
    }
}

/// 반환 타입 (컬렉션/페이지의 경우 요소 타입)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Scalar(ScalarKind),
    /// 이름이 있는 엔티티/레코드 타입
    Record(String),
    /// 컬럼명 -> 값 맵
    Map,
}

impl ValueType {
    pub fn record(name: impl Into<String>) -> Self {
        ValueType::Record(name.into())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ValueType::Scalar(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueType::Scalar(ScalarKind::Boolean))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Scalar(kind) => f.write_str(kind.as_str()),
            ValueType::Record(name) => f.write_str(name),
            ValueType::Map => f.write_str("map"),
        }
    }
}

/// Declared result shape of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultShape {
    #[default]
    Single,
    Collection,
    Stream,
    Page,
}

/// 실행 경로를 결정하는 연산 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// update/delete: 영향받은 행 수 반환
    Modify,
    /// insert/save: facade 결과 그대로 반환
    Insert,
    Select,
}

impl OperationKind {
    /// Applies the method-name prefix convention.
    pub fn infer(method: &str) -> Self {
        if method.starts_with("update") || method.starts_with("delete") {
            OperationKind::Modify
        } else if method.starts_with("insert") || method.starts_with("save") {
            OperationKind::Insert
        } else {
            OperationKind::Select
        }
    }
}

/// 파라미터 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// 이름이 있는 SQL 바인드 값
    #[default]
    Value,
    /// 페이지 요청 (첫 번째 위치에서만 허용)
    PageRequest,
    /// 대용량 페이지 콜백 (첫 번째 위치에서만 허용)
    PageWork,
}

impl ParameterKind {
    pub fn is_bindable(&self) -> bool {
        matches!(self, ParameterKind::Value)
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            ParameterKind::Value => "bind value",
            ParameterKind::PageRequest => "page request",
            ParameterKind::PageWork => "page work callback",
        }
    }
}

/// One entry of the position -> name binding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    index: usize,
    kind: ParameterKind,
    hint: Option<String>,
    declared_name: Option<String>,
}

impl ParameterDescriptor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn is_bindable(&self) -> bool {
        self.kind.is_bindable()
    }

    /// Explicit hint wins over the recorded declared name.
    pub fn name(&self) -> Option<&str> {
        self.hint.as_deref().or(self.declared_name.as_deref())
    }
}

/// 실행 ID를 구성하는 위치 정보 (namespace + method)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigInfo {
    location: String,
    method: String,
}

impl ConfigInfo {
    pub fn new(location: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            method: method.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// `location.method`
    pub fn execution_id(&self) -> String {
        format!("{}.{}", self.location, self.method)
    }
}

/// Immutable metadata for one repository method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    info: ConfigInfo,
    execution_id: String,
    operation: OperationKind,
    returned_type: ValueType,
    shape: ResultShape,
    parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    pub fn builder(location: impl Into<String>, method: impl Into<String>) -> MethodDescriptorBuilder {
        MethodDescriptorBuilder::new(location, method)
    }

    pub fn config_info(&self) -> &ConfigInfo {
        &self.info
    }

    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn returned_type(&self) -> &ValueType {
        &self.returned_type
    }

    pub fn shape(&self) -> ResultShape {
        self.shape
    }

    pub fn is_collection_query(&self) -> bool {
        self.shape == ResultShape::Collection
    }

    pub fn is_stream_query(&self) -> bool {
        self.shape == ResultShape::Stream
    }

    pub fn is_page_query(&self) -> bool {
        self.shape == ResultShape::Page
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn bindable_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.is_bindable())
    }
}

/// 빌더 패턴으로 메서드 디스크립터를 구성
#[derive(Debug, Clone)]
pub struct MethodDescriptorBuilder {
    info: ConfigInfo,
    operation: Option<OperationKind>,
    returned_type: ValueType,
    shape: ResultShape,
    parameters: Vec<(ParameterKind, Option<String>, Option<String>)>,
}

impl MethodDescriptorBuilder {
    pub fn new(location: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            info: ConfigInfo::new(location, method),
            operation: None,
            returned_type: ValueType::Map,
            shape: ResultShape::Single,
            parameters: Vec::new(),
        }
    }

    /// Overrides the kind inferred from the method name.
    pub fn operation(mut self, operation: OperationKind) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn returns(mut self, returned_type: ValueType) -> Self {
        self.returned_type = returned_type;
        self
    }

    pub fn shape(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }

    /// Bindable parameter with a declared name.
    pub fn param(self, name: impl Into<String>) -> Self {
        self.parameter(ParameterKind::Value, None, Some(name.into()))
    }

    /// Bindable parameter whose name comes from an explicit hint.
    pub fn hinted_param(self, hint: impl Into<String>) -> Self {
        self.parameter(ParameterKind::Value, Some(hint.into()), None)
    }

    /// Bindable parameter with no recoverable name.
    pub fn unnamed_param(self) -> Self {
        self.parameter(ParameterKind::Value, None, None)
    }

    pub fn page_request(self) -> Self {
        self.parameter(ParameterKind::PageRequest, None, None)
    }

    pub fn page_work(self) -> Self {
        self.parameter(ParameterKind::PageWork, None, None)
    }

    pub fn parameter(
        mut self,
        kind: ParameterKind,
        hint: Option<String>,
        declared_name: Option<String>,
    ) -> Self {
        self.parameters.push((kind, hint, declared_name));
        self
    }

    /// Special parameters are only read from position 0, so anywhere else
    /// they are rejected here. Missing names are left for call time.
    pub fn build(self) -> Result<MethodDescriptor, QueryError> {
        let execution_id = self.info.execution_id();

        if let Some((index, (kind, _, _))) = self
            .parameters
            .iter()
            .enumerate()
            .find(|(index, (kind, _, _))| *index > 0 && !kind.is_bindable())
        {
            return Err(QueryError::Configuration(format!(
                "{}: {} parameter must be the first parameter (found at {})",
                execution_id,
                kind.describe(),
                index
            )));
        }

        let operation = self
            .operation
            .unwrap_or_else(|| OperationKind::infer(self.info.method()));

        let parameters = self
            .parameters
            .into_iter()
            .enumerate()
            .map(|(index, (kind, hint, declared_name))| ParameterDescriptor {
                index,
                kind,
                hint,
                declared_name,
            })
            .collect();

        Ok(MethodDescriptor {
            info: self.info,
            execution_id,
            operation,
            returned_type: self.returned_type,
            shape: self.shape,
            parameters,
        })
    }
}
