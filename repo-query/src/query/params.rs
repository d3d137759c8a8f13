//! 바인드 파라미터 모듈
//!
//! 호출 인자를 이름 있는 SQL 파라미터 맵과 페이지 요청/콜백 슬롯으로 분리

use crate::error::{QueryError, PARAMETER_NEEDS_TO_BE_NAMED};
use crate::query::descriptor::{MethodDescriptor, ParameterKind};
use crate::query::page::{PageRequest, PageWork};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Query parameters type - name -> bind value
pub type QueryParams = HashMap<String, Value>;

/// A runtime argument of a repository method call.
#[derive(Clone)]
pub enum Argument {
    Value(Value),
    Page(PageRequest),
    Work(Arc<dyn PageWork>),
}

impl Argument {
    pub fn value(value: impl Into<Value>) -> Self {
        Argument::Value(value.into())
    }

    pub fn work(work: impl PageWork + 'static) -> Self {
        Argument::Work(Arc::new(work))
    }

    fn kind(&self) -> ParameterKind {
        match self {
            Argument::Value(_) => ParameterKind::Value,
            Argument::Page(_) => ParameterKind::PageRequest,
            Argument::Work(_) => ParameterKind::PageWork,
        }
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Argument::Page(p) => f.debug_tuple("Page").field(p).finish(),
            Argument::Work(w) => f
                .debug_struct("Work")
                .field("page_size", &w.page_size())
                .finish(),
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

impl From<PageRequest> for Argument {
    fn from(request: PageRequest) -> Self {
        Argument::Page(request)
    }
}

/// Per-call bind state.
#[derive(Default, Clone)]
pub struct BindParameters {
    parameter: QueryParams,
    pageable: Option<PageRequest>,
    page_work: Option<Arc<dyn PageWork>>,
}

impl BindParameters {
    /// Splits `arguments` according to the descriptor's binding table.
    ///
    /// Fails without side effects when the argument count or a special
    /// argument's kind does not match, or when a bindable parameter has no
    /// resolvable name.
    pub fn bind(descriptor: &MethodDescriptor, arguments: &[Argument]) -> Result<Self, QueryError> {
        let declared = descriptor.parameters();
        if arguments.len() != declared.len() {
            return Err(QueryError::ArgumentCount {
                id: descriptor.execution_id().to_string(),
                expected: declared.len(),
                actual: arguments.len(),
            });
        }

        let mut bound = BindParameters::default();

        if let (Some(first), Some(argument)) = (declared.first(), arguments.first()) {
            match (first.kind(), argument) {
                (ParameterKind::PageRequest, Argument::Page(request)) => {
                    bound.pageable = Some(request.clone());
                }
                (ParameterKind::PageWork, Argument::Work(work)) => {
                    bound.page_work = Some(Arc::clone(work));
                }
                _ => {}
            }
        }

        for p in declared {
            let argument = &arguments[p.index()];
            if argument.kind() != p.kind() {
                return Err(QueryError::ArgumentKind {
                    id: descriptor.execution_id().to_string(),
                    index: p.index(),
                    expected: p.kind().describe(),
                });
            }

            if let Argument::Value(value) = argument {
                let name = p
                    .name()
                    .ok_or_else(|| QueryError::Configuration(PARAMETER_NEEDS_TO_BE_NAMED.to_string()))?;
                bound.parameter.insert(name.to_string(), value.clone());
            }
        }

        Ok(bound)
    }

    pub fn parameter(&self) -> &QueryParams {
        &self.parameter
    }

    pub fn pageable(&self) -> Option<&PageRequest> {
        self.pageable.as_ref()
    }

    pub fn page_work(&self) -> Option<&Arc<dyn PageWork>> {
        self.page_work.as_ref()
    }

    pub fn into_parameter(self) -> QueryParams {
        self.parameter
    }
}

impl fmt::Debug for BindParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindParameters")
            .field("parameter", &self.parameter)
            .field("pageable", &self.pageable)
            .field("page_work", &self.page_work.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::descriptor::ResultShape;
    use serde_json::json;

    struct NoopWork;

    impl PageWork for NoopWork {
        fn on_page(&self, _rows: Vec<Value>, _page_number: usize) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn test_bind_named_values() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findByNameAndStatus")
            .param("name")
            .hinted_param("status")
            .build()
            .unwrap();

        let bound = BindParameters::bind(
            &descriptor,
            &[Argument::value("kim"), Argument::value(1)],
        )
        .unwrap();

        assert_eq!(bound.parameter().get("name"), Some(&json!("kim")));
        assert_eq!(bound.parameter().get("status"), Some(&json!(1)));
        assert!(bound.pageable().is_none());
        assert!(bound.page_work().is_none());
    }

    #[test]
    fn test_page_request_goes_to_slot() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findPage")
            .page_request()
            .param("status")
            .shape(ResultShape::Page)
            .build()
            .unwrap();

        let bound = BindParameters::bind(
            &descriptor,
            &[PageRequest::of(2, 10).into(), Argument::value("active")],
        )
        .unwrap();

        assert_eq!(bound.pageable(), Some(&PageRequest::of(2, 10)));
        assert_eq!(bound.parameter().len(), 1);
        assert!(!bound.parameter().contains_key("pageable"));
    }

    #[test]
    fn test_page_work_goes_to_slot() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findAllBig")
            .page_work()
            .shape(ResultShape::Page)
            .build()
            .unwrap();

        let bound = BindParameters::bind(&descriptor, &[Argument::work(NoopWork)]).unwrap();
        assert!(bound.page_work().is_some());
        assert!(bound.parameter().is_empty());
    }

    #[test]
    fn test_unnamed_parameter_is_configuration_error() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findById")
            .unnamed_param()
            .build()
            .unwrap();

        let err = BindParameters::bind(&descriptor, &[Argument::value(7)]).unwrap_err();
        assert_eq!(err, QueryError::Configuration(PARAMETER_NEEDS_TO_BE_NAMED.to_string()));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findById")
            .param("id")
            .build()
            .unwrap();

        let err = BindParameters::bind(&descriptor, &[]).unwrap_err();
        assert!(matches!(err, QueryError::ArgumentCount { expected: 1, actual: 0, .. }));
    }

    #[test]
    fn test_argument_kind_mismatch() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findPage")
            .page_request()
            .shape(ResultShape::Page)
            .build()
            .unwrap();

        let err = BindParameters::bind(&descriptor, &[Argument::value(0)]).unwrap_err();
        assert!(matches!(err, QueryError::ArgumentKind { index: 0, .. }));
    }

    #[test]
    fn test_null_value_is_bound() {
        let descriptor = MethodDescriptor::builder("UserMapper", "findByEmail")
            .param("email")
            .build()
            .unwrap();

        let bound = BindParameters::bind(&descriptor, &[Argument::Value(Value::Null)]).unwrap();
        assert_eq!(bound.parameter().get("email"), Some(&Value::Null));
    }
}
