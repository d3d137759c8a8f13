//! Repository method dispatch
//!
//! Modular components with clear separation of concerns:
//! descriptor (static metadata), params (per-call binding), facade (external
//! data access), dispatcher (path selection), registry (per-repository lookup)

pub mod descriptor;
pub mod dispatcher;
pub mod facade;
pub mod output;
pub mod page;
pub mod params;
pub mod registry;

pub use descriptor::{
    ConfigInfo, MethodDescriptor, MethodDescriptorBuilder, OperationKind, ParameterDescriptor,
    ParameterKind, ResultShape, ScalarKind, ValueType,
};
pub use dispatcher::{DispatchStats, QueryDispatcher};
pub use facade::DataAccess;
pub use output::QueryOutput;
pub use page::{Direction, Order, Page, PageRequest, PageWork, Sort, DEFAULT_PAGE_SIZE};
pub use params::{Argument, BindParameters, QueryParams};
pub use registry::RepositoryQueries;
