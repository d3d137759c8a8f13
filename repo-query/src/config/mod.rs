pub mod definition;
pub mod dispatch;

pub use definition::{MethodDefinition, ParameterDefinition, RepositoryDefinition};
pub use dispatch::DispatchConfig;
