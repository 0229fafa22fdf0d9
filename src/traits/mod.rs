pub mod executor;
pub mod listener;
pub mod services;
pub mod sink;

pub use executor::BuildExecutor;
pub use listener::{NoopListener, OperationListener};
pub use services::{
    ExecutionDependencies, ExecutionGraphTracker, OperationResultPostProcessor,
    OriginPluginLookup, ParentIdResolver, TransformOperationTracker,
};
pub use sink::ProgressSink;
