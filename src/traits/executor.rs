use async_trait::async_trait;
use std::sync::Arc;

use crate::engine::{BuildPlan, BuildSummary};
use crate::errors::BuildError;
use crate::traits::OperationListener;

/// Runs a build plan, reporting every operation's lifecycle to `listener`.
///
/// Implementations must deliver a unit's finish notification before the start
/// notification of any unit that depends on it.
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    async fn execute(
        &self,
        plan: Arc<BuildPlan>,
        listener: Arc<dyn OperationListener>,
    ) -> Result<BuildSummary, BuildError>;
}
