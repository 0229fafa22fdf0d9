/// Units run concurrently within a level when the build definition sets no limit
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
/// Skip message of a unit whose outputs were already current
pub const UP_TO_DATE_MESSAGE: &str = "UP-TO-DATE";
/// Skip message of a unit whose outputs were loaded from the result cache
pub const FROM_CACHE_MESSAGE: &str = "FROM-CACHE";
/// Skip message of a skipped unit that does not declare its own
pub const SKIPPED_MESSAGE: &str = "SKIPPED";
/// Fault message of a failing unit that does not declare any failures
pub const DEFAULT_FAILURE_MESSAGE: &str = "Unit execution failed";
