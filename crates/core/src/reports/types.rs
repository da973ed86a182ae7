//! Report data types.

use chrono::TimeDelta;

/// One row of the completion report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRow {
    /// Project ID.
    pub project_id: i32,
    /// Project name.
    pub name: String,
    /// Time from creation until the project was fully funded.
    pub gathering_time: TimeDelta,
    /// Project description.
    pub description: String,
}
