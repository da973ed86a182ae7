//! Report generation service.

use chrono::TimeDelta;

use super::types::CompletionRow;
use crate::ledger::Project;

const MICROS_PER_SECOND: i64 = 1_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Service for generating project reports.
pub struct ReportService;

impl ReportService {
    /// Generates the completion report: closed projects, fastest funded first.
    ///
    /// Projects that are still open are skipped. Projects with equal gathering
    /// time keep their input order.
    #[must_use]
    pub fn completion_report(projects: &[Project]) -> Vec<CompletionRow> {
        let mut rows: Vec<CompletionRow> = projects
            .iter()
            .filter(|p| p.ledger.closed)
            .filter_map(|p| {
                p.ledger.gathering_time().map(|gathering_time| CompletionRow {
                    project_id: p.id,
                    name: p.name.clone(),
                    gathering_time,
                    description: p.description.clone(),
                })
            })
            .collect();

        rows.sort_by_key(|row| row.gathering_time);
        rows
    }

    /// Formats a gathering time as `[N day(s), ]H:MM:SS[.ffffff]`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::TimeDelta;
    /// use qrkot_core::reports::ReportService;
    ///
    /// let delta = TimeDelta::days(1) + TimeDelta::seconds(25);
    /// assert_eq!(ReportService::format_gathering_time(delta), "1 day, 0:00:25");
    /// ```
    #[must_use]
    pub fn format_gathering_time(delta: TimeDelta) -> String {
        let total_micros = delta
            .num_microseconds()
            .unwrap_or_else(|| delta.num_seconds().saturating_mul(MICROS_PER_SECOND));

        let micros_per_day = SECONDS_PER_DAY * MICROS_PER_SECOND;
        let days = total_micros.div_euclid(micros_per_day);
        let rest = total_micros.rem_euclid(micros_per_day);

        let seconds = rest / MICROS_PER_SECOND;
        let micros = rest % MICROS_PER_SECOND;
        let clock = format!(
            "{}:{:02}:{:02}",
            seconds / 3600,
            seconds % 3600 / 60,
            seconds % 60
        );
        let clock = if micros == 0 {
            clock
        } else {
            format!("{clock}.{micros:06}")
        };

        match days {
            0 => clock,
            1 | -1 => format!("{days} day, {clock}"),
            _ => format!("{days} days, {clock}"),
        }
    }
}
