use chrono::NaiveDate;

use crate::domain::models::{session::CourseSession, template::SessionTemplate};
use crate::domain::services::{calendar, conflict, conflict::Classification};
use crate::error::AppError;

/// Candidates examined per requested meeting before the planner gives up.
/// Bounds the scan when a course's calendar is densely booked.
const CANDIDATE_CEILING_FACTOR: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Create,
    Skip { conflicting_session_id: String },
}

#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub date: NaiveDate,
    pub decision: Decision,
}

#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub entries: Vec<PlanEntry>,
    /// False when the candidate ceiling was hit before reaching the target.
    /// A partial plan is a normal result, not an error.
    pub satisfied: bool,
}

impl GenerationPlan {
    pub fn create_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().filter_map(|e| match e.decision {
            Decision::Create => Some(e.date),
            Decision::Skip { .. } => None,
        })
    }

    pub fn created_count(&self) -> usize {
        self.create_dates().count()
    }
}

/// Expands the template's pattern from `start` and classifies each candidate
/// in order until `target` usable dates are found or the ceiling is reached.
/// Pure: reads `existing`, mutates nothing, so callers can use it for dry
/// runs and commit separately.
pub fn plan(
    template: &SessionTemplate,
    start: NaiveDate,
    target: usize,
    existing: &[CourseSession],
) -> Result<GenerationPlan, AppError> {
    let window = template.window();
    let ceiling = target * CANDIDATE_CEILING_FACTOR;

    // Conflicts consume candidates without producing sessions, so ask the
    // expander for up to `ceiling` dates and stop early once satisfied.
    let candidates = calendar::expand(template.weekdays()?, start, ceiling)?;

    let mut entries = Vec::new();
    let mut remaining = target;

    for date in candidates {
        match conflict::classify(date, window, existing) {
            Classification::Usable => {
                entries.push(PlanEntry { date, decision: Decision::Create });
                remaining -= 1;
            }
            Classification::Conflict { session_id } => {
                entries.push(PlanEntry {
                    date,
                    decision: Decision::Skip { conflicting_session_id: session_id },
                });
            }
        }
        if remaining == 0 {
            break;
        }
    }

    Ok(GenerationPlan { entries, satisfied: remaining == 0 })
}
