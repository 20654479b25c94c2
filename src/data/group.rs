//! Experience-group aggregation.
//!
//! The per-group salary summary is computed over the full cleaned dataset,
//! before the train/test split. It feeds the group bar chart and the run
//! summary; the model never sees it.

use std::collections::BTreeMap;

use crate::domain::{EmployeeRecord, ExperienceGroup, GroupSummary};

/// Mean salary and headcount per experience group, ascending by group.
///
/// Groups with no rows are omitted (a mean over zero rows is meaningless).
pub fn group_salary_summary(records: &[EmployeeRecord]) -> Vec<GroupSummary> {
    let mut acc: BTreeMap<ExperienceGroup, (f64, usize)> = BTreeMap::new();

    for record in records {
        let group = ExperienceGroup::from_years(record.years_experience);
        let entry = acc.entry(group).or_insert((0.0, 0));
        entry.0 += record.salary;
        entry.1 += 1;
    }

    ExperienceGroup::ALL
        .iter()
        .filter_map(|group| {
            acc.get(group).map(|(sum, count)| GroupSummary {
                group: *group,
                mean_salary: sum / *count as f64,
                count: *count,
            })
        })
        .collect()
}
