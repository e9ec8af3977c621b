use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{model::{AttendanceRecord, NormalizedAttendance}, rates::WorkDayPolicy};

/// Month-to-date sums for one staff member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffMonthlyTotals {
    pub work_days: i32,
    pub total_hours: f64,
    pub base_pay: i64,
    pub overtime_pay: i64,
    pub night_pay: i64,
}

impl StaffMonthlyTotals {
    pub fn fold<'a>(records: impl IntoIterator<Item = &'a NormalizedAttendance>, policy: WorkDayPolicy) -> Self {
        records.into_iter()
            .fold(Self::default(), |totals, record| totals.add(record, policy))
    }

    pub fn add(self, record: &NormalizedAttendance, policy: WorkDayPolicy) -> Self {
        let counts = match policy {
            WorkDayPolicy::EveryRecord => true,
            WorkDayPolicy::ClockedInOnly => record.clocked,
        };

        Self {
            work_days: self.work_days + counts as i32,
            total_hours: self.total_hours + record.work_hours,
            base_pay: self.base_pay + record.base_pay,
            overtime_pay: self.overtime_pay + record.overtime_pay,
            night_pay: self.night_pay + record.night_pay,
        }
    }

    /// Combines two partial folds over disjoint sets of rows
    #[cfg(test)]
    pub fn merge(self, other: Self) -> Self {
        Self {
            work_days: self.work_days + other.work_days,
            total_hours: self.total_hours + other.total_hours,
            base_pay: self.base_pay + other.base_pay,
            overtime_pay: self.overtime_pay + other.overtime_pay,
            night_pay: self.night_pay + other.night_pay,
        }
    }
}

/// Buckets attendance rows per staff member, ordered by staff id
pub fn group_by_staff(records: impl IntoIterator<Item = AttendanceRecord>) -> BTreeMap<Uuid, Vec<AttendanceRecord>> {
    let mut groups: BTreeMap<Uuid, Vec<AttendanceRecord>> = BTreeMap::new();

    for record in records {
        groups.entry(record.staff_id).or_default().push(record);
    }

    groups
}
