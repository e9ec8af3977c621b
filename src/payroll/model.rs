use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{attendance, contract, sea_orm_active_enums::SalaryType};

/// One day of attendance for one staff member, as the payroll core sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub staff_id: Uuid,
    pub work_date: NaiveDate,
    pub scheduled_check_out: Option<DateTime<FixedOffset>>,
    pub actual_check_in: Option<DateTime<FixedOffset>>,
    pub actual_check_out: Option<DateTime<FixedOffset>>,
    /// Precomputed upstream once the staff member clocks out
    pub work_hours: Option<f64>,
    pub base_pay: Option<i64>,
    pub overtime_pay: Option<i64>,
    pub night_pay: Option<i64>,
}

impl From<attendance::Model> for AttendanceRecord {
    fn from(model: attendance::Model) -> Self {
        Self {
            staff_id: model.staff_id,
            work_date: model.work_date,
            scheduled_check_out: model.scheduled_check_out,
            actual_check_in: model.actual_check_in,
            actual_check_out: model.actual_check_out,
            work_hours: model.work_hours,
            base_pay: model.base_pay,
            overtime_pay: model.overtime_pay,
            night_pay: model.night_pay,
        }
    }
}

/// Salary terms of a staff member's contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRate {
    pub staff_id: Uuid,
    pub base_salary_type: SalaryType,
    pub base_salary_amount: i64,
    pub standard_hours_per_day: Option<f64>,
}

impl From<contract::Model> for ContractRate {
    fn from(model: contract::Model) -> Self {
        Self {
            staff_id: model.staff_id,
            base_salary_type: model.base_salary_type,
            base_salary_amount: model.base_salary_amount,
            standard_hours_per_day: model.standard_hours_per_day,
        }
    }
}

/// Hours and pay one attendance row contributes to the month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAttendance {
    pub work_hours: f64,
    pub base_pay: i64,
    pub overtime_pay: i64,
    pub night_pay: i64,
    /// Whether the row carries any clock event at all
    pub clocked: bool,
}
