use serde::{Deserialize, Serialize};

use crate::consts;

/// Every figure the payroll pipeline depends on
///
/// Passed explicitly so different years or jurisdictions can be modeled,
/// and so tests can pin their own numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub minimum_wage: i64,
    pub monthly_work_hours: f64,
    pub daily_work_hours: f64,
    pub overtime_multiplier: f64,

    pub full_day_break: (f64, f64),
    pub half_day_break: (f64, f64),

    pub national_pension_rate: f64,
    pub health_insurance_rate: f64,
    pub long_term_care_rate: f64,
    pub employment_insurance_rate: f64,
    pub income_tax_rate: f64,
    pub local_income_tax_rate: f64,

    pub work_day_policy: WorkDayPolicy,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            minimum_wage: consts::MINIMUM_WAGE,
            monthly_work_hours: consts::MONTHLY_WORK_HOURS,
            daily_work_hours: consts::DAILY_WORK_HOURS,
            overtime_multiplier: consts::OVERTIME_MULTIPLIER,
            full_day_break: consts::FULL_DAY_BREAK,
            half_day_break: consts::HALF_DAY_BREAK,
            national_pension_rate: consts::NATIONAL_PENSION_RATE,
            health_insurance_rate: consts::HEALTH_INSURANCE_RATE,
            long_term_care_rate: consts::LONG_TERM_CARE_RATE,
            employment_insurance_rate: consts::EMPLOYMENT_INSURANCE_RATE,
            income_tax_rate: consts::INCOME_TAX_RATE,
            local_income_tax_rate: consts::LOCAL_INCOME_TAX_RATE,
            work_day_policy: WorkDayPolicy::default(),
        }
    }
}

impl RateTable {
    /// Unpaid break for a shift of `raw_hours`
    pub fn break_hours(&self, raw_hours: f64) -> f64 {
        if raw_hours >= self.full_day_break.0 {
            self.full_day_break.1
        } else if raw_hours >= self.half_day_break.0 {
            self.half_day_break.1
        } else {
            0.0
        }
    }
}

/// Which attendance rows count towards `work_days`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkDayPolicy {
    /// Every attendance row is a worked day, even one with no clock events
    #[default]
    EveryRecord,
    /// Rows with neither check-in nor check-out are not counted
    ClockedInOnly,
}
