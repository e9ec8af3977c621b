//! Default payroll figures, used when the environment does not override them

/// Statutory hourly minimum wage (KRW, 2025)
pub const MINIMUM_WAGE: i64 = 10_030;

/// Paid hours in a month for a 40h week, including weekly holiday allowance
pub const MONTHLY_WORK_HOURS: f64 = 209.0;

pub const DAILY_WORK_HOURS: f64 = 8.0;

pub const OVERTIME_MULTIPLIER: f64 = 1.5;

/// (raw hours threshold, break hours deducted)
pub const FULL_DAY_BREAK: (f64, f64) = (8.0, 1.0);
pub const HALF_DAY_BREAK: (f64, f64) = (4.0, 0.5);

pub const NATIONAL_PENSION_RATE: f64 = 0.045;
pub const HEALTH_INSURANCE_RATE: f64 = 0.03545;
/// Applied to the health insurance amount, not to gross pay
pub const LONG_TERM_CARE_RATE: f64 = 0.1295;
pub const EMPLOYMENT_INSURANCE_RATE: f64 = 0.009;
/// Flat simplification of the withholding table
pub const INCOME_TAX_RATE: f64 = 0.03;
/// Applied to the income tax amount
pub const LOCAL_INCOME_TAX_RATE: f64 = 0.1;
