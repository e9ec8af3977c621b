use serde::{Deserialize, Serialize};

use super::rates::RateTable;

/// Statutory withholdings on one month of gross pay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub national_pension: i64,
    pub health_insurance: i64,
    pub long_term_care: i64,
    pub employment_insurance: i64,
    pub income_tax: i64,
    pub local_income_tax: i64,
}

impl Deductions {
    /// Each line is rounded to whole won before anything derived from it
    pub fn calculate(gross_pay: i64, rates: &RateTable) -> Self {
        let national_pension = apply(gross_pay, rates.national_pension_rate);
        let health_insurance = apply(gross_pay, rates.health_insurance_rate);
        let long_term_care = apply(health_insurance, rates.long_term_care_rate);
        let employment_insurance = apply(gross_pay, rates.employment_insurance_rate);
        let income_tax = apply(gross_pay, rates.income_tax_rate);
        let local_income_tax = apply(income_tax, rates.local_income_tax_rate);

        Self {
            national_pension,
            health_insurance,
            long_term_care,
            employment_insurance,
            income_tax,
            local_income_tax,
        }
    }

    pub fn total(&self) -> i64 {
        self.national_pension
            + self.health_insurance
            + self.long_term_care
            + self.employment_insurance
            + self.income_tax
            + self.local_income_tax
    }
}

fn apply(amount: i64, rate: f64) -> i64 {
    (amount as f64 * rate).round() as i64
}
