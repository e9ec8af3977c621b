use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entity::sea_orm_active_enums::SalaryType;

use super::{model::ContractRate, rates::RateTable};

/// Pay basis resolved for one staff member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaffPay {
    pub hourly_rate: i64,
    pub standard_hours_per_day: f64,
}

/// Hourly rate and standard day length, falling back to the rate table when
/// there is no contract on file
pub fn resolve_pay(contract: Option<&ContractRate>, rates: &RateTable) -> StaffPay {
    let Some(contract) = contract else {
        return StaffPay {
            hourly_rate: rates.minimum_wage,
            standard_hours_per_day: rates.daily_work_hours,
        };
    };

    let hourly_rate = match contract.base_salary_type {
        SalaryType::Hourly => contract.base_salary_amount,
        SalaryType::Monthly => (contract.base_salary_amount as f64 / rates.monthly_work_hours).round() as i64,
    };

    let standard_hours_per_day = match contract.standard_hours_per_day {
        Some(hours) if hours > 0.0 && hours <= 24.0 => hours,
        Some(hours) => {
            warn!(staff_id = %contract.staff_id, "Ignoring contract standard day of {hours} hours");
            rates.daily_work_hours
        },
        None => rates.daily_work_hours,
    };

    StaffPay {
        hourly_rate,
        standard_hours_per_day,
    }
}
