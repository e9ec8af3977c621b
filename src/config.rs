use std::{env, fmt::Display, net::{SocketAddr, ToSocketAddrs as _}, str::FromStr};

use sea_orm::ConnectOptions;
use tracing::{info, warn};

use crate::payroll::rates::{RateTable, WorkDayPolicy};

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    pub jwt_key: String,

    pub rates: RateTable,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: load_database_opt().into(),
        jwt_key: load_jwt_key(),
        rates: load_rates(),
    }
}

fn load_host_address() -> SocketAddr {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").nth(0)
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn load_database_opt() -> impl Into<ConnectOptions> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").expect("Environment `DATABASE_URL` is required to be set");

    var
}

fn load_jwt_key() -> String {
    info!("Loading environment `JWT_SECRET`");

    let var = env::var("JWT_SECRET").expect("Environment `JWT_SECRET` is required to be set");

    var
}

fn load_rates() -> RateTable {
    info!("Loading environment `PAYROLL_*`");

    rates_from(|key| env::var(key).ok())
}

fn rates_from(lookup: impl Fn(&str) -> Option<String>) -> RateTable {
    let defaults = RateTable::default();

    let count_no_show_days = load_or(&lookup, "PAYROLL_COUNT_NO_SHOW_DAYS", true);

    RateTable {
        minimum_wage: load_where(&lookup, "PAYROLL_MINIMUM_WAGE", defaults.minimum_wage, "positive", |wage| *wage > 0),
        monthly_work_hours: load_where(&lookup, "PAYROLL_MONTHLY_WORK_HOURS", defaults.monthly_work_hours, "positive", is_positive),
        daily_work_hours: load_where(&lookup, "PAYROLL_DAILY_WORK_HOURS", defaults.daily_work_hours, "positive", is_positive),
        overtime_multiplier: load_where(&lookup, "PAYROLL_OVERTIME_MULTIPLIER", defaults.overtime_multiplier, "positive", is_positive),
        full_day_break: (
            load_where(&lookup, "PAYROLL_FULL_DAY_BREAK_AFTER", defaults.full_day_break.0, "positive", is_positive),
            load_where(&lookup, "PAYROLL_FULL_DAY_BREAK_HOURS", defaults.full_day_break.1, "zero or more", is_not_negative),
        ),
        half_day_break: (
            load_where(&lookup, "PAYROLL_HALF_DAY_BREAK_AFTER", defaults.half_day_break.0, "positive", is_positive),
            load_where(&lookup, "PAYROLL_HALF_DAY_BREAK_HOURS", defaults.half_day_break.1, "zero or more", is_not_negative),
        ),
        national_pension_rate: load_where(&lookup, "PAYROLL_PENSION_RATE", defaults.national_pension_rate, "between 0 and 1", is_ratio),
        health_insurance_rate: load_where(&lookup, "PAYROLL_HEALTH_RATE", defaults.health_insurance_rate, "between 0 and 1", is_ratio),
        long_term_care_rate: load_where(&lookup, "PAYROLL_LONG_TERM_CARE_RATE", defaults.long_term_care_rate, "between 0 and 1", is_ratio),
        employment_insurance_rate: load_where(&lookup, "PAYROLL_EMPLOYMENT_RATE", defaults.employment_insurance_rate, "between 0 and 1", is_ratio),
        income_tax_rate: load_where(&lookup, "PAYROLL_INCOME_TAX_RATE", defaults.income_tax_rate, "between 0 and 1", is_ratio),
        local_income_tax_rate: load_where(&lookup, "PAYROLL_LOCAL_INCOME_TAX_RATE", defaults.local_income_tax_rate, "between 0 and 1", is_ratio),
        work_day_policy: if count_no_show_days { WorkDayPolicy::EveryRecord } else { WorkDayPolicy::ClockedInOnly },
    }
}

fn is_positive(value: &f64) -> bool {
    value.is_finite() && *value > 0.0
}

fn is_not_negative(value: &f64) -> bool {
    value.is_finite() && *value >= 0.0
}

fn is_ratio(value: &f64) -> bool {
    (0.0..=1.0).contains(value)
}

fn load_where<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T, requirement: &str, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let value = load_or(lookup, key, default);

    if !valid(&value) {
        warn!("Invalid `{key}` value {value}, must be {requirement}");
        panic!("Environment `{key}` must be {requirement}");
    }

    value
}

fn load_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(var) = lookup(key) else {
        return default;
    };

    match var.parse() {
        Ok(value) => {
            info!("`{key}` set to {value}");
            value
        },
        Err(e) => {
            warn!("Invalid `{key}` value: {e}");
            panic!("Environment `{key}` is not in a valid format");
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_rates_default() {
        assert_eq!(rates_from(|_| None), RateTable::default());
    }

    #[test]
    fn test_rates_override() {
        let vars = HashMap::from([
            ("PAYROLL_MINIMUM_WAGE", "9860"),
            ("PAYROLL_HEALTH_RATE", "0.03545"),
            ("PAYROLL_COUNT_NO_SHOW_DAYS", "false"),
        ]);

        let rates = rates_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(rates.minimum_wage, 9_860);
        assert_eq!(rates.health_insurance_rate, 0.03545);
        assert_eq!(rates.work_day_policy, WorkDayPolicy::ClockedInOnly);
        assert_eq!(rates.income_tax_rate, RateTable::default().income_tax_rate);
    }

    #[test]
    fn test_rates_break_override() {
        let vars = HashMap::from([
            ("PAYROLL_FULL_DAY_BREAK_AFTER", "9"),
            ("PAYROLL_FULL_DAY_BREAK_HOURS", "1.5"),
            ("PAYROLL_HALF_DAY_BREAK_HOURS", "0"),
        ]);

        let rates = rates_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(rates.full_day_break, (9.0, 1.5));
        assert_eq!(rates.half_day_break, (RateTable::default().half_day_break.0, 0.0));
        assert_eq!(rates.break_hours(8.5), 0.0);
        assert_eq!(rates.break_hours(9.0), 1.5);
    }

    #[test]
    #[should_panic(expected = "PAYROLL_MONTHLY_WORK_HOURS")]
    fn test_rates_zero_monthly_hours() {
        rates_from(|key| (key == "PAYROLL_MONTHLY_WORK_HOURS").then(|| "0".to_string()));
    }

    #[test]
    #[should_panic(expected = "PAYROLL_DAILY_WORK_HOURS")]
    fn test_rates_negative_daily_hours() {
        rates_from(|key| (key == "PAYROLL_DAILY_WORK_HOURS").then(|| "-8".to_string()));
    }

    #[test]
    #[should_panic(expected = "PAYROLL_INCOME_TAX_RATE")]
    fn test_rates_non_finite_rate() {
        rates_from(|key| (key == "PAYROLL_INCOME_TAX_RATE").then(|| "inf".to_string()));
    }

    #[test]
    #[should_panic(expected = "PAYROLL_MINIMUM_WAGE")]
    fn test_rates_invalid() {
        rates_from(|key| (key == "PAYROLL_MINIMUM_WAGE").then(|| "ten thousand".to_string()));
    }
}
