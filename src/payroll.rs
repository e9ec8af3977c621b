//! Monthly payroll derived from raw attendance
//!
//! Everything outside `store` is a pure function of its inputs:
//! rows are grouped per staff member, each row is normalized against the
//! staff member's resolved pay, the month is folded into totals, and the
//! statutory deductions are taken from the gross. `store` persists the
//! resulting drafts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod aggregate;
pub mod deduction;
pub mod model;
pub mod normalize;
pub mod rates;
pub mod resolve;
pub mod status;
pub mod store;

use aggregate::{group_by_staff, StaffMonthlyTotals};
use deduction::Deductions;
use model::{AttendanceRecord, ContractRate};
use normalize::normalize;
use rates::RateTable;
use resolve::resolve_pay;

/// Computed payroll for one staff member, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDraft {
    pub staff_id: Uuid,
    pub totals: StaffMonthlyTotals,
    pub holiday_pay: i64,
    pub allowances: i64,
    pub gross_pay: i64,
    pub deductions: Deductions,
    pub net_pay: i64,
}

impl PayrollDraft {
    pub fn calculate(staff_id: Uuid, records: &[AttendanceRecord], contract: Option<&ContractRate>, rates: &RateTable) -> Self {
        let pay = resolve_pay(contract, rates);

        let normalized = records.iter()
            .map(|record| normalize(record, &pay, rates))
            .collect::<Vec<_>>();
        let totals = StaffMonthlyTotals::fold(&normalized, rates.work_day_policy);

        // Holiday pay and allowances are entered by hand after the run
        let holiday_pay = 0;
        let allowances = 0;

        let gross_pay = totals.base_pay + totals.overtime_pay + totals.night_pay + holiday_pay + allowances;
        let deductions = Deductions::calculate(gross_pay, rates);

        Self {
            staff_id,
            totals,
            holiday_pay,
            allowances,
            gross_pay,
            deductions,
            net_pay: gross_pay - deductions.total(),
        }
    }
}

/// Drafts for every staff member present in `attendances`, ordered by staff id
pub fn calculate_month(
    attendances: impl IntoIterator<Item = AttendanceRecord>,
    contracts: &[ContractRate],
    rates: &RateTable,
) -> Vec<PayrollDraft> {
    let contracts = contracts.iter()
        .map(|contract| (contract.staff_id, contract))
        .collect::<HashMap<_, _>>();

    group_by_staff(attendances).into_iter()
        .map(|(staff_id, records)| {
            let draft = PayrollDraft::calculate(staff_id, &records, contracts.get(&staff_id).copied(), rates);
            tracing::debug!(%staff_id, gross_pay = draft.gross_pay, net_pay = draft.net_pay, "payroll drafted");

            draft
        })
        .collect()
}
