use crate::entity::sea_orm_active_enums::PayrollStatus;

impl PayrollStatus {
    /// Payroll only moves forward: pending, confirmed, paid
    pub fn can_become(self, next: PayrollStatus) -> bool {
        matches!(
            (self, next),
            (PayrollStatus::Pending, PayrollStatus::Confirmed) | (PayrollStatus::Confirmed, PayrollStatus::Paid)
        )
    }
}
