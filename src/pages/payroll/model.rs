use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CalculatePayroll {
    pub(super) year: Option<i32>,
    pub(super) month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PayrollQuery {
    pub(super) year: Option<i32>,
    pub(super) month: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PayrollSummary {
    pub(super) success: bool,
    pub(super) message: String,
    pub(super) data: Vec<payroll::Model>,
    pub(super) failures: Vec<StaffFailure>,
}
