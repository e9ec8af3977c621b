use chrono::TimeDelta;

use super::{model::{AttendanceRecord, NormalizedAttendance}, rates::RateTable, resolve::StaffPay};

/// Hours and pay a single attendance row contributes
///
/// Rows closed by a check-out are trusted as-is. A row that was checked in
/// but never checked out is settled against the scheduled check-out, or a
/// standard-length shift when nothing was scheduled.
pub fn normalize(record: &AttendanceRecord, pay: &StaffPay, rates: &RateTable) -> NormalizedAttendance {
    let clocked = record.actual_check_in.is_some() || record.actual_check_out.is_some();

    if record.actual_check_out.is_some() {
        return NormalizedAttendance {
            work_hours: record.work_hours.unwrap_or_default(),
            base_pay: record.base_pay.unwrap_or_default(),
            overtime_pay: record.overtime_pay.unwrap_or_default(),
            night_pay: record.night_pay.unwrap_or_default(),
            clocked,
        };
    }

    let Some(check_in) = record.actual_check_in else {
        return NormalizedAttendance {
            clocked,
            ..Default::default()
        };
    };

    // A standard day that does not fit the calendar settles as an empty shift
    let check_out = record.scheduled_check_out
        .or_else(|| hours_to_duration(pay.standard_hours_per_day).and_then(|shift| check_in.checked_add_signed(shift)))
        .unwrap_or(check_in);

    let raw_hours = ((check_out - check_in).num_seconds() as f64 / 3600.0).max(0.0);
    let work_hours = (raw_hours - rates.break_hours(raw_hours)).max(0.0);
    let overtime_hours = (work_hours - pay.standard_hours_per_day).max(0.0);

    let hourly_rate = pay.hourly_rate as f64;

    NormalizedAttendance {
        work_hours,
        base_pay: (work_hours.min(pay.standard_hours_per_day) * hourly_rate).round() as i64,
        overtime_pay: (overtime_hours * hourly_rate * rates.overtime_multiplier).round() as i64,
        night_pay: record.night_pay.unwrap_or_default(),
        clocked,
    }
}

fn hours_to_duration(hours: f64) -> Option<TimeDelta> {
    if !hours.is_finite() {
        return None
    }

    TimeDelta::try_seconds((hours * 3600.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone as _};
    use uuid::Uuid;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600).unwrap()
            .with_ymd_and_hms(2025, 3, 14, hour, minute, 0).unwrap()
    }

    fn record() -> AttendanceRecord {
        AttendanceRecord {
            staff_id: Uuid::new_v4(),
            work_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            scheduled_check_out: None,
            actual_check_in: None,
            actual_check_out: None,
            work_hours: None,
            base_pay: None,
            overtime_pay: None,
            night_pay: None,
        }
    }

    const PAY: StaffPay = StaffPay { hourly_rate: 10_000, standard_hours_per_day: 8.0 };

    #[test]
    fn test_checked_out_passes_through() {
        let rates = RateTable::default();

        let record = AttendanceRecord {
            actual_check_in: Some(at(9, 0)),
            actual_check_out: Some(at(23, 0)),
            scheduled_check_out: Some(at(18, 0)),
            work_hours: Some(5.25),
            base_pay: Some(52_500),
            overtime_pay: Some(1_234),
            night_pay: Some(4_000),
            ..record()
        };

        let normalized = normalize(&record, &PAY, &rates);
        assert_eq!(normalized, NormalizedAttendance {
            work_hours: 5.25,
            base_pay: 52_500,
            overtime_pay: 1_234,
            night_pay: 4_000,
            clocked: true,
        });
    }

    #[test]
    fn test_checked_out_without_precomputed_values() {
        let record = AttendanceRecord {
            actual_check_in: Some(at(9, 0)),
            actual_check_out: Some(at(18, 0)),
            ..record()
        };

        let normalized = normalize(&record, &PAY, &RateTable::default());
        assert_eq!(normalized, NormalizedAttendance { clocked: true, ..Default::default() });
    }

    #[test]
    fn test_missing_check_out_falls_back_to_schedule() {
        let record = AttendanceRecord {
            actual_check_in: Some(at(9, 0)),
            scheduled_check_out: Some(at(21, 0)),
            night_pay: Some(700),
            ..record()
        };

        // 12h raw, 1h break, 3h past the standard day
        let normalized = normalize(&record, &PAY, &RateTable::default());
        assert_eq!(normalized.work_hours, 11.0);
        assert_eq!(normalized.base_pay, 80_000);
        assert_eq!(normalized.overtime_pay, 45_000);
        assert_eq!(normalized.night_pay, 700);
        assert!(normalized.clocked);
    }

    #[test]
    fn test_missing_check_out_falls_back_to_standard_day() {
        let rates = RateTable::default();

        for standard_hours_per_day in [3.0, 4.0, 6.0, 8.0, 10.0] {
            let pay = StaffPay { hourly_rate: 10_000, standard_hours_per_day };
            let record = AttendanceRecord {
                actual_check_in: Some(at(9, 0)),
                ..record()
            };

            let normalized = normalize(&record, &pay, &rates);
            let expected_hours = standard_hours_per_day - rates.break_hours(standard_hours_per_day);

            assert_eq!(normalized.work_hours, expected_hours);
            assert!(normalized.work_hours <= standard_hours_per_day);
            assert_eq!(normalized.overtime_pay, 0);
            assert_eq!(normalized.base_pay, (expected_hours * 10_000.0).round() as i64);
        }
    }

    #[test]
    fn test_break_deduction() {
        let rates = RateTable::default();

        let cases = [
            // (check-out, expected hours)
            (at(17, 0), 7.0),   // 8h raw
            (at(16, 59), 7.0 - 1.0 / 60.0 + 0.5), // just under 8h raw, half break
            (at(13, 0), 3.5),   // 4h raw
            (at(12, 30), 3.5),  // 3.5h raw, no break
            (at(9, 0), 0.0),
        ];

        for (check_out, expected_hours) in cases {
            let record = AttendanceRecord {
                actual_check_in: Some(at(9, 0)),
                scheduled_check_out: Some(check_out),
                ..record()
            };

            let normalized = normalize(&record, &PAY, &rates);
            assert!((normalized.work_hours - expected_hours).abs() < 1e-9, "{check_out}: {} != {expected_hours}", normalized.work_hours);
        }
    }

    #[test]
    fn test_standard_day_out_of_range() {
        let record = AttendanceRecord {
            actual_check_in: Some(at(9, 0)),
            ..record()
        };

        for standard_hours_per_day in [1e13, f64::INFINITY, f64::NAN] {
            let pay = StaffPay { hourly_rate: 10_000, standard_hours_per_day };

            let normalized = normalize(&record, &pay, &RateTable::default());
            assert_eq!(normalized.work_hours, 0.0, "{standard_hours_per_day}");
            assert_eq!(normalized.base_pay, 0, "{standard_hours_per_day}");
            assert_eq!(normalized.overtime_pay, 0, "{standard_hours_per_day}");
            assert!(normalized.clocked);
        }
    }

    #[test]
    fn test_schedule_before_check_in() {
        let record = AttendanceRecord {
            actual_check_in: Some(at(19, 0)),
            scheduled_check_out: Some(at(18, 0)),
            ..record()
        };

        let normalized = normalize(&record, &PAY, &RateTable::default());
        assert_eq!(normalized.work_hours, 0.0);
        assert_eq!(normalized.base_pay, 0);
        assert_eq!(normalized.overtime_pay, 0);
    }

    #[test]
    fn test_no_clock_events() {
        let record = AttendanceRecord {
            scheduled_check_out: Some(at(18, 0)),
            work_hours: Some(8.0),
            base_pay: Some(80_000),
            ..record()
        };

        let normalized = normalize(&record, &PAY, &RateTable::default());
        assert_eq!(normalized, NormalizedAttendance::default());
        assert!(!normalized.clocked);
    }
}
