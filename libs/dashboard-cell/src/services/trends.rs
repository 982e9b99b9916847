// =====================================================================================
// PATIENT TRENDS - DAILY, WEEKLY AND MONTHLY APPOINTMENT COUNTS
// =====================================================================================
//
// Buckets are UTC calendar days. Every series is returned oldest first and is
// always full length, so an empty schedule yields zero-valued columns.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use shared_models::Appointment;

use crate::models::{PatientTrends, TrendBucket};

pub const DAILY_BUCKETS: i64 = 7;
pub const WEEKLY_BUCKETS: i64 = 4;
pub const MONTHLY_BUCKETS: i32 = 6;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn patient_trends<'a, I>(appointments: I, now: DateTime<Utc>) -> PatientTrends
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let today = now.date_naive();
    let mut trends = PatientTrends {
        daily: daily_buckets(today),
        weekly: weekly_buckets(),
        monthly: monthly_buckets(today),
    };

    for appointment in appointments {
        let day = appointment.appointment_date.date_naive();
        let days_ago = (today - day).num_days();
        if (0..DAILY_BUCKETS).contains(&days_ago) {
            trends.daily[(DAILY_BUCKETS - 1 - days_ago) as usize].record(appointment);
        }
        if (0..WEEKLY_BUCKETS * 7).contains(&days_ago) {
            trends.weekly[(WEEKLY_BUCKETS - 1 - days_ago / 7) as usize].record(appointment);
        }

        // Calendar month and year only; later days of this month count too.
        let months_ago = month_index(today) - month_index(day);
        if (0..MONTHLY_BUCKETS).contains(&months_ago) {
            trends.monthly[(MONTHLY_BUCKETS - 1 - months_ago) as usize].record(appointment);
        }
    }

    trends
}

fn daily_buckets(today: NaiveDate) -> Vec<TrendBucket> {
    (0..DAILY_BUCKETS)
        .rev()
        .map(|days_ago| {
            let day = today - Duration::days(days_ago);
            TrendBucket::new(day.format("%a").to_string())
        })
        .collect()
}

/// "Week 4" is the oldest window, "Week 1" the one ending today.
fn weekly_buckets() -> Vec<TrendBucket> {
    (1..=WEEKLY_BUCKETS)
        .rev()
        .map(|week| TrendBucket::new(format!("Week {}", week)))
        .collect()
}

fn monthly_buckets(today: NaiveDate) -> Vec<TrendBucket> {
    let current = month_index(today);
    (0..MONTHLY_BUCKETS)
        .rev()
        .map(|months_ago| {
            let month0 = (current - months_ago).rem_euclid(12) as usize;
            TrendBucket::new(MONTH_NAMES[month0])
        })
        .collect()
}

/// Months since year 0, so two dates can be compared by calendar month.
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared_models::AppointmentStatus;

    fn now() -> DateTime<Utc> {
        // Wednesday
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap()
    }

    fn appointment(
        date: DateTime<Utc>,
        status: AppointmentStatus,
        reason: Option<&str>,
    ) -> Appointment {
        Appointment {
            id: 1,
            patient_id: 1,
            doctor_id: 1,
            appointment_date: date,
            reason: reason.map(str::to_string),
            status,
            created_at: date,
        }
    }

    fn names(buckets: &[TrendBucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn empty_schedule_yields_zeroed_series() {
        let none: Vec<Appointment> = Vec::new();
        let trends = patient_trends(&none, now());

        assert_eq!(names(&trends.daily), vec!["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"]);
        assert_eq!(names(&trends.weekly), vec!["Week 4", "Week 3", "Week 2", "Week 1"]);
        assert_eq!(names(&trends.monthly), vec!["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
        assert!(trends
            .daily
            .iter()
            .chain(&trends.weekly)
            .chain(&trends.monthly)
            .all(|b| b.admitted == 0 && b.discharged == 0 && b.emergency == 0));
    }

    #[test]
    fn todays_confirmed_appointments_are_admitted() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap();
        let appointments = vec![
            appointment(morning, AppointmentStatus::Confirmed, None),
            appointment(morning, AppointmentStatus::Confirmed, Some("follow up")),
            appointment(morning, AppointmentStatus::Completed, None),
        ];

        let trends = patient_trends(&appointments, now());

        let today = &trends.daily[6];
        assert_eq!((today.admitted, today.discharged, today.emergency), (2, 1, 0));
        assert_eq!(trends.weekly[3].admitted, 2);
        assert_eq!(trends.monthly[5].discharged, 1);
    }

    #[test]
    fn emergency_counts_regardless_of_status() {
        let yesterday = Utc.with_ymd_and_hms(2024, 3, 12, 23, 59, 0).unwrap();
        let appointments = vec![
            appointment(yesterday, AppointmentStatus::Scheduled, Some("Emergency visit")),
            appointment(yesterday, AppointmentStatus::Cancelled, Some("EMERGENCY")),
        ];

        let trends = patient_trends(&appointments, now());

        assert_eq!(trends.daily[5].emergency, 2);
        assert_eq!(trends.daily[5].admitted, 0);
        assert_eq!(trends.daily[6].emergency, 0);
    }

    #[test]
    fn weekly_windows_are_contiguous() {
        let day = |d: u32| Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap();
        // 6 and 7 days ago straddle the Week 1 / Week 2 boundary; 27 days ago is the
        // last day of Week 4 and 28 days ago falls outside.
        let appointments = vec![
            appointment(day(7), AppointmentStatus::Confirmed, None),
            appointment(day(6), AppointmentStatus::Confirmed, None),
            appointment(Utc.with_ymd_and_hms(2024, 2, 15, 8, 0, 0).unwrap(), AppointmentStatus::Confirmed, None),
            appointment(Utc.with_ymd_and_hms(2024, 2, 14, 8, 0, 0).unwrap(), AppointmentStatus::Confirmed, None),
        ];

        let trends = patient_trends(&appointments, now());

        let admitted: Vec<u32> = trends.weekly.iter().map(|b| b.admitted).collect();
        assert_eq!(admitted, vec![1, 0, 1, 1]);
    }

    #[test]
    fn months_match_on_year_and_month() {
        let appointments = vec![
            appointment(Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(), AppointmentStatus::Completed, None),
            appointment(Utc.with_ymd_and_hms(2023, 3, 20, 0, 0, 0).unwrap(), AppointmentStatus::Completed, None),
            appointment(Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(), AppointmentStatus::Completed, None),
        ];

        let trends = patient_trends(&appointments, now());

        let discharged: Vec<u32> = trends.monthly.iter().map(|b| b.discharged).collect();
        assert_eq!(discharged, vec![1, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn future_days_only_count_toward_their_month() {
        let tomorrow = Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap();
        let appointments = vec![appointment(tomorrow, AppointmentStatus::Confirmed, None)];

        let trends = patient_trends(&appointments, now());

        assert!(trends.daily.iter().all(|b| b.admitted == 0));
        assert!(trends.weekly.iter().all(|b| b.admitted == 0));
        assert_eq!(trends.monthly[5].admitted, 1);
    }

    #[test]
    fn later_days_of_the_current_month_are_counted() {
        let next_week = Utc.with_ymd_and_hms(2024, 3, 20, 11, 0, 0).unwrap();
        let next_month = Utc.with_ymd_and_hms(2024, 4, 2, 11, 0, 0).unwrap();
        let appointments = vec![
            appointment(next_week, AppointmentStatus::Confirmed, Some("Emergency visit")),
            appointment(next_month, AppointmentStatus::Confirmed, Some("Emergency visit")),
        ];

        let trends = patient_trends(&appointments, now());

        let march = &trends.monthly[5];
        assert_eq!(march.name, "Mar");
        assert_eq!((march.admitted, march.emergency), (1, 1));
        assert!(trends.monthly[..5].iter().all(|b| b.admitted == 0 && b.emergency == 0));
    }
}
