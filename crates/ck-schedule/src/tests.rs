//! Unit tests for ck-schedule.

use std::io::Cursor;

use crate::{
    ArrivalSchedule, ProvisioningSchedule, ScheduleError, TimeTable, load_arrivals_reader,
    load_provisioning_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Saturday staffing: 3 lanes from 07:00, 5 from 11:00, 2 from 21:00, shut at 23:00.
fn saturday_staffing() -> ProvisioningSchedule {
    ProvisioningSchedule::time_varying(vec![
        (25_200, 3),
        (39_600, 5),
        (75_600, 2),
        (82_800, 0),
    ])
    .unwrap()
}

// ── TimeTable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod time_table {
    use super::*;

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(TimeTable::<f64>::new(vec![]), Err(ScheduleError::Empty)));
    }

    #[test]
    fn non_monotonic_rows_are_rejected() {
        let err = TimeTable::new(vec![(0, 1.0), (100, 2.0), (100, 3.0)]).unwrap_err();
        match err {
            ScheduleError::NonMonotonic { index, start, previous } => {
                assert_eq!((index, start, previous), (2, 100, 100));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(TimeTable::new(vec![(50, 1), (10, 2)]).is_err());
    }

    #[test]
    fn lookup_is_a_step_function() {
        let t = TimeTable::new(vec![(10, 'a'), (20, 'b'), (30, 'c')]).unwrap();
        assert_eq!(t.bucket_at(9.9), None);
        assert_eq!(t.lookup(10.0), Some((0, &'a')));
        assert_eq!(t.lookup(19.5), Some((0, &'a')));
        assert_eq!(t.lookup(20.0), Some((1, &'b')));
        assert_eq!(t.lookup(1e9), Some((2, &'c')), "last row is open-ended");
    }

    #[test]
    fn constant_covers_everything_from_zero() {
        let t = TimeTable::constant(4);
        assert_eq!(t.value_at(0.0), Some(&4));
        assert_eq!(t.value_at(86_400.0), Some(&4));
        assert_eq!(t.start_secs(), 0);
    }
}

// ── ArrivalSchedule ───────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival {
    use super::*;

    #[test]
    fn fixed_mean_everywhere() {
        let s = ArrivalSchedule::Fixed(30.0);
        assert_eq!(s.mean_at(0.0), Some(30.0));
        assert_eq!(s.mean_at(50_000.0), Some(30.0));
        assert_eq!(s.start_secs(), 0);
    }

    #[test]
    fn time_varying_starts_at_first_bucket() {
        let s = ArrivalSchedule::time_varying(vec![(25_200, 60.0), (36_000, 20.0), (75_600, 0.0)])
            .unwrap();
        assert_eq!(s.start_secs(), 25_200);
        assert_eq!(s.mean_at(25_199.0), None);
        assert_eq!(s.mean_at(30_000.0), Some(60.0));
        assert_eq!(s.mean_at(40_000.0), Some(20.0));
        assert_eq!(s.mean_at(80_000.0), Some(0.0));
    }

    #[test]
    fn negative_or_nan_means_are_rejected() {
        assert!(ArrivalSchedule::time_varying(vec![(0, -1.0)]).is_err());
        assert!(ArrivalSchedule::Fixed(f64::NAN).validate().is_err());
        assert!(ArrivalSchedule::Fixed(0.0).validate().is_ok());
    }
}

// ── ProvisioningSchedule ──────────────────────────────────────────────────────

#[cfg(test)]
mod provisioning {
    use super::*;

    #[test]
    fn fixed_is_a_single_bucket() {
        let s = ProvisioningSchedule::Fixed(4);
        assert_eq!(s.target_at(0.0), Some((0, 4)));
        assert_eq!(s.target_at(99_999.0), Some((0, 4)));
        assert_eq!(s.max_target(), 4);
    }

    #[test]
    fn buckets_and_targets() {
        let s = saturday_staffing();
        assert_eq!(s.target_at(0.0), None);
        assert_eq!(s.target_at(25_200.0), Some((0, 3)));
        assert_eq!(s.target_at(50_000.0), Some((1, 5)));
        assert_eq!(s.target_at(80_000.0), Some((2, 2)));
        assert_eq!(s.target_at(90_000.0), Some((3, 0)));
        assert_eq!(s.max_target(), 5);
    }

    #[test]
    fn closed_only_once_no_later_bucket_staffs_a_lane() {
        let s = saturday_staffing();
        assert!(!s.is_closed_from(0.0), "opening bucket still ahead");
        assert!(!s.is_closed_from(50_000.0));
        assert!(s.is_closed_from(82_800.0));
        assert!(s.is_closed_from(90_000.0));

        let lunch_break = ProvisioningSchedule::time_varying(vec![(0, 2), (100, 0), (400, 1)]).unwrap();
        assert!(!lunch_break.is_closed_from(200.0));
        assert!(!ProvisioningSchedule::Fixed(1).is_closed_from(0.0));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    #[test]
    fn loads_arrival_table() {
        let csv = "start_secs,value\n25200,60\n36000, 25.5\n75600,0\n";
        let s = load_arrivals_reader(Cursor::new(csv)).unwrap();
        assert_eq!(s.mean_at(36_000.0), Some(25.5));
        assert_eq!(s.start_secs(), 25_200);
    }

    #[test]
    fn loads_provisioning_table() {
        let csv = "start_secs,value\n25200,3\n39600,5\n75600,2\n82800,0\n";
        let s = load_provisioning_reader(Cursor::new(csv)).unwrap();
        assert_eq!(s, saturday_staffing());
    }

    #[test]
    fn malformed_value_is_a_parse_error() {
        let csv = "start_secs,value\n25200,three\n";
        assert!(matches!(
            load_provisioning_reader(Cursor::new(csv)),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn out_of_order_file_is_rejected() {
        let csv = "start_secs,value\n36000,5\n25200,3\n";
        assert!(matches!(
            load_provisioning_reader(Cursor::new(csv)),
            Err(ScheduleError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn empty_file_is_rejected() {
        let csv = "start_secs,value\n";
        assert!(matches!(load_arrivals_reader(Cursor::new(csv)), Err(ScheduleError::Empty)));
    }
}
