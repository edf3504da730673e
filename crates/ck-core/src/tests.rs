//! Unit tests for ck-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CashierId, CustomerId};

    #[test]
    fn index_is_zero_based() {
        assert_eq!(CashierId(1).index(), 0);
        assert_eq!(CashierId(7).index(), 6);
        assert_eq!(CashierId::from_index(6), CashierId(7));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CashierId::INVALID.0, u32::MAX);
        assert_eq!(CustomerId::INVALID.0, u64::MAX);
        assert_eq!(CustomerId::default(), CustomerId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(CustomerId(12).to_string(), "CustomerId(12)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick, format_hms};

    #[test]
    fn clock_starts_at_offset() {
        let mut clock = SimClock::new(25_200, 1);
        assert_eq!(clock.now(), 25_200);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.now(), 25_202);
    }

    #[test]
    fn coarse_ticks_scale_elapsed_time() {
        let mut clock = SimClock::new(0, 5);
        for _ in 0..4 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_secs(), 20);
        assert_eq!(clock.step_secs(), 5.0);
    }

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(0.0), "0:00:00");
        assert_eq!(format_hms(25_200.0), "7:00:00");
        assert_eq!(format_hms(3_661.4), "1:01:01");
        assert_eq!(format_hms(-4.0), "0:00:00");
        assert_eq!(format_hms(f64::INFINITY), "0:00:00");
    }
}

#[cfg(test)]
mod rng {
    use crate::{CartSizeDistribution, CustomerKind, RandomProcess, ScanTime};

    #[test]
    fn same_seed_same_stream() {
        let mut a = RandomProcess::new(42);
        let mut b = RandomProcess::new(42);
        for _ in 0..20 {
            assert_eq!(a.exponential(30.0), b.exponential(30.0));
        }
    }

    #[test]
    fn exponential_mean_is_close() {
        let mut rp = RandomProcess::new(7);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| rp.exponential(12.0)).sum::<f64>() / n as f64;
        assert!((mean - 12.0).abs() < 0.5, "sample mean {mean}");
    }

    #[test]
    fn exponential_with_zero_mean_is_zero() {
        let mut rp = RandomProcess::new(7);
        assert_eq!(rp.exponential(0.0), 0.0);
        assert_eq!(rp.exponential(-3.0), 0.0);
    }

    #[test]
    fn triangular_cart_sizes_stay_in_bounds() {
        let mut rp = RandomProcess::new(1);
        let dist = CartSizeDistribution::default();
        for _ in 0..5_000 {
            let n = rp.cart_size(&dist);
            assert!((1..=100).contains(&n), "cart size {n}");
        }
    }

    #[test]
    fn uniform_cart_sizes_cover_range() {
        let mut rp = RandomProcess::new(3);
        let dist = CartSizeDistribution::Uniform { min: 2, max: 4 };
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[rp.cart_size(&dist) as usize] = true;
        }
        assert_eq!(seen, [false, false, true, true, true]);
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rp = RandomProcess::new(3);
        let dist = CartSizeDistribution::Triangular { min: 5, max: 5, mode: None };
        assert_eq!(rp.cart_size(&dist), 5);
    }

    #[test]
    fn observer_probability_extremes() {
        let mut rp = RandomProcess::new(9);
        assert!((0..100).all(|_| rp.customer_kind(0.0) == CustomerKind::Regular));
        assert!((0..100).all(|_| rp.customer_kind(1.0) == CustomerKind::Observer));
    }

    #[test]
    fn fixed_scan_time_is_exact() {
        let mut rp = RandomProcess::new(0);
        let scan = ScanTime::Fixed { secs_per_item: 3.0 };
        assert_eq!(rp.scan_duration(&scan, 5), 15.0);
    }

    #[test]
    fn exponential_scan_time_sums_per_item() {
        let mut rp = RandomProcess::new(11);
        let scan = ScanTime::Exponential { mean_secs_per_item: 4.0 };
        assert_eq!(rp.scan_duration(&scan, 0), 0.0);
        let n = 2_000;
        let mean: f64 = (0..n).map(|_| rp.scan_duration(&scan, 10)).sum::<f64>() / n as f64;
        assert!((mean - 40.0).abs() < 2.0, "sample mean {mean}");
    }
}

#[cfg(test)]
mod distribution {
    use crate::{CartSizeDistribution, ScanTime};

    #[test]
    fn default_cart_distribution_is_valid() {
        assert!(CartSizeDistribution::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_or_inverted_carts() {
        assert!(CartSizeDistribution::Uniform { min: 0, max: 3 }.validate().is_err());
        assert!(CartSizeDistribution::Uniform { min: 9, max: 3 }.validate().is_err());
        let bad_mode = CartSizeDistribution::Triangular { min: 1, max: 10, mode: Some(20) };
        assert!(bad_mode.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_scan_time() {
        assert!(ScanTime::Fixed { secs_per_item: 0.0 }.validate().is_err());
        assert!(ScanTime::Exponential { mean_secs_per_item: f64::NAN }.validate().is_err());
        assert!(ScanTime::default().validate().is_ok());
    }
}
