//! Unit tests for ck-floor.

use ck_core::{CashierId, CustomerId, CustomerKind, Tick};

use crate::{Cashier, CashierStatus, Customer, CustomerStatus, FloorError, FloorLayout};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_cashier(id: u32) -> Cashier {
    let mut c = Cashier::new(CashierId(id), 14);
    c.activate(Tick(0)).unwrap();
    c.open(0.0).unwrap();
    c
}

fn customer(id: u64) -> Customer {
    Customer::new(CustomerId(id), CustomerKind::Regular, 5, 0.0, 0, 13)
}

// ── Transition tables ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tables {
    use super::*;

    #[test]
    fn cashier_lifecycle_edges() {
        use CashierStatus::*;
        assert!(Inactive.can_transition_to(Activating));
        assert!(Activating.can_transition_to(Available));
        assert!(Available.can_transition_to(Busy));
        assert!(Busy.can_transition_to(Available));
        assert!(Available.can_transition_to(Inactive));

        assert!(!Inactive.can_transition_to(Available));
        assert!(!Busy.can_transition_to(Inactive));
        assert!(!Activating.can_transition_to(Busy));
    }

    #[test]
    fn customer_lifecycle_edges() {
        use CustomerStatus::*;
        let happy = [Spawned, MovingToQueue, InQueue, Ready, Paying, Exiting, Finished];
        for pair in happy.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(InQueue.can_transition_to(ChangingQueue));
        assert!(ChangingQueue.can_transition_to(InQueue));

        assert!(!Ready.can_transition_to(ChangingQueue));
        assert!(!Finished.can_transition_to(Spawned));
        assert!(!Spawned.can_transition_to(Paying));
    }

    #[test]
    fn illegal_set_status_is_rejected() {
        let mut c = customer(1);
        let err = c.set_status(CustomerStatus::Paying).unwrap_err();
        assert!(matches!(err, FloorError::IllegalTransition { .. }));
        assert_eq!(c.status(), CustomerStatus::Spawned);
    }
}

// ── Cashier ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cashier {
    use super::*;

    #[test]
    fn activating_lane_does_not_accept_customers() {
        let mut c = Cashier::new(CashierId(1), 14);
        c.activate(Tick(3)).unwrap();
        assert!(c.open_for_entry);
        assert!(!c.accepts_customers());
        c.open(3.0).unwrap();
        assert!(c.accepts_customers());
    }

    #[test]
    fn queue_is_fifo_without_duplicates() {
        let mut c = open_cashier(1);
        c.enqueue(CustomerId(1)).unwrap();
        c.enqueue(CustomerId(2)).unwrap();
        assert!(matches!(
            c.enqueue(CustomerId(1)),
            Err(FloorError::AlreadyQueued { .. })
        ));
        assert_eq!(c.queue(), &[CustomerId(1), CustomerId(2)]);
    }

    #[test]
    fn closed_lane_rejects_entry() {
        let mut c = open_cashier(1);
        c.open_for_entry = false;
        assert!(matches!(c.enqueue(CustomerId(1)), Err(FloorError::LaneClosed(_))));
    }

    #[test]
    fn service_moves_customer_out_of_line() {
        let mut c = open_cashier(1);
        c.enqueue(CustomerId(1)).unwrap();
        c.enqueue(CustomerId(2)).unwrap();
        c.begin_service(CustomerId(1), 100.0, 15.0).unwrap();

        assert_eq!(c.status(), CashierStatus::Busy);
        assert_eq!(c.current_customer(), Some(CustomerId(1)));
        assert_eq!(c.queue(), &[CustomerId(2)]);
        assert_eq!(c.completion_time, 115.0);

        let served = c.finish_service().unwrap();
        assert_eq!(served, CustomerId(1));
        assert_eq!(c.status(), CashierStatus::Available);
        assert_eq!(c.customers_served, 1);
        assert_eq!(c.busy_secs, 15.0);
    }

    #[test]
    fn cannot_serve_someone_not_in_line() {
        let mut c = open_cashier(1);
        assert!(matches!(
            c.begin_service(CustomerId(9), 0.0, 1.0),
            Err(FloorError::NotQueued { .. })
        ));
        assert_eq!(c.status(), CashierStatus::Available);
    }

    #[test]
    fn finish_without_customer_errors() {
        let mut c = open_cashier(1);
        assert!(matches!(c.finish_service(), Err(FloorError::NotServing(_))));
    }

    #[test]
    fn last_behind_others() {
        let mut c = open_cashier(1);
        c.enqueue(CustomerId(1)).unwrap();
        assert!(!c.is_last_behind_others(CustomerId(1)), "alone in line is also the head");
        c.enqueue(CustomerId(2)).unwrap();
        assert!(c.is_last_behind_others(CustomerId(2)));
        assert!(!c.is_last_behind_others(CustomerId(1)));
    }

    #[test]
    fn open_time_accumulates_across_stints() {
        let mut c = Cashier::new(CashierId(1), 14);
        c.activate(Tick(0)).unwrap();
        c.open(100.0).unwrap();
        assert_eq!(c.open_secs(160.0), 60.0);
        c.retire(200.0).unwrap();
        assert_eq!(c.open_secs(500.0), 100.0);
        c.activate(Tick(10)).unwrap();
        c.open(600.0).unwrap();
        assert_eq!(c.open_secs(650.0), 150.0);
    }
}

// ── Customer phase steppers ───────────────────────────────────────────────────

#[cfg(test)]
mod customer_steps {
    use super::*;

    #[test]
    fn walks_along_aisle_then_reports_arrival() {
        let mut c = customer(1);
        c.column = 0;
        assert!(!c.walk_to_lane(2));
        assert!(!c.walk_to_lane(2));
        assert_eq!(c.column, 2);
        assert!(c.walk_to_lane(2));
    }

    #[test]
    fn walks_left_too() {
        let mut c = customer(1);
        c.column = 5;
        assert!(!c.walk_to_lane(3));
        assert_eq!(c.column, 4);
    }

    #[test]
    fn blocked_customer_does_not_advance() {
        let mut c = customer(1);
        c.depth = 2;
        assert!(!c.advance_in_lane(true));
        assert_eq!(c.depth, 2);
        assert!(!c.advance_in_lane(false));
        assert!(!c.advance_in_lane(false));
        assert_eq!(c.depth, 0);
        assert!(c.advance_in_lane(false));
    }

    #[test]
    fn lane_change_backs_out_before_sidestepping() {
        let mut c = customer(1);
        c.column = 14;
        c.depth = 11;
        assert!(!c.change_lane_step(17, 13)); // depth 12
        assert!(!c.change_lane_step(17, 13)); // depth 13
        assert_eq!(c.column, 14);
        assert!(!c.change_lane_step(17, 13)); // col 15
        assert!(!c.change_lane_step(17, 13)); // col 16
        assert!(!c.change_lane_step(17, 13)); // col 17
        assert!(c.change_lane_step(17, 13));
    }

    #[test]
    fn exit_counts_down() {
        let mut c = customer(1);
        c.exit_remaining = 2;
        assert!(!c.walk_out());
        assert!(!c.walk_out());
        assert!(c.walk_out());
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use super::*;

    #[test]
    fn default_floor_alternates_from_centre() {
        let cols = FloorLayout::default().columns();
        assert_eq!(cols, vec![14, 17, 11, 20, 8, 23, 5, 26, 2]);
    }

    #[test]
    fn max_lanes_matches_columns() {
        let layout = FloorLayout::default();
        assert_eq!(layout.max_lanes(), 9);
        assert_eq!(layout.column_for(0), Some(14));
        assert_eq!(layout.column_for(9), None);
    }

    #[test]
    fn wider_floor_holds_more_lanes() {
        let layout = FloorLayout { width: 60, ..FloorLayout::default() };
        assert!(layout.max_lanes() > 9);
    }
}
