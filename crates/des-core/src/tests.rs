//! Unit tests for des-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EventCode, EventId, EventIdGen, HandlerId};

    #[test]
    fn generator_starts_at_one() {
        let mut ids = EventIdGen::new();
        assert_eq!(ids.peek(), EventId(1));
        assert_eq!(ids.next_id(), EventId(1));
        assert_eq!(ids.next_id(), EventId(2));
        assert_eq!(ids.peek(), EventId(3));
    }

    #[test]
    fn was_issued_tracks_minted_range() {
        let mut ids = EventIdGen::new();
        assert!(!ids.was_issued(EventId(0)));
        assert!(!ids.was_issued(EventId(1)));
        ids.next_id();
        ids.next_id();
        assert!(ids.was_issued(EventId(1)));
        assert!(ids.was_issued(EventId(2)));
        assert!(!ids.was_issued(EventId(3)));
        assert!(!ids.was_issued(EventId(0)));
    }

    #[test]
    fn display() {
        assert_eq!(EventId(7).to_string(), "EventId(7)");
        assert_eq!(EventCode(3).to_string(), "EventCode(3)");
        assert_eq!(HandlerId(1).to_string(), "HandlerId(1)");
    }

    #[test]
    fn raw_roundtrip() {
        assert_eq!(EventCode::from(12).raw(), 12);
        assert!(EventId(1) < EventId(2));
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn ordering() {
        assert!(SimTime::new(1.0) < SimTime::new(2.0));
        assert!(SimTime::new(-1.0) < SimTime::ZERO);
        assert_eq!(SimTime::new(2.5), SimTime::from(2.5));
    }

    #[test]
    fn nan_sorts_last() {
        assert!(SimTime::new(f64::NAN) > SimTime::new(f64::INFINITY));
        assert!(!SimTime::new(f64::NAN).is_finite());
    }

    #[test]
    fn arithmetic() {
        let t = SimTime::new(1.5);
        assert_eq!(t + 2.0, SimTime::new(3.5));
        assert_eq!(t.offset(-0.5), SimTime::new(1.0));
        assert_eq!(SimTime::new(4.0) - t, 2.5);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime::new(2.5).to_string(), "t=2.5");
    }
}

#[cfg(test)]
mod event {
    use std::rc::Rc;

    use crate::{Event, EventCode, EventId, NO_INDEX, SimTime};

    fn ev(id: u64, t: f64) -> Event<()> {
        Event::new(EventId(id), EventCode(0), SimTime::new(t), NO_INDEX, None)
    }

    #[test]
    fn earlier_time_orders_first() {
        assert!(ev(2, 1.0) < ev(1, 5.0));
    }

    #[test]
    fn same_time_breaks_tie_by_id() {
        assert!(ev(1, 2.0) < ev(3, 2.0));
        assert!(ev(3, 2.0) > ev(1, 2.0));
    }

    #[test]
    fn equality_ignores_payload() {
        let a = Event::new(EventId(4), EventCode(1), SimTime::new(1.0), 9, Some(1u8));
        let b = Event::new(EventId(4), EventCode(2), SimTime::new(1.0), 0, None);
        assert_eq!(a, b);
    }

    #[test]
    fn clone_shares_attachment() {
        let payload = Rc::new(String::from("tag-17"));
        let event = Event::new(
            EventId(1),
            EventCode(0),
            SimTime::ZERO,
            3,
            Some(Rc::clone(&payload)),
        );
        assert_eq!(Rc::strong_count(&payload), 2);

        let copy = event.clone();
        assert_eq!(Rc::strong_count(&payload), 3);
        assert!(Rc::ptr_eq(copy.attachment.as_ref().unwrap(), &payload));

        drop(event);
        drop(copy);
        assert_eq!(Rc::strong_count(&payload), 1);
    }

    #[test]
    fn display() {
        let e = Event::new(EventId(1), EventCode(2), SimTime::new(5.0), -1, Some(()));
        assert_eq!(e.to_string(), "Event[id=1, code=2, t=5, index=-1, attachment=yes]");
    }
}

#[cfg(test)]
mod config {
    use crate::{CancelPolicy, DesError, InitPolicy, SchedulerConfig, SimTime};

    #[test]
    fn defaults_match_classic_kernel() {
        let c = SchedulerConfig::default();
        assert_eq!(c.initial_time, 0.0);
        assert_eq!(c.init_policy, InitPolicy::EveryRun);
        assert_eq!(c.cancel_policy, CancelPolicy::Tombstone);
        assert!(c.time_limit.is_none());
        assert!(c.validate().is_ok());
        assert_eq!(c.start_time(), SimTime::ZERO);
    }

    #[test]
    fn rejects_non_finite_start() {
        let c = SchedulerConfig { initial_time: f64::INFINITY, ..Default::default() };
        assert!(matches!(c.validate(), Err(DesError::Config(_))));
    }

    #[test]
    fn rejects_limit_before_start() {
        let c = SchedulerConfig {
            initial_time: 10.0,
            time_limit:   Some(5.0),
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = SchedulerConfig { time_limit: Some(f64::NAN), ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn limit_converts_to_sim_time() {
        let c = SchedulerConfig { time_limit: Some(3.0), ..Default::default() };
        assert_eq!(c.limit(), Some(SimTime::new(3.0)));
    }
}

#[cfg(test)]
mod ordering_props {
    use proptest::prelude::*;

    use crate::{Event, EventCode, EventIdGen, NO_INDEX, SimTime};

    proptest! {
        /// Sorting any batch of freshly minted events yields ascending
        /// `(time, id)` order, and ties keep creation order.
        #[test]
        fn sort_is_time_then_creation(times in prop::collection::vec(0u8..8, 0..64)) {
            let mut ids = EventIdGen::new();
            let mut events: Vec<Event<()>> = times
                .iter()
                .map(|&t| Event::new(ids.next_id(), EventCode(0), SimTime::new(t as f64), NO_INDEX, None))
                .collect();
            events.sort();
            for pair in events.windows(2) {
                prop_assert!(pair[0].time <= pair[1].time);
                if pair[0].time == pair[1].time {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
