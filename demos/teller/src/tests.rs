use des_core::SchedulerConfig;
use des_sched::RunEnd;

use crate::bank::{self, TellerConfig};

fn fixed(customers: u32, inter_arrival: f64, service_time: f64, closing_time: f64) -> TellerConfig {
    TellerConfig {
        customers,
        inter_arrival,
        jitter: 0.0,
        service_time,
        patience: 8.0,
        closing_time,
        ..Default::default()
    }
}

#[cfg(test)]
mod day {
    use super::*;

    #[test]
    fn quiet_day_serves_everyone() {
        let out = bank::simulate(fixed(3, 10.0, 5.0, 90.0)).unwrap();
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.served(), 3);
        assert_eq!(out.reneged(), 0);
        let starts: Vec<_> = out.records.iter().map(|r| r.started).collect();
        assert_eq!(starts, vec![Some(10.0), Some(20.0), Some(30.0)]);

        // 3 arrivals + 3 departures + close; every renege timer was cancelled.
        assert_eq!(out.summary.dispatched, 7);
        assert_eq!(out.summary.skipped, 3);
        assert_eq!(out.summary.end, RunEnd::Stopped);
        assert_eq!(out.summary.final_time.as_f64(), 90.0);
        assert_eq!(out.pending, 0);
    }

    #[test]
    fn slow_teller_loses_waiting_customers() {
        let out = bank::simulate(fixed(3, 1.0, 30.0, 100.0)).unwrap();
        assert_eq!(out.served(), 1);
        assert_eq!(out.reneged(), 2);
        assert_eq!(out.unfinished(), 0);
        assert_eq!(out.records[0].finished, Some(31.0));
        assert!(out.records[1].started.is_none());
    }

    #[test]
    fn closing_leaves_later_events_queued() {
        let out = bank::simulate(fixed(5, 10.0, 5.0, 27.0)).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.served(), 2);
        assert_eq!(out.summary.end, RunEnd::Stopped);
        assert_eq!(out.summary.final_time.as_f64(), 27.0);
        // Third arrival at 30 plus the cancelled renege timer at 28.
        assert_eq!(out.pending, 2);
    }

    #[test]
    fn time_limit_ends_the_day_early() {
        let config = TellerConfig {
            scheduler: SchedulerConfig { time_limit: Some(15.0), ..Default::default() },
            ..fixed(3, 10.0, 5.0, 90.0)
        };
        let out = bank::simulate(config).unwrap();
        assert_eq!(out.summary.end, RunEnd::TimeLimit);
        assert_eq!(out.served(), 1);
        assert_eq!(out.summary.final_time.as_f64(), 15.0);
    }

    #[test]
    fn same_seed_same_day() {
        let a = bank::simulate(TellerConfig::default()).unwrap();
        let b = bank::simulate(TellerConfig::default()).unwrap();
        assert_eq!(a.records, b.records);

        let other = TellerConfig { seed: 7, ..Default::default() };
        let c = bank::simulate(other).unwrap();
        assert_ne!(a.records, c.records);
    }
}

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "customers": 5, "scheduler": { "time_limit": 50.0 } }"#;
        let config: TellerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.customers, 5);
        assert_eq!(config.seed, TellerConfig::default().seed);
        assert_eq!(config.scheduler.time_limit, Some(50.0));
    }

    #[test]
    fn rejects_negative_jitter() {
        let config = TellerConfig { jitter: -1.0, ..Default::default() };
        assert!(config.validate().is_err());
        assert!(bank::simulate(config).is_err());
    }

    #[test]
    fn rejects_bad_scheduler_config() {
        let config = TellerConfig {
            scheduler: SchedulerConfig { initial_time: f64::INFINITY, ..Default::default() },
            ..Default::default()
        };
        assert!(bank::simulate(config).is_err());
    }
}

#[cfg(test)]
mod output {
    use super::*;

    #[test]
    fn csv_has_one_row_per_customer() {
        let out = bank::simulate(fixed(3, 1.0, 30.0, 100.0)).unwrap();
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("customers.csv");
        bank::write_csv(&path, &out.records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "customer,arrived,patience,started,finished,reneged");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "0,1.000,8.000,1.000,31.000,0");
        assert_eq!(lines[2], "1,2.000,8.000,,,1");
    }
}
