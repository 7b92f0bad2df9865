//! Integration tests for epi-model.

use epi_core::{
    EntryIdx, EpiError, InfectionState, LocationId, ModelConfig, PersonId, SimDuration, TimePoint,
};
use epi_schedule::{Event, ItineraryRecord, ScheduleError};

use crate::{Model, ModelBuilder, ModelError, ReportObserver, SeirReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn hours(h: i64) -> SimDuration {
    SimDuration::hours(h)
}

fn days(d: i64) -> SimDuration {
    SimDuration::days(d)
}

/// Model starting at local midnight on 2020-04-01.
fn model(seed: u64) -> Model {
    ModelBuilder::new(ModelConfig::default())
        .seed(seed)
        .start_date(2020, 4, 1)
        .build()
        .unwrap()
}

/// One home of `n` persons with τ_e = 4 d, τ_i = 5 d.
fn closed_home(seed: u64, beta: f64, n: usize) -> (Model, LocationId) {
    let mut m = model(seed);
    let home = m.create_location(beta, "home").unwrap();
    for _ in 0..n {
        m.create_person(home, days(4), days(5)).unwrap();
    }
    (m, home)
}

fn where_is(m: &Model, p: PersonId) -> LocationId {
    m.person(p).unwrap().current_location()
}

/// Observer that records every callback.
#[derive(Default)]
struct Recorder {
    starts:  Vec<(TimePoint, TimePoint)>,
    reports: Vec<SeirReport>,
    ends:    Vec<TimePoint>,
}

impl ReportObserver for Recorder {
    fn on_sim_start(&mut self, now: TimePoint, stop: TimePoint) {
        self.starts.push((now, stop));
    }
    fn on_report(&mut self, report: &SeirReport) {
        self.reports.push(*report);
    }
    fn on_sim_end(&mut self, now: TimePoint) {
        self.ends.push(now);
    }
}

// ── ModelBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn start_date_sets_clock_origin() {
        let m = model(1);
        let midnight = TimePoint::local_midnight(2020, 4, 1).unwrap();
        assert_eq!(m.current_time(), midnight);
        assert_eq!(m.start_time(), midnight);
    }

    #[test]
    fn no_start_date_means_epoch() {
        let m = ModelBuilder::new(ModelConfig::default()).build().unwrap();
        assert_eq!(m.current_time(), TimePoint::EPOCH);
        assert_eq!(Model::new(3).current_time(), TimePoint::EPOCH);
        assert_eq!(Model::new(3).config().seed, 3);
    }

    #[test]
    fn invalid_report_interval_rejected() {
        let err = ModelBuilder::new(ModelConfig::default())
            .report_interval(SimDuration::ZERO)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::Usage(EpiError::Config(_))));
    }

    #[test]
    fn invalid_start_date_rejected() {
        let err = ModelBuilder::new(ModelConfig::default())
            .start_date(2021, 2, 30)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::Usage(EpiError::InvalidDate { .. })));
    }
}

// ── Construction & validation ─────────────────────────────────────────────────

#[cfg(test)]
mod usage_tests {
    use super::*;

    #[test]
    fn person_enters_home_immediately() {
        let (m, home) = closed_home(0, 0.7, 3);
        assert_eq!(m.person_count(), 3);
        assert_eq!(m.location(home).unwrap().len(), 3);
        for p in m.persons() {
            assert_eq!(p.current_location(), home);
            assert_eq!(p.state(), InfectionState::Susceptible);
        }
        m.check_invariants().unwrap();
    }

    #[test]
    fn ids_are_sequential() {
        let mut m = model(0);
        let a = m.create_location(1.0, "a").unwrap();
        let b = m.create_location(1.0, "").unwrap();
        assert_eq!((a, b), (LocationId(0), LocationId(1)));
        assert_eq!(m.location(b).unwrap().name(), "");
        let p0 = m.create_person(a, days(1), days(1)).unwrap();
        let p1 = m.create_person(b, days(1), days(1)).unwrap();
        assert_eq!((p0, p1), (PersonId(0), PersonId(1)));
        assert_eq!(m.location_count(), 2);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        let mut m = model(0);
        assert!(matches!(
            m.create_location(-1.0, "x").unwrap_err(),
            ModelError::Usage(EpiError::InvalidBeta(_))
        ));
        let home = m.create_location(1.0, "home").unwrap();
        assert!(matches!(
            m.create_person(home, days(-1), days(1)).unwrap_err(),
            ModelError::Usage(EpiError::InvalidDuration { .. })
        ));
        assert!(matches!(
            m.create_person(LocationId(9), days(1), days(1)).unwrap_err(),
            ModelError::Usage(EpiError::LocationNotFound(LocationId(9)))
        ));
        assert!(matches!(
            m.person(PersonId(0)).unwrap_err(),
            ModelError::Usage(EpiError::PersonNotFound(PersonId(0)))
        ));
        assert!(matches!(
            m.simulate(hours(-1)).unwrap_err(),
            ModelError::Usage(EpiError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn itinerary_validation() {
        let (mut m, home) = closed_home(0, 0.7, 1);
        let t0 = m.current_time();
        let p = PersonId(0);

        let err = m.add_visit(p, home, t0 + hours(3), t0 + hours(3)).unwrap_err();
        assert!(matches!(err, ModelError::Usage(EpiError::InvalidItinerary { .. })));

        let err = m.add_visit(p, LocationId(7), t0 + hours(1), t0 + hours(2)).unwrap_err();
        assert!(matches!(err, ModelError::Usage(EpiError::LocationNotFound(_))));

        let err = m.add_visit(PersonId(4), home, t0 + hours(1), t0 + hours(2)).unwrap_err();
        assert!(matches!(err, ModelError::Usage(EpiError::PersonNotFound(_))));
        assert_eq!(m.pending_events(), 0);
    }

    #[test]
    fn past_entries_and_events_rejected() {
        let (mut m, home) = closed_home(0, 0.7, 1);
        m.simulate(hours(5)).unwrap();
        let now = m.current_time();

        let err = m.add_visit(PersonId(0), home, now - hours(1), now + hours(1)).unwrap_err();
        assert!(matches!(err, ModelError::Schedule(ScheduleError::InPast { .. })));

        let err = m.schedule(now - hours(1), Event::ReportSeir).unwrap_err();
        assert!(matches!(err, ModelError::Schedule(ScheduleError::InPast { .. })));

        m.schedule(now, Event::ReportSeir).unwrap();
    }

    #[test]
    fn entry_events_must_name_known_entries() {
        let (mut m, _) = closed_home(0, 0.7, 1);
        let at = m.current_time() + hours(1);
        let err = m
            .schedule(at, Event::BeginEntry { person: PersonId(0), entry: EntryIdx(0) })
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownEntry { .. }));
    }

    #[test]
    fn start_date_locks_after_scheduling() {
        let mut m = Model::new(0);
        let home = m.create_location(1.0, "home").unwrap();
        m.create_person(home, days(1), days(1)).unwrap();

        // Nothing scheduled yet: allowed, and existing locations follow.
        m.set_start_date(2020, 4, 1).unwrap();
        let midnight = TimePoint::local_midnight(2020, 4, 1).unwrap();
        assert_eq!(m.current_time(), midnight);
        assert_eq!(m.location(home).unwrap().last_update(), midnight);

        m.add_visit(PersonId(0), home, midnight + hours(1), midnight + hours(2)).unwrap();
        assert!(matches!(
            m.set_start_date(2020, 5, 1).unwrap_err(),
            ModelError::Usage(EpiError::StartDateLocked)
        ));
    }

    #[test]
    fn start_date_locks_after_simulating() {
        let mut m = Model::new(0);
        m.simulate(SimDuration::ZERO).unwrap();
        assert!(matches!(
            m.set_start_date(2020, 4, 1).unwrap_err(),
            ModelError::Usage(EpiError::StartDateLocked)
        ));
    }

    #[test]
    fn start_date_locks_after_infecting() {
        let mut m = Model::new(0);
        let home = m.create_location(1.0, "home").unwrap();
        let p = m.create_person(home, days(4), days(5)).unwrap();
        m.infect(p).unwrap();

        assert!(matches!(
            m.set_start_date(2020, 4, 1).unwrap_err(),
            ModelError::Usage(EpiError::StartDateLocked)
        ));
        assert_eq!(m.current_time(), TimePoint::EPOCH);

        // The infection keeps its own clock and progresses normally.
        m.simulate(hours(1)).unwrap();
        assert_eq!(m.person(p).unwrap().state(), InfectionState::Exposed);
    }

    #[test]
    fn overflowing_duration_is_usage_error() {
        let mut m = model(0);
        let start = m.current_time();
        let err = m.simulate(SimDuration::secs(i64::MAX)).unwrap_err();
        assert!(matches!(err, ModelError::Usage(EpiError::InvalidDuration { .. })));
        assert_eq!(m.current_time(), start);
        assert_eq!(m.pending_events(), 0);
    }

    #[test]
    fn overflowing_itinerary_offset_is_usage_error() {
        let mut m = model(0);
        let home = m.create_location(0.7, "home").unwrap();
        let p = m.create_person(home, days(1), days(1)).unwrap();
        let records = [ItineraryRecord {
            person:       p,
            location:     home,
            start_offset: hours(1),
            end_offset:   SimDuration::secs(i64::MAX),
        }];
        let err = m.add_itineraries(&records).unwrap_err();
        assert!(matches!(err, ModelError::Usage(EpiError::InvalidDuration { .. })));
        assert!(m.person(p).unwrap().itinerary().is_empty());
        assert_eq!(m.pending_events(), 0);
    }

    #[test]
    fn infect_is_idempotent() {
        let (mut m, _) = closed_home(0, 0.7, 2);
        assert!(m.infect(PersonId(1)).unwrap());
        assert!(!m.infect(PersonId(1)).unwrap());
        let p = m.person(PersonId(1)).unwrap();
        assert_eq!(p.state(), InfectionState::Exposed);
        assert_eq!(p.infected_at(), Some(m.current_time()));
        assert_eq!(m.population_counts().exposed, 1);
    }
}

// ── Reports ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;

    #[test]
    fn one_home_no_disease() {
        // 1000 persons, β = 0.7, nothing seeded, 14 days.
        let (mut m, _) = closed_home(5, 0.7, 1000);
        m.simulate(days(14)).unwrap();

        let timeline = m.get_daily_reports();
        assert_eq!(timeline.len(), 15, "snapshots at days 0..=14");
        for r in timeline {
            assert_eq!((r.susceptible, r.exposed, r.infectious, r.recovered), (1000, 0, 0, 0));
        }
        let t0 = m.start_time();
        let expected: Vec<_> = (0..=14).map(|d| t0 + days(d)).collect();
        assert_eq!(timeline.times(), expected);
    }

    #[test]
    fn report_before_any_snapshot_is_zero() {
        let (m, _) = closed_home(0, 0.7, 10);
        let r = m.get_report();
        assert_eq!(r, SeirReport::empty(m.start_time()));
        assert!(m.get_daily_reports().is_empty());
    }

    #[test]
    fn get_report_is_latest_snapshot() {
        let (mut m, _) = closed_home(0, 0.7, 10);
        m.simulate(days(3)).unwrap();
        assert_eq!(m.get_report().time, m.start_time() + days(3));
        assert_eq!(m.get_report().total(), 10);
    }

    #[test]
    fn reuse_keeps_grid_aligned() {
        let (mut m, _) = closed_home(0, 0.7, 10);
        let t0 = m.start_time();
        m.simulate(hours(2)).unwrap();
        m.simulate(hours(22)).unwrap();

        assert_eq!(m.current_time(), t0 + hours(24));
        assert_eq!(m.get_daily_reports().times(), vec![t0, t0 + hours(24)]);

        // A third call must not repeat the 24 h snapshot.
        m.simulate(hours(1)).unwrap();
        assert_eq!(m.get_daily_reports().len(), 2);
    }

    #[test]
    fn custom_report_interval() {
        let mut m = ModelBuilder::new(ModelConfig::default())
            .report_interval(hours(6))
            .build()
            .unwrap();
        let home = m.create_location(0.0, "home").unwrap();
        m.create_person(home, days(1), days(1)).unwrap();
        m.simulate(days(1)).unwrap();
        assert_eq!(m.get_daily_reports().len(), 5);
    }

    #[test]
    fn zero_duration_reports_current_instant() {
        let (mut m, _) = closed_home(0, 0.7, 4);
        m.simulate(SimDuration::ZERO).unwrap();
        assert_eq!(m.get_daily_reports().times(), vec![m.start_time()]);
        assert_eq!(m.current_time(), m.start_time());
    }

    #[test]
    fn user_report_at_grid_point_is_not_duplicated() {
        let (mut m, _) = closed_home(0, 0.7, 4);
        let t0 = m.start_time();
        m.schedule(t0 + days(1), Event::ReportSeir).unwrap();
        m.schedule(t0 + hours(30), Event::ReportSeir).unwrap();
        m.simulate(days(2)).unwrap();
        assert_eq!(
            m.get_daily_reports().times(),
            vec![t0, t0 + days(1), t0 + hours(30), t0 + days(2)]
        );
    }

    #[test]
    fn observer_sees_every_snapshot() {
        let (mut m, _) = closed_home(0, 0.7, 4);
        let t0 = m.start_time();
        let mut rec = Recorder::default();
        m.simulate_with(days(2), &mut rec).unwrap();

        assert_eq!(rec.starts, vec![(t0, t0 + days(2))]);
        assert_eq!(rec.ends, vec![t0 + days(2)]);
        assert_eq!(rec.reports.as_slice(), m.get_daily_reports().as_slice());
    }

    #[test]
    fn timeline_columns_line_up() {
        let (mut m, _) = closed_home(9, 0.7, 50);
        m.infect(PersonId(0)).unwrap();
        m.simulate(days(10)).unwrap();
        let t = m.get_daily_reports();
        let (s, e, i, r) = (t.susceptible(), t.exposed(), t.infectious(), t.recovered());
        for k in 0..t.len() {
            assert_eq!(s[k] + e[k] + i[k] + r[k], 50);
            assert_eq!(t.as_slice()[k].susceptible, s[k]);
        }
    }

    #[test]
    fn snapshot_does_not_touch_timeline() {
        let (mut m, home) = closed_home(0, 0.7, 6);
        m.simulate(hours(5)).unwrap();
        let before = m.get_daily_reports().len();
        let snap = m.snapshot();
        assert_eq!(snap.time, m.current_time());
        assert_eq!(snap.susceptible, 6);
        assert_eq!(m.location_report(home).unwrap().total(), 6);
        assert_eq!(m.get_daily_reports().len(), before);
    }
}

// ── Itineraries ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod itinerary_tests {
    use super::*;

    #[test]
    fn group_visit_and_return() {
        // 10 persons at l1, each visits l2 over [1h, 3h).
        let mut m = model(0);
        let l1 = m.create_location(0.5, "Location1").unwrap();
        let l2 = m.create_location(0.5, "Location2").unwrap();
        let t0 = m.current_time();
        for _ in 0..10 {
            let p = m.create_person(l1, days(2), days(3)).unwrap();
            m.add_visit(p, l2, t0 + hours(1), t0 + hours(3)).unwrap();
        }

        m.simulate(hours(2)).unwrap();
        assert_eq!(m.location(l1).unwrap().len(), 0);
        assert_eq!(m.location(l2).unwrap().len(), 10);

        m.simulate(hours(2)).unwrap();
        assert_eq!(m.location(l1).unwrap().len(), 10);
        assert_eq!(m.location(l2).unwrap().len(), 0);
        m.check_invariants().unwrap();
    }

    #[test]
    fn overlapping_entries_preempt_without_restoration() {
        // A = [1h, 5h) at l1, B = [2h, 3h) at l2.
        let mut m = model(0);
        let h = m.create_location(0.5, "H").unwrap();
        let l1 = m.create_location(0.5, "L1").unwrap();
        let l2 = m.create_location(0.5, "L2").unwrap();
        let p = m.create_person(h, days(2), days(3)).unwrap();
        let t0 = m.current_time();
        m.add_visit(p, l1, t0 + hours(1), t0 + hours(5)).unwrap();
        m.add_visit(p, l2, t0 + hours(2), t0 + hours(3)).unwrap();

        let mut seen = vec![where_is(&m, p)];
        for _ in 0..6 {
            m.simulate(hours(1)).unwrap();
            seen.push(where_is(&m, p));
        }
        //               0h  1h  2h  3h  4h  5h  6h
        assert_eq!(seen, vec![h, l1, l2, h, h, h, h]);
        assert_eq!(m.person(p).unwrap().active_entry(), None);
    }

    #[test]
    fn back_to_back_entries_hand_over() {
        let mut m = model(0);
        let h = m.create_location(0.5, "H").unwrap();
        let l1 = m.create_location(0.5, "L1").unwrap();
        let l2 = m.create_location(0.5, "L2").unwrap();
        let p = m.create_person(h, days(2), days(3)).unwrap();
        let t0 = m.current_time();
        m.add_visit(p, l1, t0 + hours(1), t0 + hours(2)).unwrap();
        m.add_visit(p, l2, t0 + hours(2), t0 + hours(3)).unwrap();

        m.simulate(hours(2)).unwrap();
        assert_eq!(where_is(&m, p), l2);
        m.simulate(hours(1)).unwrap();
        assert_eq!(where_is(&m, p), h);
    }

    #[test]
    fn entries_beyond_stop_stay_queued() {
        let (mut m, home) = closed_home(0, 0.7, 1);
        let away = m.create_location(0.7, "away").unwrap();
        let t0 = m.current_time();
        m.add_visit(PersonId(0), away, t0 + days(3), t0 + days(4)).unwrap();

        m.simulate(days(1)).unwrap();
        assert_eq!(where_is(&m, PersonId(0)), home);
        m.simulate(days(2) + hours(12)).unwrap();
        assert_eq!(where_is(&m, PersonId(0)), away);
    }

    #[test]
    fn loaded_records_offset_from_start() {
        let (mut m, _) = closed_home(0, 0.7, 2);
        let work = m.create_location(0.7, "work").unwrap();
        let records = [
            ItineraryRecord {
                person:       PersonId(0),
                location:     work,
                start_offset: hours(8),
                end_offset:   hours(17),
            },
            ItineraryRecord {
                person:       PersonId(1),
                location:     work,
                start_offset: hours(9),
                end_offset:   hours(12),
            },
        ];
        assert_eq!(m.add_itineraries(&records).unwrap(), 2);
        assert_eq!(m.pending_events(), 4);

        m.simulate(hours(10)).unwrap();
        let at_work: Vec<_> = m.location(work).unwrap().members().collect();
        assert_eq!(at_work, vec![PersonId(0), PersonId(1)]);
        let entry = m.person(PersonId(0)).unwrap().itinerary().entries()[0];
        assert_eq!(entry.start(), m.start_time() + hours(8));
    }

    #[test]
    fn stop_event_ends_run_early() {
        let (mut m, _) = closed_home(0, 0.7, 1);
        let t0 = m.start_time();
        m.schedule(t0 + hours(5), Event::StopSim).unwrap();
        m.simulate(days(2)).unwrap();
        assert_eq!(m.current_time(), t0 + hours(5));
        assert_eq!(m.get_daily_reports().len(), 1);

        // The remaining grid reports fire on the next call.
        m.simulate(days(2)).unwrap();
        assert_eq!(m.current_time(), t0 + hours(5) + days(2));
        assert_eq!(m.get_daily_reports().times(), vec![t0, t0 + days(1), t0 + days(2)]);
    }
}

// ── Epidemic dynamics ─────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamics_tests {
    use super::*;

    fn seeded_home_run(seed: u64) -> Model {
        let (mut m, _) = closed_home(seed, 0.7, 1000);
        m.infect(PersonId(0)).unwrap();
        m.simulate(days(60)).unwrap();
        m
    }

    #[test]
    fn single_seed_spreads_through_home() {
        // One seed takes off with high probability but can die out early, so
        // look at a few seeds and check the largest outbreak.
        // Peak timing: see "Note on scenario S2" in DESIGN.md.
        let runs: Vec<Model> = (1..=3).map(seeded_home_run).collect();
        for m in &runs {
            let first = m.get_daily_reports().as_slice()[0];
            assert_eq!(first.exposed + first.infectious, 1);
            assert_eq!(first.susceptible, 999);
        }

        let best = runs
            .iter()
            .max_by_key(|m| m.get_report().recovered)
            .unwrap();
        let timeline = best.get_daily_reports();
        assert_eq!(timeline.len(), 61);
        assert!(best.get_report().recovered > 500, "final {:?}", best.get_report());

        let peak = timeline.peak_active().unwrap();
        assert!(peak.time > best.start_time());
        assert!(peak.time < best.start_time() + days(60));
    }

    #[test]
    fn same_seed_same_timeline() {
        let a = seeded_home_run(42);
        let b = seeded_home_run(42);
        assert_eq!(a.get_daily_reports(), b.get_daily_reports());
    }

    #[test]
    fn zero_beta_keeps_everyone_susceptible() {
        let (mut m, _) = closed_home(3, 0.0, 200);
        m.infect(PersonId(0)).unwrap();
        m.simulate(days(30)).unwrap();
        assert_eq!(m.get_report().susceptible, 199);
        assert_eq!(m.get_report().recovered, 1);
    }

    #[test]
    fn zero_periods_recover_on_next_update() {
        let mut m = model(0);
        let home = m.create_location(0.0, "home").unwrap();
        let p = m.create_person(home, SimDuration::ZERO, SimDuration::ZERO).unwrap();
        m.infect(p).unwrap();
        m.simulate(SimDuration::secs(1)).unwrap();
        let counts = m.snapshot();
        assert_eq!(counts.recovered, 1);
    }

    #[test]
    fn lone_infectious_person_infects_nobody_elsewhere() {
        let mut m = model(8);
        let isolation = m.create_location(100.0, "isolation").unwrap();
        let ward = m.create_location(100.0, "ward").unwrap();
        let patient = m.create_person(isolation, SimDuration::ZERO, days(20)).unwrap();
        for _ in 0..20 {
            m.create_person(ward, days(1), days(1)).unwrap();
        }
        m.infect(patient).unwrap();
        m.simulate(days(10)).unwrap();
        assert_eq!(m.get_report().susceptible, 20);
        assert_eq!(m.location_report(ward).unwrap().susceptible, 20);
    }

    #[test]
    fn totals_and_persons_are_monotonic() {
        // Commuters between two homes and a shared workplace.
        let mut m = model(17);
        let homes = [
            m.create_location(0.4, "home-a").unwrap(),
            m.create_location(0.4, "home-b").unwrap(),
        ];
        let work = m.create_location(3.0, "work").unwrap();
        let t0 = m.current_time();
        for i in 0..60 {
            let p = m.create_person(homes[i % 2], days(1), days(3)).unwrap();
            for d in 0..20 {
                let start = t0 + days(d) + hours(8 + (i % 3) as i64);
                m.add_visit(p, work, start, start + hours(8)).unwrap();
            }
        }
        m.infect(PersonId(0)).unwrap();
        m.infect(PersonId(1)).unwrap();

        let mut last: Vec<InfectionState> = m.persons().iter().map(|p| p.state()).collect();
        for _ in 0..(20 * 6) {
            m.simulate(hours(4)).unwrap();
            m.check_invariants().unwrap();
            let now: Vec<InfectionState> = m.persons().iter().map(|p| p.state()).collect();
            for (before, after) in last.iter().zip(&now) {
                assert!(before <= after, "state went backwards: {before} -> {after}");
            }
            last = now;
        }

        let t = m.get_daily_reports();
        assert!(t.susceptible().windows(2).all(|w| w[0] >= w[1]));
        assert!(t.recovered().windows(2).all(|w| w[0] <= w[1]));
        assert!(t.times().windows(2).all(|w| w[0] < w[1]));
        assert!(t.iter().all(|r| r.total() == 60));
    }

    #[test]
    fn random_generator_is_shared() {
        let mut a = Model::new(99);
        let mut b = Model::new(99);
        let x: u64 = a.random_generator().random();
        let y: u64 = b.random_generator().random();
        assert_eq!(x, y);
    }
}
