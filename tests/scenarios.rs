//! End-to-end ride-sharing scenarios.

use std::time::Duration;

use jiff::civil::{date, DateTime};
use u_carpool::constructive::greedy_assignment;
use u_carpool::distance::DistanceMatrix;
use u_carpool::evaluation::{validate, FitnessEvaluator, PenaltyWeights};
use u_carpool::ga::{crossover, Cancellation, GaConfig, RideSharingAlgorithm, StopReason};
use u_carpool::models::{Coordinate, Passenger, Vehicle};
use u_carpool::problem::RideSharingProblem;
use u_carpool::random::create_rng;
use u_carpool::schedule::{parse_target_time, PickupScheduler};

const A: Coordinate = Coordinate::new(37.5000, 127.0000);
const B: Coordinate = Coordinate::new(37.5600, 127.0800);
const D: Coordinate = Coordinate::new(37.5300, 126.9500);

fn near_a(id: usize, dlat: f64, dlon: f64) -> Passenger {
    Passenger::new(
        id,
        Coordinate::new(A.latitude() + dlat, A.longitude() + dlon),
        format!("rider {id}"),
    )
}

fn commute_problem() -> RideSharingProblem {
    let vehicles = vec![Vehicle::new(0, A, 3, "Dana"), Vehicle::new(1, B, 2, "Eli")];
    let passengers = vec![
        near_a(1, 0.002, 0.001),
        near_a(2, -0.001, 0.003),
        near_a(3, 0.004, -0.002),
        near_a(4, 0.001, -0.004),
    ];
    RideSharingProblem::new(vehicles, passengers)
        .unwrap()
        .with_destination(D)
        .unwrap()
}

fn small_config(seed: u64) -> GaConfig {
    GaConfig::default()
        .with_population_size(30)
        .with_max_generations(60)
        .with_seed(seed)
}

fn nine_am() -> DateTime {
    parse_target_time("09:00", date(2026, 3, 2)).unwrap()
}

#[test]
fn commute_assigns_everyone_before_deadline() {
    let problem = commute_problem();
    let mut result = RideSharingAlgorithm::run(&problem, &small_config(42)).unwrap();

    assert_eq!(result.best.num_assigned(), 4);
    let report = validate(&result.best, &problem);
    assert!(report.is_valid(), "{report}");

    // Only distance terms remain.
    let breakdown =
        FitnessEvaluator::new(&problem, PenaltyWeights::default()).breakdown(&result.best);
    assert_eq!(breakdown.capacity_penalty, 0.0);
    assert_eq!(breakdown.unassigned_penalty, 0.0);
    assert!((result.best_fitness - result.best.total_distance()).abs() < 1e-9);

    let target = nine_am();
    let now = date(2026, 3, 2).at(6, 30, 0, 0);
    let routes = PickupScheduler::default()
        .apply(&mut result.best, &problem, target, now)
        .unwrap();
    assert!(routes.iter().all(|r| !r.has_warnings()));

    let mut riders = problem.passengers().to_vec();
    result.best.apply_to(&mut riders);
    for rider in &riders {
        assert!(rider.assigned_vehicle().is_some());
        let pickup = rider.pickup_time().expect("pickup time written back");
        assert!(pickup < target, "{} picked up at {pickup}", rider.name());
    }
}

#[test]
fn single_seat_leaves_two_unassigned() {
    let vehicles = vec![Vehicle::new(0, A, 1, "Dana")];
    let passengers = vec![near_a(1, 0.001, 0.0), near_a(2, 0.002, 0.0), near_a(3, 0.003, 0.0)];
    let problem = RideSharingProblem::new(vehicles, passengers).unwrap();

    let result = RideSharingAlgorithm::run(&problem, &small_config(5)).unwrap();
    assert_eq!(result.best.num_assigned(), 1);
    assert!(!result.best.vehicles()[0].is_over_capacity());

    let report = validate(&result.best, &problem);
    assert_eq!(report.unassigned(), 2);
    assert_eq!(report.capacity_violations(), 0);
    assert!((result.best_fitness - (result.best.total_distance() + 200.0)).abs() < 1e-9);
}

#[test]
fn no_passengers_returns_empty_routes() {
    let problem = RideSharingProblem::new(vec![Vehicle::new(0, A, 4, "Dana")], vec![]).unwrap();
    let result = RideSharingAlgorithm::run(&problem, &small_config(1)).unwrap();
    assert_eq!(result.stop_reason, StopReason::NoPassengers);
    assert_eq!(result.best_fitness, 0.0);
    assert_eq!(result.best.num_assigned(), 0);
}

#[test]
fn self_crossover_keeps_assignment() {
    let problem = commute_problem();
    let parent = greedy_assignment(&problem);
    let mut rng = create_rng(11);
    for _ in 0..10 {
        let child = crossover(&parent, &parent, &problem, &mut rng);
        assert_eq!(child.assignment_map(), parent.assignment_map());
    }
}

#[test]
fn seeded_runs_respect_capacity() {
    // Eight riders, six seats: the engine has to drop two without overflowing.
    let vehicles = vec![
        Vehicle::new(0, A, 2, "Dana"),
        Vehicle::new(1, B, 2, "Eli"),
        Vehicle::new(2, D, 2, "Fay"),
    ];
    let passengers = (1..=8)
        .map(|i| near_a(i, 0.003 * i as f64, -0.002 * i as f64))
        .collect();
    let problem = RideSharingProblem::new(vehicles, passengers).unwrap();

    let satisfied = (0..100u64)
        .filter(|&seed| {
            let config = GaConfig::default()
                .with_population_size(10)
                .with_max_generations(5)
                .with_seed(seed);
            let result = RideSharingAlgorithm::run(&problem, &config).unwrap();
            result
                .best
                .vehicles()
                .iter()
                .all(|v| !v.is_over_capacity())
        })
        .count();
    assert!(satisfied >= 95, "only {satisfied}/100 runs respected capacity");
}

#[test]
fn seeded_runs_seat_everyone_when_capacity_suffices() {
    // Nine seats for eight riders: a short run should still end fully valid.
    let vehicles = vec![
        Vehicle::new(0, A, 3, "Dana"),
        Vehicle::new(1, B, 3, "Eli"),
        Vehicle::new(2, D, 3, "Fay"),
    ];
    let passengers = (1..=8)
        .map(|i| near_a(i, 0.003 * i as f64, -0.002 * i as f64))
        .collect();
    let problem = RideSharingProblem::new(vehicles, passengers).unwrap();

    let valid = (0..100u64)
        .filter(|&seed| {
            let config = GaConfig::default()
                .with_population_size(10)
                .with_max_generations(5)
                .with_seed(seed);
            let result = RideSharingAlgorithm::run(&problem, &config).unwrap();
            result.best.num_assigned() == 8 && validate(&result.best, &problem).is_valid()
        })
        .count();
    assert!(valid >= 95, "only {valid}/100 runs were valid");
}

#[test]
fn expired_deadline_cancels_run() {
    let problem = commute_problem();
    let config = small_config(3)
        .with_max_generations(1_000_000)
        .with_stagnation_limit(1_000_000);
    let token = Cancellation::with_timeout(Duration::ZERO);
    let result = RideSharingAlgorithm::run_with_cancel(
        &problem,
        &config,
        Vec::new(),
        &token,
        &mut create_rng(3),
    )
    .unwrap();
    assert_eq!(result.stop_reason, StopReason::Cancelled);
    assert!(validate(&result.best, &problem).is_valid());
}

#[test]
fn injected_matrix_drives_the_search() {
    // Riders sit next to A on the map, but the matrix makes B the cheap start.
    let vehicles = vec![Vehicle::new(0, A, 4, "Dana"), Vehicle::new(1, B, 4, "Eli")];
    let passengers: Vec<Passenger> = (1..=4).map(|i| near_a(i, 0.001 * i as f64, 0.0)).collect();

    let mut points = vec![A, B];
    points.extend(passengers.iter().map(|p| p.location()));
    let mut matrix = DistanceMatrix::from_coordinates(&points);
    for i in 0..points.len() {
        for j in 2..points.len() {
            if i != j {
                matrix.set(i, j, if i == 0 { 100.0 } else { 1.0 }).unwrap();
            }
        }
    }

    let problem = RideSharingProblem::new(vehicles, passengers)
        .unwrap()
        .with_metric(matrix);
    let result = RideSharingAlgorithm::run(&problem, &small_config(8)).unwrap();

    assert_eq!(result.best.vehicles()[1].len(), 4);
    assert!(result.best.vehicles()[0].is_empty());
    assert!((result.best_fitness - 4.0).abs() < 1e-9);
}
