//! Constraint validation of a returned solution.

use std::collections::BTreeMap;

use crate::models::{Solution, ValidationReport, Violation, ViolationType};
use crate::problem::RideSharingProblem;

/// Lists capacity overflows, unassigned passengers and passengers that
/// appear on more than one route.
///
/// The report is a diagnostic; callers decide whether a flagged solution is
/// acceptable.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Coordinate, Passenger, Solution, Vehicle};
/// use u_carpool::problem::RideSharingProblem;
/// use u_carpool::evaluation::validate;
///
/// let vehicles = vec![Vehicle::new(0, Coordinate::new(0.0, 0.0), 1, "Dana")];
/// let passengers = vec![Passenger::new(1, Coordinate::new(0.0, 0.01), "Ada")];
/// let problem = RideSharingProblem::new(vehicles, passengers).unwrap();
///
/// let report = validate(&Solution::from_fleet(problem.vehicles()), &problem);
/// assert_eq!(report.unassigned(), 1);
/// assert!(!report.is_valid());
/// ```
pub fn validate(solution: &Solution, problem: &RideSharingProblem) -> ValidationReport {
    let mut violations = Vec::new();
    let mut carriers: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

    for vehicle in solution.vehicles() {
        if vehicle.is_over_capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                vehicle_id: vehicle.id(),
                assigned: vehicle.len(),
                capacity: vehicle.capacity(),
            }));
        }
        for p in vehicle.passengers() {
            carriers.entry(p.id()).or_default().push(vehicle.id());
        }
    }

    for (passenger_id, vehicle_ids) in &carriers {
        if vehicle_ids.len() > 1 {
            violations.push(Violation::new(ViolationType::DuplicateAssignment {
                passenger_id: *passenger_id,
                vehicle_ids: vehicle_ids.clone(),
            }));
        }
    }

    for p in problem.passengers() {
        if !carriers.contains_key(&p.id()) {
            violations.push(Violation::new(ViolationType::Unassigned {
                passenger_id: p.id(),
            }));
        }
    }

    ValidationReport { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Passenger, Vehicle};

    fn setup() -> RideSharingProblem {
        let vehicles = vec![
            Vehicle::new(0, Coordinate::new(0.0, 0.0), 1, "a"),
            Vehicle::new(1, Coordinate::new(0.0, 0.0), 2, "b"),
        ];
        let passengers = (1..=3)
            .map(|i| Passenger::new(i, Coordinate::new(0.0, 0.01 * i as f64), format!("p{i}")))
            .collect();
        RideSharingProblem::new(vehicles, passengers).unwrap()
    }

    fn passenger(problem: &RideSharingProblem, id: usize) -> Passenger {
        problem.passenger(id).expect("known").clone()
    }

    #[test]
    fn test_valid_solution() {
        let p = setup();
        let mut sol = Solution::from_fleet(p.vehicles());
        sol.vehicles_mut()[0].push_passenger(passenger(&p, 1));
        sol.vehicles_mut()[1].push_passenger(passenger(&p, 2));
        sol.vehicles_mut()[1].push_passenger(passenger(&p, 3));
        let report = validate(&sol, &p);
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn test_all_violation_kinds() {
        let p = setup();
        let mut sol = Solution::from_fleet(p.vehicles());
        sol.vehicles_mut()[0].push_passenger(passenger(&p, 1));
        sol.vehicles_mut()[0].push_passenger(passenger(&p, 2));
        sol.vehicles_mut()[1].push_passenger(passenger(&p, 2));
        let report = validate(&sol, &p);
        assert_eq!(report.capacity_violations(), 1);
        assert_eq!(report.duplicates(), 1);
        assert_eq!(report.unassigned(), 1);
        assert!(report.violations.contains(&Violation::new(
            ViolationType::DuplicateAssignment {
                passenger_id: 2,
                vehicle_ids: vec![0, 1],
            }
        )));
        assert!(report
            .violations
            .contains(&Violation::new(ViolationType::Unassigned { passenger_id: 3 })));
    }

    #[test]
    fn test_duplicate_within_one_route() {
        let p = setup();
        let mut sol = Solution::from_fleet(p.vehicles());
        sol.vehicles_mut()[1].push_passenger(passenger(&p, 1));
        sol.vehicles_mut()[1].push_passenger(passenger(&p, 1));
        let report = validate(&sol, &p);
        assert_eq!(report.duplicates(), 1);
    }
}
