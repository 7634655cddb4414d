/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::shared::{Direction, ElevatorRequest, ElevatorStatus};

/**
 * Request-to-car assignment.
 *
 * The dispatcher is a stateless algorithm over the fleet and the pending
 * request collection, both owned by the system engine. Assignment prefers
 * cars that will pass the pickup floor anyway (idle cars, or cars already
 * moving toward it) and picks the closest of those; when no such car
 * exists it falls back to the closest car outright.
 */

/// Pick the best car to serve a pickup at `from_floor`.
///
/// Returns the car id, or `None` for an empty fleet. Ties go to the lowest
/// car id.
pub fn find_optimal_elevator(elevators: &[Elevator], from_floor: u8) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut shortest_distance = u8::MAX;

    for elevator in elevators {
        let passes_pickup = match elevator.direction() {
            Direction::Idle => true,
            Direction::Up => from_floor > elevator.current_floor(),
            Direction::Down => from_floor < elevator.current_floor(),
        };
        if !passes_pickup {
            continue;
        }

        let distance = elevator.current_floor().abs_diff(from_floor);
        if distance < shortest_distance {
            shortest_distance = distance;
            best = Some(elevator.id());
        }
    }

    // Nobody is heading that way: take the closest car regardless
    if best.is_none() {
        for elevator in elevators {
            let distance = elevator.current_floor().abs_diff(from_floor);
            if distance < shortest_distance {
                shortest_distance = distance;
                best = Some(elevator.id());
            }
        }
    }

    best
}

/// Complete every pickup waiting on `elevator_id` at its current floor.
///
/// A request is picked up once its assigned car stands at the pickup floor
/// with the doors open; the passenger boards, the dropoff floor joins the
/// car's queue and the request leaves the pending collection. Several
/// requests from the same floor board together.
pub fn complete_pickups(
    elevators: &mut [Elevator],
    pending: &mut Vec<ElevatorRequest>,
    elevator_id: usize,
) {
    let elevator = match elevators.get_mut(elevator_id) {
        Some(elevator) => elevator,
        None => return,
    };
    if elevator.status() != ElevatorStatus::DoorsOpen {
        return;
    }

    let pickup_floor = elevator.current_floor();
    let mut dropoffs = Vec::new();
    pending.retain(|request| {
        if request.assigned_elevator == Some(elevator_id) && request.from_floor == pickup_floor {
            debug!(
                "request {}: picked up by elevator {} at floor {}",
                request.id, elevator_id, pickup_floor
            );
            dropoffs.push(request.to_floor);
            false
        } else {
            true
        }
    });

    for to_floor in dropoffs {
        elevator.enqueue_destination(to_floor);
    }
}

/// Retry assignment for every request that has no car yet.
pub fn assign_pending(elevators: &mut [Elevator], pending: &mut Vec<ElevatorRequest>) {
    for request in pending.iter_mut().filter(|r| r.assigned_elevator.is_none()) {
        let elevator_id = match find_optimal_elevator(elevators, request.from_floor) {
            Some(id) => id,
            None => continue,
        };

        request.assigned_elevator = Some(elevator_id);
        debug!(
            "request {}: assigned to elevator {}",
            request.id, elevator_id
        );

        let elevator = &mut elevators[elevator_id];
        if elevator.current_floor() != request.from_floor {
            elevator.enqueue_destination(request.from_floor);
        }
    }
}

/// Open up any parked car that a pickup is waiting on at its own floor.
///
/// Covers the assignments that queue no pickup leg because the car already
/// stands at the pickup floor: without a leg to travel the doors would
/// otherwise never open and the boarding check would never fire.
pub fn wake_parked_pickups(elevators: &mut [Elevator], pending: &[ElevatorRequest]) {
    for request in pending {
        let elevator_id = match request.assigned_elevator {
            Some(id) => id,
            None => continue,
        };
        let elevator = match elevators.get_mut(elevator_id) {
            Some(elevator) => elevator,
            None => continue,
        };
        if elevator.status() == ElevatorStatus::Stopped
            && elevator.current_floor() == request.from_floor
        {
            debug!(
                "request {}: elevator {} already at floor {}, opening doors",
                request.id, elevator_id, request.from_floor
            );
            elevator.open_doors();
        }
    }
}
