/*
 * Unit tests for the system engine
 *
 * The unit tests follow the Arrange, Act, Assert pattern. Scenario tests
 * drive the engine tick by tick until it settles, the same way an external
 * driver would.
 *
 * Tests:
 * - test_system_init
 * - test_add_request_assigns_nearest_elevator
 * - test_add_request_rejects_invalid_floors
 * - test_single_car_serves_both_legs
 * - test_pickup_at_current_floor_opens_doors
 * - test_second_request_for_same_pickup_floor
 * - test_start_all_is_idempotent
 * - test_stop_all_pauses_driving_but_preserves_state
 * - test_reset_all_restores_initial_state
 * - test_requests_stay_pending_with_empty_fleet
 * - test_all_histories_ordered_by_elevator_id
 * - test_record_history_feeds_statistics
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod system_tests {
    use crate::config::{BuildingConfig, Config, TimingConfig};
    use crate::shared::{Direction, ElevatorStatus, HistoryAction};
    use crate::system::{ElevatorSystem, SystemError};

    fn setup_config(n_elevators: usize) -> Config {
        Config {
            building: BuildingConfig {
                n_floors: 10,
                n_elevators,
                initial_floor: 1,
            },
            timing: TimingConfig {
                door_operation_ticks: 2,
                passenger_wait_ticks: 3,
                tick_interval_ms: 1000,
            },
        }
    }

    fn setup_system(n_elevators: usize) -> ElevatorSystem {
        ElevatorSystem::new(&setup_config(n_elevators))
    }

    /// Drive the engine until it settles, with a tick budget as a guard
    /// against a scenario that never converges.
    fn run_to_settled(system: &mut ElevatorSystem) {
        for _ in 0..60 {
            if system.is_settled() {
                return;
            }
            system.tick();
        }
        panic!("system did not settle within 60 ticks");
    }

    #[test]
    fn test_system_init() {
        // Arrange + Act
        let system = setup_system(2);

        // Assert
        let elevators = system.elevators();
        assert_eq!(elevators.len(), 2);
        for (id, elevator) in elevators.iter().enumerate() {
            assert_eq!(elevator.id, id);
            assert_eq!(elevator.current_floor, 1);
            assert_eq!(elevator.status, ElevatorStatus::Stopped);
            assert!(elevator.destination_queue.is_empty());
        }
        assert!(system.pending_requests().is_empty());
        assert_eq!(system.clock(), 0);
        assert!(!system.is_running());
    }

    #[test]
    fn test_add_request_assigns_nearest_elevator() {
        // Arrange: elevator 0 at floor 1, elevator 1 at floor 8
        let mut system = setup_system(2);
        system.test_elevator_mut(1).test_set_floor(8);

        // Act
        let id = system.add_request(3, 5).unwrap();

        // Assert: distance 2 beats distance 5
        assert_eq!(id, "request-0");
        assert_eq!(system.pending_requests().len(), 1);
        assert_eq!(system.pending_requests()[0].assigned_elevator, Some(0));
        let elevators = system.elevators();
        assert!(elevators[0].destination_queue.contains(&3));
        assert!(elevators[1].destination_queue.is_empty());
    }

    #[test]
    fn test_add_request_rejects_invalid_floors() {
        // Arrange
        let mut system = setup_system(1);

        // Act + Assert
        assert_eq!(
            system.add_request(0, 5),
            Err(SystemError::InvalidFloor {
                floor: 0,
                n_floors: 10
            })
        );
        assert_eq!(
            system.add_request(3, 11),
            Err(SystemError::InvalidFloor {
                floor: 11,
                n_floors: 10
            })
        );

        // A rejected request leaves the system untouched
        assert!(system.pending_requests().is_empty());
        assert_eq!(system.clock(), 0);
        assert!(system.elevators()[0].destination_queue.is_empty());
    }

    #[test]
    fn test_single_car_serves_both_legs() {
        // Purpose: a request is served in two legs (pickup at 3, dropoff at
        // 5) and the history records the full journey in order, with no STOP
        // at the arrival itself

        // Arrange
        let mut system = setup_system(1);

        // Act
        system.add_request(3, 5).unwrap();
        run_to_settled(&mut system);

        // Assert
        let elevator = &system.elevators()[0];
        assert_eq!(elevator.current_floor, 5);
        assert_eq!(elevator.status, ElevatorStatus::Stopped);
        assert_eq!(elevator.direction, Direction::Idle);
        assert!(elevator.destination_queue.is_empty());
        assert!(system.pending_requests().is_empty());

        let history = &system.all_histories()[0].history;
        let actions: Vec<HistoryAction> = history.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                HistoryAction::Stop, // initial position
                HistoryAction::Move, // 1 -> 2
                HistoryAction::Move, // 2 -> 3, pickup
                HistoryAction::DoorOpen,
                HistoryAction::DoorClose,
                HistoryAction::Move, // 3 -> 4
                HistoryAction::Move, // 4 -> 5, dropoff
                HistoryAction::DoorOpen,
                HistoryAction::DoorClose,
                HistoryAction::Stop,
            ]
        );
        assert_eq!(history[2].to_floor, 3);
        assert_eq!(history[6].to_floor, 5);
    }

    #[test]
    fn test_pickup_at_current_floor_opens_doors() {
        // Purpose: a request starting where the car already stands must not
        // leave the request stuck; the car opens up and boards on the spot

        // Arrange
        let mut system = setup_system(1);

        // Act
        system.add_request(1, 5).unwrap();

        // Assert: no pickup leg was queued, the doors are opening instead
        assert_eq!(system.elevators()[0].status, ElevatorStatus::OpeningDoors);
        assert!(system.elevators()[0].destination_queue.is_empty());

        run_to_settled(&mut system);
        assert_eq!(system.elevators()[0].current_floor, 5);
        assert!(system.pending_requests().is_empty());
    }

    #[test]
    fn test_second_request_for_same_pickup_floor() {
        // Purpose: a second request for a floor already en route must not
        // duplicate the queue entry, but both passengers board on arrival

        // Arrange
        let mut system = setup_system(1);

        // Act
        system.add_request(5, 8).unwrap();
        system.add_request(5, 2).unwrap();

        // Assert: one queue entry, two tracked requests
        let queue = system.elevators()[0].destination_queue.clone();
        assert_eq!(queue.iter().filter(|&&f| f == 5).count(), 1);
        assert_eq!(system.pending_requests().len(), 2);
        assert!(system
            .pending_requests()
            .iter()
            .all(|r| r.assigned_elevator == Some(0)));

        // Both dropoffs are served once the pickup completes: up to 8
        // first, then back down to 2
        run_to_settled(&mut system);
        assert_eq!(system.elevators()[0].current_floor, 2);
        assert!(system.pending_requests().is_empty());
    }

    #[test]
    fn test_start_all_is_idempotent() {
        // Arrange: a parked car with queued work
        let mut system = setup_system(1);
        system.test_elevator_mut(0).enqueue_destination(5);
        system.test_elevator_mut(0).test_set_status(ElevatorStatus::Stopped);

        // Act
        system.start_all();
        let after_first = system.elevators();
        system.start_all();

        // Assert
        assert!(system.is_running());
        assert_eq!(system.elevators(), after_first);
        assert_eq!(system.elevators()[0].status, ElevatorStatus::Moving);
        assert_eq!(system.elevators()[0].direction, Direction::Up);
    }

    #[test]
    fn test_stop_all_pauses_driving_but_preserves_state() {
        // Arrange: a car mid-journey
        let mut system = setup_system(1);
        system.add_request(3, 5).unwrap();
        system.start_all();
        system.tick();

        // Act
        let before = system.elevators();
        let pending_before = system.pending_requests().to_vec();
        system.stop_all();

        // Assert: only the running flag changed
        assert!(!system.is_running());
        assert_eq!(system.elevators(), before);
        assert_eq!(system.pending_requests(), pending_before.as_slice());
    }

    #[test]
    fn test_reset_all_restores_initial_state() {
        // Arrange
        let mut system = setup_system(2);
        system.add_request(3, 5).unwrap();
        system.add_request(7, 2).unwrap();
        system.start_all();
        for _ in 0..5 {
            system.tick();
        }

        // Act
        system.reset_all();

        // Assert
        for elevator in system.elevators() {
            assert_eq!(elevator.current_floor, 1);
            assert_eq!(elevator.status, ElevatorStatus::Stopped);
            assert_eq!(elevator.direction, Direction::Idle);
            assert!(elevator.destination_queue.is_empty());
        }
        for history in system.all_histories() {
            assert_eq!(history.history.len(), 1);
            assert_eq!(history.history[0].action, HistoryAction::Stop);
            assert_eq!(history.history[0].timestamp, 0);
        }
        assert!(system.pending_requests().is_empty());
        assert_eq!(system.clock(), 0);
        assert!(!system.is_running());

        // Request numbering restarts as well
        assert_eq!(system.add_request(2, 4).unwrap(), "request-0");
    }

    #[test]
    fn test_requests_stay_pending_with_empty_fleet() {
        // Arrange
        let mut system = setup_system(0);

        // Act
        let id = system.add_request(3, 5).unwrap();
        for _ in 0..5 {
            system.tick();
        }

        // Assert: the request is retried every tick but never served
        assert_eq!(system.pending_requests().len(), 1);
        assert_eq!(system.pending_requests()[0].id, id);
        assert_eq!(system.pending_requests()[0].assigned_elevator, None);
    }

    #[test]
    fn test_all_histories_ordered_by_elevator_id() {
        // Arrange
        let system = setup_system(3);

        // Act
        let histories = system.all_histories();

        // Assert
        let ids: Vec<usize> = histories.iter().map(|h| h.elevator_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(histories.iter().all(|h| h.history.len() == 1));
    }

    #[test]
    fn test_record_history_feeds_statistics() {
        // Arrange
        let mut system = setup_system(2);

        // Act
        system.record_history(0, 1, 3, HistoryAction::Move).unwrap();
        system.record_history(0, 3, 3, HistoryAction::DoorOpen).unwrap();

        // Assert
        let stats = &system.statistics()[0];
        assert_eq!(stats.total_moves, 1);
        assert_eq!(stats.total_floors_traveled, 2);
        assert_eq!(stats.door_open_count, 1);
        assert_eq!(stats.stop_count, 1); // initial parked entry
        assert_eq!(stats.average_floors_per_move, 2.0);

        // Unknown ids are rejected
        assert_eq!(
            system.record_history(5, 1, 2, HistoryAction::Move),
            Err(SystemError::UnknownElevator { elevator_id: 5 })
        );
    }
}
