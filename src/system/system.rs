/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, warn};
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::dispatch;
use crate::elevator::Elevator;
use crate::shared::{
    ElevatorHistory, ElevatorRequest, ElevatorSnapshot, ElevatorStats, ElevatorStatus,
    HistoryAction,
};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, PartialEq, Eq)]
pub enum SystemError {
    InvalidFloor { floor: u8, n_floors: u8 },
    UnknownElevator { elevator_id: usize },
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SystemError::InvalidFloor { floor, n_floors } => {
                write!(f, "Invalid floor {} (building has floors 1-{})", floor, n_floors)
            }
            SystemError::UnknownElevator { elevator_id } => {
                write!(f, "No elevator with id {}", elevator_id)
            }
        }
    }
}

impl std::error::Error for SystemError {}

/**
 * The elevator system engine.
 *
 * Owns the fleet and the pending request collection and advances the whole
 * simulation one discrete step per `tick`. The engine performs no threading
 * of its own: the host drives `tick` at whatever cadence it likes and polls
 * `is_running` to honour `stop_all`, which pauses the external driving
 * without touching any car state. A multi-threaded host must serialize all
 * calls into one engine.
 */
pub struct ElevatorSystem {
    elevators: Vec<Elevator>,
    pending_requests: Vec<ElevatorRequest>,
    clock: u64,
    next_request_id: u64,
    running: bool,
    config: Config,
}

impl ElevatorSystem {
    pub fn new(config: &Config) -> ElevatorSystem {
        let elevators = (0..config.building.n_elevators)
            .map(|id| Elevator::new(id, config.building.initial_floor, &config.timing))
            .collect();

        ElevatorSystem {
            elevators,
            pending_requests: Vec::new(),
            clock: 0,
            next_request_id: 0,
            running: false,
            config: config.clone(),
        }
    }

    /// Register a floor-to-floor travel request and assign it a car.
    ///
    /// Floors outside 1..=n_floors are rejected and leave the system
    /// untouched. The request id is returned; the request itself stays
    /// pending until its pickup leg completes. One update pass runs
    /// immediately so the effect is visible without waiting for the driver.
    pub fn add_request(&mut self, from_floor: u8, to_floor: u8) -> Result<String, SystemError> {
        self.check_floor(from_floor)?;
        self.check_floor(to_floor)?;

        let id = format!("request-{}", self.next_request_id);
        self.next_request_id += 1;

        let mut request = ElevatorRequest {
            id: id.clone(),
            from_floor,
            to_floor,
            assigned_elevator: None,
            timestamp: self.clock,
        };

        match dispatch::find_optimal_elevator(&self.elevators, from_floor) {
            Some(elevator_id) => {
                request.assigned_elevator = Some(elevator_id);
                info!(
                    "request {} ({} -> {}): assigned to elevator {}",
                    id, from_floor, to_floor, elevator_id
                );

                let elevator = &mut self.elevators[elevator_id];
                if elevator.current_floor() != from_floor {
                    elevator.enqueue_destination(from_floor);
                }
            }
            None => {
                warn!(
                    "request {} ({} -> {}): no elevator available, left pending",
                    id, from_floor, to_floor
                );
            }
        }

        self.pending_requests.push(request);
        self.update();
        Ok(id)
    }

    fn check_floor(&self, floor: u8) -> Result<(), SystemError> {
        let n_floors = self.config.building.n_floors;
        if floor == 0 || floor > n_floors {
            return Err(SystemError::InvalidFloor { floor, n_floors });
        }
        Ok(())
    }

    /// Advance the whole system one logical step.
    pub fn tick(&mut self) {
        self.update();
    }

    /// Same step as `tick`; kept callable under both names so hosts can
    /// drive the engine and nudge it after out-of-band changes alike.
    pub fn update(&mut self) {
        self.clock += 1;
        let now = self.clock;

        for elevator in &mut self.elevators {
            elevator.step(now);
        }

        for elevator_id in 0..self.elevators.len() {
            dispatch::complete_pickups(&mut self.elevators, &mut self.pending_requests, elevator_id);
        }

        dispatch::assign_pending(&mut self.elevators, &mut self.pending_requests);
        dispatch::wake_parked_pickups(&mut self.elevators, &self.pending_requests);
    }

    /// Resume external driving and kick every parked car that has work.
    /// Idempotent.
    pub fn start_all(&mut self) {
        self.running = true;
        for elevator in &mut self.elevators {
            elevator.start();
        }
    }

    /// Pause external driving. Car state, door phases and pending requests
    /// are preserved exactly as they are; the host simply stops calling
    /// `tick` until `start_all`.
    pub fn stop_all(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Replace the whole fleet with freshly parked cars and drop every
    /// pending request. The logical clock and request numbering restart
    /// from zero; no door phase can survive into the new fleet.
    pub fn reset_all(&mut self) {
        info!("resetting {} elevators", self.config.building.n_elevators);
        self.elevators = (0..self.config.building.n_elevators)
            .map(|id| Elevator::new(id, self.config.building.initial_floor, &self.config.timing))
            .collect();
        self.pending_requests.clear();
        self.clock = 0;
        self.next_request_id = 0;
        self.running = false;
    }

    /// Append an externally observed transition to one car's history log,
    /// stamped with the current logical tick.
    pub fn record_history(
        &mut self,
        elevator_id: usize,
        from_floor: u8,
        to_floor: u8,
        action: HistoryAction,
    ) -> Result<(), SystemError> {
        let now = self.clock;
        match self.elevators.get_mut(elevator_id) {
            Some(elevator) => {
                elevator.push_history(now, from_floor, to_floor, action);
                Ok(())
            }
            None => Err(SystemError::UnknownElevator { elevator_id }),
        }
    }

    pub fn elevators(&self) -> Vec<ElevatorSnapshot> {
        self.elevators.iter().map(Elevator::snapshot).collect()
    }

    pub fn pending_requests(&self) -> &[ElevatorRequest] {
        &self.pending_requests
    }

    pub fn all_histories(&self) -> Vec<ElevatorHistory> {
        self.elevators
            .iter()
            .map(|elevator| ElevatorHistory {
                elevator_id: elevator.id(),
                history: elevator.history().to_vec(),
            })
            .collect()
    }

    pub fn statistics(&self) -> Vec<ElevatorStats> {
        self.elevators.iter().map(Elevator::stats).collect()
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// True once every car is parked and no request is outstanding.
    pub fn is_settled(&self) -> bool {
        self.pending_requests.is_empty()
            && self
                .elevators
                .iter()
                .all(|elevator| elevator.status() == ElevatorStatus::Stopped)
    }
}

/***************************************/
/*            Test helpers             */
/***************************************/
#[cfg(test)]
impl ElevatorSystem {
    pub fn test_elevator_mut(&mut self, elevator_id: usize) -> &mut Elevator {
        &mut self.elevators[elevator_id]
    }
}
