/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::TimingConfig;
use crate::shared::{
    Direction, ElevatorSnapshot, ElevatorStats, ElevatorStatus, HistoryAction, HistoryEntry,
};

/**
 * One elevator car.
 *
 * The car owns its position, direction, door/motion state, destination queue
 * and history log, and advances exactly one discrete step per tick. Door
 * phases (opening, holding open, closing) are counted in ticks: entering a
 * phase arms `door_ticks`, and the phase transition fires when the counter
 * runs out. At most one counter is armed at a time and it is cleared by any
 * superseding change, so a leftover count can never act on a state it was
 * not armed for.
 *
 * All mutation goes through the car's own methods; the dispatcher and the
 * system engine only ever call into this API.
 */
pub struct Elevator {
    id: usize,
    current_floor: u8,
    destinations: Vec<u8>,
    direction: Direction,
    status: ElevatorStatus,
    door_ticks: Option<u32>,
    door_operation_ticks: u32,
    passenger_wait_ticks: u32,
    history: Vec<HistoryEntry>,
}

impl Elevator {
    pub fn new(id: usize, initial_floor: u8, timing: &TimingConfig) -> Elevator {
        let mut elevator = Elevator {
            id,
            current_floor: initial_floor,
            destinations: Vec::new(),
            direction: Direction::Idle,
            status: ElevatorStatus::Stopped,
            door_ticks: None,
            door_operation_ticks: timing.door_operation_ticks,
            passenger_wait_ticks: timing.passenger_wait_ticks,
            history: Vec::new(),
        };

        // The parked starting position is part of the log
        elevator.push_history(0, initial_floor, initial_floor, HistoryAction::Stop);
        elevator
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> ElevatorStatus {
        self.status
    }

    pub fn destinations(&self) -> &[u8] {
        &self.destinations
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            status: self.status,
            destination_queue: self.destinations.clone(),
        }
    }

    pub fn stats(&self) -> ElevatorStats {
        ElevatorStats::from_history(self.id, &self.history)
    }

    /// Add a destination floor to the queue.
    ///
    /// Ignored if the floor is already queued, or if the car is already
    /// standing at that floor (parked, or with the doors open or opening —
    /// the passenger can simply board). A parked car starts moving
    /// immediately.
    pub fn enqueue_destination(&mut self, floor: u8) {
        if self.destinations.contains(&floor) {
            return;
        }
        if floor == self.current_floor
            && matches!(
                self.status,
                ElevatorStatus::Stopped
                    | ElevatorStatus::DoorsOpen
                    | ElevatorStatus::OpeningDoors
            )
        {
            return;
        }

        self.destinations.push(floor);
        self.update_direction();

        if self.status == ElevatorStatus::Stopped {
            self.status = ElevatorStatus::Moving;
            debug!(
                "elevator {}: departing floor {} for {:?}",
                self.id, self.current_floor, self.destinations
            );
        }
    }

    /// Recompute the direction of travel from the destination queue.
    ///
    /// A moving car keeps its direction as long as any destination remains
    /// on that side, then reverses; an idle car heads toward the first
    /// queued floor.
    pub fn update_direction(&mut self) {
        if self.destinations.is_empty() {
            self.direction = Direction::Idle;
            return;
        }

        match self.direction {
            Direction::Up => {
                let has_higher = self.destinations.iter().any(|&f| f > self.current_floor);
                self.direction = if has_higher {
                    Direction::Up
                } else {
                    Direction::Down
                };
            }
            Direction::Down => {
                let has_lower = self.destinations.iter().any(|&f| f < self.current_floor);
                self.direction = if has_lower {
                    Direction::Down
                } else {
                    Direction::Up
                };
            }
            Direction::Idle => {
                self.direction = Direction::towards(self.current_floor, self.destinations[0]);
            }
        }
    }

    /// One tick of the car's state machine: moving cars travel one floor,
    /// cars in a door phase count the phase down.
    pub fn step(&mut self, now: u64) {
        match self.status {
            ElevatorStatus::Moving => self.advance_one_floor(now),
            ElevatorStatus::OpeningDoors
            | ElevatorStatus::DoorsOpen
            | ElevatorStatus::ClosingDoors => self.step_doors(now),
            ElevatorStatus::Stopped => {}
        }
    }

    /// Move exactly one floor toward the current direction and handle
    /// arrival. Only meaningful while the car is moving with somewhere to go.
    pub fn advance_one_floor(&mut self, now: u64) {
        if self.status != ElevatorStatus::Moving || self.destinations.is_empty() {
            return;
        }

        let previous_floor = self.current_floor;
        match self.direction {
            Direction::Up => self.current_floor += 1,
            Direction::Down => self.current_floor -= 1,
            Direction::Idle => return,
        }

        self.push_history(now, previous_floor, self.current_floor, HistoryAction::Move);
        self.check_arrival();
    }

    fn check_arrival(&mut self) {
        if let Some(index) = self
            .destinations
            .iter()
            .position(|&f| f == self.current_floor)
        {
            self.destinations.remove(index);
            debug!(
                "elevator {}: arrived at floor {}",
                self.id, self.current_floor
            );
            self.open_doors();
        }
    }

    /// Begin the door-open phase.
    pub fn open_doors(&mut self) {
        self.status = ElevatorStatus::OpeningDoors;
        self.door_ticks = Some(self.door_operation_ticks);
    }

    fn step_doors(&mut self, now: u64) {
        let remaining = match self.door_ticks {
            Some(ticks) => ticks.saturating_sub(1),
            None => return,
        };
        if remaining > 0 {
            self.door_ticks = Some(remaining);
            return;
        }
        self.door_ticks = None;

        match self.status {
            ElevatorStatus::OpeningDoors => {
                self.status = ElevatorStatus::DoorsOpen;
                self.push_history(
                    now,
                    self.current_floor,
                    self.current_floor,
                    HistoryAction::DoorOpen,
                );
                self.door_ticks = Some(self.passenger_wait_ticks);
            }
            ElevatorStatus::DoorsOpen => {
                self.status = ElevatorStatus::ClosingDoors;
                self.push_history(
                    now,
                    self.current_floor,
                    self.current_floor,
                    HistoryAction::DoorClose,
                );
                self.door_ticks = Some(self.door_operation_ticks);
            }
            ElevatorStatus::ClosingDoors => {
                if self.destinations.contains(&self.current_floor) {
                    // This floor was requested again while the doors were
                    // closing: reopen instead of driving off
                    self.destinations.retain(|&f| f != self.current_floor);
                    self.open_doors();
                    return;
                }
                if self.destinations.is_empty() {
                    self.status = ElevatorStatus::Stopped;
                    self.push_history(
                        now,
                        self.current_floor,
                        self.current_floor,
                        HistoryAction::Stop,
                    );
                } else {
                    self.status = ElevatorStatus::Moving;
                }
                self.update_direction();
            }
            // A count armed for a state that was since superseded must not
            // act on the new one
            _ => {}
        }
    }

    /// Force a parked car with queued destinations into motion.
    pub fn start(&mut self) {
        if self.status == ElevatorStatus::Stopped && !self.destinations.is_empty() {
            self.status = ElevatorStatus::Moving;
            self.update_direction();
        }
    }

    /// Clear all state back to a parked car at `initial_floor`, including
    /// the history log and any armed door phase.
    pub fn reset(&mut self, initial_floor: u8) {
        self.current_floor = initial_floor;
        self.destinations.clear();
        self.direction = Direction::Idle;
        self.status = ElevatorStatus::Stopped;
        self.door_ticks = None;
        self.history.clear();
    }

    pub(crate) fn push_history(
        &mut self,
        timestamp: u64,
        from_floor: u8,
        to_floor: u8,
        action: HistoryAction,
    ) {
        self.history.push(HistoryEntry {
            timestamp,
            from_floor,
            to_floor,
            action,
        });
    }
}

/***************************************/
/*            Test helpers             */
/***************************************/
#[cfg(test)]
impl Elevator {
    pub fn test_set_floor(&mut self, floor: u8) {
        self.current_floor = floor;
    }

    pub fn test_set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn test_set_status(&mut self, status: ElevatorStatus) {
        self.status = status;
    }
}
