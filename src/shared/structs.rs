/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Direction of travel from one floor toward another.
    pub fn towards(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Idle
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElevatorStatus {
    Stopped,
    Moving,
    OpeningDoors,
    DoorsOpen,
    ClosingDoors,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Move,
    Stop,
    DoorOpen,
    DoorClose,
}

/// One recorded state transition of a single elevator.
///
/// Timestamps are logical tick numbers, not wall-clock time; two entries
/// recorded in the same tick share a timestamp and are ordered by insertion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: u64,
    pub from_floor: u8,
    pub to_floor: u8,
    pub action: HistoryAction,
}

/// A passenger's floor-to-floor travel request.
///
/// Resolved in two legs: the assigned elevator first travels to `from_floor`
/// (pickup), then `to_floor` is enqueued once the passenger has boarded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorRequest {
    pub id: String,
    pub from_floor: u8,
    pub to_floor: u8,
    #[serde(
        rename = "assignedElevatorId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_elevator: Option<usize>,
    pub timestamp: u64,
}

/// Read-only view of one elevator, safe to hand to a display layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorSnapshot {
    pub id: usize,
    pub current_floor: u8,
    pub direction: Direction,
    pub status: ElevatorStatus,
    pub destination_queue: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorHistory {
    pub elevator_id: usize,
    pub history: Vec<HistoryEntry>,
}

/// Aggregate figures derived from one elevator's history log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorStats {
    pub elevator_id: usize,
    pub total_moves: u32,
    pub total_floors_traveled: u32,
    pub door_open_count: u32,
    pub door_close_count: u32,
    pub stop_count: u32,
    pub average_floors_per_move: f64,
}

impl ElevatorStats {
    pub fn from_history(elevator_id: usize, history: &[HistoryEntry]) -> ElevatorStats {
        let mut total_moves = 0;
        let mut total_floors_traveled = 0;
        let mut door_open_count = 0;
        let mut door_close_count = 0;
        let mut stop_count = 0;

        for entry in history {
            match entry.action {
                HistoryAction::Move => {
                    total_moves += 1;
                    total_floors_traveled += entry.to_floor.abs_diff(entry.from_floor) as u32;
                }
                HistoryAction::DoorOpen => door_open_count += 1,
                HistoryAction::DoorClose => door_close_count += 1,
                HistoryAction::Stop => stop_count += 1,
            }
        }

        ElevatorStats {
            elevator_id,
            total_moves,
            total_floors_traveled,
            door_open_count,
            door_close_count,
            stop_count,
            average_floors_per_move: if total_moves > 0 {
                total_floors_traveled as f64 / total_moves as f64
            } else {
                0.0
            },
        }
    }
}
