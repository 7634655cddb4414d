pub mod macros;
pub mod structs;

pub use structs::Direction;
pub use structs::ElevatorHistory;
pub use structs::ElevatorRequest;
pub use structs::ElevatorSnapshot;
pub use structs::ElevatorStats;
pub use structs::ElevatorStatus;
pub use structs::HistoryAction;
pub use structs::HistoryEntry;
