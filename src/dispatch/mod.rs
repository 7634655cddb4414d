pub mod assigner;

pub use assigner::assign_pending;
pub use assigner::complete_pickups;
pub use assigner::find_optimal_elevator;
pub use assigner::wake_parked_pickups;
