//! Hour-by-hour planning: the allocation store and backlog operations.

mod allocation;
mod board;

pub use allocation::{Allocation, SLOT_CAPACITY_MIN};
pub use board::{DragSource, PlanBoard, MAX_TARGET_HOURS};
