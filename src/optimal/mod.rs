// Optimal lineup computation: capacity derivation and greedy slot allocation.

pub mod allocate;
pub mod settings;

pub use allocate::{add_to_optimal, optimal_score, Assignment};
pub use settings::{derive_settings, SlotCapacities};
