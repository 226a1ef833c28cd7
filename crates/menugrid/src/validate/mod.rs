//! Input and output validation.
//!
//! `menu` produces advisory warnings about suspicious input and never fails.
//! `invariants` checks structural guarantees of a finished document and is
//! what the engine runs after placement in debug builds.

pub mod invariants;
pub mod menu;

pub use invariants::{check, BOUNDS_EPSILON};
pub use menu::validate as validate_menu;
