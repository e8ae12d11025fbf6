//! C ABI for the forest fire automaton
//!
//! Exposes construction, stepping, per-cell reads and statistics history so a
//! rendering or charting host (C, C++, C#, game engines) can drive the
//! automaton. A C header is generated into the workspace root by `cbindgen`.
//!
//! Every fallible function returns a [`ForestFireErrorCode`]; on failure a
//! human-readable message is available from [`forest_fire_get_last_error`].

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{forest_fire_get_last_error, forest_fire_get_last_error_code, ForestFireErrorCode};
pub use instance::{
    forest_fire_default_config, forest_fire_destroy, forest_fire_new, ForestFireCell,
    ForestFireConfig, ForestFireInstance, ForestFireStats,
};
pub use queries::{
    forest_fire_cell_state, forest_fire_copy_grid, forest_fire_copy_history,
    forest_fire_current_statistics, forest_fire_dimensions, forest_fire_history_len,
};
pub use simulation::{forest_fire_run_until_extinguished, forest_fire_step};
