use forest_fire_core::{AutomatonConfig, Cell, FireAutomaton, StatisticsRecord};
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{track_error, track_result};

/// C-compatible automaton configuration.
///
/// Start from `forest_fire_default_config()` and override the fields you need.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestFireConfig {
    /// Grid width in cells (must be > 0)
    pub width: usize,
    /// Grid height in cells (must be > 0)
    pub height: usize,
    /// Probability that a cell starts as forest
    pub forest_density: f64,
    /// Probability that an initially forested cell starts burning
    pub ignition_density: f64,
    /// Spread probability from an orthogonal neighbor
    pub direct_spread_probability: f64,
    /// Spread probability from a diagonal neighbor
    pub diagonal_spread_probability: f64,
    /// Per-step ignition probability for a tree with no igniting neighbor
    pub spontaneous_ignition_probability: f64,
    /// Per-step probability that an empty cell grows a tree
    pub regrowth_probability: f64,
    /// Random stream seed
    pub seed: u64,
}

impl From<ForestFireConfig> for AutomatonConfig {
    fn from(c: ForestFireConfig) -> Self {
        AutomatonConfig {
            width: c.width,
            height: c.height,
            forest_density: c.forest_density,
            ignition_density: c.ignition_density,
            direct_spread_probability: c.direct_spread_probability,
            diagonal_spread_probability: c.diagonal_spread_probability,
            spontaneous_ignition_probability: c.spontaneous_ignition_probability,
            regrowth_probability: c.regrowth_probability,
            seed: c.seed,
        }
    }
}

impl From<&AutomatonConfig> for ForestFireConfig {
    fn from(c: &AutomatonConfig) -> Self {
        ForestFireConfig {
            width: c.width,
            height: c.height,
            forest_density: c.forest_density,
            ignition_density: c.ignition_density,
            direct_spread_probability: c.direct_spread_probability,
            diagonal_spread_probability: c.diagonal_spread_probability,
            spontaneous_ignition_probability: c.spontaneous_ignition_probability,
            regrowth_probability: c.regrowth_probability,
            seed: c.seed,
        }
    }
}

/// C-compatible cell state. Renderers map this to colors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestFireCell {
    Tree = 0,
    Fire = 1,
    Empty = 2,
}

impl From<Cell> for ForestFireCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Tree => ForestFireCell::Tree,
            Cell::Fire => ForestFireCell::Fire,
            Cell::Empty => ForestFireCell::Empty,
        }
    }
}

/// C-compatible per-frame statistics.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForestFireStats {
    /// Frame index, starting at 0
    pub frame: u64,
    /// Cells holding unburned forest
    pub trees: usize,
    /// Cells burning this frame
    pub burning: usize,
    /// Empty cells
    pub empty: usize,
    /// Running sum of burning counts over all frames so far
    pub burned: u64,
}

impl From<StatisticsRecord> for ForestFireStats {
    fn from(r: StatisticsRecord) -> Self {
        Self {
            frame: r.frame,
            trees: r.trees,
            burning: r.burning,
            empty: r.empty,
            burned: r.burned,
        }
    }
}

/// Opaque handle to one forest fire automaton.
///
/// # Thread Safety
/// The automaton is protected by an `RwLock`:
/// - **Multiple concurrent readers** (cell and statistics queries)
/// - **Exclusive writer** (`forest_fire_step`)
///
/// Independent instances share nothing and can be stepped on separate threads.
pub struct ForestFireInstance {
    pub(crate) automaton: RwLock<FireAutomaton>,
}

impl ForestFireInstance {
    /// Validate `config` and build the automaton.
    ///
    /// # Errors
    ///
    /// Returns `ForestFireErrorCode::InvalidConfiguration` if the configuration is rejected.
    pub(crate) fn new(config: ForestFireConfig) -> Result<Box<Self>, DefaultForestFireError> {
        let automaton = FireAutomaton::new(config.into())?;
        Ok(Box::new(Self {
            automaton: RwLock::new(automaton),
        }))
    }
}

/// Default configuration: 120x120 grid, forest density 0.55, ignition density
/// 0.0004, spread probabilities 0.92 (direct) and 0.82 (diagonal), no
/// spontaneous ignition or regrowth, seed 42.
#[no_mangle]
pub extern "C" fn forest_fire_default_config() -> ForestFireConfig {
    ForestFireConfig::from(&AutomatonConfig::default())
}

/// Create a new automaton and return it via out-parameter.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) — success, `out_instance` contains a valid pointer
/// - `ForestFireErrorCode::NullPointer` — `out_instance` is null
/// - `ForestFireErrorCode::InvalidConfiguration` — zero dimension or probability outside [0, 1];
///   `out_instance` is set to null
///
/// Call `forest_fire_get_last_error()` for a human-readable description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call `forest_fire_destroy`
///   exactly once.
///
/// Example (C)
/// ```c
/// ForestFireConfig config = forest_fire_default_config();
/// config.seed = 7;
/// ForestFireInstance* sim = NULL;
/// if (forest_fire_new(config, &sim) != Ok) {
///     fprintf(stderr, "%s\n", forest_fire_get_last_error());
///     return;
/// }
/// // ... use sim ...
/// forest_fire_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_fire_new(
    config: ForestFireConfig,
    out_instance: *mut *mut ForestFireInstance,
) -> ForestFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_instance"));
    }

    match track_result(ForestFireInstance::new(config)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            ForestFireErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy an instance previously created by `forest_fire_new`.
///
/// If `ptr` is null this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `forest_fire_new` and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_destroy(ptr: *mut ForestFireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `forest_fire_new`
    // and has not been freed. Recreating the Box drops the automaton.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
