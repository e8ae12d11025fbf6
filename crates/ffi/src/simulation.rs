use forest_fire_core::FireAutomaton;

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_automaton_mut};
use crate::instance::{ForestFireInstance, ForestFireStats};

/// Advance the automaton by one frame.
///
/// Thread-safe: acquires the `RwLock` write lock for the duration of the step.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) on success, with the new frame's statistics in `out_stats`
/// - `ForestFireErrorCode::NullPointer` if `ptr` or `out_stats` is null
/// - `ForestFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_stats` must be a valid, non-null pointer to writable `ForestFireStats`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_step(
    ptr: *const ForestFireInstance,
    out_stats: *mut ForestFireStats,
) -> ForestFireErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let record = with_automaton_mut(instance, FireAutomaton::step)?;
        unsafe {
            *out_stats = record.into();
        }
        Ok(())
    })
}

/// Advance the automaton until nothing burns or `max_steps` frames have passed.
///
/// `out_steps_taken` receives the number of frames advanced.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_steps_taken` must be a valid, non-null pointer to a `u64`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_run_until_extinguished(
    ptr: *const ForestFireInstance,
    max_steps: u64,
    out_steps_taken: *mut u64,
) -> ForestFireErrorCode {
    if out_steps_taken.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_steps_taken"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let taken =
            with_automaton_mut(instance, |automaton| automaton.run_until_extinguished(max_steps))?;
        unsafe {
            *out_steps_taken = taken;
        }
        Ok(())
    })
}
