use forest_fire_core::FireAutomaton;

use crate::error::{DefaultForestFireError, ForestFireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_automaton};
use crate::instance::{ForestFireCell, ForestFireInstance, ForestFireStats};

/// Read the state of the cell at (x, y) for rendering.
///
/// Returns
/// - `ForestFireErrorCode::Ok` (0) on success with the state in `out_cell`
/// - `ForestFireErrorCode::NullPointer` if `ptr` or `out_cell` is null
/// - `ForestFireErrorCode::OutOfBounds` if (x, y) lies outside the grid
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_cell` must be a valid, non-null pointer to writable `ForestFireCell`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_cell_state(
    ptr: *const ForestFireInstance,
    x: usize,
    y: usize,
    out_cell: *mut ForestFireCell,
) -> ForestFireErrorCode {
    if out_cell.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_cell"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let cell = with_automaton(instance, |automaton| automaton.cell_state(x, y))??;
        unsafe {
            *out_cell = cell.into();
        }
        Ok(())
    })
}

/// Read the grid dimensions.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_width` and `out_height` must be valid, non-null pointers to `usize`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_dimensions(
    ptr: *const ForestFireInstance,
    out_width: *mut usize,
    out_height: *mut usize,
) -> ForestFireErrorCode {
    if out_width.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_width"));
    }
    if out_height.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_height"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let (width, height) =
            with_automaton(instance, |automaton| (automaton.width(), automaton.height()))?;
        unsafe {
            *out_width = width;
            *out_height = height;
        }
        Ok(())
    })
}

/// Copy the whole grid, row-major (`y * width + x`), into `out_cells`.
///
/// Returns `ForestFireErrorCode::BufferTooSmall` without writing anything if
/// `capacity` is less than `width * height`.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_cells` must point to at least `capacity` writable `ForestFireCell` values.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_copy_grid(
    ptr: *const ForestFireInstance,
    out_cells: *mut ForestFireCell,
    capacity: usize,
) -> ForestFireErrorCode {
    if out_cells.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_cells"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_automaton(instance, |automaton| {
            let cells = automaton.grid().cells();
            if capacity < cells.len() {
                return Err(DefaultForestFireError::buffer_too_small(cells.len(), capacity));
            }
            // SAFETY: caller guarantees `out_cells` holds `capacity` >= `cells.len()` slots.
            let out = unsafe { std::slice::from_raw_parts_mut(out_cells, cells.len()) };
            for (slot, &cell) in out.iter_mut().zip(cells) {
                *slot = cell.into();
            }
            Ok(())
        })?
    })
}

/// Read the most recent frame's statistics without advancing.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_stats` must be a valid, non-null pointer to writable `ForestFireStats`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_current_statistics(
    ptr: *const ForestFireInstance,
    out_stats: *mut ForestFireStats,
) -> ForestFireErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let record = with_automaton(instance, FireAutomaton::current_statistics)?;
        unsafe {
            *out_stats = record.into();
        }
        Ok(())
    })
}

/// Number of statistics records (frames 0..=current) available for charting.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
#[no_mangle]
pub unsafe extern "C" fn forest_fire_history_len(
    ptr: *const ForestFireInstance,
    out_len: *mut usize,
) -> ForestFireErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let len = with_automaton(instance, |automaton| automaton.history().len())?;
        unsafe {
            *out_len = len;
        }
        Ok(())
    })
}

/// Copy the statistics history, frame 0 first, into `out_buffer`.
///
/// At most `capacity` records are written and `out_written` receives the
/// count. If the history is longer than `capacity` the earliest `capacity`
/// records are copied and `ForestFireErrorCode::BufferTooSmall` is returned.
///
/// # Safety
///
/// - `ptr` must be a valid pointer returned by `forest_fire_new` or null.
/// - `out_buffer` must point to at least `capacity` writable `ForestFireStats` values.
/// - `out_written` must be a valid, non-null pointer to a `usize`.
///
/// # Example Usage (C)
/// ```c
/// uintptr_t len = 0;
/// forest_fire_history_len(sim, &len);
/// ForestFireStats* buf = malloc(len * sizeof(ForestFireStats));
/// uintptr_t written = 0;
/// forest_fire_copy_history(sim, buf, len, &written);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_fire_copy_history(
    ptr: *const ForestFireInstance,
    out_buffer: *mut ForestFireStats,
    capacity: usize,
    out_written: *mut usize,
) -> ForestFireErrorCode {
    if out_written.is_null() {
        return track_error(&DefaultForestFireError::null_pointer("out_written"));
    }
    if out_buffer.is_null() {
        unsafe {
            *out_written = 0;
        }
        return track_error(&DefaultForestFireError::null_pointer("out_buffer"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_automaton(instance, |automaton| {
            let history = automaton.history();
            let count = history.len().min(capacity);
            // SAFETY: caller guarantees `out_buffer` holds `capacity` >= `count` slots.
            let out = unsafe { std::slice::from_raw_parts_mut(out_buffer, count) };
            for (slot, &record) in out.iter_mut().zip(history) {
                *slot = record.into();
            }
            unsafe {
                *out_written = count;
            }
            if count < history.len() {
                Err(DefaultForestFireError::buffer_too_small(history.len(), capacity))
            } else {
                Ok(())
            }
        })?
    })
}
