//! Circular distance encoding relative to an entity inside the window.

/// Per-position wrap-around offset from `pos` for a window of `size` words.
///
/// Position `i` holds `i - pos` when `i >= pos`, and `i - pos + size` otherwise,
/// so every value lies in `[0, size)` as long as `pos < size`.
pub fn distance_vector(pos: usize, size: usize) -> Vec<usize> {
    debug_assert!(pos < size, "reference position {pos} outside window {size}");
    (0..size)
        .map(|i| if i >= pos { i - pos } else { i + size - pos })
        .collect()
}
