//! Fixed-size window bounds around an entity pair.
//!
//! ```text
//! ...outer_left... ENTITY1 ...inner... ENTITY2 ...outer_right...
//! ```
//!
//! The slack outside the entity span is split in half, the left half capped by the
//! words preceding the leftmost entity. Whatever the left side cannot take goes to
//! the right, so the window always spans exactly `window_size` words.

use serde::Serialize;

use crate::error::{Error, Result};

/// Entity positions relative to the window and the absolute window bounds `[w_from, w_to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowPositions {
    pub left: usize,
    pub right: usize,
    pub w_from: usize,
    pub w_to: usize,
}

impl WindowPositions {
    pub fn len(&self) -> usize {
        self.w_to - self.w_from
    }

    pub fn is_empty(&self) -> bool {
        self.w_to == self.w_from
    }
}

/// Compute the window of `window_size` words holding both `left` and `right`.
///
/// The right side is not re-clamped after the left one was: a window that would end
/// past `words_in_news` is reported as [`Error::WindowPastDocumentEnd`].
pub fn related_window_positions(
    window_size: usize,
    left: usize,
    right: usize,
    words_in_news: usize,
) -> Result<WindowPositions> {
    if left == right {
        return Err(Error::SameEntityIndex(left));
    }
    if window_size > words_in_news {
        return Err(Error::WindowLargerThanDocument {
            window_size,
            words: words_in_news,
        });
    }
    if let Some(&index) = [left, right].iter().find(|&&i| i >= words_in_news) {
        return Err(Error::EntityOutOfDocument {
            index,
            words: words_in_news,
        });
    }

    let a_left = left.min(right);
    let a_right = left.max(right);

    let inner_size = a_right - a_left - 1;
    if inner_size + 2 > window_size {
        return Err(Error::EntitySpanTooWide {
            left,
            right,
            window_size,
        });
    }
    let outer_size = window_size - inner_size - 2;
    let outer_left_size = (outer_size / 2).min(a_left);
    let outer_right_size = window_size - outer_left_size - (2 + inner_size);

    let w_from = a_left - outer_left_size;
    let w_to = a_right + outer_right_size + 1;
    if w_to > words_in_news {
        return Err(Error::WindowPastDocumentEnd {
            w_from,
            w_to,
            words: words_in_news,
        });
    }

    Ok(WindowPositions {
        left: left - w_from,
        right: right - w_from,
        w_from,
        w_to,
    })
}
