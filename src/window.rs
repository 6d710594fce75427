//! # Windowed List Rendering
//!
//! Computes which slice of an ordered record sequence must be
//! materialized for a given viewport and scroll offset, keeping render
//! cost independent of total record count.
//!
//! The window is `[visible_start - buffer, visible_end + buffer]`,
//! clamped to the sequence, where `visible_start = scroll / item_height`
//! and the visible row count is `ceil(viewport / item_height)`. Below
//! [`WindowConfig::threshold`] the whole list is materialized; the
//! bookkeeping is not worth it for short lists.
//!
//! The computation is pure. Consumers must recompute on every scroll
//! change AND every record-count change, against the current ordered
//! sequence; indices are never stable across mutations, so caching
//! positions by record identity is incorrect by construction.

/// Fixed geometry and tuning for a windowed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Height of one row, in pixels. Must be non-zero.
    pub item_height: u32,
    /// Height of the scrollable viewport, in pixels.
    pub viewport_height: u32,
    /// Extra rows materialized on each side for smooth scrolling.
    pub buffer: usize,
    /// Below this record count the whole list is materialized.
    pub threshold: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            item_height: 40,
            viewport_height: 600,
            buffer: 5,
            threshold: 100,
        }
    }
}

/// The slice of rows to materialize, as a half-open index range, plus
/// the geometry a consumer needs to position it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First index to materialize.
    pub start: usize,
    /// One past the last index to materialize.
    pub end: usize,
    /// Pixel offset of the first materialized row from the top of the
    /// full list.
    pub offset_y: u64,
    /// Full scroll height of the list, in pixels.
    pub total_height: u64,
    /// False when the list was below the threshold and is rendered
    /// whole.
    pub windowed: bool,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Computes the window for a sequence of `len` records at the given
/// scroll offset.
pub fn compute(len: usize, scroll_offset: u32, config: &WindowConfig) -> Window {
    let item_height = config.item_height.max(1);
    let total_height = len as u64 * u64::from(item_height);

    if len == 0 || len < config.threshold {
        return Window {
            start: 0,
            end: len,
            offset_y: 0,
            total_height,
            windowed: false,
        };
    }

    let visible_start = (scroll_offset / item_height) as usize;
    let rows_in_viewport = config.viewport_height.div_ceil(item_height) as usize;

    // Clamp to the sequence before widening; an over-scrolled offset
    // degenerates to a window at the tail.
    let visible_start = visible_start.min(len.saturating_sub(1));
    let visible_end = (visible_start + rows_in_viewport.max(1) - 1).min(len - 1);

    let start = visible_start.saturating_sub(config.buffer);
    let end = (visible_end + config.buffer).min(len - 1) + 1;

    Window {
        start,
        end,
        offset_y: start as u64 * u64::from(item_height),
        total_height,
        windowed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(item: u32, viewport: u32, buffer: usize, threshold: usize) -> WindowConfig {
        WindowConfig {
            item_height: item,
            viewport_height: viewport,
            buffer,
            threshold,
        }
    }

    #[test]
    fn test_short_list_rendered_whole() {
        let w = compute(20, 300, &config(40, 600, 5, 100));
        assert!(!w.windowed);
        assert_eq!((w.start, w.end), (0, 20));
        assert_eq!(w.offset_y, 0);
        assert_eq!(w.total_height, 800);
    }

    #[test]
    fn test_empty_list() {
        let w = compute(0, 0, &config(40, 600, 5, 100));
        assert!(w.is_empty());
        assert_eq!(w.total_height, 0);
    }

    #[test]
    fn test_window_at_top() {
        // 1000 rows of 40px, 600px viewport: rows 0..=14 visible.
        let w = compute(1000, 0, &config(40, 600, 5, 100));
        assert!(w.windowed);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 20); // 14 + buffer 5, inclusive -> 19, +1
        assert_eq!(w.offset_y, 0);
    }

    #[test]
    fn test_window_mid_scroll() {
        // Scrolled to row 25 (offset 1000px).
        let w = compute(1000, 1000, &config(40, 600, 5, 100));
        assert_eq!(w.start, 20); // 25 - buffer
        assert_eq!(w.end, 45); // 25 + 15 - 1 + buffer = 44, +1
        assert_eq!(w.offset_y, 20 * 40);
        assert_eq!(w.total_height, 40_000);
    }

    #[test]
    fn test_window_clamped_at_tail() {
        // Scroll to the very end of 200 rows.
        let cfg = config(40, 600, 5, 100);
        let w = compute(200, 200 * 40, &cfg);
        assert!(w.end <= 200);
        assert_eq!(w.end, 200);
        assert!(w.contains(199));
    }

    #[test]
    fn test_window_contains_analytic_visible_range() {
        // For a sweep of geometries, the window must cover
        // [floor(S/H), min(N-1, floor(S/H) + ceil(V/H) - 1)].
        let cases = [
            (1000usize, 40u32, 600u32, 0u32),
            (1000, 40, 600, 37),
            (1000, 40, 600, 999),
            (1000, 40, 615, 10_000),
            (150, 32, 480, 2_000),
            (500, 64, 700, 9_999),
        ];
        for (len, item, viewport, scroll) in cases {
            let cfg = config(item, viewport, 3, 100);
            let w = compute(len, scroll, &cfg);

            let vis_start = ((scroll / item) as usize).min(len - 1);
            let vis_end = (vis_start + viewport.div_ceil(item) as usize - 1).min(len - 1);

            assert!(
                w.start <= vis_start && w.end > vis_end,
                "window {:?} does not cover visible {}..={} (len={}, scroll={})",
                (w.start, w.end),
                vis_start,
                vis_end,
                len,
                scroll
            );
        }
    }

    #[test]
    fn test_recompute_after_shrink_never_out_of_bounds() {
        let cfg = config(40, 600, 5, 100);
        // Window computed deep into a list...
        let w = compute(1000, 30_000, &cfg);
        assert!(w.end <= 1000);
        // ...then the list shrinks; recomputation clamps.
        let w = compute(120, 30_000, &cfg);
        assert!(w.end <= 120);
        assert!(w.contains(119));
    }

    #[test]
    fn test_threshold_boundary() {
        let cfg = config(40, 600, 5, 100);
        assert!(!compute(99, 0, &cfg).windowed);
        assert!(compute(100, 0, &cfg).windowed);
    }

    #[test]
    fn test_offset_y_matches_start_row() {
        let cfg = config(48, 600, 2, 10);
        let w = compute(300, 4800, &cfg); // row 100
        assert_eq!(w.start, 98);
        assert_eq!(w.offset_y, 98 * 48);
    }
}
