use crate::models::PlotWindow;

/// Pad the buy..sell rows by `extra_rows` on each side, clamped to `[0, total_rows]`
///
/// The buy index is not required to precede the sell index. An inverted pair
/// yields whatever range the arithmetic gives, possibly an empty one.
pub fn compute_window(buy_index: usize, sell_index: usize, extra_rows: usize, total_rows: usize) -> PlotWindow {
    let min_index = buy_index.saturating_sub(extra_rows);
    let max_index = sell_index.saturating_add(extra_rows).min(total_rows);
    PlotWindow { min_index, max_index }
}
