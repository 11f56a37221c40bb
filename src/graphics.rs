//! Progress graphics as pure functions of `(time_left, total)`.
//!
//! Nothing here holds state; the timer view picks one of these builders per
//! the configured progress style and draws the result.

/// Elapsed fraction in `0.0..=1.0`. A zero-length session reads as no
/// progress rather than dividing by zero.
pub fn progress_ratio(time_left_secs: u32, total_secs: u32) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (1.0 - time_left_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

/// Segmented-pill fill states, left to right. Pills fill as time elapses;
/// all `count` pills are lit exactly when the timer reaches zero.
pub fn pill_segments(time_left_secs: u32, total_secs: u32, count: usize) -> Vec<bool> {
    let filled = (progress_ratio(time_left_secs, total_secs) * count as f64).floor() as usize;
    let filled = filled.min(count);
    (0..count).map(|i| i < filled).collect()
}

const GLYPH_ROWS: usize = 5;

/// 3x5 dot font for the clock readout. The colon is 1 column wide.
fn glyph(c: char) -> [&'static str; GLYPH_ROWS] {
    match c {
        '0' => ["###", "# #", "# #", "# #", "###"],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => ["###", "  #", "###", "#  ", "###"],
        '3' => ["###", "  #", "###", "  #", "###"],
        '4' => ["# #", "# #", "###", "  #", "  #"],
        '5' => ["###", "#  ", "###", "  #", "###"],
        '6' => ["###", "#  ", "###", "# #", "###"],
        '7' => ["###", "  #", "  #", "  #", "  #"],
        '8' => ["###", "# #", "###", "# #", "###"],
        '9' => ["###", "# #", "###", "  #", "###"],
        ':' => [" ", "#", " ", "#", " "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}

/// Render a `MM:SS` string as five rows of dots.
pub fn dot_matrix_rows(text: &str) -> Vec<String> {
    (0..GLYPH_ROWS)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row].replace('#', "●"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}
