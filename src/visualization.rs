//! Terminal Visualization Utilities
//!
//! Renders the sequence as vertical bars, one column per value, with the
//! glyph of each column chosen from its markers.

use crate::delay::Speed;
use crate::engine::{Algorithm, AlgorithmInfo};
use crate::markers::{Marker, MarkerBoard};
use crate::playback::RunState;
use crate::Value;
use std::fmt::Write;

const GLYPH_PLAIN: char = '█';
const GLYPH_COMPARING: char = '▒';
const GLYPH_SWAPPING: char = '░';
const GLYPH_SORTED: char = '▓';

fn glyph(marker: Marker) -> char {
    if marker.contains(Marker::SWAPPING) {
        GLYPH_SWAPPING
    } else if marker.contains(Marker::COMPARING) {
        GLYPH_COMPARING
    } else if marker.contains(Marker::SORTED) {
        GLYPH_SORTED
    } else {
        GLYPH_PLAIN
    }
}

/// Render `values` as a bar chart `height` rows tall.
///
/// Bar heights are scaled against `max_value`; values at or below zero
/// render as empty columns. Rows are separated by `\n`, top row first.
pub fn create_bar_chart(
    values: &[Value],
    markers: &MarkerBoard,
    height: usize,
    max_value: Value,
) -> String {
    let max_value = max_value.max(1) as i64;
    let heights: Vec<usize> = values
        .iter()
        .map(|&v| {
            let v = (v as i64).clamp(0, max_value);
            ((v * height as i64 + max_value - 1) / max_value) as usize
        })
        .collect();

    let mut chart = String::with_capacity((values.len() * 3 + 1) * height);
    for row in 0..height {
        let level = height - row;
        for (index, &bar) in heights.iter().enumerate() {
            if bar >= level {
                chart.push(glyph(markers.get(index)));
            } else {
                chart.push(' ');
            }
        }
        if row + 1 < height {
            chart.push('\n');
        }
    }
    chart
}

/// One-line summary of the controller: algorithm, run state and speed.
pub fn create_status_line(algorithm: Option<Algorithm>, state: RunState, speed: Speed) -> String {
    let mut status = String::with_capacity(64);
    match algorithm {
        Some(algorithm) => write!(status, "{}", algorithm).ok(),
        None => write!(status, "--").ok(),
    };
    let state = match state {
        RunState::Idle => "IDLE",
        RunState::Running => "RUNNING",
    };
    write!(
        status,
        " | {} | speed {} ({} ms/step)",
        state,
        speed,
        speed.delay().as_millis()
    )
    .ok();
    status
}

/// Complexity summary for an algorithm.
pub fn create_info_line(info: &AlgorithmInfo) -> String {
    format!(
        "{}: best {} | avg {} | worst {} | space {}",
        info.name, info.time_best, info.time_average, info.time_worst, info.space
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StepEvent;

    #[test]
    fn test_bar_chart_shape() {
        let board = MarkerBoard::new(3);
        let chart = create_bar_chart(&[1, 2, 4], &board, 4, 4);
        let rows: Vec<&str> = chart.lines().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "  █");
        assert_eq!(rows[2], " ██");
        assert_eq!(rows[3], "███");
    }

    #[test]
    fn test_bar_chart_marker_glyphs() {
        let mut board = MarkerBoard::new(3);
        board.apply(StepEvent::Finalize(2));
        board.apply(StepEvent::Compare(0, 1));
        let chart = create_bar_chart(&[5, 5, 5], &board, 1, 5);
        assert_eq!(chart, "▒▒▓");
    }

    #[test]
    fn test_bar_chart_empty() {
        let chart = create_bar_chart(&[], &MarkerBoard::new(0), 3, 10);
        assert_eq!(chart, "\n\n");
    }

    #[test]
    fn test_status_line() {
        let status = create_status_line(Some(Algorithm::Merge), RunState::Running, Speed::new(100));
        assert!(status.contains("Merge Sort"));
        assert!(status.contains("RUNNING"));
        assert!(status.contains("1 ms/step"));

        let idle = create_status_line(None, RunState::Idle, Speed::new(1));
        assert!(idle.starts_with("--"));
        assert!(idle.contains("198 ms/step"));
    }

    #[test]
    fn test_info_line() {
        let line = create_info_line(Algorithm::Partition.info());
        assert_eq!(
            line,
            "Quick Sort: best O(n log n) | avg O(n log n) | worst O(n²) | space O(log n)"
        );
    }
}
