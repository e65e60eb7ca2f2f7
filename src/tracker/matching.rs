//! Greedy one-to-one matching on an overlap score matrix.

use ndarray::Array2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    /// Matched `(detection, track)` index pairs, in commit order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_detections: Vec<usize>,
    pub unmatched_tracks: Vec<usize>,
}

/// Greedy highest-score-first assignment.
///
/// `scores` has one row per detection and one column per track. Candidate
/// pairs are enumerated row-major and sorted by descending score with a
/// stable sort, so equal scores resolve to the lower detection index and then
/// the lower track index. The walk stops at the first pair scoring below
/// `thresh`.
///
/// This is not an optimal assignment. Under three-way ambiguity it can
/// differ from a Hungarian solver.
pub fn greedy_assignment(scores: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = scores.dim();

    let mut candidates: Vec<(usize, usize, f32)> = Vec::with_capacity(num_rows * num_cols);
    for ((row, col), &score) in scores.indexed_iter() {
        candidates.push((row, col, score));
    }
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut row_claimed = vec![false; num_rows];
    let mut col_claimed = vec![false; num_cols];
    let mut matches = Vec::new();

    for (row, col, score) in candidates {
        if score < thresh {
            break;
        }
        if row_claimed[row] || col_claimed[col] {
            continue;
        }
        row_claimed[row] = true;
        col_claimed[col] = true;
        matches.push((row, col));
    }

    let unmatched_detections = row_claimed
        .iter()
        .enumerate()
        .filter_map(|(i, &claimed)| if claimed { None } else { Some(i) })
        .collect();
    let unmatched_tracks = col_claimed
        .iter()
        .enumerate()
        .filter_map(|(j, &claimed)| if claimed { None } else { Some(j) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_detections,
        unmatched_tracks,
    }
}
