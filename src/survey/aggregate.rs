use crate::catalog::ScoreVector;

/// Per-question scores are on a 0-100 scale; multiplying the per-axis mean by
/// this factor puts a fully answered survey's totals on a 0-600 scale.
pub const AGGREGATE_SCALE: f64 = 6.0;

/// Upper bound of each normalized axis score.
pub const MAX_AXIS_SCORE: i32 = 600;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateScores {
    pub n1: i32,
    pub n2: i32,
    pub n3: i32,
    pub plot_x: f64,
    pub plot_y: f64,
}

/// Collapses the answered score vectors into the three normalized axis scores
/// and the two ternary plot coordinates.
///
/// Returns `None` for an empty answer set: an untouched survey has no
/// aggregate, it is not a survey that scored zero. Axis scores use
/// round-half-away-from-zero (`f64::round`); the inputs are non-negative, so
/// this matches the JavaScript `Math.round` the web client ships with.
pub fn aggregate_scores(vectors: &[ScoreVector]) -> Option<AggregateScores> {
    if vectors.is_empty() {
        return None;
    }

    let count = vectors.len() as f64;
    let mut totals = [0i64; 3];
    for vector in vectors {
        for (total, component) in totals.iter_mut().zip(vector) {
            *total += i64::from(*component);
        }
    }

    let axis = |i: usize| ((totals[i] as f64 / count) * AGGREGATE_SCALE).round() as i32;
    let (n1, n2, n3) = (axis(0), axis(1), axis(2));

    let plot_x = round2(f64::from(n2 - n1) / AGGREGATE_SCALE);
    let plot_y = round2((f64::from(n3) - f64::from(n1 + n2) / 2.0) / AGGREGATE_SCALE);

    Some(AggregateScores {
        n1,
        n2,
        n3,
        plot_x,
        plot_y,
    })
}

/// Two-decimal rounding in decimal space, so a stored coordinate compares
/// equal to its display form instead of carrying binary residue.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
