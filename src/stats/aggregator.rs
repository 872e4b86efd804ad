use log::debug;

use super::policy::{undefined_on_empty, ScoreRange};
use super::types::{AggregateStats, Histogram, Score};
use crate::errors::StatsResult;

/// Reduces a group of scores to descriptive statistics.
///
/// The whole input is validated before anything is computed, so an
/// out-of-range score never yields partial output.
pub fn aggregate(scores: &[Score], range: &ScoreRange) -> StatsResult<AggregateStats> {
    // 1. Reject corrupt input up front
    range.validate_all(scores.iter().copied())?;

    let count = scores.len();
    debug!("Aggregating {} scores", count);

    // 2. Histogram over the full range, so empty input still has every bucket
    let histogram = build_histogram(scores, range);

    // 3. Central tendency and spread, undefined for empty groups
    let moments = Moments::from_histogram(&histogram);
    let mean = undefined_on_empty(count, || moments.mean());
    let median = undefined_on_empty(count, || compute_median(scores));
    let mode = undefined_on_empty(count, || compute_mode(&histogram)).flatten();
    let variance = undefined_on_empty(count, || moments.population_variance());
    let std_dev = variance.map(f64::sqrt);

    Ok(AggregateStats {
        count,
        mean,
        median,
        mode,
        variance,
        std_dev,
        histogram,
    })
}

fn build_histogram(scores: &[Score], range: &ScoreRange) -> Histogram {
    let mut histogram: Histogram = range.values().map(|score| (score, 0)).collect();
    for score in scores {
        *histogram.entry(*score).or_insert(0) += 1;
    }
    histogram
}

/// Exact integer power sums. Floats only appear in the final division, so
/// the result is the same for every ordering of the input.
struct Moments {
    n: i128,
    sum: i128,
    sum_of_squares: i128,
}

impl Moments {
    fn from_histogram(histogram: &Histogram) -> Self {
        let mut moments = Moments {
            n: 0,
            sum: 0,
            sum_of_squares: 0,
        };
        for (&score, &occurrences) in histogram {
            let score = i128::from(score);
            let occurrences = occurrences as i128;
            moments.n += occurrences;
            moments.sum += score * occurrences;
            moments.sum_of_squares += score * score * occurrences;
        }
        moments
    }

    /// Caller guarantees `n > 0`
    fn mean(&self) -> f64 {
        self.sum as f64 / self.n as f64
    }

    /// Divides by the count: the ratings are the whole population of interest.
    /// `(n·Σx² − (Σx)²) / n²`, with the numerator computed exactly.
    fn population_variance(&self) -> f64 {
        let numerator = self.n * self.sum_of_squares - self.sum * self.sum;
        numerator as f64 / (self.n as f64 * self.n as f64)
    }
}

fn compute_median(scores: &[Score]) -> f64 {
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Highest frequency wins; the histogram iterates in ascending score order,
/// so a strict comparison keeps the lowest score among ties.
fn compute_mode(histogram: &Histogram) -> Option<Score> {
    let mut best: Option<(Score, usize)> = None;
    for (&score, &occurrences) in histogram {
        if occurrences == 0 {
            continue;
        }
        match best {
            Some((_, top)) if occurrences <= top => {}
            _ => best = Some((score, occurrences)),
        }
    }
    best.map(|(score, _)| score)
}
