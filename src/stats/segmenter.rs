use log::{debug, warn};
use std::collections::BTreeMap;

use super::aggregator::aggregate;
use super::policy::EdgeCasePolicy;
use super::types::{DimensionBreakdown, RatingRecord, Score, SegmentOutcome, SegmentStats};
use crate::config::dimensions::DimensionDefinition;
use crate::errors::StatsResult;

/// Splits ratings by one demographic dimension and aggregates each bucket.
///
/// Segments come out in the dimension's canonical label order. Buckets without
/// records are left out, buckets under the display threshold are kept but
/// marked suppressed. Records with an unknown label are skipped here but their
/// scores are still validated.
pub fn segment(
    records: &[RatingRecord],
    dimension: &DimensionDefinition,
    policy: &EdgeCasePolicy,
) -> StatsResult<Vec<SegmentStats>> {
    breakdown(records, dimension, policy).map(|breakdown| breakdown.segments)
}

/// Same as [`segment`], keeping the number of records that fell outside
/// every configured label.
pub fn breakdown(
    records: &[RatingRecord],
    dimension: &DimensionDefinition,
    policy: &EdgeCasePolicy,
) -> StatsResult<DimensionBreakdown> {
    policy
        .score_range
        .validate_all(records.iter().map(|r| r.score))?;

    let (buckets, unknown_count) = group_scores_by_label(records, dimension);
    debug!(
        "Segmenting {} records by {} into {} non-empty buckets, {} unknown",
        records.len(),
        dimension.name,
        buckets.iter().filter(|b| !b.is_empty()).count(),
        unknown_count
    );

    let segments = dimension
        .labels
        .iter()
        .zip(buckets)
        .filter(|(_, scores)| !scores.is_empty())
        .map(|(label, scores)| build_segment(dimension, label, &scores, policy))
        .collect::<StatsResult<Vec<_>>>()?;

    Ok(DimensionBreakdown {
        dimension: dimension.name.clone(),
        segments,
        unknown_count,
    })
}

/// Number of records per known value of a free-form attribute
pub fn count_by_attribute(records: &[RatingRecord], attribute: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in records.iter().filter_map(|r| r.demographics.label(attribute)) {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// One bucket per configured label, indexed like `dimension.labels`, plus
/// the count of records that matched none of them
fn group_scores_by_label(records: &[RatingRecord], dimension: &DimensionDefinition) -> (Vec<Vec<Score>>, usize) {
    let mut buckets = vec![Vec::new(); dimension.labels.len()];
    let mut unknown = 0;

    for record in records {
        let Some(label) = record.demographics.label(&dimension.name) else {
            unknown += 1;
            continue;
        };
        match dimension.position_of(label) {
            Some(idx) => buckets[idx].push(record.score),
            None => {
                warn!(
                    "Unrecognised {} label {:?}, treating as unknown",
                    dimension.name, label
                );
                unknown += 1;
            }
        }
    }

    (buckets, unknown)
}

fn build_segment(
    dimension: &DimensionDefinition,
    label: &str,
    scores: &[Score],
    policy: &EdgeCasePolicy,
) -> StatsResult<SegmentStats> {
    let stats = aggregate(scores, &policy.score_range)?;
    let outcome = if policy.is_suppressed(stats.count) {
        SegmentOutcome::Suppressed(stats)
    } else {
        SegmentOutcome::Reported(stats)
    };

    Ok(SegmentStats {
        dimension: dimension.name.clone(),
        label: label.to_string(),
        outcome,
    })
}
