/*
Timeline Interpolation
======================

A long score has far more chords than a reader wants to see. The timeline is
reduced to `k` points by cutting the integer domain (usually measure numbers)
into `k` contiguous sub-ranges and averaging each one.

  domain units   first..=last, e.g. measures 1..=10 is 10 units

  partition      divmod(units, k) = (q, r): every range gets q units and the
                 first r ranges get one more, so sizes never differ by more
                 than one

        10 units, k = 3  ->  [1, 5) [5, 8) [8, 11)   sizes 4 3 3

  point          mean of the samples with start <= position < stop, placed at
                 the midpoint (start + stop) / 2
*/

use std::ops::Range;

use tracing::debug;

use super::series::{mean, DissonanceSample, DissonanceSeries};
use crate::error::{DissonanceError, Result};

/// Averaged dissonance over one sub-range of the domain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedPoint {
    /// Midpoint of the sub-range
    pub position: f64,
    pub start: i64,
    pub stop: i64,
    /// Mean dissonance, `None` when the sub-range holds no defined sample
    pub dissonance: Option<f64>,
    /// Mean chord size of the chord samples in the sub-range
    pub chord_size_mean: Option<f64>,
    pub sample_count: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterpolatedSeries {
    points: Vec<InterpolatedPoint>,
}

impl InterpolatedSeries {
    pub fn points(&self) -> &[InterpolatedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.dissonance).collect()
    }
}

/// Reduces a dissonance series to a fixed number of evenly spread points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineAggregator {
    points: usize,
}

impl TimelineAggregator {
    pub fn new(points: usize) -> Self {
        Self { points }
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// Split `first..=last` into `parts` contiguous ranges whose sizes differ
    /// by at most one, larger ranges first.
    pub fn partition(first: i64, last: i64, parts: usize) -> Vec<Range<i64>> {
        let Some(units) = unit_count(first, last) else {
            return Vec::new();
        };
        let parts_i = match i64::try_from(parts) {
            Ok(p) if p > 0 => p,
            _ => return Vec::new(),
        };
        let (q, r) = (units / parts_i, units % parts_i);
        (0..parts_i)
            .map(|i| {
                let start = first + i * q + i.min(r);
                let stop = first + (i + 1) * q + (i + 1).min(r);
                start..stop
            })
            .collect()
    }

    pub fn interpolate(&self, series: &DissonanceSeries) -> Result<InterpolatedSeries> {
        if self.points == 0 {
            return Err(DissonanceError::invalid(
                "interpolate_points",
                "at least one point is required",
            ));
        }

        let (first, last) = domain_bounds(series).ok_or(DissonanceError::InsufficientDomainRange {
            points: self.points,
            domain_units: 0,
        })?;
        let domain_units = unit_count(first, last)
            .and_then(|units| usize::try_from(units).ok())
            .ok_or_else(|| {
                DissonanceError::invalid(
                    "positions",
                    format!("domain {first}..={last} is too wide to partition"),
                )
            })?;
        if self.points >= domain_units {
            return Err(DissonanceError::InsufficientDomainRange {
                points: self.points,
                domain_units,
            });
        }

        let ranges = Self::partition(first, last, self.points);
        debug!(first, last, points = self.points, "interpolating timeline");

        let points = ranges
            .into_iter()
            .map(|range| {
                let inside: Vec<&DissonanceSample> = series
                    .iter()
                    .filter(|s| s.position >= range.start as f64 && s.position < range.end as f64)
                    .collect();
                InterpolatedPoint {
                    position: (range.start as f64 + range.end as f64) / 2.0,
                    start: range.start,
                    stop: range.end,
                    dissonance: mean(inside.iter().map(|s| s.dissonance)),
                    chord_size_mean: mean(
                        inside
                            .iter()
                            .filter_map(|s| s.chord_size.map(|n| n as f64)),
                    ),
                    sample_count: inside.len(),
                }
            })
            .collect();

        Ok(InterpolatedSeries { points })
    }
}

/// Unit count of `first..=last`. `None` when the range is empty or its
/// exclusive end does not fit an `i64`.
fn unit_count(first: i64, last: i64) -> Option<i64> {
    if last < first {
        return None;
    }
    last.checked_add(1)?.checked_sub(first)
}

/// Integer units spanned by the sample positions, `None` for an empty series.
fn domain_bounds(series: &DissonanceSeries) -> Option<(i64, i64)> {
    series
        .iter()
        .map(|s| s.position)
        .filter(|p| p.is_finite())
        .fold(None, |bounds, p| {
            let unit = p.floor() as i64;
            Some(match bounds {
                None => (unit, unit),
                Some((lo, hi)) => (lo.min(unit), hi.max(unit)),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measures(values: &[f64]) -> DissonanceSeries {
        values
            .iter()
            .enumerate()
            .map(|(i, &d)| DissonanceSample::new((i + 1) as f64, d).with_chord(3, Vec::new()))
            .collect()
    }

    #[test]
    fn balanced_partition() {
        let ranges = TimelineAggregator::partition(1, 10, 3);
        assert_eq!(ranges, vec![1..5, 5..8, 8..11]);
    }

    #[test]
    fn partition_sizes_cover_the_domain() {
        for units in 2..40i64 {
            for parts in 1..units as usize {
                let ranges = TimelineAggregator::partition(5, 5 + units - 1, parts);
                assert_eq!(ranges.len(), parts);
                let sizes: Vec<i64> = ranges.iter().map(|r| r.end - r.start).collect();
                assert_eq!(sizes.iter().sum::<i64>(), units);
                let (min, max) = (sizes.iter().min().unwrap(), sizes.iter().max().unwrap());
                assert!(max - min <= 1);
                assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));
            }
        }
    }

    #[test]
    fn averages_each_range() {
        let series = measures(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let reduced = TimelineAggregator::new(3).interpolate(&series).unwrap();

        assert_eq!(reduced.len(), 3);
        assert_eq!(reduced.positions(), vec![3.0, 6.5, 9.5]);
        assert_eq!(reduced.values(), vec![Some(2.5), Some(6.0), Some(9.0)]);
        let counts: Vec<usize> = reduced.points().iter().map(|p| p.sample_count).collect();
        assert_eq!(counts, vec![4, 3, 3]);
        assert!(reduced.points().iter().all(|p| p.chord_size_mean == Some(3.0)));
    }

    #[test]
    fn undefined_values_are_skipped() {
        let series = measures(&[1.0, f64::NAN, 3.0, 5.0]);
        let reduced = TimelineAggregator::new(2).interpolate(&series).unwrap();
        assert_eq!(reduced.values(), vec![Some(1.0), Some(4.0)]);
    }

    #[test]
    fn empty_range_has_no_mean() {
        let series: DissonanceSeries = [1.0, 2.0, 6.0]
            .iter()
            .map(|&p| DissonanceSample::new(p, 1.0))
            .collect();
        let reduced = TimelineAggregator::new(3).interpolate(&series).unwrap();
        assert_eq!(reduced.values(), vec![Some(1.0), None, Some(1.0)]);
        assert_eq!(reduced.points()[1].chord_size_mean, None);
    }

    #[test]
    fn continuous_positions() {
        let series: DissonanceSeries = [0.25, 0.75, 1.5, 2.9]
            .iter()
            .map(|&p| DissonanceSample::new(p, p))
            .collect();
        let reduced = TimelineAggregator::new(2).interpolate(&series).unwrap();
        assert_eq!(reduced.positions(), vec![1.0, 2.5]);
        assert_eq!(reduced.values(), vec![Some(2.5 / 3.0), Some(2.9)]);
    }

    #[test]
    fn too_many_points() {
        let series = measures(&[1.0, 2.0, 3.0, 4.0]);
        for points in [4, 5, 100] {
            assert_eq!(
                TimelineAggregator::new(points).interpolate(&series),
                Err(DissonanceError::InsufficientDomainRange {
                    points,
                    domain_units: 4
                })
            );
        }
        assert!(TimelineAggregator::new(3).interpolate(&series).is_ok());
    }

    #[test]
    fn far_apart_positions_are_rejected() {
        let series: DissonanceSeries = [-1e19, 1e19]
            .iter()
            .map(|&p| DissonanceSample::new(p, 1.0))
            .collect();
        assert!(matches!(
            TimelineAggregator::new(2).interpolate(&series),
            Err(DissonanceError::InvalidParameter { name: "positions", .. })
        ));

        let edge: DissonanceSeries = [i64::MAX as f64 - 4096.0, 1e300]
            .iter()
            .map(|&p| DissonanceSample::new(p, 1.0))
            .collect();
        assert!(TimelineAggregator::new(2).interpolate(&edge).is_err());
        assert!(TimelineAggregator::partition(i64::MIN, i64::MAX, 2).is_empty());
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(
            TimelineAggregator::new(2).interpolate(&DissonanceSeries::default()),
            Err(DissonanceError::InsufficientDomainRange {
                points: 2,
                domain_units: 0
            })
        );
        assert!(matches!(
            TimelineAggregator::new(0).interpolate(&measures(&[1.0, 2.0])),
            Err(DissonanceError::InvalidParameter { .. })
        ));
    }
}
