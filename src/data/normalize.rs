use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{RawRow, RegionSeries, SeriesPoint, YearTotal};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a table could not be turned into percentage series.
///
/// Any of these rejects the whole table: a chart is never drawn with a
/// partially defined denominator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("no year columns declared")]
    NoYears,

    #[error("years must be strictly ascending ({previous} is followed by {next})")]
    UnorderedYears { previous: i32, next: i32 },

    #[error("region '{region}' appears more than once")]
    DuplicateRegion { region: String },

    #[error("region '{region}' has no value for {year}")]
    MissingValue { region: String, year: i32 },

    #[error("region '{region}' has a non-finite value for {year}")]
    NonFiniteValue { region: String, year: i32 },

    #[error("region '{region}' has a negative count for {year}")]
    NegativeValue { region: String, year: i32 },

    #[error("total for {year} is zero, percentages are undefined")]
    ZeroTotal { year: i32 },
}

// ---------------------------------------------------------------------------
// Column totals
// ---------------------------------------------------------------------------

/// Sum every region's count per year.
///
/// Validates the inputs the same way [`normalize`] does, so a successful
/// result always has a strictly positive total for each year.
pub fn year_totals(rows: &[RawRow], years: &[i32]) -> Result<Vec<YearTotal>, DataError> {
    check_years(years)?;
    check_regions(rows)?;

    years
        .iter()
        .map(|&year| {
            let mut total = 0.0;
            for row in rows {
                total += cell(row, year)?;
            }
            if !(total > 0.0) {
                return Err(DataError::ZeroTotal { year });
            }
            Ok(YearTotal { year, total })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Convert raw rows into one [`RegionSeries`] per row.
///
/// Totals are computed over all rows before any percentage. Points follow
/// the order of `years`, which must be strictly ascending.
pub fn normalize(rows: &[RawRow], years: &[i32]) -> Result<Vec<RegionSeries>, DataError> {
    let totals = year_totals(rows, years)?;
    series_from_totals(rows, &totals)
}

/// Percentage series against totals already produced by [`year_totals`]
/// for the same rows.
pub fn series_from_totals(
    rows: &[RawRow],
    totals: &[YearTotal],
) -> Result<Vec<RegionSeries>, DataError> {
    rows.iter()
        .map(|row| {
            let points = totals
                .iter()
                .map(|t| {
                    let count = cell(row, t.year)?;
                    Ok(SeriesPoint {
                        year: t.year,
                        count,
                        total: t.total,
                        percentage: count / t.total,
                    })
                })
                .collect::<Result<Vec<_>, DataError>>()?;
            Ok(RegionSeries {
                region: row.region.clone(),
                points,
            })
        })
        .collect()
}

fn cell(row: &RawRow, year: i32) -> Result<f64, DataError> {
    let value = row.value(year).ok_or_else(|| DataError::MissingValue {
        region: row.region.clone(),
        year,
    })?;
    if !value.is_finite() {
        return Err(DataError::NonFiniteValue {
            region: row.region.clone(),
            year,
        });
    }
    if value < 0.0 {
        return Err(DataError::NegativeValue {
            region: row.region.clone(),
            year,
        });
    }
    Ok(value)
}

fn check_years(years: &[i32]) -> Result<(), DataError> {
    if years.is_empty() {
        return Err(DataError::NoYears);
    }
    for pair in years.windows(2) {
        if pair[1] <= pair[0] {
            return Err(DataError::UnorderedYears {
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

fn check_regions(rows: &[RawRow]) -> Result<(), DataError> {
    let mut seen = BTreeSet::new();
    for row in rows {
        if !seen.insert(row.region.as_str()) {
            return Err(DataError::DuplicateRegion {
                region: row.region.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn splits_2020_into_thirty_and_seventy_percent() {
        let rows = vec![
            RawRow::new("A").with_value(2020, 30.0),
            RawRow::new("B").with_value(2020, 70.0),
        ];
        let series = normalize(&rows, &[2020]).unwrap();

        assert_eq!(
            series[0].points[0],
            SeriesPoint { year: 2020, count: 30.0, total: 100.0, percentage: 0.30 }
        );
        assert_eq!(series[1].region, "B");
        assert_eq!(series[1].points[0].count, 70.0);
        assert_eq!(series[1].points[0].total, 100.0);
        assert!(approx(series[1].points[0].percentage, 0.70));
    }

    #[test]
    fn missing_cell_is_rejected() {
        let rows = vec![
            RawRow::new("A").with_value(2020, 30.0).with_value(2021, 5.0),
            RawRow::new("B").with_value(2020, 70.0),
        ];
        assert_eq!(
            normalize(&rows, &[2020, 2021]),
            Err(DataError::MissingValue { region: "B".into(), year: 2021 })
        );
    }

    #[test]
    fn zero_total_is_rejected() {
        let rows = vec![
            RawRow::new("A").with_value(2020, 0.0),
            RawRow::new("B").with_value(2020, 0.0),
        ];
        assert_eq!(normalize(&rows, &[2020]), Err(DataError::ZeroTotal { year: 2020 }));
    }

    #[test]
    fn negative_count_is_rejected() {
        let rows = vec![
            RawRow::new("A").with_value(2020, -10.0),
            RawRow::new("B").with_value(2020, 5.0),
        ];
        assert_eq!(
            normalize(&rows, &[2020]),
            Err(DataError::NegativeValue { region: "A".into(), year: 2020 })
        );
    }

    #[test]
    fn cancelling_counts_never_reach_the_total() {
        let rows = vec![
            RawRow::new("A").with_value(2020, 0.1),
            RawRow::new("B").with_value(2020, 0.2),
            RawRow::new("C").with_value(2020, -0.3),
        ];
        assert_eq!(
            year_totals(&rows, &[2020]),
            Err(DataError::NegativeValue { region: "C".into(), year: 2020 })
        );
    }

    #[test]
    fn negative_zero_total_is_rejected() {
        let rows = vec![RawRow::new("A").with_value(2020, -0.0)];
        assert_eq!(year_totals(&rows, &[2020]), Err(DataError::ZeroTotal { year: 2020 }));
    }

    #[test]
    fn series_reuse_precomputed_totals() {
        let rows = vec![
            RawRow::new("A").with_value(2020, 30.0),
            RawRow::new("B").with_value(2020, 70.0),
        ];
        let totals = year_totals(&rows, &[2020]).unwrap();
        assert_eq!(series_from_totals(&rows, &totals), normalize(&rows, &[2020]));
    }

    #[test]
    fn no_rows_means_zero_totals() {
        assert_eq!(normalize(&[], &[2020]), Err(DataError::ZeroTotal { year: 2020 }));
    }

    #[test]
    fn years_must_ascend() {
        let rows = vec![RawRow::new("A").with_value(2020, 1.0).with_value(2019, 1.0)];
        assert_eq!(
            normalize(&rows, &[2020, 2019]),
            Err(DataError::UnorderedYears { previous: 2020, next: 2019 })
        );
        assert_eq!(
            normalize(&rows, &[2020, 2020]),
            Err(DataError::UnorderedYears { previous: 2020, next: 2020 })
        );
        assert_eq!(normalize(&rows, &[]), Err(DataError::NoYears));
    }

    #[test]
    fn duplicate_region_is_rejected() {
        let rows = vec![
            RawRow::new("A").with_value(2020, 1.0),
            RawRow::new("A").with_value(2020, 2.0),
        ];
        assert_eq!(
            normalize(&rows, &[2020]),
            Err(DataError::DuplicateRegion { region: "A".into() })
        );
    }

    #[test]
    fn nan_cell_is_rejected() {
        let rows = vec![
            RawRow::new("A").with_value(2020, f64::NAN),
            RawRow::new("B").with_value(2020, 2.0),
        ];
        assert_eq!(
            normalize(&rows, &[2020]),
            Err(DataError::NonFiniteValue { region: "A".into(), year: 2020 })
        );
    }

    #[test]
    fn extra_years_in_rows_are_ignored() {
        let rows = vec![RawRow::new("A").with_value(2019, 3.0).with_value(2020, 4.0)];
        let series = normalize(&rows, &[2020]).unwrap();
        assert_eq!(series[0].points.len(), 1);
        assert_eq!(series[0].points[0].percentage, 1.0);
    }

    fn table() -> impl Strategy<Value = (Vec<RawRow>, Vec<i32>)> {
        (1usize..12, 1usize..10).prop_flat_map(|(n_rows, n_years)| {
            let years: Vec<i32> = (0..n_years as i32).map(|i| 2012 + i).collect();
            proptest::collection::vec(
                proptest::collection::vec(1u32..100_000, n_years),
                n_rows,
            )
            .prop_map(move |cells| {
                let rows = cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, counts)| RawRow {
                        region: format!("region {i}"),
                        values: years
                            .iter()
                            .zip(counts)
                            .map(|(&y, c)| (y, f64::from(c)))
                            .collect(),
                    })
                    .collect();
                (rows, years.clone())
            })
        })
    }

    proptest! {
        #[test]
        fn prop_column_sums_are_preserved((rows, years) in table()) {
            let series = normalize(&rows, &years).unwrap();
            for (i, &year) in years.iter().enumerate() {
                let sum: f64 = series.iter().map(|s| s.points[i].count).sum();
                for s in &series {
                    prop_assert_eq!(s.points[i].year, year);
                    prop_assert_eq!(s.points[i].total, sum);
                }
            }
        }

        #[test]
        fn prop_percentage_is_count_over_total((rows, years) in table()) {
            let series = normalize(&rows, &years).unwrap();
            for s in &series {
                for p in &s.points {
                    prop_assert!(approx(p.percentage, p.count / p.total));
                    prop_assert!((0.0..=1.0).contains(&p.percentage));
                }
            }
        }
    }
}
