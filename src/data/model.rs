use csv::StringRecord;

// ---------------------------------------------------------------------------
// Sample – one (time, value) pair
// ---------------------------------------------------------------------------

/// A single point of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Series – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed time series together with the raw table it came from.
///
/// `samples[i]` was parsed from `records[i]`; the raw records are kept so
/// export can reproduce every input column untouched.
#[derive(Debug, Clone)]
pub struct Series {
    /// Header row as it appeared in the file.
    pub headers: StringRecord,
    /// Raw data rows, one per sample.
    pub records: Vec<StringRecord>,
    /// Parsed `time` / `value` pairs.
    pub samples: Vec<Sample>,
    /// Position of the `time` column in `headers`.
    pub time_index: usize,
    /// Position of the `value` column in `headers`.
    pub value_index: usize,
}

impl Series {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Smallest and largest finite `value`, or `None` if there is none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(self.samples.iter().map(|s| s.value))
    }

    /// Smallest and largest finite `time`, or `None` if there is none.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        min_max(self.samples.iter().map(|s| s.time))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> Series {
        Series {
            headers: StringRecord::from(vec!["time", "value"]),
            records: points
                .iter()
                .map(|(t, v)| StringRecord::from(vec![t.to_string(), v.to_string()]))
                .collect(),
            samples: points
                .iter()
                .map(|&(time, value)| Sample { time, value })
                .collect(),
            time_index: 0,
            value_index: 1,
        }
    }

    #[test]
    fn ranges_cover_all_samples() {
        let s = series(&[(2.0, 5.0), (0.0, -1.0), (1.0, 9.0)]);
        assert_eq!(s.time_range(), Some((0.0, 2.0)));
        assert_eq!(s.value_range(), Some((-1.0, 9.0)));
    }

    #[test]
    fn missing_values_are_left_out_of_ranges() {
        let s = series(&[(0.0, f64::NAN), (f64::NAN, 4.0), (2.0, 1.0)]);
        assert_eq!(s.time_range(), Some((0.0, 2.0)));
        assert_eq!(s.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn empty_series_has_no_range() {
        let s = series(&[]);
        assert!(s.is_empty());
        assert_eq!(s.value_range(), None);
    }
}
