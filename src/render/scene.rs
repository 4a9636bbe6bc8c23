use crate::data::model::Series;
use crate::labeling::labels::LabelSet;

// ---------------------------------------------------------------------------
// Scene – what the plot should show, independent of the drawing toolkit
// ---------------------------------------------------------------------------

/// Shaded rectangle for one label interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub bottom: f64,
    pub top: f64,
    pub text: String,
    /// Position in the label set; drives colour and draw order.
    pub index: usize,
}

impl Region {
    /// Corners in drawing order, counter-clockwise from bottom-left.
    pub fn corners(&self) -> [[f64; 2]; 4] {
        [
            [self.start, self.bottom],
            [self.end, self.bottom],
            [self.end, self.top],
            [self.start, self.top],
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Finite series points in file order.
    pub line: Vec<[f64; 2]>,
    /// One region per label, in label-set order (later ones drawn on top).
    pub regions: Vec<Region>,
}

/// Build the drawable scene for a series and its labels.
pub fn build_scene(series: &Series, labels: &LabelSet) -> Scene {
    let line = series
        .samples
        .iter()
        .filter(|s| s.time.is_finite() && s.value.is_finite())
        .map(|s| [s.time, s.value])
        .collect();

    let (bottom, top) = series.value_range().unwrap_or((0.0, 0.0));

    let regions = labels
        .iter()
        .enumerate()
        .map(|(index, iv)| Region {
            start: iv.start(),
            end: iv.end(),
            bottom,
            top,
            text: iv.text().to_string(),
            index,
        })
        .collect();

    Scene { line, regions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_from_reader;
    use crate::labeling::labels::LabelInterval;

    #[test]
    fn regions_span_full_value_range_in_label_order() {
        let series =
            load_csv_from_reader("time,value\n0,5\n1,-2\n2,8\n".as_bytes()).unwrap();
        let mut labels = LabelSet::default();
        labels.push(LabelInterval::new(0.5, 1.5, "first").unwrap());
        labels.push(LabelInterval::new(0.0, 2.0, "second").unwrap());

        let scene = build_scene(&series, &labels);

        assert_eq!(scene.line, vec![[0.0, 5.0], [1.0, -2.0], [2.0, 8.0]]);
        assert_eq!(scene.regions.len(), 2);
        assert_eq!(scene.regions[0].text, "first");
        assert_eq!(scene.regions[1].index, 1);
        assert_eq!(
            scene.regions[1].corners(),
            [[0.0, -2.0], [2.0, -2.0], [2.0, 8.0], [0.0, 8.0]]
        );
    }

    #[test]
    fn rows_with_blank_cells_are_not_drawn() {
        let series =
            load_csv_from_reader("time,value\n0,1\n1,\n,3\n3,4\n".as_bytes()).unwrap();
        let mut labels = LabelSet::default();
        labels.push(LabelInterval::new(0.0, 3.0, "a").unwrap());

        let scene = build_scene(&series, &labels);
        assert_eq!(scene.line, vec![[0.0, 1.0], [3.0, 4.0]]);
        assert_eq!((scene.regions[0].bottom, scene.regions[0].top), (1.0, 4.0));
    }

    #[test]
    fn building_twice_gives_the_same_scene() {
        let series = load_csv_from_reader("time,value\n0,1\n1,2\n".as_bytes()).unwrap();
        let mut labels = LabelSet::default();
        labels.push(LabelInterval::new(0.0, 1.0, "a").unwrap());
        assert_eq!(build_scene(&series, &labels), build_scene(&series, &labels));
    }
}
