use super::filter::FilteredView;
use super::model::{NumericColumn, PatientDataset};
use super::normalize::ColumnRange;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins over [min, max]. The maximum lands in the last bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let Some(range) = ColumnRange::of(values) else {
        return Vec::new();
    };
    let ColumnRange { min, max } = range;

    if range.is_flat() {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Sample Pearson correlation. `None` with fewer than two pairs or a constant series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    // zero spread, even where the inexact mean leaves a tiny variance
    if [xs, ys].iter().any(|s| ColumnRange::of(s).is_some_and(|r| r.is_flat())) {
        return None;
    }
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Symmetric matrix of pairwise correlations between numeric columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let n = self.columns.len();
        if row >= n || col >= n {
            return None;
        }
        self.values[row * n + col]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Correlate `columns` over the rows of `view`.
pub fn correlation_matrix(
    dataset: &PatientDataset,
    view: &FilteredView,
    columns: &[NumericColumn],
) -> CorrelationMatrix {
    let n = columns.len();
    let series: Vec<Vec<f64>> = columns.iter().map(|&c| view.column(dataset, c)).collect();
    let mut values = vec![None; n * n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            // exact unit diagonal whenever the column varies
            let r = if i == j { r.map(|_| 1.0) } else { r };
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}
