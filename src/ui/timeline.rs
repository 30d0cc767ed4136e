//! Sentiment-over-time chart.
//!
//! Three stacked series against a time axis labelled in local time of day.
//! Each series is drawn at its cumulative height, so the band between two
//! lines is that class's share of the bucket. Bands are filled with vertical
//! bars sampled across the x range, tallest first, with the outlines on top.

use chrono::{DateTime, TimeZone, Utc};
use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::timestamp::format_time_of_day;
use crate::data::{SentimentLabel, TimeBucket};

/// Placeholder shown until the first time series arrives.
pub const LOADING_TEXT: &str = "Loading time-series data...";

/// Padding applied around a single-point x range, in seconds.
const SINGLE_POINT_PAD: f64 = 30.0;

/// Fill samples per terminal column (Braille has two dots per cell).
const FILL_SAMPLES_PER_COLUMN: usize = 2;

/// Stacked chart points, one series per label in legend order.
#[derive(Debug, Default, PartialEq)]
pub struct StackedSeries {
    pub series: [Vec<(f64, f64)>; 3],
    pub x_bounds: [f64; 2],
}

impl StackedSeries {
    /// Build chart points from buckets, skipping buckets without a time.
    ///
    /// Returns `None` when no bucket has a usable timestamp.
    pub fn from_buckets(buckets: &[TimeBucket]) -> Option<Self> {
        let mut stacked = StackedSeries::default();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for bucket in buckets {
            let Some(hour) = bucket.hour else {
                continue;
            };
            let x = hour.timestamp_millis() as f64 / 1000.0;
            min = min.min(x);
            max = max.max(x);
            for (series, y) in stacked.series.iter_mut().zip(bucket.stacked()) {
                series.push((x, y));
            }
        }

        if !min.is_finite() {
            return None;
        }
        if min == max {
            min -= SINGLE_POINT_PAD;
            max += SINGLE_POINT_PAD;
        }
        stacked.x_bounds = [min, max];
        Some(stacked)
    }

    /// Each series linearly interpolated at `samples` evenly spaced x values.
    ///
    /// Used to fill the bands: a bar at every sample, from zero up to the
    /// series value.
    pub fn fill_points(&self, samples: usize) -> [Vec<(f64, f64)>; 3] {
        let [min, max] = self.x_bounds;
        let step = if samples > 1 {
            (max - min) / (samples - 1) as f64
        } else {
            0.0
        };
        let xs: Vec<f64> = (0..samples).map(|i| min + step * i as f64).collect();

        self.series.clone().map(|mut points| {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            xs.iter().map(|&x| (x, interpolate(&points, x))).collect()
        })
    }

    /// Axis labels at the start, middle and end of the x range.
    pub fn x_labels(&self) -> Vec<String> {
        let [min, max] = self.x_bounds;
        [min, (min + max) / 2.0, max]
            .iter()
            .filter_map(|&secs| to_datetime(secs))
            .map(|dt| format_time_of_day(&dt))
            .collect()
    }
}

/// Value of a sorted polyline at `x`, flat beyond either end.
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x <= x1 {
            if x1 == x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    last.1
}

fn to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt((secs * 1000.0).round() as i64).single()
}

/// Render the time-series panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Sentiment Over Time ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(stacked) = StackedSeries::from_buckets(&app.dashboard.timeline) else {
        frame.render_widget(Paragraph::new(LOADING_TEXT).block(block), area);
        return;
    };

    let samples = (area.width as usize).max(1) * FILL_SAMPLES_PER_COLUMN;
    let fills = stacked.fill_points(samples);

    // Tallest band first so each shorter one paints over it.
    let mut datasets: Vec<Dataset> = SentimentLabel::ALL
        .iter()
        .zip(fills.iter())
        .rev()
        .map(|(label, points)| {
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(app.theme.sentiment_color(*label)))
                .data(points)
        })
        .collect();
    datasets.extend(SentimentLabel::ALL.iter().zip(stacked.series.iter()).map(
        |(label, points)| {
            Dataset::default()
                .name(label.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.sentiment_color(*label)))
                .data(points)
        },
    ));

    let muted = Style::default().fg(app.theme.muted);
    let x_axis = Axis::default()
        .style(muted)
        .bounds(stacked.x_bounds)
        .labels(stacked.x_labels().into_iter().map(Span::raw));
    let y_axis = Axis::default()
        .style(muted)
        .bounds([0.0, 100.0])
        .labels(["0%", "50%", "100%"].map(Span::raw));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(secs: i64, pos: f64, neg: f64, neu: f64) -> TimeBucket {
        TimeBucket {
            hour: Utc.timestamp_opt(secs, 0).single(),
            positive: pos,
            negative: neg,
            neutral: neu,
        }
    }

    #[test]
    fn test_stacked_series() {
        let buckets = vec![bucket(0, 50.0, 25.0, 25.0), bucket(3600, 10.0, 20.0, 70.0)];
        let stacked = StackedSeries::from_buckets(&buckets).unwrap();

        assert_eq!(stacked.series[0], vec![(0.0, 50.0), (3600.0, 10.0)]);
        assert_eq!(stacked.series[1], vec![(0.0, 75.0), (3600.0, 30.0)]);
        assert_eq!(stacked.series[2], vec![(0.0, 100.0), (3600.0, 100.0)]);
        assert_eq!(stacked.x_bounds, [0.0, 3600.0]);
    }

    #[test]
    fn test_skips_buckets_without_time() {
        let mut no_time = bucket(0, 1.0, 1.0, 1.0);
        no_time.hour = None;
        let stacked =
            StackedSeries::from_buckets(&[no_time.clone(), bucket(60, 100.0, 0.0, 0.0)]).unwrap();
        assert_eq!(stacked.series[0].len(), 1);

        assert!(StackedSeries::from_buckets(&[no_time]).is_none());
        assert!(StackedSeries::from_buckets(&[]).is_none());
    }

    #[test]
    fn test_fill_points_interpolate() {
        // Out-of-order buckets are sorted before interpolation.
        let buckets = vec![bucket(100, 80.0, 0.0, 20.0), bucket(0, 20.0, 0.0, 80.0)];
        let stacked = StackedSeries::from_buckets(&buckets).unwrap();
        let fills = stacked.fill_points(3);

        assert_eq!(fills[0], vec![(0.0, 20.0), (50.0, 50.0), (100.0, 80.0)]);
        assert_eq!(fills[2], vec![(0.0, 100.0), (50.0, 100.0), (100.0, 100.0)]);
    }

    #[test]
    fn test_fill_points_single_bucket_is_flat() {
        let stacked = StackedSeries::from_buckets(&[bucket(600, 25.0, 25.0, 50.0)]).unwrap();
        let fills = stacked.fill_points(4);

        assert_eq!(fills[1].len(), 4);
        assert!(fills[1].iter().all(|&(_, y)| y == 50.0));
        assert_eq!(fills[1][0].0, 570.0);
        assert_eq!(fills[1][3].0, 630.0);
    }

    #[test]
    fn test_single_point_is_padded() {
        let stacked = StackedSeries::from_buckets(&[bucket(600, 1.0, 1.0, 1.0)]).unwrap();
        assert_eq!(stacked.x_bounds, [570.0, 630.0]);
        assert_eq!(stacked.x_labels().len(), 3);
    }
}
