//! Scales that map data values onto plot coordinates.

use crate::chart::scene::Tick;
use crate::model::si;
use chrono::{Datelike, NaiveDate};

/// Maps a continuous numeric domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A scale from zero to `max`. When there is no positive maximum the domain falls back to
    /// `[0, 1]` so that an empty chart still gets a usable axis.
    pub fn zero_to(max: Option<f64>, range: (f64, f64)) -> Self {
        match Self::usable_max(max) {
            Some(m) => Self::new((0.0, m), range),
            None => Self::new((0.0, 1.0), range),
        }
    }

    /// `max` if it is positive and finite. Charts without one draw their axes but no marks.
    pub fn usable_max(max: Option<f64>) -> Option<f64> {
        max.filter(|m| *m > 0.0 && m.is_finite())
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values covering the domain, approximately `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if start == stop || count == 0 {
            return vec![start];
        }
        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }
        let step = (stop - start) / count as f64;
        let power = step.log10().floor() as i32;
        let error = step / 10f64.powi(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        let mut ticks = Vec::new();
        if power < 0 {
            // Work in inverted increments to keep small steps exact.
            let inc = 10f64.powi(-power) / factor;
            let mut i1 = (start * inc).round();
            let mut i2 = (stop * inc).round();
            if i1 / inc < start {
                i1 += 1.0;
            }
            if i2 / inc > stop {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                ticks.push(i / inc);
                i += 1.0;
            }
        } else {
            let inc = 10f64.powi(power) * factor;
            let mut i1 = (start / inc).round();
            let mut i2 = (stop / inc).round();
            if i1 * inc < start {
                i1 += 1.0;
            }
            if i2 * inc > stop {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                ticks.push(i * inc);
                i += 1.0;
            }
        }
        if reverse {
            ticks.reverse();
        }
        ticks
    }

    /// Axis ticks labelled in compact SI form.
    pub fn si_ticks(&self, count: usize) -> Vec<Tick> {
        self.ticks(count)
            .into_iter()
            .map(|v| Tick::new(self.apply(v), si(v)))
            .collect()
    }
}

/// Divides a pixel range into evenly spaced bands, one per domain entry.
///
/// Entries are addressed by position, so repeated labels still get their own band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Uses `padding` for both the inner and the outer padding, with the bands centered in the
    /// range.
    pub fn new(labels: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = labels.len() as f64;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) / 2.0;
        Self {
            labels,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The leading edge of the band at `index`.
    pub fn at(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// One tick per band, at the band's center.
    pub fn ticks(&self) -> Vec<Tick> {
        self.labels
            .iter()
            .enumerate()
            .map(|(ix, label)| Tick::new(self.at(ix) + self.bandwidth / 2.0, label.clone()))
            .collect()
    }
}

/// Maps calendar dates linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    range: (f64, f64),
}

/// Month steps the time axis may use, smallest first.
const MONTH_STEPS: [u32; 5] = [1, 2, 3, 6, 12];

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A scale over the earliest and latest of `dates`, or `None` when there are no dates.
    pub fn extent(dates: impl IntoIterator<Item = NaiveDate>, range: (f64, f64)) -> Option<Self> {
        let mut iter = dates.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self::new((min, max), range))
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn apply(&self, date: NaiveDate) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = (d1 - d0).num_days();
        if span == 0 {
            return (r0 + r1) / 2.0;
        }
        let offset = (date - d0).num_days() as f64;
        r0 + offset / span as f64 * (r1 - r0)
    }

    /// First-of-month dates inside the domain, spaced by the smallest month step that yields no
    /// more than `count` ticks. Steps are aligned to the calendar, e.g. a 3-month step ticks in
    /// January, April, July and October.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (d0, d1) = self.domain;
        let first = month_index(d0) + i64::from(d0.day() != 1);
        let last = month_index(d1);
        if last < first {
            return Vec::new();
        }

        let mut chosen = Vec::new();
        for step in MONTH_STEPS {
            let step = i64::from(step);
            let aligned = first + (step - first.rem_euclid(step)) % step;
            chosen = (aligned..=last)
                .step_by(step as usize)
                .filter_map(from_month_index)
                .collect::<Vec<_>>();
            if chosen.len() <= count.max(1) {
                break;
            }
        }
        chosen
    }

    /// Axis ticks labelled `%Y-%m`.
    pub fn month_ticks(&self, count: usize) -> Vec<Tick> {
        self.ticks(count)
            .into_iter()
            .map(|d| Tick::new(self.apply(d), d.format("%Y-%m").to_string()))
            .collect()
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn from_month_index(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_linear_apply() {
        let scale = LinearScale::new((0.0, 100.0), (280.0, 0.0));
        assert_eq!(280.0, scale.apply(0.0));
        assert_eq!(140.0, scale.apply(50.0));
        assert_eq!(0.0, scale.apply(100.0));
    }

    #[test]
    fn test_linear_zero_to_fallback() {
        assert_eq!((0.0, 1.0), LinearScale::zero_to(None, (0.0, 1.0)).domain());
        assert_eq!((0.0, 1.0), LinearScale::zero_to(Some(0.0), (0.0, 1.0)).domain());
        assert_eq!((0.0, 1.0), LinearScale::zero_to(Some(-5.0), (0.0, 1.0)).domain());
        assert_eq!((0.0, 7.0), LinearScale::zero_to(Some(7.0), (0.0, 1.0)).domain());
    }

    #[test]
    fn test_linear_ticks() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert_eq!(11, ticks.len());
        assert_eq!(0.0, ticks[0]);
        assert_eq!(100.0, ticks[10]);

        let scale = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert_eq!(11, ticks.len());
        assert!((ticks[3] - 0.3).abs() < 1e-12);

        let scale = LinearScale::new((0.0, 1_730_000.0), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert_eq!(200_000.0, ticks[1]);
        assert_eq!(1_600_000.0, *ticks.last().unwrap());
    }

    #[test]
    fn test_band_scale() {
        let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let scale = BandScale::new(labels, (0.0, 680.0), 0.2);
        // step = 680 / (3 - 0.2 + 0.4) = 212.5
        assert!((scale.bandwidth() - 170.0).abs() < 1e-9);
        assert!((scale.at(0) - 42.5).abs() < 1e-9);
        assert!((scale.at(2) - 467.5).abs() < 1e-9);
        let ticks = scale.ticks();
        assert_eq!(3, ticks.len());
        assert!((ticks[1].position - 340.0).abs() < 1e-9);
        assert_eq!("B", ticks[1].label);
    }

    #[test]
    fn test_band_scale_empty() {
        let scale = BandScale::new(Vec::new(), (0.0, 680.0), 0.2);
        assert!(scale.is_empty());
        assert!(scale.ticks().is_empty());
    }

    #[test]
    fn test_time_scale() {
        let scale = TimeScale::extent(vec![date(2020, 3), date(2020, 1)], (0.0, 100.0)).unwrap();
        assert_eq!((date(2020, 1), date(2020, 3)), scale.domain());
        assert_eq!(0.0, scale.apply(date(2020, 1)));
        assert_eq!(100.0, scale.apply(date(2020, 3)));
        assert!(TimeScale::extent(Vec::new(), (0.0, 1.0)).is_none());
    }

    #[test]
    fn test_time_scale_single_date() {
        let scale = TimeScale::extent(vec![date(2020, 5)], (0.0, 100.0)).unwrap();
        assert_eq!(50.0, scale.apply(date(2020, 5)));
        assert_eq!(vec![date(2020, 5)], scale.ticks(10));
    }

    #[test]
    fn test_time_ticks_step() {
        let scale = TimeScale::new((date(2017, 6), date(2020, 9)), (0.0, 680.0));
        let ticks = scale.ticks(10);
        assert!(ticks.len() <= 10);
        // 40 months fit in 10 ticks with a 6-month step aligned to January and July.
        assert_eq!(date(2017, 7), ticks[0]);
        assert_eq!(date(2018, 1), ticks[1]);
        let labels = scale.month_ticks(10);
        assert_eq!("2017-07", labels[0].label);
    }
}
