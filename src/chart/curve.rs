//! Monotone cubic interpolation along x for line charts.
//!
//! The curve passes through every point and never overshoots between two neighbors, so a
//! monthly series does not invent peaks or dips that are not in the data.

use serde::Serialize;

/// One drawing instruction of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Segment {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Cubic {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
}

/// A sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathData {
    segments: Vec<Segment>,
}

/// Number of straight pieces used to approximate each cubic when measuring length.
const LENGTH_SAMPLES: usize = 24;

impl PathData {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The approximate drawn length.
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        let mut at = (0.0, 0.0);
        for segment in &self.segments {
            match *segment {
                Segment::Move { x, y } => at = (x, y),
                Segment::Line { x, y } => {
                    length += distance(at, (x, y));
                    at = (x, y);
                }
                Segment::Cubic {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let start = at;
                    let mut prev = start;
                    for i in 1..=LENGTH_SAMPLES {
                        let t = i as f64 / LENGTH_SAMPLES as f64;
                        let p = cubic_point(start, (x1, y1), (x2, y2), (x, y), t);
                        length += distance(prev, p);
                        prev = p;
                    }
                    at = (x, y);
                }
            }
        }
        length
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

fn cubic_point(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

/// Builds a monotone-in-x curve through `points`, which must be sorted by x.
///
/// A single point yields a lone move, two points a straight line. Consecutive duplicate points
/// are skipped.
pub fn monotone_x(points: &[(f64, f64)]) -> PathData {
    let mut curve = Monotone::default();
    for &(x, y) in points {
        curve.point(x, y);
    }
    curve.finish()
}

#[derive(Default)]
struct Monotone {
    segments: Vec<Segment>,
    count: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
}

impl Monotone {
    fn point(&mut self, x: f64, y: f64) {
        if self.count > 0 && x == self.x1 && y == self.y1 {
            return;
        }
        let mut t1 = f64::NAN;
        match self.count {
            0 => {
                self.count = 1;
                self.segments.push(Segment::Move { x, y });
            }
            1 => self.count = 2,
            2 => {
                self.count = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.curve_to(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.curve_to(self.t0, t1);
            }
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> PathData {
        match self.count {
            2 => self.segments.push(Segment::Line {
                x: self.x1,
                y: self.y1,
            }),
            3 => {
                let t1 = self.slope2(self.t0);
                self.curve_to(self.t0, t1);
            }
            _ => {}
        }
        PathData {
            segments: self.segments,
        }
    }

    /// Emits the cubic from (x0, y0) to (x1, y1) with the given end tangents.
    fn curve_to(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.segments.push(Segment::Cubic {
            x1: self.x0 + dx,
            y1: self.y0 + dx * t0,
            x2: self.x1 - dx,
            y2: self.y1 - dx * t1,
            x: self.x1,
            y: self.y1,
        });
    }

    /// The tangent at (x1, y1) given the next point (x2, y2).
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / nonzero_or_signed_zero(h0, h1);
        let s1 = (y2 - self.y1) / nonzero_or_signed_zero(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if t.is_nan() {
            0.0
        } else {
            t
        }
    }

    /// The tangent at an end point, from the one-sided slope and the neighbor's tangent.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h != 0.0 {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        } else {
            t
        }
    }
}

fn nonzero_or_signed_zero(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert!(monotone_x(&[]).is_empty());
        let single = monotone_x(&[(1.0, 2.0)]);
        assert_eq!(&[Segment::Move { x: 1.0, y: 2.0 }], single.segments());
        assert_eq!(0.0, single.length());
    }

    #[test]
    fn test_two_points_is_a_line() {
        let path = monotone_x(&[(0.0, 0.0), (3.0, 4.0)]);
        assert_eq!(
            &[
                Segment::Move { x: 0.0, y: 0.0 },
                Segment::Line { x: 3.0, y: 4.0 }
            ],
            path.segments()
        );
        assert_eq!(5.0, path.length());
    }

    #[test]
    fn test_passes_through_points() {
        let points = [(0.0, 10.0), (10.0, 20.0), (20.0, 5.0), (30.0, 5.0)];
        let path = monotone_x(&points);
        let segments = path.segments();
        assert_eq!(4, segments.len());
        let ends = segments
            .iter()
            .map(|s| match *s {
                Segment::Move { x, y } | Segment::Line { x, y } => (x, y),
                Segment::Cubic { x, y, .. } => (x, y),
            })
            .collect::<Vec<_>>();
        assert_eq!(points.to_vec(), ends);
    }

    #[test]
    fn test_local_extremum_is_flat() {
        // The middle point is a peak, so the tangent there must be horizontal.
        let path = monotone_x(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
        match path.segments()[1] {
            Segment::Cubic { y2, y, .. } => assert_eq!(y, y2),
            other => panic!("expected a cubic, got {other:?}"),
        }
    }

    #[test]
    fn test_straight_series_length() {
        let path = monotone_x(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        assert!((path.length() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_points_skipped() {
        let path = monotone_x(&[(0.0, 0.0), (0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(2, path.segments().len());
    }
}
