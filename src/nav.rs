//! Linear navigation over a fixed number of slides.

use serde::Serialize;

/// A cursor over slides `1..=total`. The cursor never leaves that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    current: u8,
    total: u8,
}

/// The change of active slide caused by a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// The slide that is hidden.
    pub from: u8,
    /// The slide that is shown.
    pub to: u8,
}

/// Enabled state of the two navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub previous: bool,
    pub next: bool,
}

impl Navigation {
    /// Starts on slide 1. A `total` of zero is treated as one slide.
    pub fn new(total: u8) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    /// Starts on `current`, or returns `None` when it is outside `1..=total`.
    pub fn at(current: u8, total: u8) -> Option<Self> {
        if (1..=total).contains(&current) {
            Some(Self { current, total })
        } else {
            None
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn can_retreat(&self) -> bool {
        self.current > 1
    }

    pub fn can_advance(&self) -> bool {
        self.current < self.total
    }

    /// Moves to the next slide. Does nothing on the last slide.
    pub fn advance(&mut self) -> Option<Transition> {
        if !self.can_advance() {
            return None;
        }
        let from = self.current;
        self.current += 1;
        Some(Transition {
            from,
            to: self.current,
        })
    }

    /// Moves to the previous slide. Does nothing on the first slide.
    pub fn retreat(&mut self) -> Option<Transition> {
        if !self.can_retreat() {
            return None;
        }
        let from = self.current;
        self.current -= 1;
        Some(Transition {
            from,
            to: self.current,
        })
    }

    pub fn controls(&self) -> Controls {
        Controls {
            previous: self.can_retreat(),
            next: self.can_advance(),
        }
    }

    /// The counter text, e.g. `2 of 4`.
    pub fn counter(&self) -> String {
        format!("{} of {}", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let nav = Navigation::new(4);
        assert_eq!(1, nav.current());
        assert_eq!(4, nav.total());
        assert_eq!(
            Controls {
                previous: false,
                next: true
            },
            nav.controls()
        );
        assert_eq!("1 of 4", nav.counter());
    }

    #[test]
    fn test_retreat_on_first_is_noop() {
        let mut nav = Navigation::new(4);
        assert_eq!(None, nav.retreat());
        assert_eq!(1, nav.current());
        assert!(!nav.controls().previous);
    }

    #[test]
    fn test_advance_on_last_is_noop() {
        let mut nav = Navigation::at(4, 4).unwrap();
        assert_eq!(None, nav.advance());
        assert_eq!(4, nav.current());
        assert!(!nav.controls().next);
        assert!(nav.controls().previous);
        assert_eq!("4 of 4", nav.counter());
    }

    #[test]
    fn test_transitions() {
        let mut nav = Navigation::new(4);
        assert_eq!(Some(Transition { from: 1, to: 2 }), nav.advance());
        assert_eq!(Some(Transition { from: 2, to: 3 }), nav.advance());
        assert_eq!(Some(Transition { from: 3, to: 2 }), nav.retreat());
        assert_eq!("2 of 4", nav.counter());
        assert_eq!(
            Controls {
                previous: true,
                next: true
            },
            nav.controls()
        );
    }

    #[test]
    fn test_stays_in_bounds() {
        let mut nav = Navigation::new(4);
        // A fixed zig-zag that pushes past both ends repeatedly.
        let steps = [true, true, true, true, true, false, false, false, false, false, true];
        for _ in 0..10 {
            for advance in steps {
                if advance {
                    nav.advance();
                } else {
                    nav.retreat();
                }
                assert!((1..=4).contains(&nav.current()));
            }
        }
    }

    #[test]
    fn test_at_rejects_out_of_range() {
        assert!(Navigation::at(0, 4).is_none());
        assert!(Navigation::at(5, 4).is_none());
        assert_eq!(3, Navigation::at(3, 4).unwrap().current());
    }

    #[test]
    fn test_zero_total() {
        let mut nav = Navigation::new(0);
        assert_eq!(1, nav.total());
        assert_eq!(None, nav.advance());
        assert_eq!(None, nav.retreat());
    }
}
