//! Inclusive windows of calendar years.
#![forbid(unsafe_code)]

use std::ops::RangeInclusive;

use crate::StatsError;

const DEFAULT_START_YEAR: i32 = 2010;
const DEFAULT_END_YEAR: i32 = 2023;

/// Widest window accepted by [`YearRange::new`], counted as `end - start`.
pub const MAX_YEAR_SPAN: u32 = 500;

/// An inclusive window of calendar years, `2010..=2023` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Build the window `start..=end`.
    ///
    /// # Errors
    /// Returns [`StatsError::EmptyRange`] when `end` precedes `start` and
    /// [`StatsError::RangeTooWide`] when the window spans more than
    /// [`MAX_YEAR_SPAN`] years.
    pub const fn new(start: i32, end: i32) -> Result<Self, StatsError> {
        if end < start {
            return Err(StatsError::EmptyRange { start, end });
        }
        if end.abs_diff(start) > MAX_YEAR_SPAN {
            return Err(StatsError::RangeTooWide {
                start,
                end,
                max: MAX_YEAR_SPAN,
            });
        }
        Ok(Self { start, end })
    }

    /// First year of the window.
    #[must_use]
    pub const fn start(self) -> i32 {
        self.start
    }

    /// Last year of the window.
    #[must_use]
    pub const fn end(self) -> i32 {
        self.end
    }

    /// Report whether `year` lies inside the window.
    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Iterate over every year of the window in order.
    #[must_use]
    pub const fn years(self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_window_spans_2010_to_2023() {
        let range = YearRange::default();
        assert_eq!(range.years().count(), 14);
        assert!(range.contains(2010));
        assert!(range.contains(2023));
        assert!(!range.contains(2024));
    }

    #[rstest]
    #[case(2020, 2020, true)]
    #[case(2020, 2019, false)]
    fn validates_order(#[case] start: i32, #[case] end: i32, #[case] valid: bool) {
        assert_eq!(YearRange::new(start, end).is_ok(), valid);
    }

    #[rstest]
    #[case(1500, 2000, true)]
    #[case(1499, 2000, false)]
    #[case(-2_000_000_000, 2023, false)]
    #[case(i32::MIN, i32::MAX, false)]
    fn caps_the_window_span(#[case] start: i32, #[case] end: i32, #[case] valid: bool) {
        match YearRange::new(start, end) {
            Ok(range) => assert!(valid, "accepted {range:?}"),
            Err(err) => {
                assert!(!valid, "rejected {start}..={end}");
                assert_eq!(
                    err,
                    StatsError::RangeTooWide {
                        start,
                        end,
                        max: MAX_YEAR_SPAN
                    }
                );
            }
        }
    }
}
