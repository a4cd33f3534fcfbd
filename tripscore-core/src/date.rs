//! Visit dates and seasonal buckets.
//!
//! Reviews only record the month of the visit (`"Jun 2023"`), so a
//! [`ReviewDate`] is a year plus a [`chrono::Month`].

use std::fmt;
use std::str::FromStr;

use chrono::Month;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Month and year a review refers to.
///
/// # Examples
/// ```
/// use chrono::Month;
/// use tripscore_core::{ReviewDate, Season};
///
/// let date = ReviewDate::parse("Dec 2022").expect("valid").expect("present");
/// assert_eq!(date.year(), 2022);
/// assert_eq!(date.month(), Month::December);
/// assert_eq!(date.season(), Season::Winter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewDate {
    year: i32,
    month: Month,
}

impl ReviewDate {
    /// Build a date from its parts.
    #[must_use]
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Parse `"<month> <year>"`, where the month is an English name or
    /// three-letter abbreviation.
    ///
    /// Blank text yields `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`ReviewDateError::Malformed`] for any other text that does
    /// not match the format.
    pub fn parse(text: &str) -> Result<Option<Self>, ReviewDateError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let malformed = || ReviewDateError::Malformed {
            raw: text.to_owned(),
        };
        let mut parts = trimmed.split_whitespace();
        let (Some(month_text), Some(year_text), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let month = Month::from_str(month_text).map_err(|_| malformed())?;
        let year = year_text.parse::<i32>().map_err(|_| malformed())?;
        Ok(Some(Self { year, month }))
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month.
    #[must_use]
    pub const fn month(self) -> Month {
        self.month
    }

    /// Season the month falls in.
    #[must_use]
    pub const fn season(self) -> Season {
        Season::from_month(self.month)
    }
}

impl fmt::Display for ReviewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.month.name();
        let abbreviation = name.get(..3).unwrap_or(name);
        write!(f, "{abbreviation} {}", self.year)
    }
}

/// Errors raised while parsing a review date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDateError {
    /// The text is not `"<month> <year>"`.
    #[error("review date {raw:?} is not in the form \"Mon YYYY\"")]
    Malformed {
        /// The offending text.
        raw: String,
    },
}

/// Meteorological seasons of the northern hemisphere.
///
/// December belongs to the Winter of its own calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// March to May.
    Spring,
    /// June to August.
    Summer,
    /// September to November.
    Fall,
    /// December to February.
    Winter,
}

impl Season {
    /// All seasons in calendar order, starting with Spring.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// Bucket a month into its season.
    #[must_use]
    pub const fn from_month(month: Month) -> Self {
        match month {
            Month::March | Month::April | Month::May => Self::Spring,
            Month::June | Month::July | Month::August => Self::Summer,
            Month::September | Month::October | Month::November => Self::Fall,
            Month::December | Month::January | Month::February => Self::Winter,
        }
    }

    /// Return the season name as displayed in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Jun 2023", 2023, Month::June)]
    #[case("  jan 2019 ", 2019, Month::January)]
    #[case("September 2021", 2021, Month::September)]
    fn parses_month_and_year(#[case] text: &str, #[case] year: i32, #[case] month: Month) {
        let date = ReviewDate::parse(text)
            .expect("date should parse")
            .expect("date should be present");
        assert_eq!(date, ReviewDate::new(year, month));
    }

    #[rstest]
    #[case("2023")]
    #[case("Jun")]
    #[case("Juno 2023")]
    #[case("Jun 2023 extra")]
    #[case("Jun twenty")]
    fn rejects_malformed_dates(#[case] text: &str) {
        let err = ReviewDate::parse(text).expect_err("date should be rejected");
        assert_eq!(
            err,
            ReviewDateError::Malformed {
                raw: text.to_owned()
            }
        );
    }

    #[rstest]
    #[case(Month::March, Season::Spring)]
    #[case(Month::May, Season::Spring)]
    #[case(Month::July, Season::Summer)]
    #[case(Month::November, Season::Fall)]
    #[case(Month::December, Season::Winter)]
    #[case(Month::February, Season::Winter)]
    fn buckets_months_into_seasons(#[case] month: Month, #[case] season: Season) {
        assert_eq!(Season::from_month(month), season);
    }

    #[rstest]
    fn displays_abbreviated_month() {
        assert_eq!(ReviewDate::new(2020, Month::August).to_string(), "Aug 2020");
    }
}
