//! Game clock — the (year, quarter) position and how it moves forward.

use crate::types::{Quarter, Year, QUARTERS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year:    Year,
    pub quarter: Quarter,
}

impl Period {
    pub const START: Period = Period { year: 1, quarter: 1 };

    pub fn new(year: Year, quarter: Quarter) -> Self {
        Self { year, quarter }
    }

    /// True when resolving this period closes the year.
    pub fn closes_year(&self) -> bool {
        self.quarter >= QUARTERS_PER_YEAR
    }

    /// The period after this one, and whether stepping into it closed a year.
    pub fn next(self) -> (Period, bool) {
        if self.closes_year() {
            (Period { year: self.year + 1, quarter: 1 }, true)
        } else {
            (Period { year: self.year, quarter: self.quarter + 1 }, false)
        }
    }

    /// 1-based position in the whole game: Q1-Y1 is 1, Q4-Y5 is 20.
    pub fn ordinal(&self) -> u32 {
        self.year.saturating_sub(1) * QUARTERS_PER_YEAR + self.quarter
    }

    /// Stable label, e.g. "Q3-Y2".
    pub fn label(&self) -> String {
        format!("Q{}-Y{}", self.quarter, self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
