//! The scripted market timeline.
//!
//! RULE: The timeline is content, never state. It is built once,
//! validated once, and only read afterwards. Lookups are exact-match
//! on (year, quarter): no interpolation, no wraparound.
//!
//! Contract checked on every construction path:
//!   - years are contiguous, starting at 1
//!   - each year holds exactly 4 events, quarters 1..=4 in order
//!   - each event's year equals its owning year
//!   - returns are finite and >= -100% (balances cannot go negative)
//!   - inflation is finite and at most 400% (quarterly decay stays >= 0)

use crate::{
    clock::Period,
    error::{GameError, GameResult},
    portfolio::Instrument,
    types::{Quarter, Rate, Year, QUARTERS_PER_YEAR},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Per-instrument return for one quarter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Returns {
    pub volatile:  Rate,
    pub long_term: Rate,
}

impl Returns {
    pub fn get(&self, instrument: Instrument) -> Rate {
        match instrument {
            Instrument::Volatile => self.volatile,
            Instrument::LongTerm => self.long_term,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketEvent {
    pub year:      Year,
    pub quarter:   Quarter,
    /// Short tag, e.g. "Bull Market Begins".
    pub condition: String,
    pub returns:   Returns,
    pub insight:   String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misleading_insight: Option<String>,
}

impl MarketEvent {
    pub fn period(&self) -> Period {
        Period::new(self.year, self.quarter)
    }
}

/// Four quarters sharing one annual inflation rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomicYear {
    pub year:      Year,
    pub inflation: Rate,
    pub events:    Vec<MarketEvent>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Timeline {
    years: Vec<EconomicYear>,
}

#[derive(Debug, Clone, Deserialize)]
struct TimelineFile {
    years: Vec<EconomicYear>,
}

impl Timeline {
    /// Build a timeline, rejecting content that breaks the contract.
    pub fn new(years: Vec<EconomicYear>) -> GameResult<Self> {
        validate(&years)?;
        Ok(Self { years })
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let file: TimelineFile = serde_json::from_str(json)?;
        Self::new(file.years)
    }

    /// Load a timeline file of the form `{ "years": [ ... ] }`.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let timeline = Self::from_json(&content)?;
        log::info!(
            "Loaded timeline from {} ({} years)",
            path.as_ref().display(),
            timeline.years.len()
        );
        Ok(timeline)
    }

    /// The built-in five-year script, shared process-wide.
    pub fn standard() -> &'static Timeline {
        static STANDARD: OnceLock<Timeline> = OnceLock::new();
        STANDARD.get_or_init(|| Timeline { years: standard_script() })
    }

    pub fn event_for(&self, year: Year, quarter: Quarter) -> GameResult<&MarketEvent> {
        self.year(year)
            .and_then(|y| y.events.iter().find(|e| e.quarter == quarter))
            .ok_or(GameError::EventNotFound { year, quarter })
    }

    pub fn inflation_for(&self, year: Year) -> GameResult<Rate> {
        self.year(year)
            .map(|y| y.inflation)
            .ok_or(GameError::YearNotFound { year })
    }

    pub fn year(&self, year: Year) -> Option<&EconomicYear> {
        self.years.iter().find(|y| y.year == year)
    }

    pub fn years(&self) -> &[EconomicYear] {
        &self.years
    }

    pub fn last_year(&self) -> Year {
        self.years.last().map(|y| y.year).unwrap_or(0)
    }

    pub fn quarter_count(&self) -> usize {
        self.years.iter().map(|y| y.events.len()).sum()
    }

    /// All events in play order.
    pub fn events(&self) -> impl Iterator<Item = &MarketEvent> {
        self.years.iter().flat_map(|y| y.events.iter())
    }
}

fn validate(years: &[EconomicYear]) -> GameResult<()> {
    let invalid = |reason: String| -> GameResult<()> { Err(GameError::InvalidTimeline { reason }) };

    if years.is_empty() {
        return invalid("timeline has no years".into());
    }

    for (index, year) in years.iter().enumerate() {
        let expected_year = index as Year + 1;
        if year.year != expected_year {
            return invalid(format!(
                "years must be contiguous from 1: expected year {expected_year}, found {}",
                year.year
            ));
        }
        if !year.inflation.is_finite() || year.inflation > QUARTERS_PER_YEAR as Rate {
            return invalid(format!(
                "year {} has unusable inflation {}",
                year.year, year.inflation
            ));
        }
        if year.events.len() != QUARTERS_PER_YEAR as usize {
            return invalid(format!(
                "year {} has {} events, expected {QUARTERS_PER_YEAR}",
                year.year,
                year.events.len()
            ));
        }
        for (q_index, event) in year.events.iter().enumerate() {
            let expected_quarter = q_index as Quarter + 1;
            if event.year != year.year || event.quarter != expected_quarter {
                return invalid(format!(
                    "event {} sits in slot Q{expected_quarter}-Y{}",
                    event.period(),
                    year.year
                ));
            }
            for instrument in Instrument::ALL {
                let r = event.returns.get(instrument);
                if !r.is_finite() || r < -1.0 {
                    return invalid(format!(
                        "event {} has unusable {} return {r}",
                        event.period(),
                        instrument.id()
                    ));
                }
            }
        }
    }
    Ok(())
}

fn event(
    year: Year,
    quarter: Quarter,
    condition: &str,
    volatile: Rate,
    long_term: Rate,
    insight: &str,
) -> MarketEvent {
    MarketEvent {
        year,
        quarter,
        condition: condition.to_string(),
        returns: Returns { volatile, long_term },
        insight: insight.to_string(),
        misleading_insight: None,
    }
}

/// Good-but-bumpy start, an inflationary recession, recovery, a quiet
/// year, then one last boom.
fn standard_script() -> Vec<EconomicYear> {
    vec![
        EconomicYear {
            year: 1,
            inflation: 0.03,
            events: vec![
                event(1, 1, "Strong Growth", 0.12, 0.05,
                    "The market is starting the year with strong momentum."),
                event(1, 2, "Tech Correction", -0.08, -0.01,
                    "Some high-flying sectors seem a bit overheated."),
                event(1, 3, "Steady Gains", 0.07, 0.04,
                    "Economic fundamentals appear solid and stable."),
                event(1, 4, "Holiday Rally", 0.10, 0.06,
                    "Consumer spending is high, which could boost the market."),
            ],
        },
        EconomicYear {
            year: 2,
            inflation: 0.06,
            events: vec![
                event(2, 1, "Inflation Fears", -0.05, -0.02,
                    "Concerns about rising prices are making investors nervous."),
                event(2, 2, "Stagnation", 0.01, 0.005,
                    "The market seems to be treading water, unsure of its direction."),
                event(2, 3, "Bear Market Rally", 0.08, 0.03,
                    "We might be seeing a short-term bounce in a longer downturn."),
                event(2, 4, "Recession Confirmed", -0.15, -0.05,
                    "Economic data has turned negative, brace for impact."),
            ],
        },
        EconomicYear {
            year: 3,
            inflation: 0.04,
            events: vec![
                event(3, 1, "Finding the Bottom", -0.02, 0.01,
                    "Volatility is high, but the worst might be over."),
                event(3, 2, "Early Recovery", 0.15, 0.07,
                    "Optimism is returning as leading indicators turn positive."),
                event(3, 3, "Bull Market Begins", 0.12, 0.06,
                    "This looks like the start of a new upward trend."),
                event(3, 4, "Strong Finish", 0.11, 0.05,
                    "The year is ending on a very positive note for investors."),
            ],
        },
        EconomicYear {
            year: 4,
            inflation: 0.02,
            events: vec![
                event(4, 1, "Slow and Steady", 0.04, 0.02,
                    "The market is taking a breather after last year's recovery."),
                event(4, 2, "Global Growth", 0.06, 0.03,
                    "International markets are performing well, lifting all boats."),
                event(4, 3, "Summer Lull", 0.02, 0.01,
                    "Trading volume is low and the market is quiet."),
                event(4, 4, "Modest Gains", 0.05, 0.03,
                    "A calm and positive end to a calm and positive year."),
            ],
        },
        EconomicYear {
            year: 5,
            inflation: 0.025,
            events: vec![
                event(5, 1, "New Tech Boom", 0.18, 0.07,
                    "A new technology is capturing the market's imagination."),
                event(5, 2, "All-Time Highs", 0.15, 0.06,
                    "Investor sentiment is extremely bullish right now."),
                event(5, 3, "Frothy Market", -0.05, 0.01,
                    "The market seems a bit expensive; a small pullback is healthy."),
                event(5, 4, "Final Push", 0.10, 0.04,
                    "Can the market end the 5-year simulation on a high note?"),
            ],
        },
    ]
}
