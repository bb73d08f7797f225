//! Bar charts of the monthly habit tally and the daily expenditure series.
//!
//! A chart goes through three steps:
//! - a `ChartSpec` (the entries and how to scale them) is built from a projection,
//! - `ChartLayout::compute` turns it into concrete geometry for a `ChartFrame`,
//! - `ChartLayout::draw` emits that geometry onto any `Surface`.
//!
//! The layout is a pure function of the `ChartSpec` and the frame, so drawing the same ledger state
//! twice always produces the same shapes. Pointer hover works on the layout alone (see `Hover`).

mod layout;
mod surface;
mod svg;

pub use layout::{Bar, ChartLayout, Hover, HoverEvent, Tick, Tooltip};
pub use surface::{Anchor, LineRole, Point, Shape, ShapeLog, Surface};
pub use svg::{render_svg, SvgSurface};

use crate::model::{Amount, YearMonth};
use crate::projection::{DailySpend, TallyEntry};
use serde::{Deserialize, Serialize};

pub const NO_HABIT_DATA: &str = "No habit data for this month.";
pub const NO_SPENDING_DATA: &str = "No spending data for this month.";

/// Spending charts never scale below this, so an empty month still has a sensible y axis.
pub const SPENDING_SCALE_FLOOR: f64 = 100.0;

/// The drawing area: the axes sit `margin` in from every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
            margin: 30.0,
        }
    }
}

impl ChartFrame {
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    /// The y coordinate of the x axis.
    pub fn baseline(&self) -> f64 {
        self.height - self.margin
    }
}

/// How the top of the y axis is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleMax {
    /// Always this value, whatever the entries are.
    Fixed(f64),
    /// The largest entry, but never less than the floor.
    AtLeast(f64),
}

impl ScaleMax {
    pub fn resolve(&self, entries: &[ChartEntry]) -> f64 {
        match *self {
            ScaleMax::Fixed(max) => max,
            ScaleMax::AtLeast(floor) => entries.iter().map(|e| e.value).fold(floor, f64::max),
        }
    }
}

/// One bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// Shown under the bar.
    pub label: String,
    pub value: f64,
    /// Shown above the bar.
    pub value_label: String,
    /// Shown while the pointer is over the bar.
    pub tooltip: String,
}

/// Whether vertical guide lines are drawn through the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guides {
    None,
    /// Through every third bar, starting with the first, and through the last.
    EveryThird,
}

/// Everything needed to lay out a chart, independent of its size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub entries: Vec<ChartEntry>,
    pub scale: ScaleMax,
    pub guides: Guides,
    /// Drawn alone, centered, when there are no entries.
    pub empty_message: String,
}

impl ChartSpec {
    /// One bar per tally entry. A habit completed every day of the month reaches the top.
    pub fn habits(tally: &[TallyEntry], month: YearMonth) -> Self {
        let entries = tally
            .iter()
            .map(|e| ChartEntry {
                label: e.name.clone(),
                value: f64::from(e.count),
                value_label: e.count.to_string(),
                tooltip: format!("{}: {} days", e.name, e.count),
            })
            .collect();
        Self {
            entries,
            scale: ScaleMax::Fixed(f64::from(month.days_in_month())),
            guides: Guides::None,
            empty_message: NO_HABIT_DATA.to_string(),
        }
    }

    /// One bar per day, labelled with the day of the month.
    pub fn spending(series: &[DailySpend], currency_symbol: &str) -> Self {
        let entries = series
            .iter()
            .map(|d| ChartEntry {
                label: d.date.format("%-d").to_string(),
                value: d.amount.to_f64(),
                value_label: whole(d.amount),
                tooltip: format!(
                    "{}: {}",
                    d.date.format("%b %-d"),
                    d.amount.with_symbol(currency_symbol)
                ),
            })
            .collect();
        Self {
            entries,
            scale: ScaleMax::AtLeast(SPENDING_SCALE_FLOOR),
            guides: Guides::EveryThird,
            empty_message: NO_SPENDING_DATA.to_string(),
        }
    }
}

/// An amount rounded to a whole number, without grouping, for the small value labels.
fn whole(amount: Amount) -> String {
    format!("{}", amount.to_f64().round() as i64)
}
