use anyhow::{bail, Context};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> anyhow::Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {month}");
        }
        // Rejects years chrono cannot represent.
        NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("{year}-{month:02} is not a representable month"))?;
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in the constructors.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        match first.checked_add_months(Months::new(1)) {
            Some(next) => next.signed_duration_since(first).num_days() as u32,
            // December of chrono's maximum year.
            None => 31,
        }
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        first.iter_days().take(self.days_in_month() as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// A heading such as `January 2024`.
    pub fn long_name(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((year, month)) = s.split_once('-') else {
            bail!("Expected a month in the form YYYY-MM, got '{s}'");
        };
        if year.len() != 4 || month.len() != 2 {
            bail!("Expected a month in the form YYYY-MM, got '{s}'");
        }
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Parses `YYYY-MM-DD`, also accepting a trailing time component such as `T10:30` or
/// `T10:30:00.000Z`, which is how some older records were written.
pub(crate) fn parse_day(s: &str) -> anyhow::Result<NaiveDate> {
    let s = s.trim();
    let date_part = match s.split_once('T') {
        Some((date, _time)) => date,
        None => s,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .with_context(|| format!("Expected a date in the form YYYY-MM-DD, got '{s}'"))
}

/// Serde adapter for `NaiveDate` fields that tolerates a trailing time component on read.
pub(crate) mod lenient_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_day(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        YearMonth::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(ym("2024-01").to_string(), "2024-01");
        assert_eq!(ym("2024-12").month(), 12);
        assert!(YearMonth::from_str("2024-1").is_err());
        assert!(YearMonth::from_str("2024-13").is_err());
        assert!(YearMonth::from_str("2024-01-05").is_err());
        assert!(YearMonth::from_str("").is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(ym("2024-01").days_in_month(), 31);
        assert_eq!(ym("2024-02").days_in_month(), 29);
        assert_eq!(ym("2023-02").days_in_month(), 28);
        assert_eq!(ym("2024-04").days_in_month(), 30);
        assert_eq!(ym("2024-12").days_in_month(), 31);
    }

    #[test]
    fn test_days_iterates_whole_month() {
        let days: Vec<NaiveDate> = ym("2024-04").days().collect();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(days[29], NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_contains_and_long_name() {
        let jan = ym("2024-01");
        assert!(jan.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()));
        assert_eq!(jan.long_name(), "January 2024");
    }

    #[test]
    fn test_parse_day_tolerates_time() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 24).unwrap();
        assert_eq!(parse_day("2024-05-24").unwrap(), expected);
        assert_eq!(parse_day("2024-05-24T07:49").unwrap(), expected);
        assert_eq!(parse_day("2024-05-24T07:49:00.000Z").unwrap(), expected);
        assert!(parse_day("24/05/2024").is_err());
    }
}
