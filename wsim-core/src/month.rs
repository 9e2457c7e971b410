use crate::error::WsimError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, identified in parameter records by its three-letter code
/// (`jan`, `fev`, `mar`, `abr`, `mai`, `jun`, `jul`, `ago`, `set`, `out`, `nov`, `dez`).
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MonthCode {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthCode {
    pub const ALL: [MonthCode; 12] = [
        MonthCode::Jan,
        MonthCode::Feb,
        MonthCode::Mar,
        MonthCode::Apr,
        MonthCode::May,
        MonthCode::Jun,
        MonthCode::Jul,
        MonthCode::Aug,
        MonthCode::Sep,
        MonthCode::Oct,
        MonthCode::Nov,
        MonthCode::Dec,
    ];

    /// Month number, 1 through 12.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn of(date: &NaiveDate) -> MonthCode {
        MonthCode::ALL[date.month0() as usize]
    }

    pub fn code(self) -> &'static str {
        match self {
            MonthCode::Jan => "jan",
            MonthCode::Feb => "fev",
            MonthCode::Mar => "mar",
            MonthCode::Apr => "abr",
            MonthCode::May => "mai",
            MonthCode::Jun => "jun",
            MonthCode::Jul => "jul",
            MonthCode::Aug => "ago",
            MonthCode::Sep => "set",
            MonthCode::Oct => "out",
            MonthCode::Nov => "nov",
            MonthCode::Dec => "dez",
        }
    }
}

impl FromStr for MonthCode {
    type Err = WsimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // English abbreviations are accepted alongside the report codes
        let month = match s.trim().to_ascii_lowercase().as_str() {
            "jan" => MonthCode::Jan,
            "fev" | "feb" => MonthCode::Feb,
            "mar" => MonthCode::Mar,
            "abr" | "apr" => MonthCode::Apr,
            "mai" | "may" => MonthCode::May,
            "jun" => MonthCode::Jun,
            "jul" => MonthCode::Jul,
            "ago" | "aug" => MonthCode::Aug,
            "set" | "sep" => MonthCode::Sep,
            "out" | "oct" => MonthCode::Oct,
            "nov" => MonthCode::Nov,
            "dez" | "dec" => MonthCode::Dec,
            other => return Err(WsimError::InvalidMonthCode(other.to_string())),
        };
        Ok(month)
    }
}

impl TryFrom<String> for MonthCode {
    type Error = WsimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthCode> for String {
    fn from(value: MonthCode) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for MonthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A set of selected months, stored as a 12-bit mask.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<MonthCode>", into = "Vec<MonthCode>")]
pub struct MonthSet(u16);

impl MonthSet {
    pub fn empty() -> Self {
        MonthSet(0)
    }

    pub fn all() -> Self {
        MonthSet(0x0fff)
    }

    pub fn insert(&mut self, month: MonthCode) {
        self.0 |= 1 << (month.number() - 1);
    }

    pub fn contains(&self, month: MonthCode) -> bool {
        self.0 & (1 << (month.number() - 1)) != 0
    }

    pub fn contains_date(&self, date: &NaiveDate) -> bool {
        self.contains(MonthCode::of(date))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected months in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = MonthCode> + '_ {
        MonthCode::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    /// Parse a comma or whitespace separated list of month codes.
    pub fn parse_list(list: &str) -> Result<MonthSet, WsimError> {
        list.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|code| !code.is_empty())
            .map(MonthCode::from_str)
            .collect()
    }
}

impl Default for MonthSet {
    fn default() -> Self {
        MonthSet::all()
    }
}

impl FromIterator<MonthCode> for MonthSet {
    fn from_iter<T: IntoIterator<Item = MonthCode>>(iter: T) -> Self {
        let mut set = MonthSet::empty();
        for month in iter {
            set.insert(month);
        }
        set
    }
}

impl From<Vec<MonthCode>> for MonthSet {
    fn from(value: Vec<MonthCode>) -> Self {
        value.into_iter().collect()
    }
}

impl From<MonthSet> for Vec<MonthCode> {
    fn from(value: MonthSet) -> Self {
        value.iter().collect()
    }
}
