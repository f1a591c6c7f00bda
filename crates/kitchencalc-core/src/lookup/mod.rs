//! Static reference tables and the machinery shared by all of them: keyed
//! tables with uniqueness checks, half-open numeric brackets, per-pound
//! interpolation and nearest-key hints for misses.

pub mod air_fryer;
pub mod cake_pan;
pub mod doneness;
pub mod meat;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CalcError, Result};
use crate::quantity::TimeRange;

const MAX_SUGGESTIONS: usize = 5;

/// The reference tables published as a whole (HTTP `/tables/{name}`, CLI `tables`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableName {
    Meat,
    Doneness,
    AirFryer,
    CakePans,
}

impl TableName {
    pub const ALL: [TableName; 4] = [
        TableName::Meat,
        TableName::Doneness,
        TableName::AirFryer,
        TableName::CakePans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Meat => "meat",
            TableName::Doneness => "doneness",
            TableName::AirFryer => "air-fryer",
            TableName::CakePans => "cake-pans",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        TableName::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| {
                CalcError::not_found(
                    "tables",
                    wanted.clone(),
                    suggest(&wanted, TableName::ALL.iter().map(|t| t.to_string())),
                )
            })
    }
}

/// Half-open interval `[lower, upper)`; `upper == None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bracket {
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Bracket {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper: Some(upper),
        }
    }

    pub const fn open(lower: f64) -> Self {
        Self { lower, upper: None }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value < upper)
    }

    /// Interpolation anchor: the midpoint, or the lower edge for the open top bracket.
    pub fn anchor(&self) -> f64 {
        match self.upper {
            Some(upper) => (self.lower + upper) / 2.0,
            None => self.lower,
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {})", self.lower, upper),
            None => write!(f, "[{}, ∞)", self.lower),
        }
    }
}

/// Brackets must start at zero, tile the axis without gaps or overlaps and
/// end with a single open-ended bracket, so every non-negative value has
/// exactly one home.
pub fn validate_brackets(table: &str, brackets: &[Bracket]) -> Result<()> {
    let Some(first) = brackets.first() else {
        return Err(CalcError::Config(format!("{table}: no brackets")));
    };
    if first.lower != 0.0 {
        return Err(CalcError::Config(format!(
            "{table}: first bracket starts at {} instead of 0",
            first.lower
        )));
    }
    for pair in brackets.windows(2) {
        match pair[0].upper {
            Some(upper) if upper == pair[1].lower && upper > pair[0].lower => {}
            _ => {
                return Err(CalcError::Config(format!(
                    "{table}: brackets {} and {} are not contiguous",
                    pair[0], pair[1]
                )))
            }
        }
    }
    if brackets.last().and_then(|b| b.upper).is_some() {
        return Err(CalcError::Config(format!("{table}: top bracket must be open-ended")));
    }
    Ok(())
}

pub fn select_bracket(brackets: &[Bracket], value: f64) -> Option<usize> {
    brackets.iter().position(|bracket| bracket.contains(value))
}

/// Linear interpolation between the anchors of the two brackets around
/// `value`; values outside the outermost anchors take the nearest row.
pub fn interpolate(rows: &[(Bracket, TimeRange)], value: f64) -> Option<TimeRange> {
    let (first, last) = (rows.first()?, rows.last()?);
    if value <= first.0.anchor() {
        return Some(first.1);
    }
    if value >= last.0.anchor() {
        return Some(last.1);
    }
    rows.windows(2).find_map(|pair| {
        let (lo, hi) = (&pair[0], &pair[1]);
        let (a, b) = (lo.0.anchor(), hi.0.anchor());
        if value < a || value > b {
            return None;
        }
        let t = if b > a { (value - a) / (b - a) } else { 0.0 };
        Some(TimeRange {
            min: lo.1.min + (hi.1.min - lo.1.min) * t,
            max: lo.1.max + (hi.1.max - lo.1.max) * t,
        })
    })
}

/// One row of a reference table. Temperatures are stored in Fahrenheit and
/// times in minutes (per pound or total, as the owning table documents).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupEntry<K> {
    pub key: K,
    pub temperature_f: f64,
    pub time: TimeRange,
    pub target_internal_f: Option<f64>,
    pub notes: Option<&'static str>,
}

/// Immutable keyed table. Construction fails on duplicate keys.
#[derive(Debug, Clone)]
pub struct LookupTable<K, V> {
    name: &'static str,
    rows: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> LookupTable<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    pub fn new(name: &'static str, rows: Vec<V>, key_of: impl Fn(&V) -> K) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            let key = key_of(row);
            if index.insert(key.clone(), position).is_some() {
                return Err(CalcError::Config(format!("{name}: duplicate key '{key}'")));
            }
        }
        Ok(Self { name, rows, index })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        match self.index.get(key) {
            Some(&position) => Ok(&self.rows[position]),
            None => {
                let wanted = key.to_string();
                Err(CalcError::not_found(
                    self.name,
                    wanted.clone(),
                    suggest(&wanted, self.index.keys().map(|k| k.to_string())),
                ))
            }
        }
    }

    pub fn rows(&self) -> &[V] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Up to five candidates ordered by edit distance to `wanted`, ties by name.
pub fn suggest(wanted: &str, candidates: impl IntoIterator<Item = String>) -> Vec<String> {
    let wanted = wanted.to_ascii_lowercase();
    let mut scored: Vec<(usize, String)> = candidates
        .into_iter()
        .map(|candidate| (edit_distance(&wanted, &candidate.to_ascii_lowercase()), candidate))
        .collect();
    scored.sort();
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate)
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Lower-case, trimmed, with spaces and hyphens folded to underscores.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_edges_are_half_open() {
        let low = Bracket::new(2.0, 4.0);
        let high = Bracket::new(4.0, 6.0);
        assert!(low.contains(2.0));
        assert!(!low.contains(4.0));
        assert!(high.contains(4.0));
        assert!(!high.contains(6.0));
        assert!(Bracket::open(8.0).contains(1_000.0));
    }

    #[test]
    fn gaps_and_closed_tops_are_rejected() {
        let gap = [Bracket::new(0.0, 2.0), Bracket::new(3.0, 5.0), Bracket::open(5.0)];
        assert!(validate_brackets("gap", &gap).is_err());

        let closed = [Bracket::new(0.0, 2.0), Bracket::new(2.0, 5.0)];
        assert!(validate_brackets("closed", &closed).is_err());

        let ok = [Bracket::new(0.0, 2.0), Bracket::open(2.0)];
        assert!(validate_brackets("ok", &ok).is_ok());
    }

    #[test]
    fn interpolation_is_linear_between_anchors() {
        let rows = [
            (Bracket::new(0.0, 4.0), TimeRange::fixed(26.0, 28.0)),
            (Bracket::new(4.0, 6.0), TimeRange::fixed(23.0, 25.0)),
            (Bracket::open(6.0), TimeRange::fixed(19.0, 21.0)),
        ];
        // anchors: 2, 5, 6
        let mid = interpolate(&rows, 3.5).unwrap();
        assert!((mid.min - 24.5).abs() < 1e-9);
        assert!((mid.max - 26.5).abs() < 1e-9);
        assert_eq!(interpolate(&rows, 1.0).unwrap(), rows[0].1);
        assert_eq!(interpolate(&rows, 12.0).unwrap(), rows[2].1);
    }

    #[test]
    fn suggestions_rank_by_distance() {
        let names = ["rib_roast", "tenderloin", "brisket", "loin_roast"].map(String::from);
        let hints = suggest("rib_rost", names);
        assert_eq!(hints.first().map(String::as_str), Some("rib_roast"));
        assert_eq!(hints.len(), 4);
    }

    #[test]
    fn duplicate_keys_fail_table_construction() {
        let rows = vec![("chicken", 1), ("beef", 2), ("chicken", 3)];
        let err = LookupTable::new("proteins", rows, |row| row.0.to_string()).unwrap_err();
        assert!(matches!(err, CalcError::Config(ref message) if message.contains("chicken")));

        let unique = LookupTable::new("proteins", vec![("chicken", 1), ("beef", 2)], |row| {
            row.0.to_string()
        })
        .unwrap();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique.get(&"beef".to_string()).unwrap().1, 2);
    }

    #[test]
    fn edit_distance_counts_operations() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }
}
