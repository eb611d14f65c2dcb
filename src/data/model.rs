use std::fmt;

use serde::Deserialize;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Result of a launch. Stored in the source data as `class` (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// The numeric class value used by the source data.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Label used on chart axes and legends.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    /// Interpret a raw `class` cell. Accepts `0`, `1`, `0.0` and `1.0`.
    pub fn from_class(value: f64) -> Result<Self, LoadError> {
        if value == 0.0 {
            Ok(Outcome::Failure)
        } else if value == 1.0 {
            Ok(Outcome::Success)
        } else {
            Err(LoadError::InvalidOutcome(value.to_string()))
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            booster_category: booster_category.into(),
            outcome,
        }
    }
}

/// Row shape shared by the CSV and JSON loaders. Columns not listed here are
/// ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
    pub class: f64,
}

impl TryFrom<RawLaunchRow> for LaunchRecord {
    type Error = LoadError;

    fn try_from(raw: RawLaunchRow) -> Result<Self, Self::Error> {
        Ok(LaunchRecord {
            site: raw.site,
            payload_mass_kg: raw.payload_mass_kg,
            booster_category: raw.booster_category,
            outcome: Outcome::from_class(raw.class)?,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full launch table with pre-computed indices. Read-only after
/// construction; shared between callbacks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchTable {
    /// Build the table and its indices from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchTable {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Smallest and largest payload mass, `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_class_accepts_binary_values() {
        assert_eq!(Outcome::from_class(0.0).unwrap(), Outcome::Failure);
        assert_eq!(Outcome::from_class(1.0).unwrap(), Outcome::Success);
        assert!(Outcome::from_class(2.0).is_err());
        assert!(Outcome::from_class(0.5).is_err());
    }

    #[test]
    fn indices_keep_first_appearance_order() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 2500.0, "FT", Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 500.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("KSC LC-39A", 9600.0, "B4", Outcome::Success),
        ]);

        assert_eq!(table.sites(), ["KSC LC-39A", "CCAFS LC-40"]);
        assert_eq!(table.booster_categories(), ["FT", "v1.0", "B4"]);
        assert_eq!(table.payload_bounds(), Some((500.0, 9600.0)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = LaunchTable::from_records(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.payload_bounds(), None);
        assert!(table.sites().is_empty());
    }
}
