use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Dimension – the four filterable attributes
// ---------------------------------------------------------------------------

/// A filterable categorical attribute of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl Dimension {
    /// All dimensions, in sidebar order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::ContractType,
        Dimension::CompanySize,
    ];

    /// Human readable label shown next to the selector.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::Seniority => "Seniority",
            Dimension::ContractType => "Contract Type",
            Dimension::CompanySize => "Company Size",
        }
    }

    /// Name of the CSV column backing this dimension.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Year => "ano",
            Dimension::Seniority => "senioridade",
            Dimension::ContractType => "contrato",
            Dimension::CompanySize => "tamanho_empresa",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DimensionValue – a single selectable value
// ---------------------------------------------------------------------------

/// A value of a [`Dimension`]. Years order numerically, labels lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionValue {
    Year(i32),
    Label(String),
}

impl DimensionValue {
    /// Compare against a record's value without allocating.
    fn matches(&self, value: DimensionRef<'_>) -> bool {
        match (self, value) {
            (DimensionValue::Year(a), DimensionRef::Year(b)) => *a == b,
            (DimensionValue::Label(a), DimensionRef::Label(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Year(y) => write!(f, "{y}"),
            DimensionValue::Label(s) => write!(f, "{s}"),
        }
    }
}

/// Borrowed view of a record's value for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionRef<'a> {
    Year(i32),
    Label(&'a str),
}

impl DimensionRef<'_> {
    pub fn to_value(self) -> DimensionValue {
        match self {
            DimensionRef::Year(y) => DimensionValue::Year(y),
            DimensionRef::Label(s) => DimensionValue::Label(s.to_string()),
        }
    }

    /// Whether this value is a member of `accepted`. Labels use a linear
    /// scan; accepted sets are small.
    pub fn is_in(self, accepted: &BTreeSet<DimensionValue>) -> bool {
        match self {
            DimensionRef::Year(y) => accepted.contains(&DimensionValue::Year(y)),
            DimensionRef::Label(_) => accepted.iter().any(|v| v.matches(self)),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source CSV
// ---------------------------------------------------------------------------

/// One employment-salary observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract_type: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    /// Annual salary normalised to USD.
    pub usd: f64,
    #[serde(rename = "remoto")]
    pub remote: String,
    /// ISO3 country of residence; empty cells become `None`.
    #[serde(rename = "residencia_iso3", default)]
    pub country: Option<String>,
}

impl Record {
    /// The record's value for a filterable dimension.
    pub fn dimension(&self, dim: Dimension) -> DimensionRef<'_> {
        match dim {
            Dimension::Year => DimensionRef::Year(self.year),
            Dimension::Seniority => DimensionRef::Label(&self.seniority),
            Dimension::ContractType => DimensionRef::Label(&self.contract_type),
            Dimension::CompanySize => DimensionRef::Label(&self.company_size),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the distinct values of every dimension.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<Record>,
    /// For each dimension the sorted set of observed values.
    pub options: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl Dataset {
    /// Build the selector option lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut options: BTreeMap<Dimension, BTreeSet<DimensionValue>> = Dimension::ALL
            .iter()
            .map(|&dim| (dim, BTreeSet::new()))
            .collect();

        for rec in &records {
            for dim in Dimension::ALL {
                options
                    .entry(dim)
                    .or_default()
                    .insert(rec.dimension(dim).to_value());
            }
        }

        Dataset { records, options }
    }

    /// Distinct values observed for `dim`, sorted.
    pub fn options(&self, dim: Dimension) -> impl Iterator<Item = &DimensionValue> {
        self.options.get(&dim).into_iter().flatten()
    }

    /// Whether `value` was observed for `dim`.
    pub fn has_option(&self, dim: Dimension, value: &DimensionValue) -> bool {
        self.options
            .get(&dim)
            .is_some_and(|vals| vals.contains(value))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(year: i32, role: &str, usd: f64, country: Option<&str>) -> Record {
        Record {
            year,
            seniority: "senior".to_string(),
            contract_type: "integral".to_string(),
            company_size: "media".to_string(),
            role: role.to_string(),
            usd,
            remote: "remoto".to_string(),
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let ds = Dataset::from_records(vec![
            record(2024, "Analyst", 1.0, None),
            record(2022, "Analyst", 1.0, None),
            record(2024, "Analyst", 1.0, None),
        ]);
        let years: Vec<_> = ds.options(Dimension::Year).cloned().collect();
        assert_eq!(years, vec![DimensionValue::Year(2022), DimensionValue::Year(2024)]);
        assert_eq!(ds.options(Dimension::Seniority).count(), 1);
    }

    #[test]
    fn empty_dataset_has_empty_options() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for dim in Dimension::ALL {
            assert_eq!(ds.options(dim).count(), 0);
        }
    }

    #[test]
    fn label_membership_does_not_match_years() {
        let accepted: BTreeSet<_> = [DimensionValue::Label("2023".to_string())].into();
        assert!(!DimensionRef::Year(2023).is_in(&accepted));
        assert!(DimensionRef::Label("2023").is_in(&accepted));
    }
}
