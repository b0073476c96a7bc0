use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::CategoricalField;

const HOME_OWNERSHIP: &[(&str, u8)] = &[("Own", 2), ("Mortgage", 1), ("Rent", 0)];

const LOAN_INTENT: &[(&str, u8)] = &[
    ("education", 0),
    ("home_improvement", 1),
    ("medical", 2),
    ("personal", 3),
    ("venture", 4),
];

const PRIOR_DEFAULT: &[(&str, u8)] = &[("Yes", 1), ("No", 0)];

/// Label-to-code lookups matching the vocabulary the classifier was trained on.
#[derive(Debug)]
pub struct CategoryTables {
    home_ownership: BTreeMap<&'static str, u8>,
    loan_intent: BTreeMap<&'static str, u8>,
    prior_default: BTreeMap<&'static str, u8>,
}

impl CategoryTables {
    /// Process-wide tables, built on first use and never mutated afterwards.
    pub fn shared() -> &'static CategoryTables {
        static TABLES: OnceLock<CategoryTables> = OnceLock::new();
        TABLES.get_or_init(|| CategoryTables {
            home_ownership: HOME_OWNERSHIP.iter().copied().collect(),
            loan_intent: LOAN_INTENT.iter().copied().collect(),
            prior_default: PRIOR_DEFAULT.iter().copied().collect(),
        })
    }

    pub fn code(&self, field: CategoricalField, label: &str) -> Option<u8> {
        self.table(field).get(label).copied()
    }

    /// Accepted labels for a field, in declaration order.
    pub fn labels(field: CategoricalField) -> impl Iterator<Item = &'static str> {
        source(field).iter().map(|(label, _)| *label)
    }

    fn table(&self, field: CategoricalField) -> &BTreeMap<&'static str, u8> {
        match field {
            CategoricalField::HomeOwnership => &self.home_ownership,
            CategoricalField::LoanIntent => &self.loan_intent,
            CategoricalField::PriorDefault => &self.prior_default,
        }
    }
}

fn source(field: CategoricalField) -> &'static [(&'static str, u8)] {
    match field {
        CategoricalField::HomeOwnership => HOME_OWNERSHIP,
        CategoricalField::LoanIntent => LOAN_INTENT,
        CategoricalField::PriorDefault => PRIOR_DEFAULT,
    }
}
