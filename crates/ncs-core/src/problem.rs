//! Sorting problem description and raw alternatives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NcsError, Result};

/// Direction in which a criterion's values are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Preference {
    /// Higher values are at least as good.
    #[default]
    Increasing,

    /// Lower values are at least as good.
    Decreasing,

    /// An intermediate value is best; preference falls off on both sides.
    SinglePeaked,
}

/// A criterion on which alternatives are evaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Criterion {
    pub name: String,
    pub preference: Preference,
}

impl Criterion {
    pub fn new(name: impl Into<String>, preference: Preference) -> Self {
        Self {
            name: name.into(),
            preference,
        }
    }

    pub fn is_single_peaked(&self) -> bool {
        self.preference == Preference::SinglePeaked
    }
}

/// An ordered category; categories are listed from worst to best.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Criteria and ordered categories of a sorting problem.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Problem {
    pub criteria: Vec<Criterion>,
    pub categories: Vec<Category>,
}

impl Problem {
    /// Creates a problem.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::InvalidLearningSet`] if there are no categories.
    pub fn new(criteria: Vec<Criterion>, categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(NcsError::InvalidLearningSet(
                "a problem needs at least one category".to_string(),
            ));
        }
        Ok(Self {
            criteria,
            categories,
        })
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn categories_count(&self) -> usize {
        self.categories.len()
    }

    /// One boundary separates each pair of adjacent categories.
    pub fn boundaries_count(&self) -> usize {
        self.categories.len().saturating_sub(1)
    }
}

/// A raw alternative: one performance value per criterion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alternative {
    pub name: String,
    pub profile: Vec<f64>,
    /// Known category, when the alternative belongs to a learning set.
    pub category_index: Option<usize>,
}

impl Alternative {
    pub fn new(name: impl Into<String>, profile: Vec<f64>, category_index: Option<usize>) -> Self {
        Self {
            name: name.into(),
            profile,
            category_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let problem = Problem::new(
            vec![
                Criterion::new("price", Preference::Decreasing),
                Criterion::new("size", Preference::SinglePeaked),
            ],
            vec![Category::new("bad"), Category::new("ok"), Category::new("good")],
        )
        .unwrap();

        assert_eq!(problem.criteria_count(), 2);
        assert_eq!(problem.categories_count(), 3);
        assert_eq!(problem.boundaries_count(), 2);
        assert!(problem.criteria[1].is_single_peaked());
        assert!(!problem.criteria[0].is_single_peaked());
    }

    #[test]
    fn test_no_categories_rejected() {
        let result = Problem::new(vec![Criterion::new("c", Preference::Increasing)], vec![]);
        assert!(matches!(result, Err(NcsError::InvalidLearningSet(_))));
    }
}
