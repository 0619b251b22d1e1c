//! Label-to-section bucketing.
//!
//! Categories come from ordered `label` or `label:text` specs; that
//! order defines the report's section order. Bucketing is first-match:
//! the issue's own label order decides which configured category claims
//! it.

use std::collections::HashMap;

use crate::model::IssueDetail;

/// Reserved label for the wildcard/default bucket.
pub const WILDCARD_LABEL: &str = "!";

/// A named output bucket keyed by a tracker label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    /// Section display text; defaults to the label itself.
    pub text: String,
    pub issues: Vec<IssueDetail>,
}

impl Category {
    /// Parse a `label` or `label:text` spec, splitting on the first `:`.
    #[must_use]
    pub fn from_spec(spec: &str) -> Self {
        let (label, text) = spec.split_once(':').unwrap_or((spec, spec));
        Self {
            label: label.to_string(),
            text: text.to_string(),
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.label == WILDCARD_LABEL
    }
}

/// Ordered category list with a label lookup for bucketing.
#[derive(Debug, Default)]
pub struct CategorySet {
    categories: Vec<Category>,
    by_label: HashMap<String, usize>,
    wildcard: Option<usize>,
}

impl CategorySet {
    /// Build categories from ordered specs; input order is output order.
    ///
    /// Labels must be unique across categories. On a collision the later
    /// category silently owns the label (map overwrite); a warning is
    /// logged.
    #[must_use]
    pub fn parse(specs: &[String]) -> Self {
        let mut set = Self::default();
        for spec in specs {
            let category = Category::from_spec(spec);
            let index = set.categories.len();
            if set.by_label.insert(category.label.clone(), index).is_some() {
                tracing::warn!(
                    "label '{}' appears in more than one category spec; the later one wins",
                    category.label
                );
            }
            if category.is_wildcard() {
                set.wildcard = Some(index);
            }
            set.categories.push(category);
        }
        set
    }

    /// Place a fetched issue into the first matching category.
    ///
    /// The issue's labels are checked in the order the tracker returned
    /// them; the first one registered by any category wins. With no
    /// match the issue falls into the wildcard category if one exists.
    /// Returns false when the issue matched nothing and was dropped.
    pub fn assign(&mut self, issue: IssueDetail) -> bool {
        let target = issue
            .labels
            .iter()
            .find_map(|label| self.by_label.get(label).copied())
            .or(self.wildcard);

        match target {
            Some(index) => {
                self.categories[index].issues.push(issue);
                true
            }
            None => false,
        }
    }

    /// Categories in configured order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut [Category] {
        &mut self.categories
    }

    /// Total issues placed across all categories. Dropped issues are
    /// never counted.
    #[must_use]
    pub fn total_assigned(&self) -> usize {
        self.categories.iter().map(|c| c.issues.len()).sum()
    }
}
