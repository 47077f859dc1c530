//! Candidate catalog.
//!
//! The catalog is the read-only input of an optimization run: an ordered list
//! of selectable items, each with a non-negative cost. Individuals refer to
//! items by their position in this list.

use crate::error::Result;
use std::ops::RangeInclusive;

/// One selectable item.
///
/// `id` is an opaque token owned by whatever system stores the catalog; it
/// is carried through unchanged and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateItem {
    /// Opaque external identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Expected cost of including this item (e.g. average solving time).
    pub cost: u32,
    /// Difficulty tier.
    pub tier: i32,
}

impl CandidateItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u32, tier: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            tier,
        }
    }
}

/// An ordered, fully materialized collection of [`CandidateItem`]s.
///
/// # Examples
///
/// ```
/// use subset_evolve::catalog::{CandidateItem, Catalog};
///
/// let catalog = Catalog::new(vec![
///     CandidateItem::new("a", "Two Sum", 10, 1),
///     CandidateItem::new("b", "Max Flow", 45, 3),
/// ]);
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.cost(1), Some(45));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Catalog {
    items: Vec<CandidateItem>,
}

impl Catalog {
    pub fn new(items: Vec<CandidateItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CandidateItem> {
        self.items.get(index)
    }

    /// Cost of the item at `index`, or `None` if out of range.
    pub fn cost(&self, index: usize) -> Option<u32> {
        self.items.get(index).map(|item| item.cost)
    }

    /// Sum of all item costs.
    pub fn total_cost(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.cost)).sum()
    }

    /// Returns a new catalog with only the items whose tier lies in `tiers`.
    ///
    /// Relative order is preserved.
    pub fn filter_tier(&self, tiers: RangeInclusive<i32>) -> Catalog {
        self.items
            .iter()
            .filter(|item| tiers.contains(&item.tier))
            .cloned()
            .collect()
    }

    /// Resolves a list of indices back to items, in the given order.
    ///
    /// Indices outside the catalog are dropped.
    pub fn decode(&self, indices: &[usize]) -> Vec<CandidateItem> {
        indices
            .iter()
            .filter_map(|&idx| self.items.get(idx).cloned())
            .collect()
    }
}

impl From<Vec<CandidateItem>> for Catalog {
    fn from(items: Vec<CandidateItem>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<CandidateItem> for Catalog {
    fn from_iter<T: IntoIterator<Item = CandidateItem>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Narrow read-only source of a catalog.
///
/// The optimizer never holds a storage handle. Callers that fetch items from
/// a database implement this trait on their repository type and hand it in;
/// the catalog is materialized once, before the run starts.
pub trait CatalogProvider {
    /// Loads the full catalog.
    fn load_catalog(&self) -> Result<Catalog>;
}

impl CatalogProvider for Catalog {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.clone())
    }
}

impl CatalogProvider for [CandidateItem] {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.to_vec()))
    }
}

impl CatalogProvider for Vec<CandidateItem> {
    fn load_catalog(&self) -> Result<Catalog> {
        self.as_slice().load_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimizeError;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CandidateItem::new("a", "A", 10, 1),
            CandidateItem::new("b", "B", 20, 2),
            CandidateItem::new("c", "C", 5, 3),
            CandidateItem::new("d", "D", 15, 2),
        ])
    }

    #[test]
    fn test_accessors() {
        let catalog = sample();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.cost(2), Some(5));
        assert_eq!(catalog.cost(4), None);
        assert_eq!(catalog.total_cost(), 50);
        assert_eq!(catalog.get(1).map(|i| i.name.as_str()), Some("B"));
    }

    #[test]
    fn test_filter_tier_keeps_order() {
        let filtered = sample().filter_tier(2..=2);
        let ids: Vec<&str> = filtered.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn test_filter_tier_empty_range() {
        assert!(sample().filter_tier(7..=9).is_empty());
    }

    #[test]
    fn test_decode_preserves_given_order() {
        let items = sample().decode(&[3, 0]);
        assert_eq!(items[0].id, "d");
        assert_eq!(items[1].id, "a");
    }

    #[test]
    fn test_decode_drops_out_of_range() {
        assert_eq!(sample().decode(&[0, 99]).len(), 1);
    }

    struct FailingProvider;

    impl CatalogProvider for FailingProvider {
        fn load_catalog(&self) -> Result<Catalog> {
            Err(OptimizeError::Provider("connection refused".into()))
        }
    }

    #[test]
    fn test_providers() {
        let items = sample().items().to_vec();
        assert_eq!(items.load_catalog().unwrap(), sample());
        assert_eq!(sample().load_catalog().unwrap().len(), 4);
        assert!(matches!(
            FailingProvider.load_catalog(),
            Err(OptimizeError::Provider(_))
        ));
    }
}
