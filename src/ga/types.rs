//! Solution encoding.
//!
//! An [`Individual`] is one candidate subset: an ordered list of distinct
//! catalog indices of fixed length. A [`Population`] is the collection of
//! individuals considered in one generation.

/// One candidate subset, encoded as distinct indices into the catalog.
///
/// The order of the indices is significant: crossover preserves relative
/// order, and the final result is decoded in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Individual {
    genes: Vec<usize>,
}

impl Individual {
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.genes
    }

    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns `true` if every index is below `catalog_size` and no index
    /// appears twice.
    pub fn is_valid(&self, catalog_size: usize) -> bool {
        let mut seen = vec![false; catalog_size];
        for &g in &self.genes {
            if g >= catalog_size || seen[g] {
                return false;
            }
            seen[g] = true;
        }
        true
    }
}

impl From<Vec<usize>> for Individual {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

impl AsRef<[usize]> for Individual {
    fn as_ref(&self) -> &[usize] {
        &self.genes
    }
}

/// The individuals of one generation.
pub type Population = Vec<Individual>;
