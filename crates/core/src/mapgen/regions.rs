//! Region bookkeeping: id allocation and the merge map used while connecting regions.

/// Hands out region ids in carve order, starting at 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionCounter {
    next: usize,
}

impl RegionCounter {
    pub fn allocate(&mut self) -> usize {
        let region = self.next;
        self.next += 1;
        region
    }

    pub fn count(&self) -> usize {
        self.next
    }
}

/// Path-compressing union-find over region ids.
///
/// Tiles keep their original region label; resolve the merged root with [`RegionMerge::find`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMerge {
    parent: Vec<usize>,
}

impl RegionMerge {
    pub fn new(region_count: usize) -> Self {
        Self { parent: (0..region_count).collect() }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, region: usize) -> usize {
        let mut root = region;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = region;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges `absorbed` into `keep`'s set. The root of `keep` survives.
    pub fn union(&mut self, keep: usize, absorbed: usize) -> usize {
        let keep_root = self.find(keep);
        let absorbed_root = self.find(absorbed);
        if keep_root != absorbed_root {
            self.parent[absorbed_root] = keep_root;
        }
        keep_root
    }

    pub fn same_set(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Number of regions whose root matches `region`'s root.
    pub fn set_size(&mut self, region: usize) -> usize {
        let root = self.find(region);
        (0..self.parent.len()).filter(|&other| self.find(other) == root).count()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn counter_allocates_sequential_ids() {
        let mut counter = RegionCounter::default();
        assert_eq!(counter.allocate(), 0);
        assert_eq!(counter.allocate(), 1);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn union_keeps_the_first_root() {
        let mut merge = RegionMerge::new(4);
        assert_eq!(merge.union(0, 2), 0);
        assert_eq!(merge.union(3, 1), 3);
        assert_eq!(merge.union(0, 1), 0);
        assert_eq!(merge.find(3), 0);
        assert_eq!(merge.set_size(2), 4);
    }

    #[test]
    fn find_compresses_long_chains() {
        let mut merge = RegionMerge::new(5);
        merge.union(3, 4);
        merge.union(2, 3);
        merge.union(1, 2);
        merge.union(0, 1);
        assert_eq!(merge.find(4), 0);
        assert_eq!(merge.parent[4], 0, "path should be compressed after find");
    }

    proptest! {
        #[test]
        fn unions_are_transitive(
            region_count in 1_usize..40,
            pairs in proptest::collection::vec((0_usize..40, 0_usize..40), 0..60),
        ) {
            let mut merge = RegionMerge::new(region_count);
            let mut naive: Vec<usize> = (0..region_count).collect();
            for (left, right) in pairs {
                let left = left % region_count;
                let right = right % region_count;
                merge.union(left, right);
                let absorbed = naive[right];
                let keep = naive[left];
                for label in &mut naive {
                    if *label == absorbed {
                        *label = keep;
                    }
                }
            }
            for left in 0..region_count {
                for right in 0..region_count {
                    prop_assert_eq!(merge.same_set(left, right), naive[left] == naive[right]);
                }
            }
        }
    }
}
