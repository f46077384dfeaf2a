//! Round-robin partitioning of regions into task groups

use indexmap::IndexMap;

/// Split `regions` into exactly `n` disjoint groups
///
/// The key at position `i` goes to group `i % n`, so the split depends only
/// on the map's insertion order. Regions are never sub-split, however many
/// shapes they own. Groups may be empty when there are fewer regions than
/// groups. `n == 0` is treated as 1.
pub fn partition_regions<V>(regions: IndexMap<String, V>, n: usize) -> Vec<IndexMap<String, V>> {
    let n = n.max(1);
    let per_group = regions.len() / n + 1;
    let mut groups: Vec<IndexMap<String, V>> =
        (0..n).map(|_| IndexMap::with_capacity(per_group)).collect();

    for (idx, (key, value)) in regions.into_iter().enumerate() {
        groups[idx % n].insert(key, value);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn regions(count: usize) -> IndexMap<String, usize> {
        (0..count).map(|i| (format!("{:06}", 110000 + i * 10000), i)).collect()
    }

    #[test]
    fn test_round_robin_assignment() {
        let groups = partition_regions(regions(5), 2);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].values().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(groups[1].values().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_disjoint_cover_with_balanced_sizes() {
        for m in [0usize, 1, 3, 4, 7, 34] {
            for n in [1usize, 2, 4, 5] {
                let groups = partition_regions(regions(m), n);
                assert_eq!(groups.len(), n);

                let mut seen = HashSet::new();
                for group in &groups {
                    let size = group.len();
                    assert!(size == m / n || size == m.div_ceil(n), "m={} n={} size={}", m, n, size);
                    for key in group.keys() {
                        assert!(seen.insert(key.clone()), "{} assigned twice", key);
                    }
                }
                assert_eq!(seen.len(), m);
            }
        }
    }

    #[test]
    fn test_deterministic_and_zero_groups() {
        assert_eq!(partition_regions(regions(9), 4), partition_regions(regions(9), 4));
        let groups = partition_regions(regions(3), 0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }
}
