use std::ops::Index;

/// Counters for one ply of the search tree.
/// - `visited` is the number of nodes that were entered at this ply.
///   - `cached` is the number of those resolved by a table lookup.
///   - `expanded` is the number of those whose children were searched.
///     - `prunes` is the number of expanded nodes that skipped siblings
///       because the window closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerInfo {
    pub visited: u64,
    pub cached: u64,
    pub expanded: u64,
    pub prunes: u64,
}

/// Per-ply statistics, indexed by distance from the root.
#[derive(Clone, Debug, Default)]
pub struct SearchStats(Vec<LayerInfo>);

impl Index<usize> for SearchStats {
    type Output = LayerInfo;

    fn index(&self, index: usize) -> &Self::Output { &self.0[index] }
}

impl SearchStats {
    pub fn new() -> Self { SearchStats(Vec::new()) }

    pub fn layer(&mut self, ply: usize) -> &mut LayerInfo {
        if ply >= self.0.len() {
            self.0.resize(ply + 1, LayerInfo::default());
        }
        &mut self.0[ply]
    }

    pub fn depth(&self) -> usize { self.0.len() }

    pub fn total(&self) -> LayerInfo {
        self.0.iter().fold(LayerInfo::default(), |acc, l| LayerInfo {
            visited: acc.visited + l.visited,
            cached: acc.cached + l.cached,
            expanded: acc.expanded + l.expanded,
            prunes: acc.prunes + l.prunes,
        })
    }

    pub fn statistics(&self) -> String {
        let mut s = String::new();

        s.push_str("Search statistics:\n");

        for (ply, layer) in self.0.iter().enumerate() {
            let v = layer.visited;
            let c = layer.cached;
            let e = layer.expanded;
            let p = layer.prunes;

            if ply == 0 {
                s.push_str(&format!("\tPly {} (root) visited {} nodes:\n", ply, v));
            } else {
                s.push_str(&format!("\tPly {} visited {} nodes:\n", ply, v));
            }

            s.push_str(&format!(
                "\t\t{} ({}%) were resolved with a table lookup\n",
                c,
                (c * 100).checked_div(v).unwrap_or(0)
            ));
            s.push_str(&format!(
                "\t\t{} ({}%) were expanded\n",
                e,
                (e * 100).checked_div(v).unwrap_or(0)
            ));
            s.push_str(&format!(
                "\t\t\tof these, {} ({}%) caused a prune\n",
                p,
                (p * 100).checked_div(e).unwrap_or(0)
            ));
        }

        s
    }

    pub fn reset_statistics(&mut self) { self.0.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_grow_on_demand() {
        let mut stats = SearchStats::new();
        stats.layer(2).visited += 3;
        stats.layer(0).visited += 1;
        stats.layer(0).expanded += 1;
        assert_eq!(stats.depth(), 3);
        assert_eq!(stats[1], LayerInfo::default());
        assert_eq!(stats.total().visited, 4);
        assert!(stats.statistics().contains("Ply 0 (root) visited 1 nodes"));
        stats.reset_statistics();
        assert_eq!(stats.depth(), 0);
    }
}
