use crate::{PartialOrderGraph, FIRST_BACKBONE_ID, SINK_ID, SOURCE_ID};
impl PartialOrderGraph {
    /// Recompute the topological order. Node ids are untouched; only the
    /// `order` permutation and its inverse are rebuilt.
    /// The sink always comes last, and the source first as long as every
    /// node hangs from it.
    pub fn topological_sort(&mut self) {
        // 0 -> never arrived
        // 1 -> active(arrived, being traversed currently)
        // 2 -> inactive(arrived, have been traversed)
        let len = self.nodes.len();
        self.dfs_flag.clear();
        self.dfs_stack.clear();
        self.order.clear();
        self.dfs_flag.extend(std::iter::repeat(0).take(len));
        let nodes = &self.nodes;
        let dfs_flag = &mut self.dfs_flag;
        let dfs_stack = &mut self.dfs_stack;
        let order = &mut self.order;
        // The sink finishes first, so it ends up last after reversing.
        let roots = std::iter::once(SINK_ID)
            .chain(std::iter::once(SOURCE_ID))
            .chain(FIRST_BACKBONE_ID..len);
        for i in roots {
            if dfs_flag[i] != 0 {
                continue;
            }
            dfs_stack.push(i);
            'dfs: while let Some(&node) = dfs_stack.last() {
                if dfs_flag[node] == 0 {
                    // preorder
                    dfs_flag[node] = 1;
                }
                for &to in nodes[node].edges() {
                    if dfs_flag[to] == 0 {
                        dfs_stack.push(to);
                        continue 'dfs;
                    }
                }
                dfs_stack.pop();
                order.push(node);
                // Deactivate
                dfs_flag[node] = 2;
            }
        }
        order.reverse();
        self.rank.clear();
        self.rank.extend(std::iter::repeat(0).take(len));
        for (rank, &node) in self.order.iter().enumerate() {
            self.rank[node] = rank;
        }
        self.sorted = true;
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    #[test]
    fn sentinels_bracket_the_order() {
        let mut graph = POG::default();
        graph.add_default(b"ACGTTGCA", 0).unwrap();
        graph.add_default(b"ACGTAATGCA", 1).unwrap();
        graph.add_default(b"AGTTGA", 2).unwrap();
        let order = graph.order();
        assert_eq!(order.len(), graph.num_nodes());
        assert_eq!(order[0], SOURCE_ID);
        assert_eq!(*order.last().unwrap(), SINK_ID);
        for (from, node) in graph.nodes().iter().enumerate() {
            for &to in node.edges() {
                assert!(graph.rank(from) < graph.rank(to), "{}->{}", from, to);
            }
        }
    }
}
