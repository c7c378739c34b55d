use crate::NodeId;
use std::fmt;

/// Base of the two sentinel nodes. Never aligned against.
pub const SENTINEL: u8 = b'$';

#[derive(Default, Clone)]
pub struct Node {
    pub base: u8,
    pub edges: Vec<NodeId>,
    pub weights: Vec<f64>,
    pub in_edges: Vec<NodeId>,
    /// Nodes sharing this node's column with a different base.
    pub aligned: Vec<NodeId>,
    /// Layers whose path passes through this node.
    pub layers: Vec<usize>,
    pub weight: f64,
}

impl Node {
    pub fn new(base: u8) -> Self {
        Self {
            base,
            edges: vec![],
            weights: vec![],
            in_edges: vec![],
            aligned: vec![],
            layers: vec![],
            weight: 0.,
        }
    }
    pub fn sentinel() -> Self {
        Self::new(SENTINEL)
    }
    pub fn base(&self) -> u8 {
        self.base
    }
    pub fn weight(&self) -> f64 {
        self.weight
    }
    pub fn edges(&self) -> &[NodeId] {
        &self.edges
    }
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
    pub fn in_edges(&self) -> &[NodeId] {
        &self.in_edges
    }
    pub fn aligned(&self) -> &[NodeId] {
        &self.aligned
    }
    pub fn coverage(&self) -> usize {
        self.layers.len()
    }
    #[inline]
    pub fn has_edge(&self) -> bool {
        !self.edges.is_empty()
    }
    /// Add `w` to the edge toward `to`, creating it if needed.
    /// Returns true if the edge is new.
    pub fn add(&mut self, w: f64, to: NodeId) -> bool {
        match self.edges.iter().position(|&e| e == to) {
            Some(pos) => {
                self.weights[pos] += w;
                false
            }
            None => {
                self.edges.push(to);
                self.weights.push(w);
                true
            }
        }
    }
    pub fn add_weight(&mut self, w: f64) {
        self.weight += w;
    }
    pub fn add_layer(&mut self, layer: usize) {
        if !self.layers.contains(&layer) {
            self.layers.push(layer);
        }
    }
    pub fn to(&self, to: NodeId) -> Option<f64> {
        self.edges
            .iter()
            .zip(self.weights.iter())
            .find(|&(&idx, _)| idx == to)
            .map(|(_, &w)| w)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Base\t{}", self.base as char)?;
        let weights: Vec<_> = self.weights.iter().map(|x| format!("{:.3}", x)).collect();
        writeln!(f, "{}", weights.join("\t"))?;
        for to in self.edges.iter() {
            writeln!(f, "Edge\t{}", to)?;
        }
        write!(f, "Coverage\t{}", self.coverage())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}\t{:.2}\t{}",
            self.base as char,
            self.weight,
            self.coverage()
        )?;
        for (w, to) in self.weights.iter().zip(self.edges.iter()) {
            writeln!(f, "E\t{}\t{:.3}", to, w)?;
        }
        if !self.aligned.is_empty() {
            write!(f, "A\t{:?}", self.aligned)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn add_accumulates() {
        let mut n = Node::new(b'A');
        assert!(n.add(1., 3));
        assert!(!n.add(2., 3));
        assert!(n.add(1., 4));
        assert_eq!(n.to(3), Some(3.));
        assert_eq!(n.to(4), Some(1.));
        assert_eq!(n.to(5), None);
        assert_eq!(n.edges().len(), n.weights().len());
    }
    #[test]
    fn layers_are_distinct() {
        let mut n = Node::new(b'C');
        n.add_layer(0);
        n.add_layer(2);
        n.add_layer(0);
        assert_eq!(n.coverage(), 2);
    }
}
