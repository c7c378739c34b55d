use super::{Alignment, EditOp, POG};

use std::fmt;
impl fmt::Debug for POG {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let result: Vec<_> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, e)| format!("{}\t{:?}", idx, e))
            .collect();
        write!(f, "{}", result.join("\n\n"))
    }
}

impl fmt::Display for POG {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.nodes.len(),
            self.num_edges(),
            self.num_paths
        )
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            EditOp::Match(..) => write!(f, "M"),
            EditOp::Deletion(_) => write!(f, "D"),
            EditOp::Insertion(_) => write!(f, "I"),
        }
    }
}

// Run-length encoded operations, e.g. `5M1I3M`.
impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ops = self.ops().iter().map(|op| op.to_string());
        let mut current = match ops.next() {
            Some(op) => op,
            None => return Ok(()),
        };
        let mut count = 1;
        for op in ops {
            if op == current {
                count += 1;
            } else {
                write!(f, "{}{}", count, current)?;
                current = op;
                count = 1;
            }
        }
        write!(f, "{}{}", count, current)
    }
}
