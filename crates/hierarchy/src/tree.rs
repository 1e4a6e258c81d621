use extract::CompanyRecord;
use serde::{Deserialize, Serialize};

use crate::levels::name_index;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipNode {
    #[serde(flatten)]
    pub record: CompanyRecord,
    pub children: Vec<OwnershipNode>,
}

impl OwnershipNode {
    /// Number of records in this subtree, including this one
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(OwnershipNode::size).sum::<usize>()
    }
}

/// Nest records under the record their parent name resolves to.
///
/// Roots are records with an empty or unresolved parent (or one naming
/// themselves). Records only reachable through a parent cycle are promoted to
/// roots in input order, so every record appears exactly once.
pub fn build_forest(records: &[CompanyRecord]) -> Vec<OwnershipNode> {
    let index = name_index(records);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();

    for (i, record) in records.iter().enumerate() {
        match index.get(record.parent.as_str()) {
            Some(&parent) if !record.parent.is_empty() && parent != i => children[parent].push(i),
            _ => roots.push(i),
        }
    }

    let mut placed = vec![false; records.len()];
    let mut forest: Vec<OwnershipNode> = roots
        .iter()
        .map(|&root| build_node(root, records, &children, &mut placed))
        .collect();

    for i in 0..records.len() {
        if !placed[i] {
            forest.push(build_node(i, records, &children, &mut placed));
        }
    }

    forest
}

fn build_node(
    i: usize,
    records: &[CompanyRecord],
    children: &[Vec<usize>],
    placed: &mut [bool],
) -> OwnershipNode {
    placed[i] = true;

    let mut nodes = Vec::with_capacity(children[i].len());
    for &child in &children[i] {
        if !placed[child] {
            nodes.push(build_node(child, records, children, placed));
        }
    }

    OwnershipNode {
        record: records[i].clone(),
        children: nodes,
    }
}
