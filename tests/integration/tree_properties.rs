use proptest::prelude::*;
use std::collections::HashSet;
use treeforge::mutation::MutationEngine;
use treeforge::{NodeId, NodeKind, TreeError, TreeModel};

#[derive(Debug, Clone)]
enum Op {
    Add(bool),
    Rename(usize, usize),
    Move(usize, Option<usize>),
    Delete(usize),
}

const NAMES: [&str; 7] = ["a", "b", " a ", "", "new_folder", "new_file", "a/b"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Add),
        (0..16usize, 0..NAMES.len()).prop_map(|(n, i)| Op::Rename(n, i)),
        (0..16usize, proptest::option::of(0..16usize)).prop_map(|(n, t)| Op::Move(n, t)),
        (0..16usize).prop_map(Op::Delete),
    ]
}

fn pick(tree: &TreeModel, index: usize) -> Option<NodeId> {
    let ids = tree.walk();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn apply(tree: &mut TreeModel, op: &Op) {
    match *op {
        Op::Add(folder) => {
            let kind = if folder { NodeKind::Folder } else { NodeKind::File };
            tree.create_node(kind);
        }
        Op::Rename(n, name) => {
            if let Some(id) = pick(tree, n) {
                let _ = tree.rename_node(id, NAMES[name]);
            }
        }
        Op::Move(n, target) => {
            if let Some(id) = pick(tree, n) {
                let target = target.and_then(|t| pick(tree, t));
                let _ = MutationEngine::reparent(tree, id, target);
            }
        }
        Op::Delete(n) => {
            if let Some(id) = pick(tree, n) {
                let _ = tree.delete_node(id);
            }
        }
    }
}

fn assert_unique_siblings(tree: &TreeModel, members: &[NodeId]) {
    let mut seen = HashSet::new();
    for &id in members {
        let node = tree.get(id).unwrap();
        if !node.has_placeholder_name() {
            assert!(seen.insert(node.name().to_string()), "duplicate '{}'", node.name());
        }
        assert_unique_siblings(tree, tree.children(id));
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(ops in proptest::collection::vec(op(), 1..60)) {
        let mut tree = TreeModel::new();
        for op in &ops {
            apply(&mut tree, op);
            prop_assert!(tree.check_invariants().is_ok(), "{:?}", tree.check_invariants());
        }
        assert_unique_siblings(&tree, tree.top_level());
        prop_assert_eq!(tree.walk().len(), tree.len());
    }

    #[test]
    fn rejected_moves_change_nothing(ops in proptest::collection::vec(op(), 1..40), n in 0..16usize, t in 0..16usize) {
        let mut tree = TreeModel::new();
        for op in &ops {
            apply(&mut tree, op);
        }
        let (Some(node), Some(target)) = (pick(&tree, n), pick(&tree, t)) else {
            return Ok(());
        };
        let before = tree.clone();
        match MutationEngine::reparent(&mut tree, node, Some(target)) {
            Ok(level) => {
                prop_assert_eq!(tree.get(node).unwrap().nesting_level(), level);
                prop_assert_eq!(tree.parent(node), Some(target));
            }
            Err(TreeError::CyclicReparent { .. })
            | Err(TreeError::NotAFolder(_))
            | Err(TreeError::DuplicateName { .. }) => prop_assert_eq!(&tree, &before),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
