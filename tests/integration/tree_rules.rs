use crate::integration::support::{named, named_in};
use treeforge::depth::{DEPTH_BAR, NEST_BAR};
use treeforge::mutation::MutationEngine;
use treeforge::{NodeKind, TreeError, TreeModel};

#[test]
fn file_moved_into_root_sits_at_level_one() {
    let mut tree = TreeModel::new();
    let root = named(&mut tree, NodeKind::Folder, "root");
    let file = named(&mut tree, NodeKind::File, "notes");

    let level = MutationEngine::reparent(&mut tree, file, Some(root)).unwrap();
    assert_eq!(level, 1);

    let node = tree.get(file).unwrap();
    assert_eq!(node.nesting_level(), 1);
    assert_eq!(node.glyphs().depth_bars(), 0);
    assert_eq!(node.glyphs().connector(), NEST_BAR);
    assert_eq!(tree.top_level(), &[root]);
    tree.check_invariants().unwrap();
}

#[test]
fn placeholder_folders_coexist_until_renamed() {
    let mut tree = TreeModel::new();
    let parent = named(&mut tree, NodeKind::Folder, "parent");
    let a = tree.create_node(NodeKind::Folder);
    let b = tree.create_node(NodeKind::Folder);
    MutationEngine::reparent(&mut tree, a, Some(parent)).unwrap();
    MutationEngine::reparent(&mut tree, b, Some(parent)).unwrap();

    assert_eq!(tree.rename_node(a, "docs").unwrap(), "docs");
    let err = tree.rename_node(b, "  docs ").unwrap_err();
    assert!(matches!(err, TreeError::DuplicateName { .. }));
    assert_eq!(tree.get(b).unwrap().name(), "new_folder");
    tree.check_invariants().unwrap();
}

#[test]
fn whitespace_is_collapsed_on_rename() {
    let mut tree = TreeModel::new();
    let file = tree.create_node(NodeKind::File);
    assert_eq!(tree.rename_node(file, "  my \t  notes  ").unwrap(), "my notes");
    assert_eq!(tree.rename_node(file, "   ").unwrap(), "new_file");
}

#[test]
fn deep_move_recomputes_the_whole_subtree() {
    let mut tree = TreeModel::new();
    let a = named(&mut tree, NodeKind::Folder, "a");
    let b = named(&mut tree, NodeKind::Folder, "b");
    let c = named_in(&mut tree, b, NodeKind::Folder, "c");
    let leaf = named_in(&mut tree, c, NodeKind::File, "leaf");

    MutationEngine::reparent(&mut tree, b, Some(a)).unwrap();
    assert_eq!(tree.get(b).unwrap().nesting_level(), 1);
    assert_eq!(tree.get(c).unwrap().nesting_level(), 2);
    assert_eq!(tree.get(leaf).unwrap().nesting_level(), 3);
    assert_eq!(
        tree.get(leaf).unwrap().glyphs().depth_column(),
        DEPTH_BAR.repeat(2)
    );

    MutationEngine::reparent(&mut tree, c, None).unwrap();
    assert_eq!(tree.get(c).unwrap().nesting_level(), 0);
    assert_eq!(tree.get(c).unwrap().glyphs().connector(), "");
    assert_eq!(tree.get(leaf).unwrap().nesting_level(), 1);
    tree.check_invariants().unwrap();
}

#[test]
fn cyclic_move_is_rejected_without_change() {
    let mut tree = TreeModel::new();
    let a = named(&mut tree, NodeKind::Folder, "a");
    let b = named_in(&mut tree, a, NodeKind::Folder, "b");
    let before = tree.clone();

    assert!(matches!(
        MutationEngine::reparent(&mut tree, a, Some(b)),
        Err(TreeError::CyclicReparent { .. })
    ));
    assert!(matches!(
        MutationEngine::reparent(&mut tree, a, Some(a)),
        Err(TreeError::CyclicReparent { .. })
    ));
    assert_eq!(tree, before);
}

#[test]
fn move_onto_a_file_is_rejected() {
    let mut tree = TreeModel::new();
    let file = named(&mut tree, NodeKind::File, "f");
    let other = named(&mut tree, NodeKind::File, "g");
    let before = tree.clone();
    assert_eq!(
        MutationEngine::reparent(&mut tree, other, Some(file)),
        Err(TreeError::NotAFolder(file))
    );
    assert_eq!(tree, before);
}

#[test]
fn collision_on_move_leaves_tree_unchanged() {
    let mut tree = TreeModel::new();
    let dest = named(&mut tree, NodeKind::Folder, "dest");
    named_in(&mut tree, dest, NodeKind::File, "x");
    let stray = named(&mut tree, NodeKind::Folder, "x");
    let before = tree.clone();

    assert!(matches!(
        MutationEngine::reparent(&mut tree, stray, Some(dest)),
        Err(TreeError::DuplicateName { .. })
    ));
    assert_eq!(tree, before);
}

#[test]
fn deleting_a_folder_removes_descendants() {
    let mut tree = TreeModel::new();
    let a = named(&mut tree, NodeKind::Folder, "a");
    let b = named_in(&mut tree, a, NodeKind::Folder, "b");
    named_in(&mut tree, b, NodeKind::File, "c");
    let keep = named(&mut tree, NodeKind::File, "keep");

    assert_eq!(tree.delete_node(a).unwrap(), 3);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.top_level(), &[keep]);
    tree.check_invariants().unwrap();
}
