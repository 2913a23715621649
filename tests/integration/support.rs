use treeforge::mutation::MutationEngine;
use treeforge::{NodeId, NodeKind, TreeModel};

/// Create a node and give it a name
pub fn named(tree: &mut TreeModel, kind: NodeKind, name: &str) -> NodeId {
    let id = tree.create_node(kind);
    tree.rename_node(id, name).unwrap();
    id
}

/// Create a named node inside `parent`
pub fn named_in(tree: &mut TreeModel, parent: NodeId, kind: NodeKind, name: &str) -> NodeId {
    let id = named(tree, kind, name);
    MutationEngine::reparent(tree, id, Some(parent)).unwrap();
    id
}

/// `app/{readme, src/{main}}`
pub fn app_tree() -> (TreeModel, NodeId) {
    let mut tree = TreeModel::new();
    let app = named(&mut tree, NodeKind::Folder, "app");
    named_in(&mut tree, app, NodeKind::File, "readme");
    let src = named_in(&mut tree, app, NodeKind::Folder, "src");
    named_in(&mut tree, src, NodeKind::File, "main");
    (tree, app)
}
