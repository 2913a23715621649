use crate::integration::support::{app_tree, named, named_in};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treeforge::config::Compression;
use treeforge::export::{ArchiveExporter, ExportOptions, ZipArchiveWriter};
use treeforge::mutation::MutationEngine;
use treeforge::{ExportError, NodeKind, TreeError, TreeModel};

fn paths(tree: &TreeModel) -> Vec<(String, bool)> {
    ArchiveExporter::new(tree, ExportOptions::default())
        .plan()
        .unwrap()
        .entries
        .into_iter()
        .map(|e| (e.path, e.is_directory))
        .collect()
}

#[test]
fn app_tree_flattens_in_pre_order() {
    let (tree, _) = app_tree();
    assert_eq!(
        paths(&tree),
        vec![
            ("app".to_string(), true),
            ("app/readme".to_string(), false),
            ("app/src".to_string(), true),
            ("app/src/main".to_string(), false),
        ]
    );
}

#[test]
fn root_with_one_child_is_insufficient() {
    let mut tree = TreeModel::new();
    let root = named(&mut tree, NodeKind::Folder, "solo");
    named_in(&mut tree, root, NodeKind::File, "only");

    let err = ArchiveExporter::new(&tree, ExportOptions::default())
        .plan()
        .unwrap_err();
    assert!(matches!(
        err,
        ExportError::InsufficientContent {
            found: 1,
            required: 2,
            ..
        }
    ));
}

#[test]
fn no_top_level_folder_is_missing_root() {
    let mut tree = TreeModel::new();
    named(&mut tree, NodeKind::File, "loose");
    let err = ArchiveExporter::new(&tree, ExportOptions::default())
        .plan()
        .unwrap_err();
    assert!(matches!(err, ExportError::MissingRoot));
}

#[test]
fn strict_mode_refuses_several_roots() {
    let (mut tree, _) = app_tree();
    named(&mut tree, NodeKind::Folder, "other");

    let relaxed = ArchiveExporter::new(&tree, ExportOptions::default()).plan();
    assert_eq!(relaxed.unwrap().root_name, "app");

    let strict = ExportOptions {
        require_single_root: true,
        ..ExportOptions::default()
    };
    assert!(matches!(
        ArchiveExporter::new(&tree, strict).plan(),
        Err(ExportError::AmbiguousRoot { count: 2 })
    ));
}

/// Plan, write and save in one step, the way the CLI's `export` does
fn export_into(
    tree: &TreeModel,
    writer: &ZipArchiveWriter,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    ArchiveExporter::new(tree, ExportOptions::default())
        .export(writer)?
        .write_to_dir(dir)
}

#[test]
fn export_does_not_touch_the_tree() {
    let (tree, _) = app_tree();
    let before = tree.clone();
    let temp = TempDir::new().unwrap();
    export_into(&tree, &ZipArchiveWriter::default(), temp.path()).unwrap();
    assert_eq!(tree, before);
}

#[test]
fn archive_on_disk_mirrors_the_tree() {
    let (tree, _) = app_tree();
    let temp = TempDir::new().unwrap();
    let path = export_into(
        &tree,
        &ZipArchiveWriter::new(Compression::Stored),
        temp.path(),
    )
    .unwrap();
    assert_eq!(path, temp.path().join("app.zip"));

    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["app/", "app/readme", "app/src/", "app/src/main"]);
    assert_eq!(archive.by_name("app/readme").unwrap().size(), 0);
}

#[test]
fn failed_export_writes_nothing() {
    let mut tree = TreeModel::new();
    named(&mut tree, NodeKind::Folder, "empty");
    let temp = TempDir::new().unwrap();
    let result = export_into(&tree, &ZipArchiveWriter::default(), temp.path());
    assert!(result.is_err());
    assert!(!temp.path().join("empty.zip").exists());
}

#[test]
fn path_like_names_never_reach_the_archive() {
    let mut tree = TreeModel::new();
    let root = named(&mut tree, NodeKind::Folder, "root");
    let a = named_in(&mut tree, root, NodeKind::Folder, "a");
    named_in(&mut tree, a, NodeKind::File, "b");

    let slash = tree.create_node(NodeKind::File);
    MutationEngine::reparent(&mut tree, slash, Some(root)).unwrap();
    let escape = tree.create_node(NodeKind::File);
    MutationEngine::reparent(&mut tree, escape, Some(root)).unwrap();

    for (node, raw) in [(slash, "a/b"), (escape, "../../escape"), (escape, "..")] {
        assert!(matches!(
            tree.rename_node(node, raw),
            Err(TreeError::InvalidName { .. })
        ));
    }
    tree.check_invariants().unwrap();

    let temp = TempDir::new().unwrap();
    let path = export_into(&tree, &ZipArchiveWriter::default(), temp.path()).unwrap();
    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();

    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), names.len(), "duplicate entries in {:?}", names);
    for name in &names {
        assert!(name.starts_with("root/"), "{} escapes the root", name);
        assert!(
            !name.split('/').any(|part| part == ".." || part == "."),
            "{} has a relative component",
            name
        );
    }
    assert_eq!(archive.len(), 4);
}
