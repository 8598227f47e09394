//! Integration tests for file tree invariants.
//!
//! Exercises sequences of operations and checks that the tree stays
//! consistent: every node is reachable from the root, paths agree with
//! parent links, and failed operations leave no trace.

use uigen_files::{FilePath, FileTree, FilesBuilder, NodeKind};

fn path(raw: &str) -> FilePath {
    FilePath::new(raw).unwrap()
}

/// Checks that every walked node's path is its parent's path joined with its name.
fn assert_consistent(tree: &FileTree) {
    let walked = tree.walk();
    assert_eq!(walked.len(), tree.node_count(), "unreachable nodes present");

    for node in walked {
        match node.parent() {
            None => assert!(node.path().is_root()),
            Some(parent_id) => {
                let parent = tree.node(parent_id).unwrap();
                assert!(parent.is_dir());
                assert_eq!(&parent.path().join(node.name()).unwrap(), node.path());
                match parent.kind() {
                    NodeKind::Directory { children } => {
                        assert_eq!(children.get(node.name()), Some(&node.id()));
                    }
                    NodeKind::File { .. } => unreachable!(),
                }
            }
        }
        assert_eq!(tree.get(node.path()).map(|n| n.id()), Some(node.id()));
    }
}

fn project() -> FileTree {
    FilesBuilder::new()
        .add_file("/App.jsx", "import Card from './components/Card';")
        .add_file("/components/Card.jsx", "export default function Card() {}")
        .add_file("/components/ui/Button.jsx", "export function Button() {}")
        .add_file("/styles/index.css", "body { margin: 0; }")
        .build()
        .unwrap()
}

#[test]
fn test_fresh_tree_is_consistent() {
    assert_consistent(&FileTree::new());
    assert_consistent(&project());
}

#[test]
fn test_mixed_operations_keep_tree_consistent() {
    let mut tree = project();

    tree.rename_node(&path("/components"), &path("/widgets")).unwrap();
    assert_consistent(&tree);

    tree.rename_node(&path("/widgets/ui"), &path("/ui")).unwrap();
    assert_consistent(&tree);

    tree.write_file(&path("/ui/Button.jsx"), "export const Button = () => null;")
        .unwrap();
    tree.delete_node(&path("/styles")).unwrap();
    assert_consistent(&tree);

    tree.create_directory(&path("/styles")).unwrap();
    tree.create_file(&path("/styles/app.css"), "").unwrap();
    assert_consistent(&tree);

    let files: Vec<_> = tree.files().map(|(p, _)| p.as_str().to_string()).collect();
    assert_eq!(
        files,
        vec![
            "/App.jsx",
            "/widgets/Card.jsx",
            "/ui/Button.jsx",
            "/styles/app.css"
        ]
    );
}

#[test]
fn test_failed_operations_leave_tree_unchanged() {
    let mut tree = project();
    let before = tree.to_snapshot();
    let revision = tree.revision();

    assert!(tree.create_file(&path("/App.jsx"), "dup").is_err());
    assert!(tree.create_file(&path("/missing/file.js"), "").is_err());
    assert!(tree.write_file(&path("/components"), "").is_err());
    assert!(tree.delete_node(&path("/nope")).is_err());
    assert!(tree.rename_node(&path("/components"), &path("/components/ui/x")).is_err());
    assert!(tree.rename_node(&path("/App.jsx"), &path("/styles/index.css")).is_err());
    assert!(tree.rename_node(&path("/App.jsx"), &path("/App.jsx/inner")).is_err());
    assert!(tree.delete_node(&FilePath::root()).is_err());

    assert_eq!(tree.to_snapshot(), before);
    assert_eq!(tree.revision(), revision);
    assert_consistent(&tree);
}

#[test]
fn test_deleted_path_can_be_recreated() {
    let mut tree = project();
    tree.delete_node(&path("/components")).unwrap();
    assert!(!tree.exists(&path("/components/ui/Button.jsx")));

    tree.create_directory(&path("/components")).unwrap();
    assert!(tree.list_directory(&path("/components")).unwrap().is_empty());
    assert_consistent(&tree);
}

#[test]
fn test_rename_then_rename_back_restores_snapshot() {
    let mut tree = project();
    let before = tree.to_snapshot();

    tree.rename_node(&path("/components"), &path("/styles/components"))
        .unwrap();
    tree.rename_node(&path("/styles/components"), &path("/components"))
        .unwrap();

    let after = tree.to_snapshot();
    assert_eq!(after.len(), before.len());
    for (file, content) in before.iter() {
        assert_eq!(after.get(file.as_str()), Some(content));
    }
    assert_consistent(&tree);
}

#[test]
fn test_snapshot_roundtrip_preserves_tree() {
    let tree = project();
    let json = tree.to_snapshot().to_json().unwrap();

    let restored =
        FileTree::from_snapshot(&uigen_files::FileSnapshot::from_json(&json).unwrap()).unwrap();
    assert_eq!(restored.to_snapshot(), tree.to_snapshot());
    assert_eq!(restored.node_count(), tree.node_count());
    assert_consistent(&restored);
}

#[test]
fn test_node_ids_are_stable_across_rename() {
    let mut tree = project();
    let id = tree.get(&path("/components/Card.jsx")).unwrap().id();

    tree.rename_node(&path("/components"), &path("/parts")).unwrap();
    assert_eq!(tree.get(&path("/parts/Card.jsx")).unwrap().id(), id);
}
