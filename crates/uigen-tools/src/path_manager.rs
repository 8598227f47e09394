//! Path-manager tool: rename, delete, and mkdir.

use crate::command::PathCommand;
use crate::error::Result;
use crate::output::ToolOutput;
use uigen_files::FileTree;

pub(crate) fn execute(tree: &mut FileTree, command: &PathCommand) -> Result<ToolOutput> {
    match command {
        PathCommand::Rename { path, new_path } => {
            tree.rename_node(path, new_path)?;
            Ok(ToolOutput::Renamed {
                from: path.clone(),
                to: new_path.clone(),
            })
        }
        PathCommand::Delete { path } => {
            let removed = tree.delete_node(path)?;
            Ok(ToolOutput::Deleted {
                path: path.clone(),
                removed,
            })
        }
        PathCommand::Mkdir { path } => {
            tree.create_directory(path)?;
            Ok(ToolOutput::DirectoryCreated { path: path.clone() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use uigen_files::{FilePath, FilesBuilder};

    fn path(raw: &str) -> FilePath {
        FilePath::new(raw).unwrap()
    }

    #[test]
    fn test_delete_reports_removed_count() {
        let mut tree = FilesBuilder::new()
            .add_file("/dir/a.txt", "")
            .add_file("/dir/b.txt", "")
            .build()
            .unwrap();

        let output = execute(&mut tree, &PathCommand::Delete { path: path("/dir") }).unwrap();
        assert_eq!(
            output,
            ToolOutput::Deleted {
                path: path("/dir"),
                removed: 3
            }
        );
    }

    #[test]
    fn test_mkdir_requires_parent() {
        let mut tree = FileTree::new();
        let err = execute(&mut tree, &PathCommand::Mkdir { path: path("/a/b") }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);

        execute(&mut tree, &PathCommand::Mkdir { path: path("/a") }).unwrap();
        assert!(tree.is_dir(&path("/a")));
    }

    #[test]
    fn test_rename_cyclic() {
        let mut tree = FilesBuilder::new().add_directory("/a").build().unwrap();
        let err = execute(
            &mut tree,
            &PathCommand::Rename {
                path: path("/a"),
                new_path: path("/a/b"),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicMove);
    }
}
