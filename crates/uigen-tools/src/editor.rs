//! Editor tool: view, create, replace, and insert.
//!
//! Each command performs at most one mutating tree primitive, so a failed
//! command leaves the tree exactly as it was.

use crate::command::EditorCommand;
use crate::error::{Result, ToolError};
use crate::output::ToolOutput;
use tracing::debug;
use uigen_files::{FilePath, FileTree, resolver};

pub(crate) fn execute(
    tree: &mut FileTree,
    command: &EditorCommand,
    create_overwrites: bool,
) -> Result<ToolOutput> {
    match command {
        EditorCommand::View { path } => view(tree, path),
        EditorCommand::Create { path, content } => create(tree, path, content, create_overwrites),
        EditorCommand::StrReplace {
            path,
            old_str,
            new_str,
        } => str_replace(tree, path, old_str, new_str),
        EditorCommand::Insert {
            path,
            insert_line,
            new_str,
        } => insert(tree, path, *insert_line, new_str),
    }
}

fn view(tree: &FileTree, path: &FilePath) -> Result<ToolOutput> {
    let node = resolver::resolve(tree, path)?;
    Ok(match node.content() {
        Some(content) => ToolOutput::FileContent {
            path: path.clone(),
            content: content.to_string(),
        },
        None => ToolOutput::DirectoryListing {
            path: path.clone(),
            entries: node.child_names().into_iter().map(String::from).collect(),
        },
    })
}

fn create(
    tree: &mut FileTree,
    path: &FilePath,
    content: &str,
    create_overwrites: bool,
) -> Result<ToolOutput> {
    if create_overwrites && tree.exists(path) {
        tree.write_file(path, content)?;
        debug!(path = %path, "create overwrote existing file");
        return Ok(ToolOutput::Overwritten { path: path.clone() });
    }
    tree.create_file(path, content)?;
    Ok(ToolOutput::Created { path: path.clone() })
}

fn str_replace(
    tree: &mut FileTree,
    path: &FilePath,
    old_str: &str,
    new_str: &str,
) -> Result<ToolOutput> {
    let content = tree.read_file(path)?;
    let updated = match occurrences(content, old_str) {
        (0, _) => {
            return Err(ToolError::NoMatch {
                path: path.to_string(),
            });
        }
        (1, Some(start)) => {
            let end = start + old_str.len();
            let mut updated = String::with_capacity(content.len() - old_str.len() + new_str.len());
            updated.push_str(&content[..start]);
            updated.push_str(new_str);
            updated.push_str(&content[end..]);
            updated
        }
        (count, _) => {
            return Err(ToolError::AmbiguousMatch {
                path: path.to_string(),
                count,
            });
        }
    };

    tree.write_file(path, updated)?;
    Ok(ToolOutput::Replaced { path: path.clone() })
}

fn insert(tree: &mut FileTree, path: &FilePath, line: i128, new_str: &str) -> Result<ToolOutput> {
    let content = tree.read_file(path)?;
    let mut lines: Vec<&str> = if content.is_empty() {
        Vec::new()
    } else {
        content.split('\n').collect()
    };

    let line_count = lines.len();
    let index = usize::try_from(line)
        .ok()
        .filter(|index| *index <= line_count)
        .ok_or_else(|| ToolError::LineOutOfRange {
            path: path.to_string(),
            line,
            line_count,
        })?;

    lines.insert(index, new_str);
    let updated = lines.join("\n");

    tree.write_file(path, updated)?;
    Ok(ToolOutput::Inserted {
        path: path.clone(),
        line: index,
    })
}

/// Counts occurrences of `needle`, overlapping ones included, and returns
/// the byte offset of the first.
fn occurrences(haystack: &str, needle: &str) -> (usize, Option<usize>) {
    let mut count = 0;
    let mut first = None;
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let at = from + offset;
        count += 1;
        first.get_or_insert(at);
        from = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    (count, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uigen_files::FilesBuilder;

    fn path(raw: &str) -> FilePath {
        FilePath::new(raw).unwrap()
    }

    fn tree_with(file: &str, content: &str) -> FileTree {
        FilesBuilder::new().add_file(file, content).build().unwrap()
    }

    #[test]
    fn test_occurrences_counts_overlaps() {
        assert_eq!(occurrences("aaa", "aa"), (2, Some(0)));
        assert_eq!(occurrences("cat cat", "cat"), (2, Some(0)));
        assert_eq!(occurrences("hello world", "world"), (1, Some(6)));
        assert_eq!(occurrences("héllo", "l"), (2, Some(3)));
        assert_eq!(occurrences("abc", "x"), (0, None));
    }

    #[test]
    fn test_view_directory_lists_children() {
        let mut tree = tree_with("/src/a.js", "");
        tree.create_directory(&path("/src/lib")).unwrap();

        let output = view(&tree, &path("/src")).unwrap();
        assert_eq!(
            output,
            ToolOutput::DirectoryListing {
                path: path("/src"),
                entries: vec!["a.js".to_string(), "lib".to_string()],
            }
        );
    }

    #[test]
    fn test_create_overwrite_policy() {
        let mut tree = tree_with("/a.txt", "old");

        let output = create(&mut tree, &path("/a.txt"), "new", true).unwrap();
        assert!(matches!(output, ToolOutput::Overwritten { .. }));
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "new");

        let err = create(&mut tree, &path("/a.txt"), "newer", false).unwrap_err();
        assert!(err.is_files_error());
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "new");
    }

    #[test]
    fn test_create_over_directory_fails() {
        let mut tree = tree_with("/dir/x", "");
        let err = create(&mut tree, &path("/dir"), "x", true).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NotAFile);
    }

    #[test]
    fn test_str_replace_with_empty_replacement() {
        let mut tree = tree_with("/a.txt", "keep remove keep");
        str_replace(&mut tree, &path("/a.txt"), " remove", "").unwrap();
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "keep keep");
    }

    #[test]
    fn test_str_replace_overlapping_is_ambiguous() {
        let mut tree = tree_with("/a.txt", "aaa");
        let err = str_replace(&mut tree, &path("/a.txt"), "aa", "b").unwrap_err();
        assert_eq!(
            err,
            ToolError::AmbiguousMatch {
                path: "/a.txt".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_str_replace_is_case_sensitive() {
        let mut tree = tree_with("/a.txt", "Hello");
        let err = str_replace(&mut tree, &path("/a.txt"), "hello", "bye").unwrap_err();
        assert!(err.is_match_error());
    }

    #[test]
    fn test_insert_positions() {
        let mut tree = tree_with("/a.txt", "1\n2");
        insert(&mut tree, &path("/a.txt"), 2, "end").unwrap();
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "1\n2\nend");

        insert(&mut tree, &path("/a.txt"), 1, "mid").unwrap();
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "1\nmid\n2\nend");
    }

    #[test]
    fn test_insert_into_empty_file() {
        let mut tree = tree_with("/a.txt", "");
        insert(&mut tree, &path("/a.txt"), 0, "first").unwrap();
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "first");

        let mut tree = tree_with("/b.txt", "");
        let err = insert(&mut tree, &path("/b.txt"), 1, "x").unwrap_err();
        assert!(matches!(err, ToolError::LineOutOfRange { line_count: 0, .. }));
    }

    #[test]
    fn test_insert_line_past_u64_range_is_out_of_range() {
        let mut tree = tree_with("/a.txt", "1\n2");
        let err = insert(&mut tree, &path("/a.txt"), i128::from(u64::MAX), "x").unwrap_err();
        assert!(matches!(err, ToolError::LineOutOfRange { line_count: 2, .. }));
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "1\n2");
    }

    #[test]
    fn test_insert_negative_line() {
        let mut tree = tree_with("/a.txt", "1");
        let err = insert(&mut tree, &path("/a.txt"), -1, "x").unwrap_err();
        assert!(err.is_argument_error());
        assert_eq!(tree.read_file(&path("/a.txt")).unwrap(), "1");
    }
}
