//! Directory tree rendering for the selected files.

use std::collections::BTreeMap;

#[derive(Default)]
struct TreeNode {
    dirs: BTreeMap<String, TreeNode>,
    files: Vec<String>,
}

impl TreeNode {
    fn insert(&mut self, rel_path: &str) {
        let mut parts: Vec<&str> = rel_path.split('/').filter(|p| !p.is_empty()).collect();
        let Some(file) = parts.pop() else {
            return;
        };
        let mut node = self;
        for dir in parts {
            node = node.dirs.entry(dir.to_string()).or_default();
        }
        node.files.push(file.to_string());
    }
}

/// Render `rel_paths` as a tree rooted at `root_name/`.
///
/// Directories come before files at every level, each group sorted by name.
pub fn generate_tree<'a, I>(root_name: &str, rel_paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut root = TreeNode::default();
    for path in rel_paths {
        root.insert(path);
    }

    let mut lines = vec![format!("{}/", root_name)];
    walk_tree(&mut root, "", &mut lines);
    lines.join("\n")
}

fn walk_tree(node: &mut TreeNode, prefix: &str, lines: &mut Vec<String>) {
    node.files.sort();
    node.files.dedup();

    let total_entries = node.dirs.len() + node.files.len();
    let mut idx = 0;

    for (name, child) in node.dirs.iter_mut() {
        idx += 1;
        let is_last = idx == total_entries;
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}/", prefix, connector, name));

        let extension = if is_last { "    " } else { "│   " };
        walk_tree(child, &format!("{}{}", prefix, extension), lines);
    }

    for name in &node.files {
        idx += 1;
        let connector = if idx == total_entries { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_layout() {
        let tree = generate_tree(
            "project",
            ["src/main.py", "README.md", "src/module/core.py", "setup.py"],
        );
        let expected = "\
project/
├── src/
│   ├── module/
│   │   └── core.py
│   └── main.py
├── README.md
└── setup.py";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_empty_tree_is_just_the_root() {
        assert_eq!(generate_tree("empty", std::iter::empty()), "empty/");
    }

    #[test]
    fn test_nested_last_directory_uses_blank_indent() {
        let tree = generate_tree("r", ["a/b/c.txt"]);
        assert_eq!(tree, "r/\n└── a/\n    └── b/\n        └── c.txt");
    }
}
