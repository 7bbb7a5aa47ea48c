//! Root-level project metadata files (ignore files, license, readme, changelog...).

/// Exact file names (lowercased).
const META_FILE_NAMES: &[&str] = &[
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
    ".dockerignore",
    ".editorconfig",
    ".npmignore",
    ".prettierignore",
    ".eslintignore",
    ".mailmap",
];

/// File stems (lowercased, before the first `.`) that are metadata with any extension.
const META_FILE_STEMS: &[&str] = &[
    "license",
    "licence",
    "copying",
    "readme",
    "changelog",
    "changes",
    "history",
    "contributing",
    "code_of_conduct",
    "authors",
    "contributors",
    "notice",
    "security",
];

/// Whether a root-relative path names a meta file.
///
/// Only files directly at the repository root qualify; `docs/README.md` is content.
pub fn is_meta_file(relative_path: &str) -> bool {
    if relative_path.contains('/') {
        return false;
    }

    let name = relative_path.to_lowercase();
    if META_FILE_NAMES.contains(&name.as_str()) {
        return true;
    }

    let stem = name.split('.').next().unwrap_or("");
    // `LICENSE-MIT`, `LICENSE-APACHE`
    let stem = stem.split('-').next().unwrap_or(stem);
    !stem.is_empty() && META_FILE_STEMS.contains(&stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_meta_files() {
        assert!(is_meta_file("README.md"));
        assert!(is_meta_file("readme"));
        assert!(is_meta_file(".gitignore"));
        assert!(is_meta_file("LICENSE"));
        assert!(is_meta_file("LICENSE-MIT"));
        assert!(is_meta_file("CHANGELOG.md"));
        assert!(is_meta_file("CODE_OF_CONDUCT.md"));
    }

    #[test]
    fn test_nested_files_are_not_meta() {
        assert!(!is_meta_file("docs/README.md"));
        assert!(!is_meta_file("sub/.gitignore"));
    }

    #[test]
    fn test_source_files_are_not_meta() {
        assert!(!is_meta_file("main.py"));
        assert!(!is_meta_file("licensing.rs"));
        assert!(!is_meta_file("Cargo.toml"));
    }
}
