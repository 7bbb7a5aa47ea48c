//! Language labels for fenced code blocks.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Whole-file-name matches, checked before the extension table (lowercased keys).
static FILENAME_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dockerfile", "dockerfile"),
        ("containerfile", "dockerfile"),
        ("makefile", "makefile"),
        ("gnumakefile", "makefile"),
        ("cmakelists.txt", "cmake"),
        ("rakefile", "ruby"),
        ("gemfile", "ruby"),
        ("vagrantfile", "ruby"),
        ("podfile", "ruby"),
        ("jenkinsfile", "groovy"),
        ("procfile", "yaml"),
        ("justfile", "makefile"),
        ("cargo.lock", "toml"),
        ("go.mod", "go"),
        (".bashrc", "bash"),
        (".zshrc", "zsh"),
        (".gitignore", "gitignore"),
        (".dockerignore", "gitignore"),
        (".editorconfig", "ini"),
    ])
});

/// Extension (lowercased, without dot) to label.
static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Systems
        ("rs", "rust"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("cxx", "cpp"),
        ("hpp", "cpp"),
        ("hh", "cpp"),
        ("hxx", "cpp"),
        ("go", "go"),
        ("zig", "zig"),
        ("nim", "nim"),
        ("d", "d"),
        ("asm", "asm"),
        ("s", "asm"),
        // JVM and .NET
        ("java", "java"),
        ("kt", "kotlin"),
        ("kts", "kotlin"),
        ("scala", "scala"),
        ("sc", "scala"),
        ("groovy", "groovy"),
        ("gradle", "groovy"),
        ("clj", "clojure"),
        ("cljs", "clojure"),
        ("edn", "clojure"),
        ("cs", "csharp"),
        ("fs", "fsharp"),
        ("fsx", "fsharp"),
        ("vb", "vbnet"),
        // Scripting
        ("py", "python"),
        ("pyi", "python"),
        ("pyx", "cython"),
        ("rb", "ruby"),
        ("php", "php"),
        ("pl", "perl"),
        ("pm", "perl"),
        ("lua", "lua"),
        ("r", "r"),
        ("jl", "julia"),
        ("dart", "dart"),
        ("swift", "swift"),
        ("m", "objectivec"),
        ("mm", "objectivec"),
        ("ex", "elixir"),
        ("exs", "elixir"),
        ("erl", "erlang"),
        ("hrl", "erlang"),
        ("hs", "haskell"),
        ("ml", "ocaml"),
        ("mli", "ocaml"),
        ("elm", "elm"),
        ("tcl", "tcl"),
        // Web
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("ts", "typescript"),
        ("mts", "typescript"),
        ("cts", "typescript"),
        ("jsx", "jsx"),
        ("tsx", "tsx"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("html", "html"),
        ("htm", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        ("graphql", "graphql"),
        ("gql", "graphql"),
        // Shells
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "zsh"),
        ("fish", "fish"),
        ("ps1", "powershell"),
        ("psm1", "powershell"),
        ("bat", "batch"),
        ("cmd", "batch"),
        // Data and config
        ("json", "json"),
        ("jsonc", "json"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("toml", "toml"),
        ("ini", "ini"),
        ("cfg", "ini"),
        ("conf", "ini"),
        ("xml", "xml"),
        ("xsd", "xml"),
        ("svg", "xml"),
        ("csv", "csv"),
        ("sql", "sql"),
        ("proto", "protobuf"),
        ("tf", "hcl"),
        ("hcl", "hcl"),
        ("nix", "nix"),
        ("dockerfile", "dockerfile"),
        ("mk", "makefile"),
        ("cmake", "cmake"),
        // Docs
        ("md", "markdown"),
        ("markdown", "markdown"),
        ("rst", "rst"),
        ("tex", "latex"),
        ("adoc", "asciidoc"),
        ("diff", "diff"),
        ("patch", "diff"),
    ])
});

/// Detect a fence label from a file name or extension.
///
/// README-like files are labelled `markdown` whatever their extension.
pub fn get_language(path: &Path) -> Option<&'static str> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_lowercase();
    if name.is_empty() {
        return None;
    }

    if let Some(lang) = FILENAME_LANGUAGES.get(name.as_str()) {
        return Some(*lang);
    }

    if name.starts_with("readme") {
        return Some("markdown");
    }

    if name.starts_with("dockerfile.") {
        return Some("dockerfile");
    }

    let ext = path.extension().and_then(|e| e.to_str())?.to_lowercase();
    EXTENSION_LANGUAGES.get(ext.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_extensions() {
        assert_eq!(get_language(Path::new("test.py")), Some("python"));
        assert_eq!(get_language(Path::new("test.js")), Some("javascript"));
        assert_eq!(get_language(Path::new("test.ts")), Some("typescript"));
        assert_eq!(get_language(Path::new("test.jsx")), Some("jsx"));
        assert_eq!(get_language(Path::new("test.tsx")), Some("tsx"));
        assert_eq!(get_language(Path::new("src/lib.rs")), Some("rust"));
    }

    #[test]
    fn test_markup_and_config() {
        assert_eq!(get_language(Path::new("test.md")), Some("markdown"));
        assert_eq!(get_language(Path::new("test.html")), Some("html"));
        assert_eq!(get_language(Path::new("test.xml")), Some("xml"));
        assert_eq!(get_language(Path::new("test.json")), Some("json"));
        assert_eq!(get_language(Path::new("test.yaml")), Some("yaml"));
        assert_eq!(get_language(Path::new("test.yml")), Some("yaml"));
        assert_eq!(get_language(Path::new("test.toml")), Some("toml"));
    }

    #[test]
    fn test_special_file_names() {
        assert_eq!(get_language(Path::new("Dockerfile")), Some("dockerfile"));
        assert_eq!(get_language(Path::new("Makefile")), Some("makefile"));
        assert_eq!(get_language(Path::new("README.md")), Some("markdown"));
        assert_eq!(get_language(Path::new("readme.txt")), Some("markdown"));
        assert_eq!(get_language(Path::new("CMakeLists.txt")), Some("cmake"));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(get_language(Path::new("MAIN.PY")), Some("python"));
    }

    #[test]
    fn test_unknown_files() {
        assert_eq!(get_language(Path::new("test.unknown")), None);
        assert_eq!(get_language(Path::new("test")), None);
    }
}
