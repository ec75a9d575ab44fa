//! Configuration documents written in both notations.
//!
//! Each [`NotationPair`] describes one configuration twice. Decoding either
//! side must produce the same tree, and resolving either side must produce
//! the same configuration.

/// One configuration expressed in TOML and in JSON.
#[derive(Debug, Clone, Copy)]
pub struct NotationPair {
    /// Short label used in test output.
    pub name: &'static str,
    /// TOML rendition.
    pub toml: &'static str,
    /// JSON rendition.
    pub json: &'static str,
}

/// No options at all.
pub const EMPTY: NotationPair = NotationPair {
    name: "empty",
    toml: "",
    json: "{}",
};

/// Interpreter, packages and plugins.
pub const PACKAGES: NotationPair = NotationPair {
    name: "packages",
    toml: r#"
interpreter = "0.26.2"
packages = ["numpy", "pandas>=2", "emfs://wheels/local-0.1-py3-none-any.whl"]
plugins = ["custom", "!error"]
"#,
    json: r#"{
  "interpreter": "0.26.2",
  "packages": ["numpy", "pandas>=2", "emfs://wheels/local-0.1-py3-none-any.whl"],
  "plugins": ["custom", "!error"]
}"#,
};

/// File mappings using placeholders and inferred destinations.
pub const FILES: NotationPair = NotationPair {
    name: "files",
    toml: r#"
[files]
"{DOMAIN}" = "https://example.com"
"{PATH}" = "a/b"
"{FROM}" = "{DOMAIN}/{PATH}"
"{FROM}/c.py" = ""
"{FROM}/d.txt" = "./data/"
"https://example.com/raw/notes.md" = "docs/readme.md"
"#,
    json: r#"{
  "files": {
    "{DOMAIN}": "https://example.com",
    "{PATH}": "a/b",
    "{FROM}": "{DOMAIN}/{PATH}",
    "{FROM}/c.py": "",
    "{FROM}/d.txt": "./data/",
    "https://example.com/raw/notes.md": "docs/readme.md"
  }
}"#,
};

/// Keys outside the recognized options, with nested values.
pub const EXTRA: NotationPair = NotationPair {
    name: "extra",
    toml: r#"
name = "demo"
debug = true
ratio = 1.5
retries = 3
tags = ["a", "b"]

[terminal]
rows = 24
theme = { dark = true }
"#,
    json: r#"{
  "name": "demo",
  "debug": true,
  "ratio": 1.5,
  "retries": 3,
  "tags": ["a", "b"],
  "terminal": {"rows": 24, "theme": {"dark": true}}
}"#,
};

/// Every pair, for table-driven tests.
pub const ALL: [NotationPair; 4] = [EMPTY, PACKAGES, FILES, EXTRA];
