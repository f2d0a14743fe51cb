//! Module specifier extraction using tree-sitter.

use crate::AnalyzeError;
use tree_sitter::{Node, Parser, TreeCursor};

/// Module names that ship with the Node runtime and are never manifest
/// dependencies.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

/// Source flavor, selected by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => {
                tree_sitter_javascript::LANGUAGE.into()
            }
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Extract every module specifier referenced by one source file: ES6
/// `import`/`export ... from`, CommonJS `require(...)`, and dynamic
/// `import(...)`.
pub fn collect_specifiers(
    source: &str,
    language: SourceLanguage,
) -> Result<Vec<String>, AnalyzeError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|_| AnalyzeError::LanguageInit)?;

    // With no timeout or cancellation flag configured the parser always
    // yields a tree, error nodes included.
    let Some(tree) = parser.parse(source, None) else {
        return Ok(Vec::new());
    };

    let mut specifiers = Vec::new();
    let mut cursor = tree.root_node().walk();
    visit(&mut cursor, source, &mut specifiers);
    Ok(specifiers)
}

fn visit(cursor: &mut TreeCursor, source: &str, out: &mut Vec<String>) {
    let node = cursor.node();
    match node.kind() {
        // `import x from 'mod'` / `export { x } from 'mod'`: the module
        // source is a direct `string` child.
        "import_statement" | "export_statement" => {
            if let Some(specifier) = child_string_value(&node, source) {
                out.push(specifier);
            }
        }
        "call_expression" => {
            if let Some(specifier) = call_specifier(&node, source) {
                out.push(specifier);
            }
        }
        _ => {}
    }

    if cursor.goto_first_child() {
        loop {
            visit(cursor, source, out);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

/// `require('mod')` and dynamic `import('mod')`.
fn call_specifier(node: &Node, source: &str) -> Option<String> {
    let callee = node.child_by_field_name("function")?;
    let callee_text = node_text(&callee, source)?;
    if callee_text != "require" && callee_text != "import" {
        return None;
    }

    let args = node.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    for child in args.children(&mut cursor) {
        if child.kind() == "string" {
            return string_value(&child, source);
        }
    }
    None
}

fn child_string_value(node: &Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "string" {
            return string_value(&child, source);
        }
    }
    None
}

fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

fn string_value(node: &Node, source: &str) -> Option<String> {
    let text = node_text(node, source)?;
    let trimmed = text
        .trim_start_matches(['"', '\'', '`'])
        .trim_end_matches(['"', '\'', '`']);
    Some(trimmed.to_string())
}

/// Map a module specifier to the npm package it resolves from.
///
/// Relative and absolute specifiers are package-internal. `node:` URLs and
/// bare Node built-ins ship with the runtime. Deep imports collapse to the
/// package root; scoped names keep their scope segment.
pub fn specifier_package(specifier: &str) -> Option<&str> {
    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    if specifier.starts_with("node:") {
        return None;
    }

    if specifier.starts_with('@') {
        let mut parts = specifier.splitn(3, '/');
        let scope = parts.next()?;
        let name = parts.next()?;
        if name.is_empty() {
            return None;
        }
        return Some(&specifier[..scope.len() + 1 + name.len()]);
    }

    let bare = specifier.split('/').next().unwrap_or(specifier);
    if NODE_BUILTINS.contains(&bare) {
        return None;
    }
    Some(bare)
}
