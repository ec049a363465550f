//! Integration tests for the tree-sitter frontend behind the Outline caches.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::tempdir;

use outline_core::{
    CompilerOptions, MemoryFileSystem, ProgramCache, ProgramHandle, SourceFileCache,
    StdFileSystem,
};
use outline_syntax::diagnostics::{MISSING_TOKEN, UNEXPECTED_TOKEN};
use outline_syntax::program::FILE_NOT_FOUND;
use outline_syntax::{SourceKind, TypeScriptFrontend};

/// Test source cache returns frontend trees from disk
#[test]
fn test_source_cache_with_frontend() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("lib.ts");
    std::fs::write(&path, "export function add(a: number, b: number) { return a + b; }\n").unwrap();

    let frontend = Arc::new(TypeScriptFrontend::default());
    let cache = SourceFileCache::new(frontend, Arc::new(StdFileSystem), 10);

    let tree = cache.get(&path).unwrap();
    assert_eq!(tree.kind(), SourceKind::TypeScript);
    assert!(tree.diagnostics().is_empty());
    assert!(Arc::ptr_eq(&tree, &cache.get(&path).unwrap()));
}

/// Test in-memory overlay edits are picked up
#[test]
fn test_memory_overlay_edits() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write("/w/edit.ts", "function a() {}\n");

    let frontend = Arc::new(TypeScriptFrontend::new(fs.clone()));
    let cache = SourceFileCache::new(frontend, fs.clone(), 10);

    let before = cache.get("/w/edit.ts").unwrap();
    assert!(!before.has_errors());

    fs.write("/w/edit.ts", "function a() {\n");
    let after = cache.get("/w/edit.ts").unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(after.has_errors());
    assert!(after
        .diagnostics()
        .iter()
        .all(|d| d.code == MISSING_TOKEN || d.code == UNEXPECTED_TOKEN));
}

/// Test program cache over the real frontend
#[test]
fn test_program_cache_with_frontend() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write("/w/a.ts", "export function a() {}\n");
    fs.write("/w/b.ts", "import { a } from './a';\nexport class B { run() { a(); } }\n");

    let frontend = Arc::new(TypeScriptFrontend::new(fs));
    let cache = ProgramCache::new(frontend, CompilerOptions::default(), 4);

    let program = cache.get_program(&["/w/b.ts", "/w/a.ts", "/w/missing.ts"]);
    assert_eq!(program.source_files().len(), 2);

    let diags = program.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, FILE_NOT_FOUND);

    let same = cache.get_program(&["/w/missing.ts", "/w/a.ts", "/w/b.ts"]);
    assert!(Arc::ptr_eq(&program, &same));

    let checker = cache.get_type_checker(&["/w/a.ts", "/w/b.ts", "/w/missing.ts"]);
    assert_eq!(checker.file_count(), 2);
    let node = checker.node_at(&PathBuf::from("/w/a.ts"), 16).unwrap();
    assert_eq!(node.text, "a");
}

/// Test single-file source lookup through the program cache
#[test]
fn test_get_source_file() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write("/w/one.ts", "class One {}\n");

    let frontend = Arc::new(TypeScriptFrontend::new(fs));
    let cache = ProgramCache::new(frontend, CompilerOptions::default(), 4);

    let tree = cache.get_source_file("/w/./one.ts").unwrap();
    assert_eq!(tree.path(), PathBuf::from("/w/one.ts").as_path());
    assert!(cache.get_source_file("/w/none.ts").is_none());
}

/// Test node descriptions serialize for tool output
#[test]
fn test_node_description_json() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write("/w/a.ts", "let value = 1;\n");
    let frontend = Arc::new(TypeScriptFrontend::new(fs));
    let cache = ProgramCache::new(frontend, CompilerOptions::default(), 1);

    let checker = cache.get_type_checker(&["/w/a.ts"]);
    let node = checker.node_at(&PathBuf::from("/w/a.ts"), 5).unwrap();
    let json = serde_json::to_value(&node).unwrap();

    assert_eq!(json["kind"], "identifier");
    assert_eq!(json["text"], "value");
    assert_eq!(json["location"]["start"]["column"], 5);
}
