//! End-to-end pipeline tests: raw names through normalization to the
//! emitted headers, plus extraction from a real shared object when the
//! host provides one.

use symcat::catalog::{self, IndexCatalog, SetCatalog};
use symcat::emit::{self, Declaration};
use symcat::extract;

fn raw(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn pipeline_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("DummySyscalls.h");
    let out = out.to_str().unwrap();

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let canonical = catalog::normalize(raw(&[
            "printf@GLIBC_2.2.5",
            "malloc",
            "malloc",
            "free",
        ]));
        let index = IndexCatalog::from_names(canonical);
        let decl = Declaration::cxx_index_map("dummy_syscall_map");
        emit::write_atomic(out, &emit::render_index(&index, &decl)).unwrap();
        outputs.push(std::fs::read(out).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn both_artifacts_share_one_name_set() {
    let canonical = catalog::normalize(raw(&["write", "read@GLIBC_2.2.5", "read", "close"]));
    let index = IndexCatalog::from_names(canonical.clone());
    let set = SetCatalog::from_names(canonical);

    assert_eq!(index.len(), set.len());
    for (name, i) in index.entries() {
        assert!(set.contains(name));
        assert_eq!(index.index_of(name), Some(*i));
    }
}

#[test]
fn emitted_entries_follow_sorted_rank_order() {
    let canonical = catalog::normalize(raw(&["printf@GLIBC_2.2.5", "malloc", "malloc", "free"]));
    let index = IndexCatalog::from_names(canonical);
    let text = emit::render_index(&index, &Declaration::cxx_index_map("dummy_syscall_map"));

    let free = text.find("{\"free\", 0},").unwrap();
    let malloc = text.find("{\"malloc\", 1},").unwrap();
    let printf = text.find("{\"printf\", 2},").unwrap();
    assert!(free < malloc && malloc < printf);
}

#[test]
fn empty_extraction_yields_valid_empty_headers() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("CallNames.h");
    let out = out.to_str().unwrap();

    let canonical = catalog::normalize(Vec::new());
    let set = SetCatalog::from_names(canonical);
    assert!(set.is_empty());

    emit::write_atomic(
        out,
        &emit::render_set(&set, &Declaration::cxx_name_set("libc_callnames")),
    )
    .unwrap();
    let text = std::fs::read_to_string(out).unwrap();
    assert!(text.contains("libc_callnames = {\n};\n"));
}

/// Runs only when the host carries a glibc shared object at a known
/// location; the catalog of a real libc is large, sorted, and contains
/// the classic allocator entry points.
#[test]
fn extracts_from_host_libc_when_present() {
    let candidates = [
        "/usr/lib/x86_64-linux-gnu/libc.so.6",
        "/lib/x86_64-linux-gnu/libc.so.6",
        "/usr/lib/aarch64-linux-gnu/libc.so.6",
        "/usr/lib64/libc.so.6",
    ];
    let Some(library) = candidates
        .into_iter()
        .find(|p| std::path::Path::new(p).exists())
    else {
        return;
    };

    let canonical = catalog::normalize(extract::extract_exported_functions(library).unwrap());
    assert!(!canonical.is_empty());
    assert!(canonical.windows(2).all(|w| w[0] < w[1]));
    assert!(!canonical.iter().any(|n| n.contains('@')));

    let set = SetCatalog::from_names(canonical);
    assert!(set.contains("malloc"));
    assert!(set.contains("free"));
}
