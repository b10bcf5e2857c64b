//! Integration tests for pkg-carousel using the library interface

use std::fs;
use std::path::Path;

use pkg_carousel::dependency_filter::DependencyFilter;
use pkg_carousel::detector::CycleDetector;
use pkg_carousel::error::CarouselError;
use pkg_carousel::graph::{DependencyGraph, Edge};
use pkg_carousel::registry::{LineupDirection, PackageRegistry};
use pkg_carousel::reports::{JsonReportGenerator, ReportGenerator};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Package definition: (dir, name, dependencies, devDependencies)
type PackageDefinition<'a> = (&'a str, &'a str, Vec<&'a str>, Vec<&'a str>);

fn write_manifest(dir: &Path, manifest: Value) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("package.json"),
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

fn write_packages(root: &Path, packages: Vec<PackageDefinition>) {
    for (dir, name, deps, dev_deps) in packages {
        let versions = |names: Vec<&str>| -> Value {
            names
                .into_iter()
                .map(|dep| (dep.to_string(), json!("*")))
                .collect::<serde_json::Map<_, _>>()
                .into()
        };
        write_manifest(
            &root.join(dir),
            json!({
                "name": name,
                "version": "1.0.0",
                "dependencies": versions(deps),
                "devDependencies": versions(dev_deps),
            }),
        );
    }
}

/// A root workspace holding `apps/*` plus a nested workspace under `libs`
fn create_monorepo(temp_dir: &TempDir) {
    let root = temp_dir.path();

    write_manifest(
        root,
        json!({ "name": "monorepo", "private": true, "workspaces": ["apps/*", "libs"] }),
    );
    write_manifest(
        &root.join("libs"),
        json!({ "name": "libs", "private": true, "workspaces": { "packages": ["*", "!legacy"] } }),
    );

    write_packages(
        root,
        vec![
            ("apps/web", "@org/web", vec!["@org/ui", "react"], vec![]),
            ("apps/api", "@org/api", vec!["@org/models"], vec!["@org/testing"]),
            ("libs/ui", "@org/ui", vec!["@org/models"], vec![]),
            ("libs/models", "@org/models", vec![], vec!["@org/testing"]),
            ("libs/testing", "@org/testing", vec!["@org/api"], vec![]),
            ("libs/legacy", "@org/legacy", vec!["@org/web"], vec![]),
        ],
    );
}

fn detect(registry: &PackageRegistry) -> CycleDetector {
    let graph = DependencyGraph::from_packages(registry.packages());
    let mut detector = CycleDetector::new();
    detector.detect_cycles(&graph, None);
    detector
}

#[test]
fn test_nested_workspaces_are_discovered() {
    let temp_dir = TempDir::new().unwrap();
    create_monorepo(&temp_dir);

    let registry = PackageRegistry::discover(temp_dir.path(), DependencyFilter::default(), None)
        .unwrap();

    let dirs: Vec<String> = registry
        .packages()
        .iter()
        .map(|package| package.display_dir())
        .collect();

    // Workspace roots are not packages and negated patterns are skipped
    assert_eq!(
        dirs,
        vec!["apps/api", "apps/web", "libs/models", "libs/testing", "libs/ui"]
    );

    // External dependencies never become edges
    let web = registry.get("@org/web").unwrap();
    assert_eq!(
        web.deps().iter().cloned().collect::<Vec<_>>(),
        vec!["@org/ui".to_string()]
    );
}

#[test]
fn test_dev_dependency_cycle_is_found() {
    let temp_dir = TempDir::new().unwrap();
    create_monorepo(&temp_dir);

    let registry = PackageRegistry::discover(temp_dir.path(), DependencyFilter::default(), None)
        .unwrap();
    let detector = detect(&registry);

    let cycles: Vec<Vec<String>> = detector
        .cycles()
        .iter()
        .map(|cycle| cycle.packages().to_vec())
        .collect();

    assert_eq!(
        cycles,
        vec![
            vec!["@org/api", "@org/models", "@org/testing"],
            vec!["@org/api", "@org/testing"],
        ]
        .into_iter()
        .map(|cycle| cycle.into_iter().map(String::from).collect::<Vec<_>>())
        .collect::<Vec<_>>()
    );
}

#[test]
fn test_excluding_dev_dependencies_breaks_cycle() {
    let temp_dir = TempDir::new().unwrap();
    create_monorepo(&temp_dir);

    let registry = PackageRegistry::discover(
        temp_dir.path(),
        DependencyFilter::new(true, false, false),
        None,
    )
    .unwrap();

    assert!(!detect(&registry).has_cycles());
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_manifest(root, json!({ "workspaces": ["packages/*"] }));
    write_packages(
        root,
        vec![("packages/loop", "loop", vec!["loop"], vec![])],
    );

    let registry = PackageRegistry::discover(root, DependencyFilter::default(), None).unwrap();
    let detector = detect(&registry);

    assert_eq!(detector.cycle_count(), 1);
    assert_eq!(detector.cycles()[0].to_string(), "loop → loop");
}

#[test]
fn test_duplicate_package_names_fail() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_manifest(root, json!({ "workspaces": ["packages/*"] }));
    write_packages(
        root,
        vec![
            ("packages/a", "same", vec![], vec![]),
            ("packages/b", "same", vec![], vec![]),
        ],
    );

    let err = PackageRegistry::discover(root, DependencyFilter::default(), None).unwrap_err();
    assert!(matches!(err, CarouselError::DuplicateNameError { .. }));
}

#[test]
fn test_missing_root_manifest_fails() {
    let temp_dir = TempDir::new().unwrap();

    let err = PackageRegistry::discover(temp_dir.path(), DependencyFilter::default(), None)
        .unwrap_err();
    assert!(matches!(err, CarouselError::FileReadError { .. }));
}

#[test]
fn test_lineup_and_json_report() {
    let temp_dir = TempDir::new().unwrap();
    create_monorepo(&temp_dir);

    let registry = PackageRegistry::discover(temp_dir.path(), DependencyFilter::default(), None)
        .unwrap();

    let lineup = registry
        .lineup(LineupDirection::Dependants, Some("@org/models"))
        .unwrap();
    let report = JsonReportGenerator::default().generate_report(&lineup).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();

    assert_eq!(
        value,
        json!({
            "package_count": 1,
            "packages": [{
                "name": "@org/models",
                "dir": "libs/models",
                "dependants": ["@org/api", "@org/ui"],
            }],
        })
    );
}

#[test]
fn test_cycle_edges_close_the_loop() {
    let graph = DependencyGraph::from_edges([
        Edge::new("a", "b"),
        Edge::new("b", "c"),
        Edge::new("c", "a"),
    ]);
    let mut detector = CycleDetector::new();
    detector.detect_cycles(&graph, None);

    let edges = detector.cycles()[0].edges();
    assert_eq!(edges.last(), Some(&Edge::new("c", "a")));
    assert_eq!(edges.len(), 3);
}
