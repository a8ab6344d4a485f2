use many_deps_generate::error::GenerateError;
use many_deps_generate::generate;
use many_deps_shared::{DependencyShape, WorkloadConfig, WorkspaceLayout};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn crate_dirs(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().unwrap().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Ranks referenced by `use` statements, in source order.
fn imported_ranks(source: &str, prefix: &str) -> Vec<usize> {
    source
        .lines()
        .filter_map(|line| line.strip_prefix("use "))
        .map(|rest| {
            let krate = rest.split("::").next().unwrap();
            krate.strip_prefix(prefix).unwrap().parse().unwrap()
        })
        .collect()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
fn test_generates_one_dir_per_crate(#[case] count: usize) {
    let temp_dir = TempDir::new().unwrap();
    let layout = WorkspaceLayout::new(temp_dir.path().join("out"));
    let config = WorkloadConfig::default();

    generate(
        &config,
        &layout,
        count,
        DependencyShape::Chained,
        temp_dir.path(),
    )
    .unwrap();

    let dirs = crate_dirs(layout.root());
    assert_eq!(dirs.len(), count + 1);
    assert!(dirs.contains(&config.root_name));
    for rank in 0..count {
        assert!(layout.source_path(&config.module_name(rank)).is_file());
    }
}

#[test]
fn test_chained_ranks_are_strictly_lower_and_ascending() {
    let temp_dir = TempDir::new().unwrap();
    let layout = WorkspaceLayout::new(temp_dir.path().join("out"));
    let config = WorkloadConfig::default();
    let count = 12;

    generate(
        &config,
        &layout,
        count,
        DependencyShape::Chained,
        temp_dir.path(),
    )
    .unwrap();

    for rank in 0..count {
        let source = fs::read_to_string(layout.source_path(&config.module_name(rank))).unwrap();
        let ranks = imported_ranks(&source, &config.module_prefix);
        assert_eq!(ranks, (0..rank).collect::<Vec<_>>());
    }

    let root = fs::read_to_string(layout.source_path(&config.root_name)).unwrap();
    assert_eq!(
        imported_ranks(&root, &config.module_prefix),
        (0..count).collect::<Vec<_>>()
    );
}

#[rstest]
#[case(DependencyShape::Flat)]
#[case(DependencyShape::Chained)]
#[case(DependencyShape::ChainedWithDescriptors)]
fn test_root_references_every_crate(#[case] shape: DependencyShape) {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("MODULE.bazel"), "module(name = \"bench\")\n").unwrap();
    let layout = WorkspaceLayout::new(temp_dir.path().join("out"));
    let config = WorkloadConfig::default();

    let workspace = generate(&config, &layout, 5, shape, temp_dir.path()).unwrap();
    assert_eq!(workspace.root.dependencies, vec![0, 1, 2, 3, 4]);

    let root = fs::read_to_string(layout.source_path(&config.root_name)).unwrap();
    let calls: Vec<&str> = root
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(&config.function_prefix))
        .collect();
    assert_eq!(
        calls,
        vec![
            "some_function_0();",
            "some_function_1();",
            "some_function_2();",
            "some_function_3();",
            "some_function_4();",
        ]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("MODULE.bazel"), "module(name = \"bench\")\n").unwrap();
    let config = WorkloadConfig::default();

    let first = WorkspaceLayout::new(temp_dir.path().join("first"));
    let second = WorkspaceLayout::new(temp_dir.path().join("second"));
    for layout in [&first, &second] {
        generate(
            &config,
            layout,
            6,
            DependencyShape::ChainedWithDescriptors,
            temp_dir.path(),
        )
        .unwrap();
    }

    let mut compared = 0;
    for entry in WalkDir::new(first.root()).sort_by_file_name() {
        let entry = entry.unwrap();
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(first.root()).unwrap();
        let a = fs::read(entry.path()).unwrap();
        let b = fs::read(second.root().join(relative)).unwrap();
        assert_eq!(a, b, "{} differs", relative.display());
        compared += 1;
    }

    // 7 sources, 7 descriptors, 1 manifest
    assert_eq!(compared, 15);
}

#[test]
fn test_descriptor_shape_copies_manifest_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = "module(name = \"bench\")\nbazel_dep(name = \"rules_rust\", version = \"0.56.0\")\n";
    fs::write(temp_dir.path().join("MODULE.bazel"), manifest).unwrap();
    let layout = WorkspaceLayout::new(temp_dir.path().join("out"));
    let config = WorkloadConfig::default();

    generate(
        &config,
        &layout,
        3,
        DependencyShape::ChainedWithDescriptors,
        temp_dir.path(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(layout.root().join("MODULE.bazel")).unwrap(),
        manifest
    );

    let descriptor =
        fs::read_to_string(layout.descriptor_path(&config.module_name(2))).unwrap();
    assert!(descriptor.contains(
        "    deps = [\n        \"//some_long_and_annoying_name_0\",\n        \"//some_long_and_annoying_name_1\",\n    ],"
    ));
}

#[test]
fn test_flat_shape_writes_no_descriptors() {
    let temp_dir = TempDir::new().unwrap();
    let layout = WorkspaceLayout::new(temp_dir.path().join("out"));
    let config = WorkloadConfig::default();

    generate(&config, &layout, 3, DependencyShape::Flat, temp_dir.path()).unwrap();

    let descriptors = WalkDir::new(layout.root())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_name() == WorkspaceLayout::DESCRIPTOR_FILE)
        .count();
    assert_eq!(descriptors, 0);
    assert!(!layout.root().join("MODULE.bazel").exists());
}

#[test]
fn test_does_not_merge_into_existing_tree() {
    let temp_dir = TempDir::new().unwrap();
    let layout = WorkspaceLayout::new(temp_dir.path().join("out"));
    let config = WorkloadConfig::default();

    generate(&config, &layout, 2, DependencyShape::Flat, temp_dir.path()).unwrap();
    let again = generate(&config, &layout, 2, DependencyShape::Flat, temp_dir.path());

    assert!(matches!(again, Err(GenerateError::DirectoryExists { .. })));
}
