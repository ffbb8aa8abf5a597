//! End-to-end tests for directory analysis

mod common;

use codequal::{analyze_directory, analyze_file, QualityError};
use common::fixtures::{BROKEN, DOCUMENTED, MESSY};
use common::TestRepo;

#[test]
fn test_directory_not_found() {
    let repo = TestRepo::new();
    let err = analyze_directory(&repo.path().join("missing")).unwrap_err();
    assert!(matches!(err, QualityError::DirectoryNotFound { .. }));
}

#[test]
fn test_file_is_not_a_directory() {
    let repo = TestRepo::new();
    let path = repo.add_file("main.py", DOCUMENTED);
    let err = analyze_directory(&path).unwrap_err();
    assert!(matches!(err, QualityError::DirectoryNotFound { .. }));
}

#[test]
fn test_no_python_files() {
    let repo = TestRepo::new();
    repo.add_file("README.md", "# readme\n");
    repo.add_file("__pycache__/cached.py", "x = 1\n");
    repo.add_file(".hidden/secret.py", "x = 1\n");

    let err = analyze_directory(repo.path()).unwrap_err();
    assert!(matches!(err, QualityError::NoFilesFound { .. }));
}

#[test]
fn test_no_valid_files() {
    let repo = TestRepo::new();
    repo.add_file("broken.py", BROKEN);
    repo.add_bytes("binary.py", &[0xff, 0xfe, 0x00]);

    let err = analyze_directory(repo.path()).unwrap_err();
    assert!(matches!(err, QualityError::NoValidFiles { .. }));
}

#[test]
fn test_invalid_files_are_dropped() {
    let repo = TestRepo::new();
    let good = repo.add_file("good.py", DOCUMENTED);
    repo.add_file("pkg/broken.py", BROKEN);

    let batch = analyze_directory(repo.path()).unwrap();
    assert_eq!(batch.files_analyzed, 1);
    assert_eq!(batch.file_results.len(), 1);
    assert_eq!(batch.file_results[0].file_path, good.display().to_string());
    assert_eq!(batch.directory, repo.path().display().to_string());
}

#[test]
fn test_identical_files_average_to_single_score() {
    let repo = TestRepo::new();
    let first = repo.add_file("a.py", MESSY);
    repo.add_file("nested/b.py", MESSY);

    let single = analyze_file(&first).unwrap();
    let batch = analyze_directory(repo.path()).unwrap();
    assert_eq!(batch.files_analyzed, 2);
    assert_eq!(batch.average_score, single.overall_score);
}

#[test]
fn test_results_follow_discovery_order() {
    let repo = TestRepo::new();
    repo.add_file("b.py", MESSY);
    repo.add_file("a.py", DOCUMENTED);
    repo.add_file("c/d.py", DOCUMENTED);
    repo.add_dir("venv/lib");
    repo.add_file("venv/lib/site.py", MESSY);

    let batch = analyze_directory(repo.path()).unwrap();
    let names: Vec<String> = batch
        .file_results
        .iter()
        .map(|r| {
            std::path::Path::new(&r.file_path)
                .strip_prefix(repo.path())
                .unwrap()
                .display()
                .to_string()
        })
        .collect();
    assert_eq!(names, vec!["a.py", "b.py", "c/d.py"]);

    let mean = batch.file_results.iter().map(|r| r.overall_score).sum::<f64>() / 3.0;
    assert!((batch.average_score - mean).abs() < 0.01);
}
