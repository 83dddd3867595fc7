//! Merging from and to the file system.

use bookmerge::BookmergeError;
use bookmerge::config::Config;
use bookmerge::io::OutputWriter;
use bookmerge::merge::{merge_files, plan_files};
use bookmerge::utils::collect_paths_for_patterns;
use tempfile::TempDir;

use crate::common::{outline, page_labels, write_pdf};

fn config_for(dir: &TempDir, names: &[(&str, usize)]) -> Config {
    let inputs = names
        .iter()
        .map(|&(name, pages)| write_pdf(dir.path(), name, pages))
        .collect();

    Config {
        inputs,
        output_dir: dir.path().to_path_buf(),
        output_name: "merged".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_merge_files_and_save() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &[("beta.pdf", 2), ("Alpha.pdf", 1)]);

    let merged = merge_files(&config).await.unwrap();
    assert_eq!(merged.load_statistics.success_count, 2);
    assert_eq!(merged.response.file_name, "merged.pdf");

    let output_path = config.output_path().unwrap();
    let stats = OutputWriter::new()
        .save(merged.response.document.bytes, &output_path)
        .await
        .unwrap();

    let written = std::fs::read(&output_path).unwrap();
    assert_eq!(stats.file_size, written.len() as u64);
    assert_eq!(
        page_labels(&written),
        vec!["Alpha.pdf-0", "beta.pdf-0", "beta.pdf-1"]
    );
    assert_eq!(
        outline(&written),
        vec![("Alpha".to_string(), 0), ("beta".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_parallel_read_keeps_merge_order() {
    let dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..8).map(|i| format!("part{i}.pdf")).collect();
    let specs: Vec<(&str, usize)> = names.iter().rev().map(|n| (n.as_str(), 1)).collect();
    let mut config = config_for(&dir, &specs);
    config.jobs = Some(4);

    let merged = merge_files(&config).await.unwrap();

    let titles: Vec<String> = outline(merged.response.bytes())
        .into_iter()
        .map(|(title, _)| title)
        .collect();
    let expected: Vec<String> = (0..8).map(|i| format!("part{i}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_plan_files_matches_merge() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &[("b.pdf", 3), ("a.pdf", 0), ("c.pdf", 1)]);

    let planned = plan_files(&config).await.unwrap();
    let merged = merge_files(&config).await.unwrap();

    assert_eq!(planned.plan.total_pages(), 4);
    assert_eq!(planned.plan.entries(), merged.response.document.outline.as_slice());
    assert!(!config.output_path().unwrap().exists());
}

#[tokio::test]
async fn test_glob_inputs() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "one.pdf", 1);
    write_pdf(dir.path(), "two.pdf", 1);
    std::fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();

    let pattern = format!("{}/*.pdf", dir.path().display());
    let inputs = collect_paths_for_patterns([pattern]).unwrap();
    assert_eq!(inputs.len(), 2);

    let config = Config {
        inputs,
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let merged = merge_files(&config).await.unwrap();
    assert_eq!(merged.response.file_name, "merged_document.pdf");
    assert_eq!(merged.response.document.total_pages, 2);
}

#[tokio::test]
async fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir, &[("present.pdf", 1)]);
    config.inputs.push(dir.path().join("absent.pdf"));

    let err = merge_files(&config).await.unwrap_err();
    assert!(matches!(err, BookmergeError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_unreadable_pdf_names_offending_file() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir, &[("good.pdf", 1)]);
    let bad = dir.path().join("broken.pdf");
    std::fs::write(&bad, b"this is not a pdf").unwrap();
    config.inputs.push(bad);

    let err = merge_files(&config).await.unwrap_err();
    assert_eq!(err.offending_document(), Some("broken"));
}
