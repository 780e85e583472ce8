// Batch watermarking tests

use super::test_images::{text_settings, write_corrupt, write_image, BASE_COLOR};
use image::ImageFormat;
use imprint::batch::{collect_paths, run_batch, BatchJob};
use std::path::PathBuf;

#[test]
fn test_one_corrupt_file_does_not_stop_the_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let files = vec![
        write_image(input.path(), "1.png", ImageFormat::Png, BASE_COLOR),
        write_image(input.path(), "2.jpg", ImageFormat::Jpeg, BASE_COLOR),
        write_corrupt(input.path(), "3.png"),
        write_image(input.path(), "4.png", ImageFormat::Png, BASE_COLOR),
        write_image(input.path(), "5.webp", ImageFormat::WebP, BASE_COLOR),
    ];

    let job = BatchJob {
        files: files.clone(),
        input_dir: None,
        output_dir: Some(output.path().join("marked")),
    };
    let report = run_batch(&job, &text_settings("HI")).unwrap();

    assert_eq!(report.processed.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, files[2]);

    let processed: Vec<PathBuf> = report.processed.iter().map(|i| i.input.clone()).collect();
    assert_eq!(processed, vec![files[0].clone(), files[1].clone(), files[3].clone(), files[4].clone()]);

    for item in &report.processed {
        assert!(item.output.starts_with(output.path().join("marked")));
        assert!(item.output.exists());
        assert_eq!((item.width, item.height), (200, 100));
    }
}

#[test]
fn test_without_output_dir_overwrites_sources() {
    let input = tempfile::tempdir().unwrap();
    let path = write_image(input.path(), "render.png", ImageFormat::Png, BASE_COLOR);
    let before = std::fs::read(&path).unwrap();

    let job = BatchJob {
        files: vec![path.clone()],
        ..Default::default()
    };
    let report = run_batch(&job, &text_settings("HI")).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].output, path);
    assert_ne!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_directory_and_files_are_merged_without_duplicates() {
    let input = tempfile::tempdir().unwrap();
    let a = write_image(input.path(), "a.png", ImageFormat::Png, BASE_COLOR);
    let b = write_image(input.path(), "b.bmp", ImageFormat::Bmp, BASE_COLOR);
    std::fs::write(input.path().join("readme.txt"), "not an image").unwrap();

    let job = BatchJob {
        files: vec![b.clone()],
        input_dir: Some(input.path().to_path_buf()),
        output_dir: None,
    };

    assert_eq!(collect_paths(&job), vec![b, a]);
}

#[test]
fn test_nothing_to_do() {
    let input = tempfile::tempdir().unwrap();
    let job = BatchJob {
        input_dir: Some(input.path().to_path_buf()),
        ..Default::default()
    };

    let report = run_batch(&job, &text_settings("HI")).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_same_file_name_from_two_folders_is_written_once() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let files = vec![
        write_image(first.path(), "shot.png", ImageFormat::Png, BASE_COLOR),
        write_image(second.path(), "shot.png", ImageFormat::Png, BASE_COLOR),
    ];

    let job = BatchJob {
        files: files.clone(),
        input_dir: None,
        output_dir: Some(output.path().to_path_buf()),
    };
    let report = run_batch(&job, &text_settings("HI")).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].input, files[0]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, files[1]);
}
