//! End-to-end runs of the trophy command against the truck kernel.

use std::path::Path;

use clap::Parser;
use trophy_cli::{run, Args};

fn write_heightmap(dir: &Path, counts: &[u64]) -> std::path::PathBuf {
    let path = dir.join("heightmap.json");
    let commits: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
    std::fs::write(
        &path,
        format!(r#"{{"year": 2024, "commits": [{}]}}"#, commits.join(", ")),
    )
    .unwrap();
    path
}

fn args(heightmap: &Path, output: &Path, extra: &[&str]) -> Args {
    let mut argv = vec![
        "trophy".to_string(),
        heightmap.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn empty_year_writes_flared_pedestal() {
    let dir = tempfile::tempdir().unwrap();
    let heightmap = write_heightmap(dir.path(), &[0; 364]);
    let output = dir.path().join("trophy.stl");

    let summary = run(&args(&heightmap, &output, &[])).unwrap();
    assert_eq!(summary.output, output);
    assert_eq!(summary.report.bar_count, 0);
    assert!(summary.report.flared);

    let b = summary.report.bounding_box.unwrap();
    assert!((b.min[0] + 2.0).abs() < 1e-4);
    assert!((b.max[0] - 54.0).abs() < 1e-4);
    assert!((b.max[2] - 2.0).abs() < 1e-4);

    let stl = std::fs::read(&output).unwrap();
    let count = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]) as usize;
    assert_eq!(count, summary.report.triangle_count);
    assert_eq!(stl.len(), 84 + count * 50);
    assert_eq!(summary.ply, None);
    assert!(!dir.path().join("trophy.ply").exists());
}

#[test]
fn busy_year_writes_every_bar() {
    let dir = tempfile::tempdir().unwrap();
    let counts: Vec<u64> = (0..364).map(|d| if d % 5 == 2 { d % 11 + 1 } else { 0 }).collect();
    let active = counts.iter().filter(|&&c| c > 0).count();
    let heightmap = write_heightmap(dir.path(), &counts);
    let output = dir.path().join("busy.stl");

    let summary = run(&args(&heightmap, &output, &[])).unwrap();
    assert_eq!(summary.report.bar_count, active);
    assert_eq!(summary.report.face_range_count, 6 * (active + 1));

    let b = summary.report.bounding_box.unwrap();
    assert!((b.max[2] - 12.01).abs() < 1e-4, "top at {}", b.max[2]);

    let stl = std::fs::read(&output).unwrap();
    let count = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]) as usize;
    assert!(count >= 12 * (active + 1));
    assert_eq!(stl.len(), 84 + count * 50);
}

#[test]
fn tolerance_outside_lift_gap_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let heightmap = write_heightmap(dir.path(), &[1; 364]);
    let output = dir.path().join("trophy.stl");

    for tolerance in ["0", "-0.001", "0.01", "0.5"] {
        let err = run(&args(&heightmap, &output, &["--tolerance", tolerance])).unwrap_err();
        assert!(
            format!("{:#}", err).contains("tolerance"),
            "{tolerance}: {err:#}"
        );
    }
    assert!(!output.exists());
}

#[test]
fn ply_written_beside_stl() {
    let dir = tempfile::tempdir().unwrap();
    let mut counts = vec![0; 364];
    counts[10] = 2;
    counts[200] = 5;
    let heightmap = write_heightmap(dir.path(), &counts);
    let output = dir.path().join("cup.stl");

    let summary = run(&args(&heightmap, &output, &["--ply"])).unwrap();
    let ply_path = dir.path().join("cup.ply");
    assert_eq!(summary.ply.as_deref(), Some(ply_path.as_path()));

    let ply = std::fs::read(&ply_path).unwrap();
    let text = String::from_utf8_lossy(&ply);
    assert!(text.starts_with("ply\n"));
    assert!(text.contains(&format!(
        "element face {}\n",
        summary.report.triangle_count
    )));
    assert!(output.exists());
}

#[test]
fn flat_ascii_pedestal() {
    let dir = tempfile::tempdir().unwrap();
    let heightmap = write_heightmap(dir.path(), &[0; 364]);
    let output = dir.path().join("flat.stl");

    let summary = run(&args(&heightmap, &output, &["--flat", "--ascii"])).unwrap();
    assert!(!summary.report.flared);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("solid trophy"));
    assert_eq!(
        text.matches("facet normal").count(),
        summary.report.triangle_count
    );
}

#[test]
fn missing_heightmap_fails_with_path_context() {
    let dir = tempfile::tempdir().unwrap();
    let heightmap = dir.path().join("absent.json");
    let output = dir.path().join("trophy.stl");

    let err = run(&args(&heightmap, &output, &[])).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.json"));
    assert!(!output.exists());
}

#[test]
fn short_heightmap_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let heightmap = write_heightmap(dir.path(), &[1; 30]);
    let output = dir.path().join("trophy.stl");

    let err = run(&args(&heightmap, &output, &[])).unwrap_err();
    assert!(format!("{:#}", err).contains("the grid needs at least 364"));
    assert!(!output.exists());
}
