use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doc-slides"))
        .args(args)
        .env_remove("SLIDES_DOCS_DIR")
        .env_remove("SLIDES_SITE_DIR")
        .env_remove("SLIDES_MODE")
        .env_remove("SLIDES_TEMPLATE")
        .output()
        .expect("Failed to execute command")
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directory");
    fs::write(&path, content).expect("Failed to write file");
}

#[test]
fn test_process_command_prints_transformed_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let docs = temp_dir.path().join("docs");
    let site = temp_dir.path().join("site");
    write_file(&docs, "slide.md", "# Only Slide\n\nHello.");
    write_file(
        &docs,
        "page.md",
        "```slides\ntitle: Demo\nurl_stub: demo\nnav:\n  - slide.md\n```\n",
    );

    let output = run_command(&[
        "process",
        "--docs-dir",
        docs.to_str().unwrap(),
        "--site-dir",
        site.to_str().unwrap(),
        "--font-size",
        "40px",
        "--page",
        "page.md",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"id="slides-demo""#));
    assert!(stdout.contains("--slide-font-size: 40px;"));
    assert!(stdout.contains("<h1>Only Slide</h1>"));
    assert!(site.join("assets/slides/js/slides.js").is_file());
}

#[test]
fn test_build_command_with_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write_file(root, "docs/slides/one.md", "# One");
    write_file(
        root,
        "docs/index.md",
        "```slides\ntitle: Legacy\nurl_stub: legacy\nnav:\n  - one.md\n```\n",
    );
    write_file(root, "slides.yml", "docs_dir: docs\nsite_dir: public\nmode: framed\n");
    let out = root.join("staged");

    let output = run_command(&[
        "--config",
        root.join("slides.yml").to_str().unwrap(),
        "build",
        "--out",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 with slides"));
    assert!(root.join("public/slides/slides/one.html").is_file());

    let page = fs::read_to_string(out.join("index.md")).unwrap();
    assert!(page.contains(r#"src="slides/slides/one.html""#));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = temp_dir.path().join("slides.yml");
    fs::write(&config, "mode: carousel\n").unwrap();

    let output = run_command(&[
        "--config",
        config.to_str().unwrap(),
        "build",
        "--out",
        temp_dir.path().join("out").to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
}
