use doc_slides::{build_site, Config, SlideMode, SlidesError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directory");
    fs::write(&path, content).expect("Failed to write file");
}

fn create_site() -> (TempDir, Config) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let docs = temp_dir.path().join("docs");

    write_file(&docs, "index.md", "# Welcome\n\nNo decks on this page.\n");
    write_file(
        &docs,
        "talks/kickoff.md",
        r#"# Kickoff

Intro paragraph.

```slides
title: Kickoff
url_stub: kickoff
nav:
  - kickoff/agenda.md
  - kickoff/goals.md
```

Closing notes.
"#,
    );
    write_file(&docs, "talks/kickoff/agenda.md", "# Agenda\n\n- one\n- two\n");
    write_file(&docs, "talks/kickoff/goals.md", "# Goals\n\nShip it.\n");

    let config = Config::new(docs, temp_dir.path().join("site"));
    (temp_dir, config)
}

#[test]
fn test_build_inline_site() {
    let (temp_dir, config) = create_site();
    let out = temp_dir.path().join("out");

    let summary = build_site(&config, &out).expect("Build failed");

    // index, kickoff and the two slide sources are all pages
    assert_eq!(summary.pages, 4);
    assert_eq!(summary.pages_with_slides, 1);
    assert_eq!(summary.slide_files_written, 0);

    let untouched = fs::read_to_string(out.join("index.md")).unwrap();
    assert_eq!(untouched, "# Welcome\n\nNo decks on this page.\n");

    let page = fs::read_to_string(out.join("talks/kickoff.md")).unwrap();
    assert!(page.starts_with(
        "<link rel=\"stylesheet\" href=\"../../assets/slides/css/slides.css\">\n<script src=\"../../assets/slides/js/slides.js\" defer></script>\n\n"
    ));
    assert!(page.contains("Intro paragraph."));
    assert!(page.contains("Closing notes."));
    assert!(page.contains(r#"id="slides-kickoff""#));
    assert!(page.contains("<h1>Agenda</h1>"));
    assert!(page.contains("<p>Ship it.</p>"));
    assert!(!page.contains("```slides"));

    assert!(config.site_dir.join("assets/slides/css/slides.css").is_file());
    assert!(config.site_dir.join("assets/slides/js/slides.js").is_file());
}

#[test]
fn test_build_framed_site_writes_slide_documents() {
    let (temp_dir, mut config) = create_site();
    config.mode = SlideMode::Framed;
    let out = temp_dir.path().join("out");

    let summary = build_site(&config, &out).expect("Build failed");
    assert_eq!(summary.slide_files_written, 2);

    let agenda = config.site_dir.join("slides/talks/kickoff/agenda.html");
    let goals = config.site_dir.join("slides/talks/kickoff/goals.html");
    assert!(fs::read_to_string(&agenda).unwrap().contains("<title>Agenda</title>"));
    assert!(fs::read_to_string(&goals).unwrap().contains("<p>Ship it.</p>"));

    let page = fs::read_to_string(out.join("talks/kickoff.md")).unwrap();
    assert!(page.contains(r#"src="../../slides/talks/kickoff/agenda.html""#));
    assert!(page.contains(r#"src="../../slides/talks/kickoff/goals.html""#));
}

#[test]
fn test_broken_deck_does_not_fail_the_build() {
    let (temp_dir, config) = create_site();
    write_file(
        &config.docs_dir,
        "broken.md",
        "```slides\ntitle: Broken\nurl_stub: broken\nnav:\n  - nowhere.md\n```\n",
    );
    let out = temp_dir.path().join("out");

    let summary = build_site(&config, &out).expect("Build should survive a broken deck");
    assert_eq!(summary.pages_with_slides, 2);

    let page = fs::read_to_string(out.join("broken.md")).unwrap();
    assert!(page.contains(r#"<div class="slides-error">"#));
    assert!(page.contains("nowhere.md"));
}

#[test]
fn test_build_refuses_to_overwrite_docs() {
    let (_temp_dir, config) = create_site();
    let docs = config.docs_dir.clone();

    assert!(build_site(&config, &docs).is_err());
    let index = fs::read_to_string(docs.join("index.md")).unwrap();
    assert_eq!(index, "# Welcome\n\nNo decks on this page.\n");
}

#[test]
fn test_build_refuses_output_inside_docs() {
    let (_temp_dir, config) = create_site();
    let nested = config.docs_dir.join("_out");

    let err = build_site(&config, &nested).unwrap_err();
    assert!(matches!(err, SlidesError::ValidationError(_)));
    assert!(!nested.exists());

    let sibling = config.docs_dir.with_file_name("docs-out");
    assert!(build_site(&config, &sibling).is_ok());
}

#[test]
fn test_build_with_missing_docs_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::new(temp_dir.path().join("nope"), temp_dir.path().join("site"));

    assert!(build_site(&config, &temp_dir.path().join("out")).is_err());
}
