//! The `handout init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("handout.toml").exists() {
        println!("handout.toml already exists, skipping.");
    } else {
        std::fs::write("handout.toml", SAMPLE_CONFIG)?;
        println!("Created handout.toml");
    }

    std::fs::create_dir_all("pages")?;
    let example_path = std::path::Path::new("pages/example.toml");
    if example_path.exists() {
        println!("pages/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PAGE)?;
        println!("Created pages/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: handout validate --page pages/example.toml");
    println!("  2. Run: handout answer --page pages/example.toml --slug example/e1 --text 42");
    println!("  3. Run: handout restore --page pages/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# handout configuration

answers_path = "./handout-data/answers.json"
telemetry_log = "./handout-data/telemetry.jsonl"
# user = "${USER}"
"#;

const EXAMPLE_PAGE: &str = r#"[page]
title = "Example page"

[[exercises]]
slug = "example/e1"
classes = ["exercise", "short"]

[[exercises]]
slug = "example/e2"
classes = ["exercise", "choice"]
options = ["a", "b", "c"]
correct = "b"

[[exercises]]
slug = "example/e3"
classes = ["exercise"]
"#;
