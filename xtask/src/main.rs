//! Developer tasks (schema generation and validation).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root: the parent of the xtask directory.
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("cannot determine current directory")?,
    };
    if manifest_dir.ends_with("xtask") {
        return manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory");
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(licguard_settings::LicguardConfigV1)
}

fn generate_summary_schema() -> schemars::Schema {
    schema_for!(licguard_types::Summary)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "licguard.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "licguard.summary.v1.json",
            generate: generate_summary_schema,
        },
    ]
}

/// Pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Validate a JSON summary written by `licguard --json` against the summary schema.
fn validate_summary(path: &Path) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let instance: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not JSON", path.display()))?;
    let schema = serde_json::to_value(generate_summary_schema())?;
    let validator = jsonschema::validator_for(&schema).context("Failed to compile schema")?;

    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        println!("{} conforms to licguard.summary.v1", path.display());
        return Ok(());
    }
    for e in &errors {
        eprintln!("  - {e}");
    }
    bail!("{} violates licguard.summary.v1 ({} errors)", path.display(), errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                     Show this message");
    eprintln!("  emit-schemas             Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas         Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids         Print known schema IDs");
    eprintln!("  validate-summary <FILE>  Validate a licguard --json summary against its schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-summary" => match args.get(2) {
            Some(file) => validate_summary(Path::new(file)),
            None => bail!("validate-summary needs a file argument"),
        },
        "print-schema-ids" => {
            println!("{}", licguard_settings::SCHEMA_CONFIG_V1);
            println!("{}", licguard_types::SCHEMA_SUMMARY_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
