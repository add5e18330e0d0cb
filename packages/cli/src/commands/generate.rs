use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tsdefgen_emitter::{generate_definitions, EmitOptions, MissingReferencePolicy, RealFileSystem};
use tsdefgen_model::DescriptorFile;
use walkdir::WalkDir;

/// Suffix of descriptor files written by a model extractor
pub const DESCRIPTOR_SUFFIX: &str = ".types.json";

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Descriptor file, or directory searched for *.types.json files
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Wrap declarations in `declare module` blocks
    #[arg(long)]
    pub declare_module: bool,

    /// Fail on unresolved base classes and imports instead of warning
    #[arg(long)]
    pub strict: bool,
}

impl GenerateArgs {
    /// Command-line flags layered over the configured options
    fn emit_options(&self, mut options: EmitOptions) -> EmitOptions {
        if self.declare_module {
            options.declare_module = true;
        }
        if self.strict {
            options.missing_references = MissingReferencePolicy::Fail;
        }
        options
    }
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = args.emit_options(config.emit.clone());
    let out_dir = args
        .out_dir
        .as_ref()
        .map(|dir| PathBuf::from(cwd).join(dir))
        .or_else(|| config.get_out_dir(cwd));

    let input = PathBuf::from(cwd).join(&args.path);
    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let status = Status { quiet: args.stdout };
    status.line(format!("{}", "🔨 Generating definitions...".bright_blue().bold()));

    let descriptor_files = find_descriptor_files(&input)?;
    if descriptor_files.is_empty() {
        status.line(format!("{}", "⚠️  No descriptor files found".yellow()));
        return Ok(());
    }

    status.line(format!("Found {} files", descriptor_files.len()));

    let mut success_count = 0;
    let mut error_count = 0;

    for descriptor_file in &descriptor_files {
        let relative_path = descriptor_file.strip_prefix(&input).unwrap_or(descriptor_file);
        match generate_file(descriptor_file, &args, &options, out_dir.as_deref()) {
            Ok(output_path) => {
                success_count += 1;
                status.line(format!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_path
                ));
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    status.line(String::new());
    if error_count == 0 {
        status.line(format!(
            "{} Generated {} files successfully",
            "✅".green(),
            success_count
        ));
        Ok(())
    } else {
        Err(anyhow!(
            "Generated {} files, {} failed",
            success_count,
            error_count
        ))
    }
}

/// Progress output; goes to stderr while definitions are printed to stdout
struct Status {
    quiet: bool,
}

impl Status {
    fn line(&self, text: String) {
        if self.quiet {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

fn find_descriptor_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(DESCRIPTOR_SUFFIX))
        })
        .map(|entry| entry.into_path())
        .collect();

    // Stable order regardless of directory iteration order
    files.sort();
    Ok(files)
}

fn generate_file(
    descriptor_path: &Path,
    args: &GenerateArgs,
    options: &EmitOptions,
    out_dir: Option<&Path>,
) -> Result<String> {
    let content = fs::read_to_string(descriptor_path)?;
    let file: DescriptorFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid descriptor file {}", descriptor_path.display()))?;
    debug!(source = %file.source_path.display(), types = file.types.len(), "Loaded descriptors");

    let output = generate_definitions(&file.types, &file.source_path, options, &RealFileSystem)?;
    for warning in &output.warnings {
        eprintln!("    {} {}", "⚠".yellow(), warning);
    }

    if args.stdout {
        println!("{}", output.text);
        return Ok("stdout".to_string());
    }

    let file_name = options.output_file_name(&file.source_path);
    let output_file = match out_dir {
        Some(dir) => dir.join(file_name),
        None => file.source_path.with_file_name(file_name),
    };

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output.text)?;

    Ok(output_file.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tsdefgen_model::{PropertyDescriptor, TypeDescriptor};

    fn write_descriptor(dir: &Path, name: &str, source: &Path, types: &str) -> PathBuf {
        let path = dir.join(name);
        let json = format!(
            r#"{{ "sourcePath": {}, "types": {} }}"#,
            serde_json::to_string(&source.display().to_string()).unwrap(),
            types
        );
        fs::write(&path, json).unwrap();
        path
    }

    fn args(path: &str) -> GenerateArgs {
        GenerateArgs {
            path: path.to_string(),
            stdout: false,
            out_dir: None,
            declare_module: false,
            strict: false,
        }
    }

    #[test]
    fn test_generate_writes_beside_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("Person.cs");
        write_descriptor(
            temp_dir.path(),
            "Person.types.json",
            &source,
            r#"[{ "name": "Person", "properties": [{ "name": "Name", "type": { "kind": "known", "of": "string" } }] }]"#,
        );

        let cwd = temp_dir.path().display().to_string();
        generate(args("."), &cwd).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("Person.generated.ts")).unwrap();
        assert!(output.contains("export interface Person {\n    name: string;\n}"));
    }

    #[test]
    fn test_generate_strict_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("Customer.cs");
        write_descriptor(
            temp_dir.path(),
            "Customer.types.json",
            &source,
            r#"[{ "name": "Customer", "baseName": "Entity" }]"#,
        );

        let cwd = temp_dir.path().display().to_string();
        let mut strict = args(".");
        strict.strict = true;
        assert!(generate(strict, &cwd).is_err());
        assert!(!temp_dir.path().join("Customer.generated.ts").exists());

        generate(args("."), &cwd).unwrap();
        let output = fs::read_to_string(temp_dir.path().join("Customer.generated.ts")).unwrap();
        assert!(output.contains("// Warning: base class 'Entity'"));
        assert!(output.contains("export interface Customer {"));
    }

    #[test]
    fn test_generate_into_out_dir_with_module_flag() {
        let temp_dir = TempDir::new().unwrap();
        let file = DescriptorFile::new(
            temp_dir.path().join("Kind.cs"),
            vec![TypeDescriptor::enumeration("Kind")
                .in_namespace("Models")
                .with_property(PropertyDescriptor::member("A", None))],
        );
        fs::write(
            temp_dir.path().join("Kind.types.json"),
            serde_json::to_string_pretty(&file).unwrap(),
        )
        .unwrap();

        let cwd = temp_dir.path().display().to_string();
        let mut module_args = args("Kind.types.json");
        module_args.out_dir = Some("typings".to_string());
        module_args.declare_module = true;
        generate(module_args, &cwd).unwrap();

        let output =
            fs::read_to_string(temp_dir.path().join("typings/Kind.generated.d.ts")).unwrap();
        assert!(output.contains("declare module Models {\n    const enum Kind {\n        A,\n    }\n}"));
    }

    #[test]
    fn test_find_descriptor_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("b.types.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("nested/a.types.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.json"), "{}").unwrap();

        let files = find_descriptor_files(temp_dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                temp_dir.path().join("b.types.json"),
                temp_dir.path().join("nested/a.types.json"),
            ]
        );
    }
}
