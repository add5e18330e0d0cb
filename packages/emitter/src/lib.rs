//! # tsdefgen emitter
//!
//! Renders type descriptors into a TypeScript definition file.
//!
//! Generation runs in four steps over one fresh state per call:
//!
//! - **Body**: one declaration per descriptor, grouped by namespace, with
//!   extends clauses left as tokens ([`render_body`])
//! - **Imports**: cross-file imports for referenced types and base classes
//!   ([`resolve_imports`])
//! - **Extends**: tokens swapped for their clauses once every base is known
//!   ([`ExtendsRegistry::reconcile`])
//! - **Normalize**: line endings and indentation ([`normalize`])
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use tsdefgen_emitter::{generate_definitions, EmitOptions, MockFileSystem};
//! use tsdefgen_model::{PropertyDescriptor, TypeDescriptor, TypeInfo};
//!
//! let types = vec![TypeDescriptor::interface("Person")
//!     .with_property(PropertyDescriptor::new("Name", TypeInfo::known("string")))];
//!
//! let output = generate_definitions(
//!     &types,
//!     Path::new("/project/Person.cs"),
//!     &EmitOptions::default(),
//!     &MockFileSystem::new(),
//! )
//! .unwrap();
//!
//! assert!(output.text.contains("export interface Person {\n    name: string;\n}"));
//! ```

mod body;
mod context;
mod error;
mod filesystem;
mod imports;
mod naming;
mod normalize;
mod options;
mod placeholders;

pub use body::{
    clean_enum_value, group_by_namespace, ignores_base_type, render_body, write_doc_comment,
    RenderedBody, IGNORE_BASE_TYPE, OPTIONS_MARKER,
};
pub use context::DefinitionWriter;
pub use error::{EmitError, EmitResult};
pub use filesystem::{FileSystem, MockFileSystem, RealFileSystem};
pub use imports::{import_symbol_name, module_specifier, relative_path, resolve_imports, ImportBlock};
pub use naming::camel_case;
pub use normalize::normalize;
pub use options::{EmitOptions, IndentStyle, LineEnding, MissingReferencePolicy};
pub use placeholders::{placeholder_token, ExtendsRegistry};

use std::path::Path;
use tracing::{info, instrument};
use tsdefgen_model::TypeDescriptor;

/// A generated definition file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definitions {
    pub text: String,
    /// Unresolved references reported in degraded mode
    pub warnings: Vec<EmitError>,
}

/// Generate the definition file for the descriptors of one source file
///
/// `fs` is consulted only to check whether base-class sources exist beside
/// `source_path`.
#[instrument(skip_all, fields(types = types.len(), source = %source_path.display()))]
pub fn generate_definitions(
    types: &[TypeDescriptor],
    source_path: &Path,
    options: &EmitOptions,
    fs: &dyn FileSystem,
) -> EmitResult<Definitions> {
    info!("Starting definition generation");

    let body = render_body(types, options);
    let imports = resolve_imports(types, &body, source_path, options, fs)?;
    let body_text = body.extends.reconcile(&body.text, &imports.unresolved_bases);

    let mut writer = DefinitionWriter::new();
    if options.amd_module_name {
        writer.add_line(&format!(
            "/// <amd-module name='{}'/>",
            options.module_name(source_path)
        ));
    }
    write_banner(&mut writer);
    for line in &imports.lines {
        writer.add_line(line);
    }
    writer.add(&body_text);

    let text = normalize(&writer.into_output(), options);

    info!(
        declarations = body.declared.len(),
        imports = imports.lines.len() - imports.warnings.len(),
        warnings = imports.warnings.len(),
        "Definition generation complete"
    );

    Ok(Definitions {
        text,
        warnings: imports.warnings,
    })
}

fn write_banner(writer: &mut DefinitionWriter) {
    const RULE: &str =
        "// ------------------------------------------------------------------------------";

    writer.add_line(RULE);
    writer.add_line("// <auto-generated>");
    writer.add_line(&format!(
        "//     This file was generated by tsdefgen v{}",
        env!("CARGO_PKG_VERSION")
    ));
    writer.add_line("// </auto-generated>");
    writer.add_line(RULE);
}
