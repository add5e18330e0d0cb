use crate::body::RenderedBody;
use crate::error::{EmitError, EmitResult};
use crate::filesystem::FileSystem;
use crate::options::{EmitOptions, MissingReferencePolicy};
use indexmap::IndexSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use tsdefgen_model::TypeDescriptor;

const TS_EXTENSION_SUFFIXES: [&str; 3] = [".d.ts", ".ts", ".tsx"];

/// Import statements and warnings to place above the rendered body
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportBlock {
    pub lines: Vec<String>,
    /// Base names whose extends tokens must be dropped
    pub unresolved_bases: IndexSet<String>,
    /// Degraded-mode failures, also present as comments in `lines`
    pub warnings: Vec<EmitError>,
}

/// Compute the imports required by `body`
///
/// Module-declaration output never imports anything. Otherwise external
/// property types are imported from the recorded reference files and base
/// classes from the generated file beside the source. Whatever stays
/// unresolved is a warning or an error depending on
/// [`EmitOptions::missing_references`].
pub fn resolve_imports(
    types: &[TypeDescriptor],
    body: &RenderedBody,
    source_path: &Path,
    options: &EmitOptions,
    fs: &dyn FileSystem,
) -> EmitResult<ImportBlock> {
    let mut block = ImportBlock::default();
    if options.declare_module {
        return Ok(block);
    }

    let needed: IndexSet<&String> = body
        .referenced
        .iter()
        .filter(|name| !body.declared.contains(*name))
        .collect();
    let mut satisfied: IndexSet<String> = body.declared.clone();
    let source_dir = source_path.parent().unwrap_or_else(|| Path::new(""));

    let references: IndexSet<&PathBuf> = types.iter().flat_map(|t| &t.references).collect();
    for reference in references {
        let symbol = options.type_name(&import_symbol_name(reference, options));

        if !needed.contains(&symbol) || satisfied.contains(&symbol) {
            debug!(reference = %reference.display(), %symbol, "Skipping indirect reference");
            continue;
        }

        let specifier = module_specifier(source_dir, reference, options);
        debug!(%symbol, %specifier, "Importing referenced type");
        block
            .lines
            .push(format!("import {{ {} }} from \"{}\";", symbol, specifier));
        satisfied.insert(symbol);
    }

    for base in &body.base_names {
        let name = options.type_name(base);
        if satisfied.contains(&name) {
            continue;
        }

        let expected_path = source_dir.join(format!("{}.{}", base, options.source_extension));
        if fs.exists(&expected_path) {
            debug!(base = %base, "Importing base class");
            block.lines.push(format!(
                "import {{ {} }} from \"./{}{}\";",
                name, base, options.generated_suffix
            ));
            satisfied.insert(name);
        } else {
            let error = EmitError::MissingBaseClass {
                base: base.clone(),
                expected_path,
            };
            block.report(error, options)?;
            block.unresolved_bases.insert(base.clone());
        }
    }

    let missing: Vec<String> = needed
        .into_iter()
        .filter(|name| !satisfied.contains(*name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        block.report(EmitError::MissingImports { names: missing }, options)?;
    }

    Ok(block)
}

impl ImportBlock {
    fn report(&mut self, error: EmitError, options: &EmitOptions) -> EmitResult<()> {
        match options.missing_references {
            MissingReferencePolicy::Fail => Err(error),
            MissingReferencePolicy::Warn => {
                warn!(%error, "Unresolved reference");
                self.lines.push(format!("// Warning: {}", error));
                self.warnings.push(error);
                Ok(())
            }
        }
    }
}

/// Symbol a generated file exports: `Order.generated.ts` -> `Order`
pub fn import_symbol_name(reference: &Path, options: &EmitOptions) -> String {
    let file_name = reference
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = strip_module_extension(&file_name, &options.source_extension);
    let suffix = options.generated_suffix.as_str();
    let stem = if suffix.is_empty() {
        stem
    } else {
        stem.strip_suffix(suffix).unwrap_or(stem)
    };
    stem.to_string()
}

/// Import specifier for `target` as seen from `from_dir`, e.g. `../Shared/Order.generated`
pub fn module_specifier(from_dir: &Path, target: &Path, options: &EmitOptions) -> String {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let target = target.with_file_name(strip_module_extension(&file_name, &options.source_extension));

    let specifier = relative_path(from_dir, &target)
        .to_string_lossy()
        .replace('\\', "/");
    if specifier.starts_with('.') {
        specifier
    } else {
        format!("./{}", specifier)
    }
}

/// Drop a TypeScript or source-language extension; any other dotted tail is
/// part of the module name
fn strip_module_extension<'a>(file_name: &'a str, source_extension: &str) -> &'a str {
    for suffix in TS_EXTENSION_SUFFIXES {
        if let Some(base) = file_name.strip_suffix(suffix) {
            if !base.is_empty() {
                return base;
            }
        }
    }
    match file_name.rsplit_once('.') {
        Some((base, extension))
            if !base.is_empty() && !source_extension.is_empty() && extension == source_extension =>
        {
            base
        }
        _ => file_name,
    }
}

/// Path from `from` to `to`, walking up with `..` past their common prefix
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from_components: Vec<_> = from
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to_components: Vec<_> = to
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = from_components
        .iter()
        .zip(&to_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from_components.len() {
        result.push("..");
    }
    for component in &to_components[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::render_body;
    use crate::filesystem::MockFileSystem;
    use tsdefgen_model::{PropertyDescriptor, TypeInfo};

    fn resolve(
        types: &[TypeDescriptor],
        options: &EmitOptions,
        fs: &MockFileSystem,
    ) -> EmitResult<ImportBlock> {
        let body = render_body(types, options);
        resolve_imports(types, &body, Path::new("/src/Models/Customer.cs"), options, fs)
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/src/Models"), Path::new("/src/Models/Order")),
            PathBuf::from("Order")
        );
        assert_eq!(
            relative_path(Path::new("/src/Models"), Path::new("/src/Shared/Money")),
            PathBuf::from("../Shared/Money")
        );
        assert_eq!(
            relative_path(Path::new("/src/Models"), Path::new("/src/Models")),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_module_specifier() {
        let dir = Path::new("/src/Models");
        let options = EmitOptions::default();
        assert_eq!(
            module_specifier(dir, Path::new("/src/Models/Order.generated.ts"), &options),
            "./Order.generated"
        );
        assert_eq!(
            module_specifier(dir, Path::new("/src/Shared/Money.generated.d.ts"), &options),
            "../Shared/Money.generated"
        );
        assert_eq!(
            module_specifier(dir, Path::new("/src/Models/Order.cs"), &options),
            "./Order"
        );
    }

    #[test]
    fn test_module_specifier_keeps_unknown_extensions() {
        let dir = Path::new("/src/Models");
        let options = EmitOptions::default();
        assert_eq!(
            module_specifier(dir, Path::new("/src/Models/Order.generated"), &options),
            "./Order.generated"
        );
        assert_eq!(
            module_specifier(dir, Path::new("/src/Models/Order.vb"), &options),
            "./Order.vb"
        );
        assert_eq!(
            module_specifier(dir, Path::new("/src/Models/Order.vb"), &options.source_extension("vb")),
            "./Order"
        );
    }

    #[test]
    fn test_import_symbol_name() {
        let options = EmitOptions::new();
        assert_eq!(
            import_symbol_name(Path::new("/src/Order.generated.ts"), &options),
            "Order"
        );
        assert_eq!(
            import_symbol_name(Path::new("/src/Money.generated.d.ts"), &options),
            "Money"
        );
        assert_eq!(import_symbol_name(Path::new("/src/Money.ts"), &options), "Money");
        assert_eq!(
            import_symbol_name(Path::new("/src/Order.generated"), &options),
            "Order"
        );

        let unsuffixed = EmitOptions::new().generated_suffix("");
        assert_eq!(import_symbol_name(Path::new("/src/Order.cs"), &unsuffixed), "Order");
        assert_eq!(
            import_symbol_name(Path::new("/src/Order.generated"), &unsuffixed),
            "Order.generated"
        );
    }

    #[test]
    fn test_imports_needed_references_only() {
        let types = vec![TypeDescriptor::interface("Customer")
            .with_property(PropertyDescriptor::new("Order", TypeInfo::reference("Order")))
            .with_reference("/src/Models/Order.generated.ts")
            .with_reference("/src/Shared/Unused.generated.ts")
            .with_reference("/src/Models/Order.generated.ts")];

        let block = resolve(&types, &EmitOptions::default(), &MockFileSystem::new()).unwrap();
        assert_eq!(
            block.lines,
            vec!["import { Order } from \"./Order.generated\";".to_string()]
        );
        assert!(block.warnings.is_empty());
    }

    #[test]
    fn test_same_batch_types_need_no_import() {
        let types = vec![
            TypeDescriptor::interface("Customer")
                .with_property(PropertyDescriptor::new("Kind", TypeInfo::reference("Kind")))
                .with_property(PropertyDescriptor::new("Order", TypeInfo::reference("Order"))),
            TypeDescriptor::enumeration("Kind"),
            TypeDescriptor::interface("Order"),
        ];

        let block = resolve(&types, &EmitOptions::default(), &MockFileSystem::new()).unwrap();
        assert!(block.lines.is_empty());
    }

    #[test]
    fn test_dictionary_reference_never_needed() {
        let types = vec![TypeDescriptor::interface("Customer").with_property(
            PropertyDescriptor::new(
                "Scores",
                TypeInfo::dictionary("{ [key: string]: Score }").with_reference_name("Score"),
            ),
        )];

        let options = EmitOptions::strict();
        let block = resolve(&types, &options, &MockFileSystem::new()).unwrap();
        assert!(block.lines.is_empty());
    }

    #[test]
    fn test_base_class_import_when_source_exists() {
        let types = vec![TypeDescriptor::interface("Customer").extends("Entity", None)];
        let fs = MockFileSystem::new().with_file("/src/Models/Entity.cs");

        let block = resolve(&types, &EmitOptions::default(), &fs).unwrap();
        assert_eq!(
            block.lines,
            vec!["import { Entity } from \"./Entity.generated\";".to_string()]
        );
        assert!(block.unresolved_bases.is_empty());
    }

    #[test]
    fn test_base_class_in_batch_needs_no_file() {
        let types = vec![
            TypeDescriptor::interface("Customer").extends("Entity", None),
            TypeDescriptor::interface("Entity"),
        ];

        let block = resolve(&types, &EmitOptions::strict(), &MockFileSystem::new()).unwrap();
        assert!(block.lines.is_empty());
    }

    #[test]
    fn test_missing_base_class_degraded() {
        let types = vec![TypeDescriptor::interface("Customer").extends("Entity", None)];

        let block = resolve(&types, &EmitOptions::default(), &MockFileSystem::new()).unwrap();
        assert_eq!(block.lines.len(), 1);
        assert!(block.lines[0].starts_with("// Warning: base class 'Entity'"));
        assert!(block.lines[0].contains("/src/Models/Entity.cs"));
        assert!(block.unresolved_bases.contains("Entity"));
        assert_eq!(
            block.warnings,
            vec![EmitError::MissingBaseClass {
                base: "Entity".to_string(),
                expected_path: PathBuf::from("/src/Models/Entity.cs"),
            }]
        );
    }

    #[test]
    fn test_missing_base_class_strict() {
        let types = vec![TypeDescriptor::interface("Customer").extends("Entity", None)];

        let err = resolve(&types, &EmitOptions::strict(), &MockFileSystem::new()).unwrap_err();
        assert_eq!(
            err,
            EmitError::MissingBaseClass {
                base: "Entity".to_string(),
                expected_path: PathBuf::from("/src/Models/Entity.cs"),
            }
        );
    }

    #[test]
    fn test_missing_imports_degraded_and_strict() {
        let types = vec![TypeDescriptor::interface("Customer")
            .with_property(PropertyDescriptor::new("Order", TypeInfo::reference("Order")))
            .with_property(PropertyDescriptor::new("Money", TypeInfo::reference("Money")))];

        let block = resolve(&types, &EmitOptions::default(), &MockFileSystem::new()).unwrap();
        assert_eq!(
            block.lines,
            vec![
                "// Warning: needed imports missing: Order, Money. Make sure file names match the contained class/enum name."
                    .to_string()
            ]
        );

        let err = resolve(&types, &EmitOptions::strict(), &MockFileSystem::new()).unwrap_err();
        assert_eq!(
            err,
            EmitError::MissingImports {
                names: vec!["Order".to_string(), "Money".to_string()]
            }
        );
    }

    #[test]
    fn test_ignored_base_is_not_looked_up() {
        let types = vec![TypeDescriptor::interface("Customer")
            .extends("Entity", None)
            .with_summary("TypeScriptDefinitionGenerator: IgnoreBaseType")];

        let block = resolve(&types, &EmitOptions::strict(), &MockFileSystem::new()).unwrap();
        assert_eq!(block, ImportBlock::default());
    }

    #[test]
    fn test_module_mode_has_no_imports() {
        let types = vec![TypeDescriptor::interface("Customer")
            .extends("Entity", None)
            .with_property(PropertyDescriptor::new("Order", TypeInfo::reference("Order")))];

        let options = EmitOptions::strict().declare_module(true);
        let block = resolve(&types, &options, &MockFileSystem::new()).unwrap();
        assert_eq!(block, ImportBlock::default());
    }
}
