use serde::{Deserialize, Serialize};
use std::path::Path;

/// Indentation written to the final output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndentStyle {
    Tab,
    Spaces(u8),
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(4)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineEnding {
    Crlf,
    #[default]
    Lf,
}

/// What to do with a base class or import that cannot be resolved to a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingReferencePolicy {
    /// Emit a warning comment and keep generating
    #[default]
    Warn,
    /// Abort generation with an error
    Fail,
}

/// Options for definition emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitOptions {
    /// Wrap namespaces in `declare module` blocks instead of exporting symbols
    pub declare_module: bool,
    /// Emit `class` declarations instead of `interface`
    pub class_instead_of_interface: bool,
    pub indent: IndentStyle,
    pub line_ending: LineEnding,
    pub missing_references: MissingReferencePolicy,
    pub camel_case_type_names: bool,
    pub camel_case_property_names: bool,
    pub camel_case_enum_values: bool,
    /// Prepend an `amd-module` directive naming the generated module
    pub amd_module_name: bool,
    /// Extension of the originating source files, without the dot
    pub source_extension: String,
    /// Suffix that generated files carry before their extension
    pub generated_suffix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            declare_module: false,
            class_instead_of_interface: false,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            missing_references: MissingReferencePolicy::default(),
            camel_case_type_names: false,
            camel_case_property_names: true,
            camel_case_enum_values: false,
            amd_module_name: false,
            source_extension: "cs".to_string(),
            generated_suffix: ".generated".to_string(),
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that fail on unresolved references
    pub fn strict() -> Self {
        Self {
            missing_references: MissingReferencePolicy::Fail,
            ..Default::default()
        }
    }

    pub fn declare_module(mut self, value: bool) -> Self {
        self.declare_module = value;
        self
    }

    pub fn class_instead_of_interface(mut self, value: bool) -> Self {
        self.class_instead_of_interface = value;
        self
    }

    pub fn indent(mut self, value: IndentStyle) -> Self {
        self.indent = value;
        self
    }

    pub fn line_ending(mut self, value: LineEnding) -> Self {
        self.line_ending = value;
        self
    }

    pub fn missing_references(mut self, value: MissingReferencePolicy) -> Self {
        self.missing_references = value;
        self
    }

    pub fn camel_case_type_names(mut self, value: bool) -> Self {
        self.camel_case_type_names = value;
        self
    }

    pub fn camel_case_property_names(mut self, value: bool) -> Self {
        self.camel_case_property_names = value;
        self
    }

    pub fn camel_case_enum_values(mut self, value: bool) -> Self {
        self.camel_case_enum_values = value;
        self
    }

    pub fn amd_module_name(mut self, value: bool) -> Self {
        self.amd_module_name = value;
        self
    }

    pub fn source_extension(mut self, value: impl Into<String>) -> Self {
        self.source_extension = value.into();
        self
    }

    pub fn generated_suffix(mut self, value: impl Into<String>) -> Self {
        self.generated_suffix = value.into();
        self
    }

    /// File name of the definition file generated for `source_path`
    ///
    /// `Person.cs` becomes `Person.generated.d.ts` in module-declaration mode
    /// and `Person.generated.ts` otherwise.
    pub fn output_file_name(&self, source_path: &Path) -> String {
        let extension = if self.declare_module { ".d.ts" } else { ".ts" };
        format!("{}{}", self.module_name(source_path), extension)
    }

    /// Module name of the generated file, e.g. `Person.generated`
    pub fn module_name(&self, source_path: &Path) -> String {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        format!("{}{}", stem, self.generated_suffix)
    }
}
