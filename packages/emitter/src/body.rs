use crate::context::DefinitionWriter;
use crate::options::EmitOptions;
use crate::placeholders::{placeholder_token, ExtendsRegistry};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use tsdefgen_model::{PropertyDescriptor, TypeDescriptor, TypeInfo, TypeKind};

/// Prefix of the summary line that carries per-type generator options
pub const OPTIONS_MARKER: &str = "TypeScriptDefinitionGenerator:";

/// Option on the marker line that suppresses the extends clause
pub const IGNORE_BASE_TYPE: &str = "IgnoreBaseType";

/// Declarations rendered with unresolved extends tokens, plus what the
/// later passes need to finish them
#[derive(Debug, Default)]
pub struct RenderedBody {
    pub text: String,
    pub extends: ExtendsRegistry,
    /// Canonical names of every type declared in this output
    pub declared: IndexSet<String>,
    /// Canonical names of non-builtin types referenced by members
    pub referenced: IndexSet<String>,
    /// Raw base names that were given an extends token
    pub base_names: IndexSet<String>,
}

/// Render one declaration per descriptor, grouped by namespace in first-seen order
pub fn render_body(types: &[TypeDescriptor], options: &EmitOptions) -> RenderedBody {
    let mut renderer = BodyRenderer::new(options);

    for (namespace, group) in group_by_namespace(types) {
        renderer.render_namespace(namespace, &group);
    }

    renderer.finish()
}

/// Group descriptors by namespace without reordering either level
pub fn group_by_namespace(types: &[TypeDescriptor]) -> IndexMap<&str, Vec<&TypeDescriptor>> {
    let mut groups: IndexMap<&str, Vec<&TypeDescriptor>> = IndexMap::new();
    for descriptor in types {
        groups
            .entry(descriptor.namespace.as_str())
            .or_default()
            .push(descriptor);
    }
    groups
}

/// Whether the summary carries the marker line asking to drop the base type
pub fn ignores_base_type(summary: Option<&str>) -> bool {
    summary
        .map(|s| {
            summary_lines(s)
                .any(|line| line.starts_with(OPTIONS_MARKER) && line.contains(IGNORE_BASE_TYPE))
        })
        .unwrap_or(false)
}

/// Write `summary` as a block comment; nothing for an empty summary
pub fn write_doc_comment(writer: &mut DefinitionWriter, summary: Option<&str>) {
    let Some(summary) = summary.filter(|s| !s.is_empty()) else {
        return;
    };

    writer.add_line("/**");
    for line in summary_lines(summary) {
        let line = format!(" * {}", line.replace("*/", "*\\/"));
        writer.add_line(line.trim_end());
    }
    writer.add_line(" */");
}

/// Normalize an enum initializer for the target language
///
/// Drops unsigned/long suffixes, keeps hex literals as they are and strips
/// leading zeros so the value is not read as an octal literal.
pub fn clean_enum_value(value: &str) -> String {
    let value = value.trim_end_matches(['u', 'U', 'l', 'L']);

    let is_hex = value
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("0x"));
    if is_hex {
        return value.to_string();
    }

    match value.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn summary_lines(summary: &str) -> impl Iterator<Item = &str> {
    summary
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
}

struct BodyRenderer<'a> {
    options: &'a EmitOptions,
    writer: DefinitionWriter,
    extends: ExtendsRegistry,
    declared: IndexSet<String>,
    referenced: IndexSet<String>,
    base_names: IndexSet<String>,
}

impl<'a> BodyRenderer<'a> {
    fn new(options: &'a EmitOptions) -> Self {
        Self {
            options,
            writer: DefinitionWriter::new(),
            extends: ExtendsRegistry::new(),
            declared: IndexSet::new(),
            referenced: IndexSet::new(),
            base_names: IndexSet::new(),
        }
    }

    fn finish(self) -> RenderedBody {
        RenderedBody {
            text: self.writer.into_output(),
            extends: self.extends,
            declared: self.declared,
            referenced: self.referenced,
            base_names: self.base_names,
        }
    }

    fn render_namespace(&mut self, namespace: &str, group: &[&TypeDescriptor]) {
        // The global namespace has nothing to declare a module for
        let wrap = self.options.declare_module && !namespace.is_empty();
        let modifier = self.declaration_modifier(wrap);

        if wrap {
            self.writer
                .add_line(&format!("declare module {} {{", namespace));
            self.writer.indent();
        }

        for descriptor in group {
            debug!(name = %descriptor.name, namespace, is_enum = descriptor.is_enum, "Rendering type");
            if descriptor.is_enum {
                self.render_enum(descriptor, modifier);
            } else {
                self.render_interface(descriptor, modifier);
            }
        }

        if wrap {
            self.writer.dedent();
            self.writer.add_line("}");
        }
    }

    /// `export ` for module output, nothing inside a `declare module` block,
    /// and `declare ` for top-level declarations of a definition file
    fn declaration_modifier(&self, wrapped: bool) -> &'static str {
        match (self.options.declare_module, wrapped) {
            (false, _) => "export ",
            (true, true) => "",
            (true, false) => "declare ",
        }
    }

    fn render_enum(&mut self, descriptor: &TypeDescriptor, modifier: &str) {
        let name = self.options.type_name(&descriptor.name);

        write_doc_comment(&mut self.writer, descriptor.summary.as_deref());
        self.writer
            .add_line(&format!("{}const enum {} {{", modifier, name));
        self.declared.insert(name);

        self.writer.indent();
        for member in &descriptor.properties {
            write_doc_comment(&mut self.writer, member.summary.as_deref());
            let member_name = self.options.enum_value_name(&member.name);
            match &member.init_expression {
                Some(init) => self.writer.add_line(&format!(
                    "{} = {},",
                    member_name,
                    clean_enum_value(init)
                )),
                None => self.writer.add_line(&format!("{},", member_name)),
            }
        }
        self.writer.dedent();
        self.writer.add_line("}");
    }

    fn render_interface(&mut self, descriptor: &TypeDescriptor, modifier: &str) {
        let name = self.options.type_name(&descriptor.name);
        let keyword = if self.options.class_instead_of_interface {
            "class"
        } else {
            "interface"
        };

        write_doc_comment(&mut self.writer, descriptor.summary.as_deref());
        self.writer
            .add_indented(&format!("{}{} {} ", modifier, keyword, name));
        self.declared.insert(name);

        let base = descriptor.base_name.as_deref().filter(|b| !b.is_empty());
        if let Some(base) = base {
            if ignores_base_type(descriptor.summary.as_deref()) {
                debug!(name = %descriptor.name, base, "Base type ignored by summary marker");
            } else {
                let clause = self.extends_clause(descriptor, base);
                self.writer.add(&placeholder_token(base));
                self.extends.register(base, clause);
                self.base_names.insert(base.to_string());
            }
        }

        self.writer.add("{");
        self.writer.newline();
        self.writer.indent();
        self.render_members(&descriptor.properties);
        self.writer.dedent();
        self.writer.add_line("}");
    }

    /// `extends Base ` or `extends Other.Namespace.Base ` when the namespaces differ
    fn extends_clause(&self, descriptor: &TypeDescriptor, base: &str) -> String {
        let base_name = self.options.type_name(base);
        match descriptor.base_namespace.as_deref() {
            Some(ns) if !ns.is_empty() && ns != descriptor.namespace => {
                format!("extends {}.{} ", ns, base_name)
            }
            _ => format!("extends {} ", base_name),
        }
    }

    fn render_members(&mut self, properties: &[PropertyDescriptor]) {
        for property in properties {
            write_doc_comment(&mut self.writer, property.summary.as_deref());
            let name = self.options.property_name(&property.name_with_option());
            self.writer.add_indented(&format!("{}: ", name));
            self.render_type(&property.type_info);
            self.writer.add(";");
            self.writer.newline();
        }
    }

    fn render_type(&mut self, type_info: &TypeInfo) {
        let reference = type_info
            .client_side_reference_name
            .as_deref()
            .filter(|_| !type_info.is_dictionary());
        if let Some(reference) = reference {
            self.referenced.insert(self.options.type_name(reference));
        }

        self.render_kind(&type_info.kind, reference.is_some());
    }

    /// Generated type names go through the same canonical spelling as their
    /// declarations and imports; builtin names are written as given
    fn render_kind(&mut self, kind: &TypeKind, is_reference: bool) {
        match kind {
            TypeKind::Known(name) if is_reference => {
                let name = self.options.type_name(name);
                self.writer.add(&name);
            }
            TypeKind::Known(name) => self.writer.add(name),
            TypeKind::Dictionary(rendered) => self.writer.add(rendered),
            TypeKind::Array(inner) => {
                if is_reference && inner.client_side_reference_name.is_none() {
                    self.render_kind(&inner.kind, true);
                } else {
                    self.render_type(inner);
                }
                self.writer.add("[]");
            }
            TypeKind::Shape(properties) => {
                self.writer.add("{");
                self.writer.newline();
                self.writer.indent();
                self.render_members(properties);
                self.writer.dedent();
                self.writer.add_indented("}");
            }
            TypeKind::Unknown => self.writer.add("any"),
        }
    }
}
