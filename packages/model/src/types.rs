use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One emittable type: a class/interface or an enum
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub name: String,

    /// Dotted namespace path, empty when the type has none
    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub is_enum: bool,

    /// Base class name (non-enum types only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,

    /// Namespace of the base class, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_namespace: Option<String>,

    /// Free-text documentation, possibly multi-line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,

    /// Files this type's properties point to (treated as a set)
    #[serde(default)]
    pub references: Vec<PathBuf>,
}

/// One member of a type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,

    /// Member may be absent
    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Literal initializer text of an enum member, as found in source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_expression: Option<String>,

    #[serde(default, rename = "type")]
    pub type_info: TypeInfo,
}

/// Value type of a property
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    #[serde(flatten)]
    pub kind: TypeKind,

    /// Symbol that must be imported when this type is a non-builtin reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_side_reference_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "camelCase")]
pub enum TypeKind {
    /// Maps directly to a target-language type name
    Known(String),

    /// Array of the inner type
    Array(Box<TypeInfo>),

    /// Builtin dictionary; carries its rendered text and never needs an import
    Dictionary(String),

    /// Anonymous inline object type
    Shape(Vec<PropertyDescriptor>),

    /// No usable type information
    #[default]
    Unknown,
}

impl TypeDescriptor {
    /// Create an interface (or class) descriptor with no members
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create an enum descriptor with no members
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_enum: true,
            ..Default::default()
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the base class; `namespace` is the base's own namespace if known
    pub fn extends(mut self, base: impl Into<String>, namespace: Option<&str>) -> Self {
        self.base_name = Some(base.into());
        self.base_namespace = namespace.map(str::to_string);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_reference(mut self, path: impl Into<PathBuf>) -> Self {
        self.references.push(path.into());
        self
    }
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            type_info,
            ..Default::default()
        }
    }

    /// Enum member, optionally with its initializer text
    pub fn member(name: impl Into<String>, init_expression: Option<&str>) -> Self {
        Self {
            name: name.into(),
            init_expression: init_expression.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Name plus the `?` marker for members that may be absent
    pub fn name_with_option(&self) -> String {
        if self.optional {
            format!("{}?", self.name)
        } else {
            self.name.clone()
        }
    }
}

impl TypeInfo {
    pub fn known(name: impl Into<String>) -> Self {
        TypeKind::Known(name.into()).into()
    }

    pub fn array(inner: TypeInfo) -> Self {
        TypeKind::Array(Box::new(inner)).into()
    }

    pub fn dictionary(rendered: impl Into<String>) -> Self {
        TypeKind::Dictionary(rendered.into()).into()
    }

    pub fn shape(properties: Vec<PropertyDescriptor>) -> Self {
        TypeKind::Shape(properties).into()
    }

    pub fn unknown() -> Self {
        TypeKind::Unknown.into()
    }

    /// Named reference to another generated type, e.g. `Address`
    pub fn reference(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: TypeKind::Known(name.clone()),
            client_side_reference_name: Some(name),
        }
    }

    pub fn with_reference_name(mut self, name: impl Into<String>) -> Self {
        self.client_side_reference_name = Some(name.into());
        self
    }

    /// Dictionaries are builtin; arrays of dictionaries are too
    pub fn is_dictionary(&self) -> bool {
        match &self.kind {
            TypeKind::Dictionary(_) => true,
            TypeKind::Array(inner) => inner.is_dictionary(),
            _ => false,
        }
    }
}

impl From<TypeKind> for TypeInfo {
    fn from(kind: TypeKind) -> Self {
        Self {
            kind,
            client_side_reference_name: None,
        }
    }
}
