//! Canonical spelling of emitted identifiers.
//!
//! Declarations, extends clauses and import symbols all go through the same
//! functions so they agree textually.

use crate::options::EmitOptions;

/// Lowercase the first character: `FirstName` -> `firstName`
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl EmitOptions {
    pub fn type_name(&self, name: &str) -> String {
        if self.camel_case_type_names {
            camel_case(name)
        } else {
            name.to_string()
        }
    }

    pub fn property_name(&self, name: &str) -> String {
        if self.camel_case_property_names {
            camel_case(name)
        } else {
            name.to_string()
        }
    }

    pub fn enum_value_name(&self, name: &str) -> String {
        if self.camel_case_enum_values {
            camel_case(name)
        } else {
            name.to_string()
        }
    }
}
