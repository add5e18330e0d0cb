//! # tsdefgen model
//!
//! Descriptor types handed to the definition emitter by a model extractor.
//! A descriptor is an already-extracted picture of one source type (class,
//! interface or enum) and its members; the emitter trusts it and never
//! re-parses the original source.
//!
//! ## Example
//!
//! ```rust
//! use tsdefgen_model::{PropertyDescriptor, TypeDescriptor, TypeInfo};
//!
//! let person = TypeDescriptor::interface("Person")
//!     .in_namespace("Models")
//!     .with_property(PropertyDescriptor::new("Name", TypeInfo::known("string")))
//!     .with_property(PropertyDescriptor::new("Tags", TypeInfo::array(TypeInfo::known("string"))));
//!
//! assert_eq!(person.properties.len(), 2);
//! assert!(!person.is_enum);
//! ```

pub mod file;
pub mod types;

pub use file::DescriptorFile;
pub use types::{PropertyDescriptor, TypeDescriptor, TypeInfo, TypeKind};
