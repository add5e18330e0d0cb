use crate::types::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Descriptors extracted from one source file, as handed over by a model extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorFile {
    /// Absolute path of the originating source file
    pub source_path: PathBuf,

    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl DescriptorFile {
    pub fn new(source_path: impl Into<PathBuf>, types: Vec<TypeDescriptor>) -> Self {
        Self {
            source_path: source_path.into(),
            types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor_file() {
        let json = r#"{
            "sourcePath": "/project/Models/Person.cs",
            "types": [
                { "name": "Person", "namespace": "Models" },
                { "name": "Kind", "namespace": "Models", "isEnum": true }
            ]
        }"#;

        let file: DescriptorFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.source_path, PathBuf::from("/project/Models/Person.cs"));
        assert_eq!(file.types.len(), 2);
        assert!(file.types[1].is_enum);
    }
}
