//! Resource resolution by (type, name, version) and relation
//!
//! Local and external resources resolve independently: the identifying tuple
//! must be unique within its relation class, but the same tuple may appear
//! once in each class. Lookups are read-only.

use super::{ComponentDescriptor, Resource, ResourceRelation};
use crate::error::{CompdescError, Result};

impl ComponentDescriptor {
    /// Find the single local resource matching (type, name, version)
    pub fn get_local_resource(
        &self,
        resource_type: &str,
        name: &str,
        version: &str,
    ) -> Result<&Resource> {
        self.get_resource(ResourceRelation::Local, resource_type, name, version)
    }

    /// Find the single external resource matching (type, name, version)
    pub fn get_external_resource(
        &self,
        resource_type: &str,
        name: &str,
        version: &str,
    ) -> Result<&Resource> {
        self.get_resource(ResourceRelation::External, resource_type, name, version)
    }

    /// All resources with the given name, regardless of relation
    pub fn resources_by_name(&self, name: &str) -> Vec<&Resource> {
        self.component
            .resources
            .iter()
            .filter(|resource| resource.name == name)
            .collect()
    }

    fn get_resource(
        &self,
        relation: ResourceRelation,
        resource_type: &str,
        name: &str,
        version: &str,
    ) -> Result<&Resource> {
        let matches: Vec<&Resource> = self
            .component
            .resources
            .iter()
            .filter(|resource| {
                resource.relation == relation
                    && resource.resource_type == resource_type
                    && resource.name == name
                    && resource.version == version
            })
            .collect();

        match matches.as_slice() {
            [] => Err(CompdescError::ResourceNotFound {
                relation: relation.to_string(),
                resource_type: resource_type.to_string(),
                name: name.to_string(),
                version: version.to_string(),
            }),
            [resource] => Ok(resource),
            many => Err(CompdescError::AmbiguousResource {
                relation: relation.to_string(),
                resource_type: resource_type.to_string(),
                name: name.to_string(),
                version: version.to_string(),
                count: many.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_with(resources_yaml: &str) -> ComponentDescriptor {
        let yaml = format!(
            "meta:\n  schemaVersion: 'v2'\ncomponent:\n  name: 'n'\n  version: 'v1'\n  resources:\n{resources_yaml}"
        );
        ComponentDescriptor::from_yaml(&yaml).unwrap()
    }

    const FIXTURE: &str = "  - name: 'ftpRes'
    version: 'v1.7.2'
    type: 'custom1'
    relation: local
    access:
      type: 'x-ftp'
      url: ftp://example.com/my-resource
  - name: 'nodeMod'
    version: '0.0.1'
    type: 'nodeModule'
    relation: external
    access:
      type: 'npm'
      nodeModule: my-module
      version: 0.0.1
";

    #[test]
    fn test_get_local_resource() {
        let descriptor = descriptor_with(FIXTURE);
        let resource = descriptor
            .get_local_resource("custom1", "ftpRes", "v1.7.2")
            .unwrap();
        assert_eq!(
            resource.access.get("url").and_then(serde_json::Value::as_str),
            Some("ftp://example.com/my-resource")
        );
    }

    #[test]
    fn test_get_external_resource() {
        let descriptor = descriptor_with(FIXTURE);
        let resource = descriptor
            .get_external_resource("nodeModule", "nodeMod", "0.0.1")
            .unwrap();
        assert_eq!(resource.access.type_name(), "npm");
    }

    #[test]
    fn test_local_lookup_ignores_external_resources() {
        let descriptor = descriptor_with(FIXTURE);
        let err = descriptor
            .get_local_resource("nodeModule", "nodeMod", "0.0.1")
            .unwrap_err();
        assert!(matches!(err, CompdescError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_not_found_carries_tuple() {
        let descriptor = descriptor_with(FIXTURE);
        let err = descriptor
            .get_local_resource("custom1", "missing", "v1.7.2")
            .unwrap_err();
        assert!(err.to_string().contains("custom1/missing@v1.7.2"));
    }

    #[test]
    fn test_version_compared_literally() {
        let descriptor = descriptor_with(FIXTURE);
        // "1.7.2" and "v1.7.2" are different strings, no semver normalization
        let err = descriptor
            .get_local_resource("custom1", "ftpRes", "1.7.2")
            .unwrap_err();
        assert!(matches!(err, CompdescError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_duplicate_tuple_is_ambiguous() {
        let duplicated = "  - name: 'dup'
    version: 'v1'
    type: 'custom1'
    relation: local
    access:
      type: 'a'
  - name: 'dup'
    version: 'v1'
    type: 'custom1'
    relation: local
    access:
      type: 'b'
";
        let descriptor = descriptor_with(duplicated);
        let err = descriptor
            .get_local_resource("custom1", "dup", "v1")
            .unwrap_err();
        assert!(matches!(
            err,
            CompdescError::AmbiguousResource { count: 2, .. }
        ));
    }

    #[test]
    fn test_same_tuple_in_both_relations_resolves_independently() {
        let mirrored = "  - name: 'shared'
    version: 'v1'
    type: 'custom1'
    relation: local
    access:
      type: 'a'
  - name: 'shared'
    version: 'v1'
    type: 'custom1'
    relation: external
    access:
      type: 'b'
";
        let descriptor = descriptor_with(mirrored);
        let local = descriptor
            .get_local_resource("custom1", "shared", "v1")
            .unwrap();
        let external = descriptor
            .get_external_resource("custom1", "shared", "v1")
            .unwrap();
        assert_eq!(local.access.type_name(), "a");
        assert_eq!(external.access.type_name(), "b");
    }

    #[test]
    fn test_resources_by_name() {
        let descriptor = descriptor_with(FIXTURE);
        assert_eq!(descriptor.resources_by_name("ftpRes").len(), 1);
        assert_eq!(descriptor.resources_by_name("absent").len(), 0);
    }
}
