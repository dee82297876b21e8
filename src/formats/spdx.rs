//! SPDX adapter.
//!
//! Supports SPDX 2.2 and 2.3 in JSON. Every node becomes a package.
//!
//! - root elements are `SPDXRef-DOCUMENT DESCRIBES <package>` relationships
//! - edges are relationships; the `*_DEPENDENCY_OF` types point from the
//!   dependency to the dependent, so those edges are reversed on the way
//! - `name`, `version`, `type` (`primaryPackagePurpose`), `purl` and `cpe`
//!   (external refs), `license` (`licenseDeclared`), `supplier`,
//!   `description` and checksums map onto native package fields
//! - remaining properties are package annotations of type `OTHER`
//!
//! Node ids that are not valid SPDX element ids are rewritten to one; the
//! original id travels in an annotation and is restored on decode.

use super::{ensure_supported, AdapterError, FormatAdapter, FormatDescriptor};
use crate::model::{keys, Edge, EdgeKind, HashAlgorithm, Node, NodeId, NodeList};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const SUPPORTED_VERSIONS: &[&str] = &["2.2", "2.3"];
const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";
const NOASSERTION: &str = "NOASSERTION";
const ANNOTATOR: &str = concat!("Tool: sbom-conformance-", env!("CARGO_PKG_VERSION"));
const PROPERTY_PREFIX: &str = "property:";
const NODE_ID_PREFIX: &str = "node-id=";

static SPDX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDXRef-[A-Za-z0-9.\-]+$").expect("static regex"));
static SPDX_ID_INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9.\-]+").expect("static regex"));

/// Adapter for SPDX JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpdxAdapter;

impl SpdxAdapter {
    /// Create a new SPDX adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build an SPDX document from the canonical graph
    fn convert_from_graph(
        &self,
        graph: &NodeList,
        spdx_version: &str,
    ) -> Result<SpdxDocument, AdapterError> {
        let ids = assign_element_ids(graph)?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let purl_category = if spdx_version == "2.2" {
            "PACKAGE_MANAGER"
        } else {
            "PACKAGE-MANAGER"
        };

        let packages = graph
            .nodes()
            .map(|node| convert_node(node, &ids[&node.id], purl_category, &now))
            .collect();

        let mut relationships: Vec<SpdxRelationship> = graph
            .root_elements()
            .iter()
            .map(|root| SpdxRelationship {
                spdx_element_id: DOCUMENT_ID.to_string(),
                relationship_type: "DESCRIBES".to_string(),
                related_spdx_element: ids[root].clone(),
            })
            .collect();
        for edge in graph.edges() {
            let (relationship_type, reversed) = relationship_for(edge.kind);
            let (from, to) = if reversed {
                (&edge.to, &edge.from)
            } else {
                (&edge.from, &edge.to)
            };
            relationships.push(SpdxRelationship {
                spdx_element_id: ids[from].clone(),
                relationship_type: relationship_type.to_string(),
                related_spdx_element: ids[to].clone(),
            });
        }

        let name = graph
            .root_elements()
            .first()
            .and_then(|root| graph.node(root))
            .and_then(Node::name)
            .unwrap_or("sbom-conformance")
            .to_string();

        Ok(SpdxDocument {
            spdx_version: format!("SPDX-{spdx_version}"),
            spdx_id: DOCUMENT_ID.to_string(),
            data_license: Some("CC0-1.0".to_string()),
            document_namespace: Some(format!(
                "https://spdx.org/spdxdocs/sbom-conformance-{}",
                graph.fingerprint_hex()
            )),
            name: Some(name),
            creation_info: Some(SpdxCreationInfo {
                created: Some(now),
                creators: vec![ANNOTATOR.to_string()],
            }),
            document_describes: None,
            packages: Some(packages),
            relationships: Some(relationships),
        })
    }

    /// Convert a parsed SPDX document into the canonical graph
    fn convert_to_graph(&self, spdx: SpdxDocument) -> Result<NodeList, AdapterError> {
        let mut builder = NodeList::builder();
        let mut id_map: HashMap<String, NodeId> = HashMap::new();

        for pkg in spdx.packages.unwrap_or_default() {
            let element_id = pkg.spdx_id.clone();
            let node = convert_package(pkg);
            id_map.insert(element_id, node.id.clone());
            builder.add_node(node);
        }

        for described in spdx.document_describes.unwrap_or_default() {
            if let Some(id) = id_map.get(&described) {
                builder.add_root(id.clone());
            }
        }

        for rel in spdx.relationships.unwrap_or_default() {
            if rel.relationship_type == "DESCRIBES" && rel.spdx_element_id == spdx.spdx_id {
                match id_map.get(&rel.related_spdx_element) {
                    Some(id) => {
                        builder.add_root(id.clone());
                    }
                    None => tracing::debug!(
                        element = %rel.related_spdx_element,
                        "document describes an element that is not a package"
                    ),
                }
                continue;
            }

            let Some((kind, reversed)) = kind_for(&rel.relationship_type) else {
                tracing::warn!(
                    relationship = %rel.relationship_type,
                    "unsupported SPDX relationship type skipped"
                );
                continue;
            };
            let (Some(from), Some(to)) = (
                id_map.get(&rel.spdx_element_id),
                id_map.get(&rel.related_spdx_element),
            ) else {
                tracing::debug!(
                    from = %rel.spdx_element_id,
                    to = %rel.related_spdx_element,
                    "relationship between unknown elements skipped"
                );
                continue;
            };
            let edge = if reversed {
                Edge::new(to.clone(), from.clone(), kind)
            } else {
                Edge::new(from.clone(), to.clone(), kind)
            };
            builder.add_edge(edge);
        }

        Ok(builder.build()?)
    }
}

/// Map every node id to a valid, unique SPDX element id.
fn assign_element_ids(graph: &NodeList) -> Result<HashMap<NodeId, String>, AdapterError> {
    let mut ids = HashMap::with_capacity(graph.node_count());
    let mut used = HashSet::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let element_id = element_id_for(&node.id);
        if !used.insert(element_id.clone()) {
            return Err(AdapterError::Unrepresentable(format!(
                "node ids collide on SPDX element id '{element_id}'"
            )));
        }
        ids.insert(node.id.clone(), element_id);
    }
    Ok(ids)
}

fn element_id_for(id: &NodeId) -> String {
    if SPDX_ID.is_match(id.as_str()) {
        id.to_string()
    } else {
        let sanitized = SPDX_ID_INVALID_CHARS.replace_all(id.as_str(), "-");
        format!("SPDXRef-{}", sanitized.trim_matches('-'))
    }
}

/// SPDX relationship type for an edge kind, and whether the edge is reversed.
fn relationship_for(kind: EdgeKind) -> (&'static str, bool) {
    match kind {
        EdgeKind::DependsOn => ("DEPENDS_ON", false),
        EdgeKind::DevDependsOn => ("DEV_DEPENDENCY_OF", true),
        EdgeKind::BuildDependsOn => ("BUILD_DEPENDENCY_OF", true),
        EdgeKind::TestDependsOn => ("TEST_DEPENDENCY_OF", true),
        EdgeKind::RuntimeDependsOn => ("RUNTIME_DEPENDENCY_OF", true),
        EdgeKind::OptionalDependsOn => ("OPTIONAL_DEPENDENCY_OF", true),
        EdgeKind::ProvidedDependsOn => ("PROVIDED_DEPENDENCY_OF", true),
        EdgeKind::Contains => ("CONTAINS", false),
        EdgeKind::Describes => ("DESCRIBES", false),
        EdgeKind::Generates => ("GENERATES", false),
        EdgeKind::AncestorOf => ("ANCESTOR_OF", false),
        EdgeKind::DescendantOf => ("DESCENDANT_OF", false),
        EdgeKind::VariantOf => ("VARIANT_OF", false),
        EdgeKind::DistributionArtifact => ("DISTRIBUTION_ARTIFACT", false),
        EdgeKind::PatchFor => ("PATCH_FOR", false),
        EdgeKind::CopyOf => ("COPY_OF", false),
        EdgeKind::DynamicLink => ("DYNAMIC_LINK", false),
        EdgeKind::StaticLink => ("STATIC_LINK", false),
    }
}

/// Edge kind for an SPDX relationship type, and whether the edge is reversed.
fn kind_for(relationship_type: &str) -> Option<(EdgeKind, bool)> {
    let mapped = match relationship_type {
        "DEPENDENCY_OF" => (EdgeKind::DependsOn, true),
        "CONTAINED_BY" => (EdgeKind::Contains, true),
        "DESCRIBED_BY" => (EdgeKind::Describes, true),
        "GENERATED_FROM" => (EdgeKind::Generates, true),
        other => {
            return EdgeKind::ALL
                .into_iter()
                .map(|kind| (kind, relationship_for(kind)))
                .find(|(_, (name, _))| *name == other)
                .map(|(kind, (_, reversed))| (kind, reversed))
        }
    };
    Some(mapped)
}

/// Convert a canonical node into an SPDX package
fn convert_node(node: &Node, element_id: &str, purl_category: &str, now: &str) -> SpdxPackage {
    let owned = |key: &str| node.property(key).map(str::to_string);

    let mut external_refs = Vec::new();
    if let Some(purl) = owned(keys::PURL) {
        external_refs.push(SpdxExternalRef {
            reference_category: purl_category.to_string(),
            reference_type: "purl".to_string(),
            reference_locator: purl,
        });
    }
    if let Some(cpe) = owned(keys::CPE) {
        external_refs.push(SpdxExternalRef {
            reference_category: "SECURITY".to_string(),
            reference_type: "cpe23Type".to_string(),
            reference_locator: cpe,
        });
    }

    let checksums: Vec<SpdxChecksum> = node
        .hashes()
        .map(|(alg, value)| SpdxChecksum {
            algorithm: alg.spdx_name(),
            checksum_value: value.to_string(),
        })
        .collect();

    let annotation = |comment: String| SpdxAnnotation {
        annotation_date: now.to_string(),
        annotation_type: "OTHER".to_string(),
        annotator: ANNOTATOR.to_string(),
        comment,
    };
    let mut annotations: Vec<SpdxAnnotation> = Vec::new();
    if node.id.as_str() != element_id {
        annotations.push(annotation(format!("{NODE_ID_PREFIX}{}", node.id)));
    }
    // `group` has no SPDX field and travels with the generic properties
    let group = node.property(keys::GROUP).map(|g| (keys::GROUP, g));
    for (key, value) in group.into_iter().chain(node.extra_properties()) {
        annotations.push(annotation(format!("{PROPERTY_PREFIX}{key}={value}")));
    }

    SpdxPackage {
        spdx_id: element_id.to_string(),
        name: owned(keys::NAME),
        version_info: owned(keys::VERSION),
        primary_package_purpose: node
            .property(keys::TYPE)
            .map(|t| t.to_uppercase().replace('-', "_")),
        download_location: Some(NOASSERTION.to_string()),
        license_declared: owned(keys::LICENSE),
        supplier: owned(keys::SUPPLIER).map(|s| format!("Organization: {s}")),
        description: owned(keys::DESCRIPTION),
        checksums: (!checksums.is_empty()).then_some(checksums),
        external_refs: (!external_refs.is_empty()).then_some(external_refs),
        annotations: (!annotations.is_empty()).then_some(annotations),
    }
}

/// Convert an SPDX package into a canonical node
fn convert_package(pkg: SpdxPackage) -> Node {
    let assertion = |value: Option<String>| {
        value.filter(|v| v != NOASSERTION && v != "NONE" && !v.is_empty())
    };

    let mut id = NodeId::from(pkg.spdx_id);
    let mut properties = Vec::new();
    for annotation in pkg.annotations.unwrap_or_default() {
        if let Some(original) = annotation.comment.strip_prefix(NODE_ID_PREFIX) {
            id = NodeId::from(original);
        } else if let Some((key, value)) = annotation
            .comment
            .strip_prefix(PROPERTY_PREFIX)
            .and_then(|rest| rest.split_once('='))
        {
            properties.push((key.to_string(), value.to_string()));
        }
    }

    let mut node = Node::new(id);
    for (key, value) in properties {
        node.set_property(key, value);
    }

    let supplier = assertion(pkg.supplier).map(|s| {
        s.strip_prefix("Organization:")
            .or_else(|| s.strip_prefix("Person:"))
            .unwrap_or(&s)
            .trim()
            .to_string()
    });
    let native = [
        (keys::NAME, pkg.name),
        (keys::VERSION, pkg.version_info),
        (
            keys::TYPE,
            pkg.primary_package_purpose
                .map(|p| p.to_lowercase().replace('_', "-")),
        ),
        (keys::LICENSE, assertion(pkg.license_declared)),
        (keys::SUPPLIER, supplier),
        (keys::DESCRIPTION, pkg.description),
    ];
    for (key, value) in native {
        if let Some(value) = value {
            node.set_property(key, value);
        }
    }

    for ext_ref in pkg.external_refs.unwrap_or_default() {
        match ext_ref.reference_type.as_str() {
            "purl" => {
                node.set_property(keys::PURL, ext_ref.reference_locator);
            }
            "cpe23Type" | "cpe22Type" => {
                node.set_property(keys::CPE, ext_ref.reference_locator);
            }
            _ => {}
        }
    }

    for checksum in pkg.checksums.unwrap_or_default() {
        let algorithm = HashAlgorithm::from_spdx(&checksum.algorithm);
        node.set_property(keys::hash(&algorithm), checksum.checksum_value);
    }

    node
}

impl FormatAdapter for SpdxAdapter {
    fn name(&self) -> &str {
        "spdx"
    }

    fn formats(&self) -> Vec<FormatDescriptor> {
        SUPPORTED_VERSIONS
            .iter()
            .map(|v| FormatDescriptor::spdx_json(*v))
            .collect()
    }

    fn encode(&self, graph: &NodeList, format: &FormatDescriptor) -> Result<Vec<u8>, AdapterError> {
        ensure_supported(self, format)?;
        let document = self.convert_from_graph(graph, format.version())?;
        Ok(serde_json::to_vec_pretty(&document)?)
    }

    fn decode(&self, bytes: &[u8], format: &FormatDescriptor) -> Result<NodeList, AdapterError> {
        ensure_supported(self, format)?;
        let spdx: SpdxDocument = serde_json::from_slice(bytes)?;

        let version = spdx
            .spdx_version
            .strip_prefix("SPDX-")
            .unwrap_or(&spdx.spdx_version);
        if version != format.version() {
            return Err(AdapterError::VersionMismatch {
                expected: format.version().to_string(),
                found: version.to_string(),
            });
        }

        self.convert_to_graph(spdx)
    }

    fn detect(&self, bytes: &[u8]) -> Option<FormatDescriptor> {
        let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
        let version = value.get("spdxVersion")?.as_str()?.strip_prefix("SPDX-")?;
        Some(FormatDescriptor::spdx_json(version))
    }
}

// SPDX JSON structures for serialization and deserialization

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    spdx_version: String,
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creation_info: Option<SpdxCreationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_describes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    packages: Option<Vec<SpdxPackage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationships: Option<Vec<SpdxRelationship>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxCreationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(default)]
    creators: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_package_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_declared: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksums: Option<Vec<SpdxChecksum>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_refs: Option<Vec<SpdxExternalRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotations: Option<Vec<SpdxAnnotation>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxChecksum {
    algorithm: String,
    checksum_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExternalRef {
    reference_category: String,
    reference_type: String,
    reference_locator: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxAnnotation {
    annotation_date: String,
    annotation_type: String,
    annotator: String,
    comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationship {
    spdx_element_id: String,
    relationship_type: String,
    related_spdx_element: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NodeList {
        NodeList::builder()
            .with_node(
                Node::new("SPDXRef-Package-curl")
                    .with_property("name", "curl")
                    .with_property("version", "8.5.0")
                    .with_property("type", "application")
                    .with_property("license", "curl")
                    .with_property("purl", "pkg:generic/curl@8.5.0"),
            )
            .with_node(
                Node::new("SPDXRef-Package-libssl")
                    .with_property("name", "libssl")
                    .with_property("group", "openssl")
                    .with_property("x-build", "static")
                    .with_hash(&HashAlgorithm::Sha1, "da39a3ee5e6b4b0d"),
            )
            .with_node(Node::new("SPDXRef-Package-zlib").with_property("name", "zlib"))
            .with_edge(Edge::new(
                "SPDXRef-Package-curl",
                "SPDXRef-Package-libssl",
                EdgeKind::DependsOn,
            ))
            .with_edge(Edge::new(
                "SPDXRef-Package-curl",
                "SPDXRef-Package-zlib",
                EdgeKind::BuildDependsOn,
            ))
            .with_edge(Edge::new(
                "SPDXRef-Package-curl",
                "SPDXRef-Package-zlib",
                EdgeKind::StaticLink,
            ))
            .with_root("SPDXRef-Package-curl")
            .build()
            .unwrap()
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let adapter = SpdxAdapter::new();
        let format = FormatDescriptor::spdx_json("2.3");
        let bytes = adapter.encode(&sample(), &format).unwrap();
        let back = adapter.decode(&bytes, &format).unwrap();
        assert_eq!(back.fingerprint(), sample().fingerprint());
    }

    #[test]
    fn test_dependency_of_relationships_are_reversed() {
        let adapter = SpdxAdapter::new();
        let bytes = adapter
            .encode(&sample(), &FormatDescriptor::spdx_json("2.3"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let build_dep = value["relationships"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["relationshipType"] == "BUILD_DEPENDENCY_OF")
            .unwrap();
        assert_eq!(build_dep["spdxElementId"], "SPDXRef-Package-zlib");
        assert_eq!(build_dep["relatedSpdxElement"], "SPDXRef-Package-curl");
    }

    #[test]
    fn test_non_spdx_ids_are_restored() {
        let graph = NodeList::builder()
            .with_node(Node::new("pkg:npm/left-pad@1.3.0").with_property("name", "left-pad"))
            .with_root("pkg:npm/left-pad@1.3.0")
            .build()
            .unwrap();
        let adapter = SpdxAdapter::new();
        let format = FormatDescriptor::spdx_json("2.2");
        let bytes = adapter.encode(&graph, &format).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value["packages"][0]["SPDXID"],
            "SPDXRef-pkg-npm-left-pad-1.3.0"
        );

        let back = adapter.decode(&bytes, &format).unwrap();
        assert_eq!(back.fingerprint(), graph.fingerprint());
    }

    #[test]
    fn test_colliding_ids_are_unrepresentable() {
        let graph = NodeList::builder()
            .with_node(Node::new("a/b"))
            .with_node(Node::new("a:b"))
            .build()
            .unwrap();
        let err = SpdxAdapter::new()
            .encode(&graph, &FormatDescriptor::spdx_json("2.3"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::Unrepresentable(_)));
    }

    #[test]
    fn test_decode_real_world_shapes() {
        let doc = br#"{
            "spdxVersion": "SPDX-2.3",
            "SPDXID": "SPDXRef-DOCUMENT",
            "name": "curl",
            "documentDescribes": ["SPDXRef-curl"],
            "packages": [
                {"SPDXID": "SPDXRef-curl", "name": "curl", "licenseDeclared": "NOASSERTION",
                 "supplier": "Person: Daniel", "downloadLocation": "NOASSERTION"},
                {"SPDXID": "SPDXRef-zlib", "name": "zlib",
                 "checksums": [{"algorithm": "SHA256", "checksumValue": "ff"}]}
            ],
            "relationships": [
                {"spdxElementId": "SPDXRef-DOCUMENT", "relationshipType": "DESCRIBES", "relatedSpdxElement": "SPDXRef-curl"},
                {"spdxElementId": "SPDXRef-zlib", "relationshipType": "DEPENDENCY_OF", "relatedSpdxElement": "SPDXRef-curl"},
                {"spdxElementId": "SPDXRef-curl", "relationshipType": "OTHER", "relatedSpdxElement": "SPDXRef-zlib"},
                {"spdxElementId": "SPDXRef-curl", "relationshipType": "CONTAINS", "relatedSpdxElement": "NOASSERTION"}
            ]
        }"#;
        let graph = SpdxAdapter::new()
            .decode(doc, &FormatDescriptor::spdx_json("2.3"))
            .unwrap();

        assert_eq!(graph.root_elements(), &[NodeId::from("SPDXRef-curl")]);
        let edges: Vec<_> = graph.edges().cloned().collect();
        assert_eq!(
            edges,
            vec![Edge::new("SPDXRef-curl", "SPDXRef-zlib", EdgeKind::DependsOn)]
        );
        let curl = graph.node(&"SPDXRef-curl".into()).unwrap();
        assert_eq!(curl.property("license"), None);
        assert_eq!(curl.property("supplier"), Some("Daniel"));
        let zlib = graph.node(&"SPDXRef-zlib".into()).unwrap();
        assert_eq!(zlib.property("hash:sha-256"), Some("ff"));
    }

    #[test]
    fn test_decode_version_mismatch() {
        let doc = br#"{"spdxVersion": "SPDX-2.2", "SPDXID": "SPDXRef-DOCUMENT"}"#;
        let err = SpdxAdapter::new()
            .decode(doc, &FormatDescriptor::spdx_json("2.3"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::VersionMismatch { .. }));
    }

    #[test]
    fn test_every_edge_kind_maps_back() {
        for kind in EdgeKind::ALL {
            let (name, reversed) = relationship_for(kind);
            assert_eq!(kind_for(name), Some((kind, reversed)));
        }
    }
}
