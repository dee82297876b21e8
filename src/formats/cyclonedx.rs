//! CycloneDX adapter.
//!
//! Supports CycloneDX 1.4, 1.5 and 1.6 in JSON.
//!
//! Mapping from the canonical graph:
//!
//! - the first root element becomes `metadata.component`, other nodes become
//!   `components`; node ids are carried as `bom-ref`
//! - well-known properties map onto native component fields, everything else
//!   goes into component `properties`
//! - only `depends-on` edges are representable (`dependencies`)
//!
//! Additional root elements and other edge kinds are dropped with a warning.

use super::{ensure_supported, AdapterError, FormatAdapter, FormatDescriptor};
use crate::model::{keys, Edge, EdgeKind, HashAlgorithm, Node, NodeId, NodeList};
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const SUPPORTED_VERSIONS: &[&str] = &["1.4", "1.5", "1.6"];

/// Adapter for CycloneDX JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycloneDxAdapter;

impl CycloneDxAdapter {
    /// Create a new CycloneDX adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build a BOM structure from the canonical graph
    fn convert_from_graph(&self, graph: &NodeList, spec_version: &str) -> CycloneDxBom {
        let primary = graph.root_elements().first();
        if graph.root_elements().len() > 1 {
            tracing::warn!(
                roots = graph.root_elements().len(),
                "CycloneDX carries a single metadata.component, extra root elements are dropped"
            );
        }

        let mut metadata_component = None;
        let mut components = Vec::new();
        for node in graph.nodes() {
            let component = convert_node(node);
            if Some(&node.id) == primary {
                metadata_component = Some(component);
            } else {
                components.push(component);
            }
        }

        let mut dependencies: IndexMap<&NodeId, Vec<String>> = IndexMap::new();
        let mut dropped = 0usize;
        for edge in graph.edges() {
            if edge.kind == EdgeKind::DependsOn {
                dependencies
                    .entry(&edge.from)
                    .or_default()
                    .push(edge.to.to_string());
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::warn!(
                dropped,
                "CycloneDX dependencies only express depends-on, other edge kinds are dropped"
            );
        }

        CycloneDxBom {
            bom_format: Some("CycloneDX".to_string()),
            spec_version: spec_version.to_string(),
            version: Some(1),
            metadata: Some(CdxMetadata {
                timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                component: metadata_component,
            }),
            components: (!components.is_empty()).then_some(components),
            dependencies: (!dependencies.is_empty()).then(|| {
                dependencies
                    .into_iter()
                    .map(|(from, depends_on)| CdxDependency {
                        ref_field: from.to_string(),
                        depends_on: Some(depends_on),
                    })
                    .collect()
            }),
        }
    }

    /// Convert a parsed BOM into the canonical graph
    fn convert_to_graph(&self, cdx: CycloneDxBom) -> Result<NodeList, AdapterError> {
        let mut builder = NodeList::builder();

        if let Some(component) = cdx.metadata.and_then(|m| m.component) {
            let node = convert_component(component)?;
            let id = node.id.clone();
            builder.add_node(node);
            builder.add_root(id);
        }

        for component in cdx.components.unwrap_or_default() {
            builder.add_node(convert_component(component)?);
        }

        for dep in cdx.dependencies.unwrap_or_default() {
            let from = NodeId::from(dep.ref_field);
            if !builder.contains_node(&from) {
                tracing::debug!(bom_ref = %from, "dependency entry for unknown bom-ref skipped");
                continue;
            }
            for depends_on in dep.depends_on.unwrap_or_default() {
                let to = NodeId::from(depends_on);
                if builder.contains_node(&to) {
                    builder.add_edge(Edge::new(from.clone(), to, EdgeKind::DependsOn));
                } else {
                    tracing::debug!(from = %from, to = %to, "dependency on unknown bom-ref skipped");
                }
            }
        }

        Ok(builder.build()?)
    }
}

/// Convert a canonical node into a CycloneDX component
fn convert_node(node: &Node) -> CdxComponent {
    let owned = |key: &str| node.property(key).map(str::to_string);

    let hashes: Vec<CdxHash> = node
        .hashes()
        .map(|(alg, content)| CdxHash {
            alg: alg.cyclonedx_name(),
            content: content.to_string(),
        })
        .collect();

    let properties: Vec<CdxProperty> = node
        .extra_properties()
        .map(|(name, value)| CdxProperty {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();

    CdxComponent {
        component_type: owned(keys::TYPE),
        bom_ref: Some(node.id.to_string()),
        name: owned(keys::NAME),
        version: owned(keys::VERSION),
        group: owned(keys::GROUP),
        purl: owned(keys::PURL),
        cpe: owned(keys::CPE),
        description: owned(keys::DESCRIPTION),
        licenses: owned(keys::LICENSE).map(|expression| {
            vec![CdxLicenseChoice {
                license: None,
                expression: Some(expression),
            }]
        }),
        supplier: owned(keys::SUPPLIER).map(|name| CdxSupplier { name }),
        hashes: (!hashes.is_empty()).then_some(hashes),
        properties: (!properties.is_empty()).then_some(properties),
    }
}

/// Convert a CycloneDX component into a canonical node
fn convert_component(cdx: CdxComponent) -> Result<Node, AdapterError> {
    let id = cdx
        .bom_ref
        .clone()
        .or_else(|| cdx.name.clone())
        .ok_or_else(|| AdapterError::missing_field("bom-ref", "component"))?;
    let mut node = Node::new(id);

    // Generic properties first so native fields win on key collisions
    for prop in cdx.properties.unwrap_or_default() {
        node.set_property(prop.name, prop.value);
    }

    let native = [
        (keys::TYPE, cdx.component_type),
        (keys::NAME, cdx.name),
        (keys::VERSION, cdx.version),
        (keys::GROUP, cdx.group),
        (keys::PURL, cdx.purl),
        (keys::CPE, cdx.cpe),
        (keys::DESCRIPTION, cdx.description),
        (keys::SUPPLIER, cdx.supplier.map(|s| s.name)),
    ];
    for (key, value) in native {
        if let Some(value) = value {
            node.set_property(key, value);
        }
    }

    let licenses: Vec<String> = cdx
        .licenses
        .unwrap_or_default()
        .into_iter()
        .filter_map(|choice| {
            choice
                .expression
                .or_else(|| choice.license.and_then(|l| l.id.or(l.name)))
        })
        .collect();
    if !licenses.is_empty() {
        node.set_property(keys::LICENSE, licenses.join(" AND "));
    }

    for hash in cdx.hashes.unwrap_or_default() {
        let algorithm = HashAlgorithm::from_cyclonedx(&hash.alg);
        node.set_property(keys::hash(&algorithm), hash.content);
    }

    Ok(node)
}

impl FormatAdapter for CycloneDxAdapter {
    fn name(&self) -> &str {
        "cyclonedx"
    }

    fn formats(&self) -> Vec<FormatDescriptor> {
        SUPPORTED_VERSIONS
            .iter()
            .map(|v| FormatDescriptor::cyclonedx_json(*v))
            .collect()
    }

    fn encode(&self, graph: &NodeList, format: &FormatDescriptor) -> Result<Vec<u8>, AdapterError> {
        ensure_supported(self, format)?;
        let bom = self.convert_from_graph(graph, format.version());
        Ok(serde_json::to_vec_pretty(&bom)?)
    }

    fn decode(&self, bytes: &[u8], format: &FormatDescriptor) -> Result<NodeList, AdapterError> {
        ensure_supported(self, format)?;
        let cdx: CycloneDxBom = serde_json::from_slice(bytes)?;

        if let Some(bom_format) = &cdx.bom_format {
            if bom_format != "CycloneDX" {
                return Err(AdapterError::invalid_value(
                    "bomFormat",
                    format!("expected 'CycloneDX', found '{bom_format}'"),
                ));
            }
        }
        if cdx.spec_version != format.version() {
            return Err(AdapterError::VersionMismatch {
                expected: format.version().to_string(),
                found: cdx.spec_version,
            });
        }

        self.convert_to_graph(cdx)
    }

    fn detect(&self, bytes: &[u8]) -> Option<FormatDescriptor> {
        let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
        if value.get("bomFormat")?.as_str()? != "CycloneDX" {
            return None;
        }
        let version = value.get("specVersion")?.as_str()?;
        Some(FormatDescriptor::cyclonedx_json(version))
    }
}

// CycloneDX JSON structures for serialization and deserialization

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    #[serde(skip_serializing_if = "Option::is_none")]
    bom_format: Option<String>,
    spec_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<CdxMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Vec<CdxComponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<CdxComponent>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    component_type: Option<String>,
    #[serde(rename = "bom-ref", alias = "bomRef", skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<CdxLicenseChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<CdxSupplier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<Vec<CdxHash>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Vec<CdxProperty>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxLicenseChoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<CdxLicense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expression: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxLicense {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxSupplier {
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxHash {
    alg: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxProperty {
    name: String,
    value: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    ref_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    depends_on: Option<Vec<String>>,
}
