use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Node kind. Unrecognized strings are preserved as `Other` and rank like
/// a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Rack,
    Switch,
    #[default]
    Server,
    Asic,
    Patch,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rack => "rack",
            Self::Switch => "switch",
            Self::Server => "server",
            Self::Asic => "asic",
            Self::Patch => "patch",
            Self::Other(name) => name,
        }
    }

    /// Tier used when a node carries no explicit tier
    pub fn default_tier(&self) -> i32 {
        match self {
            Self::Switch => 3,
            Self::Rack | Self::Patch => 2,
            Self::Server | Self::Asic | Self::Other(_) => 1,
        }
    }

    /// Human label used as the prefix of generated node labels
    pub fn label(&self) -> &str {
        match self {
            Self::Rack => "Rack",
            Self::Switch => "Switch",
            Self::Server => "Server",
            Self::Asic => "ASIC",
            Self::Patch => "Patch Panel",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "rack" => Self::Rack,
            "switch" => Self::Switch,
            "server" => Self::Server,
            "asic" => Self::Asic,
            "patch" => Self::Patch,
            _ => Self::Other(value),
        }
    }
}

impl From<NodeKind> for String {
    fn from(value: NodeKind) -> Self {
        value.as_str().to_string()
    }
}

/// Render mode of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLayout {
    Tree,
    Grid,
}

/// Patch panel split counts are kept within this range
pub const SPLIT_COUNT_MIN: u32 = 2;
pub const SPLIT_COUNT_MAX: u32 = 64;
pub const SPLIT_COUNT_DEFAULT: u32 = 8;

/// Clamp a requested split count, falling back to the default when unset or zero
pub fn clamp_split_count(requested: Option<u32>) -> u32 {
    match requested {
        Some(n) if n > 0 => n.clamp(SPLIT_COUNT_MIN, SPLIT_COUNT_MAX),
        _ => SPLIT_COUNT_DEFAULT,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<NodeLayout>,
}

impl NodeData {
    /// Explicit tier if set, otherwise the kind default
    pub fn effective_tier(&self) -> i32 {
        self.tier.unwrap_or_else(|| self.kind.default_tier())
    }
}

/// A positioned device on the diagram.
///
/// Fields the rendering surface attaches (`type`, `width`, `selected`, ...)
/// are kept in `extra` so a load/save cycle does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            data: NodeData {
                label: label.into(),
                kind,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_tier(mut self, tier: i32) -> Self {
        self.data.tier = Some(tier);
        self
    }

    pub fn tier(&self) -> i32 {
        self.data.effective_tier()
    }

    /// Label used for ordering; falls back to the id when empty
    pub fn sort_key(&self) -> &str {
        if self.data.label.is_empty() {
            &self.id
        } else {
            &self.data.label
        }
    }
}

/// Side of a node a handle sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Which end of an edge a handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleDirection {
    In,
    Out,
}

impl HandleDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// One of the eight canonical attachment points (`top-out`, `left-in`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub side: HandleSide,
    pub direction: HandleDirection,
}

impl HandleId {
    pub const BOTTOM_OUT: HandleId = HandleId::new(HandleSide::Bottom, HandleDirection::Out);
    pub const TOP_IN: HandleId = HandleId::new(HandleSide::Top, HandleDirection::In);

    pub const fn new(side: HandleSide, direction: HandleDirection) -> Self {
        Self { side, direction }
    }

    /// Parse a suffixed handle such as `bottom-out`
    pub fn parse(value: &str) -> Option<Self> {
        let (side, direction) = value.rsplit_once('-')?;
        let direction = match direction {
            "in" => HandleDirection::In,
            "out" => HandleDirection::Out,
            _ => return None,
        };
        Some(Self::new(HandleSide::parse(side)?, direction))
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side.as_str(), self.direction.as_str())
    }
}

/// A connection between two nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// Top-down edge between two nodes using the canonical handles
    pub fn link(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: Some(HandleId::BOTTOM_OUT.to_string()),
            target_handle: Some(HandleId::TOP_IN.to_string()),
            label: Some(label.into()),
            extra: Map::new(),
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Topology family identifier. Unknown strings are preserved as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TopologyType {
    #[default]
    Custom,
    LeafSpine,
    FatTree,
    ThreeTier,
    ExpandedClos,
    CoreAndPod,
    Torus2d,
    Torus3d,
    Dragonfly,
    Butterfly,
    Mesh,
    Ring,
    Star,
    Other(String),
}

impl TopologyType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Custom => "custom",
            Self::LeafSpine => "leaf-spine",
            Self::FatTree => "fat-tree",
            Self::ThreeTier => "three-tier",
            Self::ExpandedClos => "expanded-clos",
            Self::CoreAndPod => "core-and-pod",
            Self::Torus2d => "torus-2d",
            Self::Torus3d => "torus-3d",
            Self::Dragonfly => "dragonfly",
            Self::Butterfly => "butterfly",
            Self::Mesh => "mesh",
            Self::Ring => "ring",
            Self::Star => "star",
            Self::Other(name) => name,
        }
    }

    /// Families whose nodes render in grid mode rather than as a tree
    pub fn is_non_tree(&self) -> bool {
        matches!(
            self,
            Self::Torus2d
                | Self::Torus3d
                | Self::Dragonfly
                | Self::Butterfly
                | Self::Mesh
                | Self::Ring
                | Self::Star
        )
    }
}

impl From<String> for TopologyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "custom" => Self::Custom,
            "leaf-spine" => Self::LeafSpine,
            "fat-tree" => Self::FatTree,
            "three-tier" => Self::ThreeTier,
            "expanded-clos" => Self::ExpandedClos,
            "core-and-pod" => Self::CoreAndPod,
            "torus-2d" => Self::Torus2d,
            "torus-3d" => Self::Torus3d,
            "dragonfly" => Self::Dragonfly,
            "butterfly" => Self::Butterfly,
            "mesh" => Self::Mesh,
            "ring" => Self::Ring,
            "star" => Self::Star,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TopologyType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TopologyType> for String {
    fn from(value: TopologyType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TopologyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open map of tuning values (`layerGap`, `nodeSpacingX`, `rows`, ...).
///
/// Each layout family reads the keys it needs. Zero, missing and
/// non-numeric values all read as "unset" so the family default applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopologyParams(pub Map<String, Value>);

impl TopologyParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        let n = match self.0.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (n.is_finite() && n != 0.0).then_some(n)
    }

    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// Positive integer count, at least 1
    pub fn count_or(&self, key: &str, default: usize) -> usize {
        match self.number(key) {
            Some(n) if n >= 1.0 => n.floor() as usize,
            _ => default,
        }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }
}

/// Options that tweak the generic tiered layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    #[serde(default)]
    pub end_gap: bool,
}

/// The editable graph document owned by the host application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topo_type: TopologyType,
    #[serde(default)]
    pub topo_params: TopologyParams,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphModel {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
