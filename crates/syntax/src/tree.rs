//! Arena syntax tree and typed read-only views.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. The tree
//! is built once by the parser and never mutated afterwards; fixes are
//! expressed as text edits, not tree rewrites.

use mqtt_types::OffsetRange;

/// Handle to a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Index of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Module,
    ImportDecl,
    ListenerDecl,
    ServiceDecl,
    RemoteMethod,
    ResourceMethod,
    Method,
    Field,
}

impl SyntaxKind {
    /// Returns `true` for nodes that appear inside a service body.
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(
            self,
            Self::RemoteMethod | Self::ResourceMethod | Self::Method | Self::Field
        )
    }
}

/// A (possibly module-qualified) type reference such as `mqtt:Listener`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub prefix: Option<String>,
    pub name: String,
}

impl TypeRef {
    #[must_use]
    pub fn new(prefix: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            name: name.into(),
        }
    }

    /// Returns `true` if this reference names `name` qualified by `prefix`.
    #[must_use]
    pub fn is(&self, prefix: &str, name: &str) -> bool {
        self.prefix.as_deref() == Some(prefix) && self.name == name
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One expression after `on` in a service declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachPoint {
    /// A reference to a module-level listener: `service on mqttSubscriber`
    Listener { name: String, span: OffsetRange },
    /// An inline listener: `service on new mqtt:Listener(...)`
    New {
        type_ref: Option<TypeRef>,
        span: OffsetRange,
    },
    /// Anything else (function calls, field access, ...)
    Other { span: OffsetRange },
}

impl AttachPoint {
    #[must_use]
    pub const fn span(&self) -> OffsetRange {
        match self {
            Self::Listener { span, .. } | Self::New { span, .. } | Self::Other { span } => *span,
        }
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Type as written, e.g. `mqtt:Message` or `readonly & mqtt:Message`
    pub type_text: String,
    pub name: String,
    pub span: OffsetRange,
    pub has_default: bool,
}

impl Param {
    /// The type name without module prefix, optional marker or `readonly &`.
    ///
    /// `readonly & mqtt:Message` and `mqtt:Message?` both yield `Message`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        let ty = self
            .type_text
            .rsplit('&')
            .next()
            .unwrap_or(&self.type_text)
            .trim()
            .trim_end_matches('?');
        ty.rsplit(':').next().unwrap_or(ty).trim()
    }

    /// The module prefix of the type, if it is qualified.
    #[must_use]
    pub fn type_prefix(&self) -> Option<&str> {
        let ty = self.type_text.rsplit('&').next()?.trim();
        ty.split_once(':').map(|(prefix, _)| prefix.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportData {
    pub org: Option<String>,
    pub module_path: Vec<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListenerData {
    pub name: String,
    pub declared_type: Option<TypeRef>,
    pub init_type: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceData {
    pub type_desc: Option<String>,
    pub attach_points: Vec<AttachPoint>,
    pub open_brace: OffsetRange,
    pub close_brace: OffsetRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionData {
    pub qualifiers: Vec<String>,
    pub name: String,
    pub name_span: OffsetRange,
    pub params: Vec<Param>,
    pub params_span: OffsetRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldData {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeData {
    Module,
    Import(ImportData),
    Listener(ListenerData),
    Service(ServiceData),
    Function(FunctionData),
    Field(FieldData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub kind: SyntaxKind,
    pub span: OffsetRange,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// Immutable arena of syntax nodes. Node 0 is the module root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub(crate) fn with_root(len: usize) -> Self {
        Self {
            nodes: vec![Node {
                kind: SyntaxKind::Module,
                span: OffsetRange::new(0, len),
                parent: None,
                children: Vec::new(),
                data: NodeData::Module,
            }],
        }
    }

    pub(crate) fn alloc(
        &mut self,
        kind: SyntaxKind,
        span: OffsetRange,
        parent: NodeId,
        data: NodeData,
    ) -> NodeId {
        #[allow(clippy::cast_possible_truncation)] // source files are far below 4G nodes
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub(crate) fn finish(&mut self, id: NodeId, span: OffsetRange, data: NodeData) {
        let node = &mut self.nodes[id.index()];
        node.span = span;
        node.data = data;
    }

    /// The module root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the tree, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).kind
    }

    #[must_use]
    pub fn span(&self, id: NodeId) -> OffsetRange {
        self.node(id).span
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = ImportDecl<'_>> {
        self.children(self.root()).iter().filter_map(|&id| {
            match &self.node(id).data {
                NodeData::Import(data) => Some(ImportDecl { tree: self, id, data }),
                _ => None,
            }
        })
    }

    /// Module-level listener declarations in source order.
    pub fn listeners(&self) -> impl Iterator<Item = ListenerDecl<'_>> {
        self.children(self.root()).iter().filter_map(|&id| {
            match &self.node(id).data {
                NodeData::Listener(data) => Some(ListenerDecl { tree: self, id, data }),
                _ => None,
            }
        })
    }

    /// Service declarations in source order.
    pub fn services(&self) -> impl Iterator<Item = ServiceDecl<'_>> {
        self.children(self.root())
            .iter()
            .filter_map(|&id| self.service(id))
    }

    /// View a node as a service declaration.
    #[must_use]
    pub fn service(&self, id: NodeId) -> Option<ServiceDecl<'_>> {
        match &self.nodes.get(id.index())?.data {
            NodeData::Service(data) => Some(ServiceDecl { tree: self, id, data }),
            _ => None,
        }
    }

    /// Find a listener declaration by name.
    #[must_use]
    pub fn listener(&self, name: &str) -> Option<ListenerDecl<'_>> {
        self.listeners().find(|l| l.name() == name)
    }

    fn member(&self, id: NodeId) -> Member<'_> {
        Member {
            tree: self,
            id,
            node: self.node(id),
        }
    }
}

/// `import org/module as prefix;`
#[derive(Debug, Clone, Copy)]
pub struct ImportDecl<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
    data: &'a ImportData,
}

impl<'a> ImportDecl<'a> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn span(&self) -> OffsetRange {
        self.tree.span(self.id)
    }

    #[must_use]
    pub fn org(&self) -> Option<&'a str> {
        self.data.org.as_deref()
    }

    /// Dotted module path, e.g. `mqtt` or `lang.value`.
    #[must_use]
    pub fn module(&self) -> String {
        self.data.module_path.join(".")
    }

    /// `org/module` as written in the import (module only when there is no org).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match self.org() {
            Some(org) => format!("{org}/{}", self.module()),
            None => self.module(),
        }
    }

    /// The prefix used to refer to the module: the alias or the last path segment.
    #[must_use]
    pub fn prefix(&self) -> &'a str {
        self.data
            .alias
            .as_deref()
            .or_else(|| self.data.module_path.last().map(String::as_str))
            .unwrap_or_default()
    }
}

/// `listener mqtt:Listener name = new (...);`
#[derive(Debug, Clone, Copy)]
pub struct ListenerDecl<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
    data: &'a ListenerData,
}

impl<'a> ListenerDecl<'a> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn span(&self) -> OffsetRange {
        self.tree.span(self.id)
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    #[must_use]
    pub const fn declared_type(&self) -> Option<&'a TypeRef> {
        self.data.declared_type.as_ref()
    }

    /// Type named by a `new T(...)` initializer.
    #[must_use]
    pub const fn init_type(&self) -> Option<&'a TypeRef> {
        self.data.init_type.as_ref()
    }

    /// Declared type, falling back to the initializer's type.
    #[must_use]
    pub fn listener_type(&self) -> Option<&'a TypeRef> {
        self.declared_type().or_else(|| self.init_type())
    }
}

/// `service [type] on attach, ... { members }`
#[derive(Debug, Clone, Copy)]
pub struct ServiceDecl<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
    data: &'a ServiceData,
}

impl<'a> ServiceDecl<'a> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// From the first qualifier (or `service`) through the closing brace.
    #[must_use]
    pub fn span(&self) -> OffsetRange {
        self.tree.span(self.id)
    }

    #[must_use]
    pub fn type_desc(&self) -> Option<&'a str> {
        self.data.type_desc.as_deref()
    }

    #[must_use]
    pub fn attach_points(&self) -> &'a [AttachPoint] {
        &self.data.attach_points
    }

    #[must_use]
    pub const fn open_brace(&self) -> OffsetRange {
        self.data.open_brace
    }

    #[must_use]
    pub const fn close_brace(&self) -> OffsetRange {
        self.data.close_brace
    }

    pub fn members(&self) -> impl Iterator<Item = Member<'a>> + 'a {
        let tree = self.tree;
        tree.children(self.id).iter().map(move |&id| tree.member(id))
    }

    #[must_use]
    pub fn last_member(&self) -> Option<Member<'a>> {
        self.tree
            .children(self.id)
            .last()
            .map(|&id| self.tree.member(id))
    }

    /// Returns `true` if the body has no members at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.children(self.id).is_empty()
    }

    pub fn remote_methods(&self) -> impl Iterator<Item = Member<'a>> + 'a {
        self.members()
            .filter(|m| m.kind() == SyntaxKind::RemoteMethod)
    }
}

/// A member of a service body.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
    node: &'a Node,
}

impl<'a> Member<'a> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> SyntaxKind {
        self.node.kind
    }

    #[must_use]
    pub const fn span(&self) -> OffsetRange {
        self.node.span
    }

    /// The enclosing service declaration.
    #[must_use]
    pub fn service(&self) -> Option<ServiceDecl<'a>> {
        self.tree.service(self.node.parent?)
    }

    fn function(&self) -> Option<&'a FunctionData> {
        match &self.node.data {
            NodeData::Function(data) => Some(data),
            _ => None,
        }
    }

    /// Method name (`get greeting` for resource methods) or field name.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        match &self.node.data {
            NodeData::Function(data) => Some(&data.name),
            NodeData::Field(data) => data.name.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn name_span(&self) -> Option<OffsetRange> {
        self.function().map(|f| f.name_span)
    }

    #[must_use]
    pub fn params(&self) -> &'a [Param] {
        self.function().map_or(&[], |f| f.params.as_slice())
    }

    /// The parameter list including its parentheses.
    #[must_use]
    pub fn params_span(&self) -> Option<OffsetRange> {
        self.function().map(|f| f.params_span)
    }

    #[must_use]
    pub fn has_qualifier(&self, qualifier: &str) -> bool {
        self.function()
            .is_some_and(|f| f.qualifiers.iter().any(|q| q == qualifier))
    }
}
