#![forbid(unsafe_code)]

//! Statement shapes recognised by the attribution pass.
//!
//! Only four prefixes carry meaning here; everything else is either a
//! continuation of the current node's attribute block or noise.

/// Selection statement. Node creation is over once Maya starts selecting.
pub const SELECT_MARKER: &str = "select";
/// Connection statement. Follows node creation when no selection is emitted.
pub const CONNECT_MARKER: &str = "connectAttr";
/// Node creation statement.
pub const CREATE_MARKER: &str = "createNode";
/// Attribute assignment statement.
pub const SET_ATTR_MARKER: &str = "setAttr";

/// Flag preceding the node name in a creation statement.
const NAME_FLAG: &str = "-n";

/// Classified shape of a single physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `select ...`: ends attribution.
    Select,
    /// `connectAttr ...`: ends attribution.
    Connect,
    /// `createNode ...`, carrying the trimmed statement text.
    Create(&'a str),
    /// `setAttr ...`, carrying the trimmed statement text.
    SetAttr(&'a str),
    /// Anything else, carrying the trimmed text. Inside a node block this is
    /// a continuation line (multi-line array data, `rename`, `addAttr`, ...).
    Other(&'a str),
}

impl Statement<'_> {
    /// Whether this statement ends the node creation region.
    #[inline]
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self, Self::Select | Self::Connect)
    }
}

/// Node declared by a `createNode` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDecl {
    /// Node type, e.g. `transform` or `animCurveTL`.
    pub type_tag: String,
    /// Node name with quotes removed.
    pub name: String,
}

/// Classify a raw physical line.
///
/// Terminators are matched against the raw line. The remaining markers are
/// matched after surrounding whitespace, trailing semicolons and the line
/// terminator have been removed, since attribute blocks are tab-indented.
#[must_use]
pub fn classify(raw: &str) -> Statement<'_> {
    if raw.starts_with(SELECT_MARKER) {
        return Statement::Select;
    }
    if raw.starts_with(CONNECT_MARKER) {
        return Statement::Connect;
    }

    let trimmed = trim_statement(raw);
    if trimmed.starts_with(CREATE_MARKER) {
        Statement::Create(trimmed)
    } else if trimmed.starts_with(SET_ATTR_MARKER) {
        Statement::SetAttr(trimmed)
    } else {
        Statement::Other(trimmed)
    }
}

/// Extract the node type and name from a trimmed `createNode` statement.
///
/// Returns `None` when the type token is missing, the `-n` flag is missing,
/// or no name follows it.
///
/// ```
/// use sniff_stats::parse_create;
///
/// let decl = parse_create("createNode mesh -n \"pCubeShape1\" -p \"pCube1\"").unwrap();
/// assert_eq!(decl.type_tag, "mesh");
/// assert_eq!(decl.name, "pCubeShape1");
/// ```
#[must_use]
pub fn parse_create(statement: &str) -> Option<NodeDecl> {
    let tokens: Vec<&str> = statement.split_whitespace().collect();
    let type_tag = tokens.get(1)?;
    let flag = tokens.iter().position(|token| *token == NAME_FLAG)?;
    let name = tokens.get(flag + 1)?.replace('"', "");
    Some(NodeDecl {
        type_tag: (*type_tag).to_string(),
        name,
    })
}

fn trim_statement(raw: &str) -> &str {
    raw.trim().trim_end_matches([' ', ';', '\n'])
}
