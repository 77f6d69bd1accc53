#![forbid(unsafe_code)]

//! Single-pass attribution of lines and characters to scene nodes.

use core::fmt;

use rustc_hash::FxHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::statement::{Statement, classify, parse_create};

/// Size attributed to one declared node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectStats {
    /// Declared node type. Open-ended; new tags need no code changes.
    pub type_tag: String,
    /// Number of physical lines charged to the node.
    pub line_count: usize,
    /// Characters on those lines, terminators included.
    pub character_count: usize,
}

impl ObjectStats {
    fn new(type_tag: String) -> Self {
        Self {
            type_tag,
            line_count: 0,
            character_count: 0,
        }
    }

    fn charge(&mut self, raw: &str) {
        self.line_count += 1;
        self.character_count += char_len(raw);
    }
}

/// Result of one [`parse`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsedStats {
    /// Byte length of the source resource, as supplied by the caller.
    pub source_size_bytes: u64,
    /// Physical lines in the whole input.
    pub line_count: usize,
    /// Characters in the whole input, terminators included.
    pub total_character_count: usize,
    /// Per-node statistics keyed by node name.
    pub objects: FxHashMap<String, ObjectStats>,
}

impl ParsedStats {
    /// Lines charged to any node.
    #[must_use]
    pub fn attributed_lines(&self) -> usize {
        self.objects.values().map(|o| o.line_count).sum()
    }

    /// Characters charged to any node.
    #[must_use]
    pub fn attributed_characters(&self) -> usize {
        self.objects.values().map(|o| o.character_count).sum()
    }
}

/// Parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `createNode` line without a type token or without `-n <name>`.
    MalformedStatement {
        /// 1-based line number.
        line_number: usize,
        /// The offending line, terminator removed.
        line: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedStatement { line_number, line } => {
                write!(f, "malformed createNode statement (line {line_number}): {line}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Transient per-call state. Never outlives one [`parse`] call.
#[derive(Debug, Default)]
struct Attribution {
    current_object: Option<String>,
    current_type: Option<String>,
    objects: FxHashMap<String, ObjectStats>,
}

impl Attribution {
    fn enter(&mut self, name: String, type_tag: String) {
        trace!(node = %name, node_type = %type_tag, "createNode");
        self.current_object = Some(name);
        self.current_type = Some(type_tag);
    }

    fn charge(&mut self, raw: &str) -> bool {
        let Some(name) = self.current_object.as_deref() else {
            return false;
        };
        if !self.objects.contains_key(name) {
            let type_tag = self.current_type.clone().unwrap_or_default();
            self.objects
                .insert(name.to_string(), ObjectStats::new(type_tag));
        }
        if let Some(entry) = self.objects.get_mut(name) {
            entry.charge(raw);
        }
        true
    }
}

/// Parse the physical lines of a scene file.
///
/// `file_size` is the byte length of the underlying resource; the parser
/// only sees already-split lines and cannot measure it.
///
/// Attribution stops at the first line starting with `select` or
/// `connectAttr`. Totals keep counting to the end of the input.
///
/// # Errors
///
/// Returns [`ParseError::MalformedStatement`] for a `createNode` line that
/// lacks a type or a `-n <name>` pair.
#[instrument(skip(lines), level = "debug")]
pub fn parse<I, S>(lines: I, file_size: u64) -> Result<ParsedStats, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = Attribution::default();
    let mut line_count = 0usize;
    let mut total_character_count = 0usize;
    let mut attributing = true;
    let mut ignored = 0usize;

    for (idx, line) in lines.into_iter().enumerate() {
        let raw = line.as_ref();
        line_count += 1;
        total_character_count += char_len(raw);

        if !attributing {
            continue;
        }

        match classify(raw) {
            Statement::Select | Statement::Connect => {
                debug!(line_number = idx + 1, "node creation region ended");
                attributing = false;
            }
            Statement::Create(statement) => {
                let decl = parse_create(statement).ok_or_else(|| {
                    ParseError::MalformedStatement {
                        line_number: idx + 1,
                        line: raw.trim_end_matches(['\r', '\n']).to_string(),
                    }
                })?;
                state.enter(decl.name, decl.type_tag);
            }
            Statement::SetAttr(_) | Statement::Other(_) => {
                if !state.charge(raw) {
                    ignored += 1;
                }
            }
        }
    }

    debug!(
        line_count,
        total_character_count,
        objects = state.objects.len(),
        ignored,
        "parsed scene"
    );

    Ok(ParsedStats {
        source_size_bytes: file_size,
        line_count,
        total_character_count,
        objects: state.objects,
    })
}

/// Split a whole text buffer into physical lines (terminators kept) and
/// [`parse`] them.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_source(text: &str, file_size: u64) -> Result<ParsedStats, ParseError> {
    parse(text.split_inclusive('\n'), file_size)
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn stats(lines: &[&str]) -> ParsedStats {
        parse(lines.iter().copied(), 0).unwrap()
    }

    #[test]
    fn cube_scenario() {
        let lines = [
            "createNode transform -n \"pCube1\";",
            "setAttr \".tx\" 5;",
            "setAttr \".ty\" 2;",
            "select -r pCube1;",
        ];
        let parsed = parse(lines, 120).unwrap();

        let mut expected = FxHashMap::default();
        expected.insert(
            "pCube1".to_string(),
            ObjectStats {
                type_tag: "transform".to_string(),
                line_count: 2,
                character_count: lines[1].len() + lines[2].len(),
            },
        );
        assert_eq!(
            parsed,
            ParsedStats {
                source_size_bytes: 120,
                line_count: 4,
                total_character_count: lines.iter().map(|l| l.len()).sum(),
                objects: expected,
            }
        );
    }

    #[test]
    fn empty_input() {
        let parsed = stats(&[]);
        assert_eq!(parsed.line_count, 0);
        assert_eq!(parsed.total_character_count, 0);
        assert!(parsed.objects.is_empty());
    }

    #[test]
    fn continuation_lines_are_charged() {
        let parsed = stats(&[
            "createNode mesh -n \"shape\";\n",
            "\tsetAttr -s 3 \".vt[0:2]\" \n",
            "\t\t0 0 0\n",
            "\t\t1 1 1\n",
            "\t\t2 2 2;\n",
        ]);
        let shape = &parsed.objects["shape"];
        assert_eq!(shape.type_tag, "mesh");
        assert_eq!(shape.line_count, 4);
    }

    #[test]
    fn characters_use_untrimmed_line() {
        let parsed = stats(&["createNode joint -n \"j\";\n", "\tsetAttr \".r\" 1;\n"]);
        assert_eq!(
            parsed.objects["j"].character_count,
            "\tsetAttr \".r\" 1;\n".len()
        );
    }

    #[test]
    fn characters_not_bytes() {
        let parsed = stats(&["createNode transform -n \"t\";", "setAttr \".nts\" \"héllo\";"]);
        assert_eq!(parsed.objects["t"].character_count, 23);
        assert_eq!(parsed.total_character_count, 28 + 23);
    }

    #[test]
    fn lines_before_first_create_are_ignored() {
        let parsed = stats(&[
            "//Maya ASCII 2020 scene\n",
            "requires maya \"2020\";\n",
            "setAttr \".orphan\" 1;\n",
            "createNode transform -n \"a\";\n",
            "setAttr \".v\" no;\n",
        ]);
        assert_eq!(parsed.objects.len(), 1);
        assert_eq!(parsed.attributed_lines(), 1);
        assert_eq!(parsed.line_count, 5);
    }

    #[test]
    fn switching_nodes_moves_attribution() {
        let parsed = stats(&[
            "createNode transform -n \"a\";",
            "setAttr \".t\" 1;",
            "createNode mesh -n \"b\" -p \"a\";",
            "setAttr \".v\" 1;",
            "setAttr \".w\" 1;",
        ]);
        assert_eq!(parsed.objects["a"].line_count, 1);
        assert_eq!(parsed.objects["b"].line_count, 2);
        assert_eq!(parsed.objects["b"].type_tag, "mesh");
    }

    #[test]
    fn created_without_attributes_has_no_entry() {
        let parsed = stats(&["createNode transform -n \"empty\";", "select -ne :time1;"]);
        assert!(parsed.objects.is_empty());
    }

    #[test]
    fn recreating_a_name_keeps_first_type() {
        let parsed = stats(&[
            "createNode transform -n \"dup\";",
            "setAttr \".a\" 1;",
            "createNode mesh -n \"dup\";",
            "setAttr \".b\" 1;",
        ]);
        let dup = &parsed.objects["dup"];
        assert_eq!(dup.type_tag, "transform");
        assert_eq!(dup.line_count, 2);
    }

    #[test]
    fn connect_attr_terminates() {
        let parsed = stats(&[
            "createNode transform -n \"a\";",
            "setAttr \".t\" 1;",
            "connectAttr \"a.t\" \"b.t\";",
            "createNode transform -n \"late\";",
            "setAttr \".t\" 1;",
        ]);
        assert_eq!(parsed.objects.len(), 1);
        assert_eq!(parsed.line_count, 5);
    }

    #[test]
    fn malformed_lines_after_terminator_are_not_checked() {
        let parsed = parse(["select -ne :time1;", "createNode"], 0);
        assert!(parsed.is_ok());
    }

    #[test]
    fn malformed_create_reports_line() {
        let err = parse(
            [
                "createNode transform -n \"ok\";\n",
                "setAttr \".t\" 1;\n",
                "createNode transform \"missing_flag\";\n",
            ],
            0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedStatement {
                line_number: 3,
                line: "createNode transform \"missing_flag\";".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "malformed createNode statement (line 3): createNode transform \"missing_flag\";"
        );
    }

    #[test]
    fn parse_source_keeps_terminators() {
        let text = "createNode transform -n \"a\";\nsetAttr \".t\" 1;\nselect -r a;\n";
        let parsed = parse_source(text, text.len() as u64).unwrap();
        assert_eq!(parsed.line_count, 3);
        assert_eq!(parsed.total_character_count, text.len());
        assert_eq!(parsed.objects["a"].character_count, "setAttr \".t\" 1;\n".len());
    }

    #[test]
    #[traced_test]
    fn logs_region_end() {
        let _ = stats(&["createNode transform -n \"a\";", "select -r a;"]);
        assert!(logs_contain("node creation region ended"));
    }
}
