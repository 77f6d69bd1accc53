//! Property-based invariant tests for the attribution pass.
//!
//! 1. Totals cover every input line, wherever the terminator falls.
//! 2. Attributed lines never exceed the total line count.
//! 3. Nothing after the first terminator is attributed.
//! 4. Every attribute line inside the creation region lands on exactly one node.
//! 5. Parsing is deterministic.

use proptest::prelude::*;
use sniff_stats::{ParsedStats, parse};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Line {
    Create(String, String),
    SetAttr(u8),
    Continuation(u8),
    Header,
    Select,
    Connect,
}

impl Line {
    fn render(&self) -> String {
        match self {
            Self::Create(ty, name) => format!("createNode {ty} -n \"{name}\";\n"),
            Self::SetAttr(v) => format!("\tsetAttr \".a{v}\" {v};\n"),
            Self::Continuation(v) => format!("\t\t{v} {v} {v}\n"),
            Self::Header => "requires maya \"2024\";\n".to_string(),
            Self::Select => "select -ne :time1;\n".to_string(),
            Self::Connect => "connectAttr \"a.o\" \"b.i\";\n".to_string(),
        }
    }

    fn is_terminator(&self) -> bool {
        matches!(self, Self::Select | Self::Connect)
    }
}

fn body_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        (
            prop_oneof![Just("transform"), Just("mesh"), Just("joint"), Just("animCurveTL")],
            "[a-z]{1,3}[0-9]?"
        )
            .prop_map(|(ty, name)| Line::Create(ty.to_string(), name)),
        any::<u8>().prop_map(Line::SetAttr),
        any::<u8>().prop_map(Line::Continuation),
        Just(Line::Header),
    ]
}

fn any_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        8 => body_line(),
        1 => Just(Line::Select),
        1 => Just(Line::Connect),
    ]
}

fn run(lines: &[String]) -> ParsedStats {
    parse(lines.iter(), 0).expect("generated creation lines are well formed")
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Totals independence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn totals_cover_whole_input(script in proptest::collection::vec(any_line(), 0..60)) {
        let lines: Vec<String> = script.iter().map(Line::render).collect();
        let parsed = run(&lines);

        prop_assert_eq!(parsed.line_count, lines.len());
        prop_assert_eq!(
            parsed.total_character_count,
            lines.iter().map(|l| l.chars().count()).sum::<usize>()
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Attribution never exceeds totals
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn attribution_bounded_by_totals(script in proptest::collection::vec(any_line(), 0..60)) {
        let lines: Vec<String> = script.iter().map(Line::render).collect();
        let parsed = run(&lines);

        prop_assert!(parsed.attributed_lines() <= parsed.line_count);
        prop_assert!(parsed.attributed_characters() <= parsed.total_character_count);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Early termination
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nothing_after_terminator_is_attributed(
        head in proptest::collection::vec(body_line(), 0..30),
        tail in proptest::collection::vec(body_line(), 0..30),
        use_connect in any::<bool>(),
    ) {
        let terminator = if use_connect { Line::Connect } else { Line::Select };
        let head_lines: Vec<String> = head.iter().map(Line::render).collect();
        let mut lines = head_lines.clone();
        lines.push(terminator.render());
        lines.extend(tail.iter().map(Line::render));

        let with_tail = run(&lines);
        let head_only = run(&head_lines);

        prop_assert_eq!(&with_tail.objects, &head_only.objects);
        prop_assert_eq!(with_tail.line_count, head.len() + 1 + tail.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Completeness inside the creation region
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn attribute_lines_after_first_create_are_all_charged(
        script in proptest::collection::vec(body_line(), 0..60),
    ) {
        let lines: Vec<String> = script.iter().map(Line::render).collect();
        let parsed = run(&lines);

        let first_create = script.iter().position(|l| matches!(l, Line::Create(..)));
        let expected = match first_create {
            Some(start) => script[start..]
                .iter()
                .filter(|l| !matches!(l, Line::Create(..)) && !l.is_terminator())
                .count(),
            None => 0,
        };
        prop_assert_eq!(parsed.attributed_lines(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_is_deterministic(script in proptest::collection::vec(any_line(), 0..40)) {
        let lines: Vec<String> = script.iter().map(Line::render).collect();
        prop_assert_eq!(run(&lines), run(&lines));
    }
}

#[test]
fn ten_lines_with_select_at_six() {
    let lines = [
        "createNode transform -n \"a\";\n",
        "\tsetAttr \".t\" 1;\n",
        "createNode mesh -n \"aShape\" -p \"a\";\n",
        "\tsetAttr \".v\" 1;\n",
        "\tsetAttr \".w\" 1;\n",
        "select -ne :time1;\n",
        "createNode transform -n \"b\";\n",
        "\tsetAttr \".t\" 1;\n",
        "connectAttr \"a.t\" \"b.t\";\n",
        "\tsetAttr \".t\" 2;\n",
    ];
    let parsed = parse(lines, 0).unwrap();
    assert_eq!(parsed.line_count, 10);
    assert_eq!(parsed.objects.len(), 2);
    assert!(!parsed.objects.contains_key("b"));
    assert_eq!(parsed.attributed_lines(), 3);
}
