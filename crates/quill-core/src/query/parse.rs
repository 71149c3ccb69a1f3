//! Recursive-descent parser and FTS expression emitter

use super::tokenize::Token;
use super::TransformOptions;

/// The engine reads a lone `+` as an operator, so it expands to the three
/// ways a literal plus can sit at a token boundary.
const PLUS_EXPANSION: &str = r#"(">+" OR + OR "+<")"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    fn as_str(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Word(String),
    Phrase(String),
    Group(Vec<Node>),
    Op(Operator),
}

/// Parse tokens into a node list, matching parentheses.
///
/// Stray `)` tokens are ignored and unclosed groups end at end of input.
/// Field tokens are skipped; callers split on them before parsing.
pub(crate) fn parse(tokens: &[Token]) -> Vec<Node> {
    let mut pos = 0;
    parse_sequence(tokens, &mut pos, 0)
}

fn parse_sequence(tokens: &[Token], pos: &mut usize, depth: usize) -> Vec<Node> {
    let mut nodes = Vec::new();
    while let Some(token) = tokens.get(*pos) {
        *pos += 1;
        match token {
            Token::Word(word) => nodes.push(Node::Word(word.clone())),
            Token::Phrase(phrase) => nodes.push(Node::Phrase(phrase.clone())),
            Token::And => nodes.push(Node::Op(Operator::And)),
            Token::Or => nodes.push(Node::Op(Operator::Or)),
            Token::Not => nodes.push(Node::Op(Operator::Not)),
            Token::Open => nodes.push(Node::Group(parse_sequence(tokens, pos, depth + 1))),
            Token::Close if depth > 0 => return nodes,
            Token::Close | Token::Field(_) => {}
        }
    }
    nodes
}

enum Item {
    Operand(String),
    Op(Operator),
}

/// Emit an FTS expression.
///
/// Adjacent operands are joined with `AND`. An operator survives only when an
/// operand precedes it and another follows it directly; otherwise it is
/// dropped.
pub(crate) fn emit(nodes: &[Node], options: &TransformOptions) -> String {
    let items: Vec<Item> = nodes
        .iter()
        .filter_map(|node| match node {
            Node::Op(op) => Some(Item::Op(*op)),
            operand => emit_operand(operand, options).map(Item::Operand),
        })
        .collect();

    let mut parts: Vec<&str> = Vec::new();
    let mut last_was_operand = false;
    for (i, item) in items.iter().enumerate() {
        match item {
            Item::Operand(text) => {
                if last_was_operand {
                    parts.push("AND");
                }
                parts.push(text);
                last_was_operand = true;
            }
            Item::Op(op) => {
                let next_is_operand = matches!(items.get(i + 1), Some(Item::Operand(_)));
                if last_was_operand && next_is_operand {
                    parts.push(op.as_str());
                    last_was_operand = false;
                }
            }
        }
    }

    parts.join(" ")
}

fn emit_operand(node: &Node, options: &TransformOptions) -> Option<String> {
    match node {
        Node::Word(word) => {
            let length = word.strip_suffix('*').unwrap_or(word).chars().count();
            if word != "+" && length < options.min_term_length {
                return None;
            }
            Some(escape_term(word))
        }
        Node::Phrase(phrase) if phrase.trim().is_empty() => None,
        Node::Phrase(phrase) => Some(quote(phrase)),
        Node::Group(children) => {
            let inner = emit(children, options);
            (!inner.is_empty()).then(|| format!("({inner})"))
        }
        Node::Op(_) => None,
    }
}

/// Render a bare word, quoting it when the engine would misread it
pub(crate) fn escape_term(word: &str) -> String {
    if word == "+" {
        return PLUS_EXPANSION.to_string();
    }
    if needs_quoting(word) {
        quote(word)
    } else {
        word.to_string()
    }
}

/// A bareword may only hold word characters plus one trailing `*` (prefix
/// match). Everything else, including leading `-`, `+`, `<`, `>`, a leading or
/// interior `*`, and quotes, is quoted.
fn needs_quoting(word: &str) -> bool {
    let stem = word.strip_suffix('*').unwrap_or(word);
    stem.is_empty()
        || stem == "NEAR"
        || !stem
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || !c.is_ascii())
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
