//! Reading and writing circuits in Graphviz DOT.
//!
//! The accepted subset is what graph libraries typically write for a
//! weighted digraph:
//!
//! ```text
//! strict digraph correlator1 {
//!     h [weight=0];
//!     d0 [weight=3, label="d0;3"];
//!     h -> d0 [key=0, weight=1];
//! }
//! ```
//!
//! A node's `weight` is its propagation delay and an edge's `weight` is its
//! register count; both are required integers. Other attributes are ignored.
//! Default-attribute statements (`node [...]`) and graph attributes
//! (`rankdir = LR`) are skipped with a warning. Subgraphs, ports, HTML
//! strings, and undirected graphs are rejected.

use crate::circuit::Circuit;
use crate::error::DotError;
use crate::ids::NodeId;
use kairos_common::MAX_MAGNITUDE;
use kairos_diagnostics::code::IGNORED_STATEMENT;
use kairos_diagnostics::{Diagnostic, DiagnosticSink, SourceLocation};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

/// Parses DOT text into a circuit.
///
/// Skipped statements are reported as `W101` warnings into `sink`.
pub fn parse_dot(source: &str, sink: &DiagnosticSink) -> Result<Circuit, DotError> {
    parse_dot_in(source, None, sink)
}

/// Reads and parses a DOT file.
///
/// If the graph has no ID, the circuit is named after the file stem.
pub fn load_dot(path: &Path, sink: &DiagnosticSink) -> Result<Circuit, DotError> {
    let source = std::fs::read_to_string(path)?;
    let file = path.display().to_string();
    let mut circuit = parse_dot_in(&source, Some(&file), sink)?;
    if circuit.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            circuit.name = stem.to_string_lossy().into_owned();
        }
    }
    Ok(circuit)
}

/// Writes a circuit to a DOT file.
pub fn save_dot(circuit: &Circuit, path: &Path) -> Result<(), DotError> {
    std::fs::write(path, write_dot(circuit))?;
    Ok(())
}

/// Renders a circuit as DOT text.
///
/// Nodes carry `weight` (delay) and `label="name;delay"`; edges carry
/// `weight` and `label` (register count). Order follows the IDs.
pub fn write_dot(circuit: &Circuit) -> String {
    let mut out = String::new();
    if circuit.name.is_empty() {
        out.push_str("digraph {\n");
    } else {
        let _ = writeln!(out, "digraph {} {{", quote_id(&circuit.name));
    }
    for node in &circuit.nodes {
        let _ = writeln!(
            out,
            "    {} [weight={}, label={}];",
            quote_id(&node.name),
            node.delay,
            quote_id(&format!("{};{}", node.name, node.delay))
        );
    }
    for edge in &circuit.edges {
        let _ = writeln!(
            out,
            "    {} -> {} [weight={}, label={}];",
            quote_id(circuit.node_name(edge.from)),
            quote_id(circuit.node_name(edge.to)),
            edge.weight,
            edge.weight
        );
    }
    out.push_str("}\n");
    out
}

/// Returns `id` as-is if it is a plain DOT identifier, quoted otherwise.
fn quote_id(id: &str) -> String {
    let plain = id
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !is_keyword(id);
    if plain {
        id.to_string()
    } else {
        format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn is_keyword(id: &str) -> bool {
    ["strict", "graph", "digraph", "node", "edge", "subgraph"]
        .iter()
        .any(|k| id.eq_ignore_ascii_case(k))
}

fn parse_dot_in(
    source: &str,
    file: Option<&str>,
    sink: &DiagnosticSink,
) -> Result<Circuit, DotError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        file,
        sink,
        nodes: Vec::new(),
        node_index: HashMap::new(),
        edges: Vec::new(),
    };
    let name = parser.parse_graph()?;
    parser.finish(name)
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    /// Bare identifier or numeral.
    Id(String),
    /// Double-quoted string, unescaped.
    Quoted(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equals,
    Semi,
    Comma,
    Colon,
    Arrow,
    UndirectedEdge,
    Eof,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    line: u32,
    column: u32,
}

/// A character cursor that tracks 1-based line and column.
struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
}

impl Cursor<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn syntax(&self, message: impl Into<String>) -> DotError {
        DotError::Syntax {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, DotError> {
    let mut cur = Cursor {
        chars: source.chars().peekable(),
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();

    while let Some(c) = cur.peek() {
        let (line, column) = (cur.line, cur.column);
        let kind = match c {
            c if c.is_whitespace() => {
                cur.bump();
                continue;
            }
            '#' => {
                skip_line(&mut cur);
                continue;
            }
            '/' => {
                cur.bump();
                match cur.bump() {
                    Some('/') => skip_line(&mut cur),
                    Some('*') => skip_block_comment(&mut cur)?,
                    _ => return Err(cur.syntax("stray `/`")),
                }
                continue;
            }
            '{' | '}' | '[' | ']' | '=' | ';' | ',' | ':' => {
                cur.bump();
                match c {
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    '=' => TokenKind::Equals,
                    ';' => TokenKind::Semi,
                    ',' => TokenKind::Comma,
                    _ => TokenKind::Colon,
                }
            }
            '-' => {
                cur.bump();
                match cur.peek() {
                    Some('>') => {
                        cur.bump();
                        TokenKind::Arrow
                    }
                    Some('-') => {
                        cur.bump();
                        TokenKind::UndirectedEdge
                    }
                    Some(d) if d.is_ascii_digit() || d == '.' => {
                        TokenKind::Id(format!("-{}", take_while(&mut cur, is_numeral_char)))
                    }
                    _ => return Err(cur.syntax("expected `->` or a number after `-`")),
                }
            }
            '"' => {
                cur.bump();
                TokenKind::Quoted(take_quoted(&mut cur)?)
            }
            '<' => return Err(cur.syntax("HTML strings are not supported")),
            c if c.is_ascii_digit() || c == '.' => {
                TokenKind::Id(take_while(&mut cur, is_numeral_char))
            }
            c if c.is_alphabetic() || c == '_' => {
                TokenKind::Id(take_while(&mut cur, |c| c.is_alphanumeric() || c == '_'))
            }
            other => return Err(cur.syntax(format!("unexpected character `{other}`"))),
        };
        tokens.push(Token { kind, line, column });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line: cur.line,
        column: cur.column,
    });
    Ok(tokens)
}

fn is_numeral_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn take_while(cur: &mut Cursor<'_>, pred: impl Fn(char) -> bool) -> String {
    let mut s = String::new();
    while let Some(c) = cur.peek() {
        if !pred(c) {
            break;
        }
        s.push(c);
        cur.bump();
    }
    s
}

fn skip_line(cur: &mut Cursor<'_>) {
    while let Some(c) = cur.bump() {
        if c == '\n' {
            break;
        }
    }
}

fn skip_block_comment(cur: &mut Cursor<'_>) -> Result<(), DotError> {
    let mut prev = '\0';
    while let Some(c) = cur.bump() {
        if prev == '*' && c == '/' {
            return Ok(());
        }
        prev = c;
    }
    Err(cur.syntax("unterminated block comment"))
}

/// Reads a quoted string after its opening `"`.
///
/// `\"` and `\\` yield a quote and a backslash, and backslash-newline is a
/// line continuation. Other escapes are kept verbatim.
fn take_quoted(cur: &mut Cursor<'_>) -> Result<String, DotError> {
    let mut s = String::new();
    loop {
        match cur.bump() {
            Some('"') => return Ok(s),
            Some('\\') => match cur.bump() {
                Some('"') => s.push('"'),
                Some('\\') => s.push('\\'),
                Some('\n') => {}
                Some(other) => {
                    s.push('\\');
                    s.push(other);
                }
                None => break,
            },
            Some(c) => s.push(c),
            None => break,
        }
    }
    Err(cur.syntax("unterminated string"))
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// A `weight` attribute value with its position.
#[derive(Clone)]
struct RawWeight {
    value: String,
    line: u32,
    column: u32,
}

struct PendingNode {
    name: String,
    weight: Option<RawWeight>,
    line: u32,
    column: u32,
}

struct PendingEdge {
    from: usize,
    to: usize,
    weight: Option<RawWeight>,
    line: u32,
    column: u32,
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    file: Option<&'a str>,
    sink: &'a DiagnosticSink,
    nodes: Vec<PendingNode>,
    node_index: HashMap<String, usize>,
    edges: Vec<PendingEdge>,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn error_at(tok: &Token, message: impl Into<String>) -> DotError {
        DotError::Syntax {
            line: tok.line,
            column: tok.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, DotError> {
        let tok = self.advance();
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(Self::error_at(&tok, format!("expected {what}")))
        }
    }

    fn is_keyword(tok: &Token, keyword: &str) -> bool {
        matches!(&tok.kind, TokenKind::Id(id) if id.eq_ignore_ascii_case(keyword))
    }

    fn warn(&self, tok: &Token, message: String) {
        let mut location = SourceLocation::new(tok.line, tok.column);
        if let Some(file) = self.file {
            location = location.in_file(file);
        }
        self.sink
            .emit(Diagnostic::warning(IGNORED_STATEMENT, message).with_location(location));
    }

    /// Parses the graph header and body; returns the graph ID.
    fn parse_graph(&mut self) -> Result<String, DotError> {
        if Self::is_keyword(self.peek(), "strict") {
            self.advance();
        }
        let tok = self.advance();
        if Self::is_keyword(&tok, "graph") {
            return Err(Self::error_at(&tok, "undirected graphs are not supported"));
        }
        if !Self::is_keyword(&tok, "digraph") {
            return Err(Self::error_at(&tok, "expected `digraph`"));
        }

        let name = match self.peek().kind.clone() {
            TokenKind::Id(id) | TokenKind::Quoted(id) => {
                self.advance();
                id
            }
            _ => String::new(),
        };
        self.expect(TokenKind::LBrace, "`{`")?;

        loop {
            let tok = self.peek().clone();
            match &tok.kind {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Semi | TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::Eof => return Err(Self::error_at(&tok, "expected `}`")),
                TokenKind::LBrace => {
                    return Err(Self::error_at(&tok, "subgraphs are not supported"))
                }
                TokenKind::Id(_) if Self::is_keyword(&tok, "subgraph") => {
                    return Err(Self::error_at(&tok, "subgraphs are not supported"))
                }
                TokenKind::Id(_)
                    if ["graph", "node", "edge"]
                        .iter()
                        .any(|k| Self::is_keyword(&tok, k)) =>
                {
                    self.advance();
                    self.parse_attr_lists()?;
                    self.warn(&tok, "ignored default-attribute statement".to_string());
                }
                TokenKind::Id(_) | TokenKind::Quoted(_) => self.parse_node_or_edge()?,
                _ => return Err(Self::error_at(&tok, "expected a statement")),
            }
        }

        let tok = self.advance();
        if tok.kind != TokenKind::Eof {
            return Err(Self::error_at(&tok, "unexpected input after the graph"));
        }
        Ok(name)
    }

    fn take_id(&mut self) -> Result<(String, Token), DotError> {
        let tok = self.advance();
        match &tok.kind {
            TokenKind::Id(id) | TokenKind::Quoted(id) => Ok((id.clone(), tok.clone())),
            _ => Err(Self::error_at(&tok, "expected an identifier")),
        }
    }

    /// Parses `a = b`, a node statement, or an edge chain `a -> b -> c`.
    fn parse_node_or_edge(&mut self) -> Result<(), DotError> {
        let (first, first_tok) = self.take_id()?;

        match self.peek().kind.clone() {
            TokenKind::Equals => {
                self.advance();
                let (value, _) = self.take_id()?;
                self.warn(&first_tok, format!("ignored graph attribute `{first} = {value}`"));
                return Ok(());
            }
            TokenKind::Colon => {
                let tok = self.peek().clone();
                return Err(Self::error_at(&tok, "node ports are not supported"));
            }
            TokenKind::UndirectedEdge => {
                let tok = self.peek().clone();
                return Err(Self::error_at(&tok, "`--` edges are not allowed in a digraph"));
            }
            _ => {}
        }

        let mut chain = vec![(first, first_tok)];
        while self.peek().kind == TokenKind::Arrow {
            self.advance();
            chain.push(self.take_id()?);
        }
        let weight = self.parse_attr_lists()?;

        let ids: Vec<usize> = chain
            .iter()
            .map(|(name, tok)| self.declare_node(name, tok))
            .collect();
        if ids.len() == 1 {
            if weight.is_some() {
                self.nodes[ids[0]].weight = weight;
            }
        } else {
            for (pair, (_, tok)) in ids.windows(2).zip(&chain) {
                self.edges.push(PendingEdge {
                    from: pair[0],
                    to: pair[1],
                    weight: weight.clone(),
                    line: tok.line,
                    column: tok.column,
                });
            }
        }
        Ok(())
    }

    fn declare_node(&mut self, name: &str, tok: &Token) -> usize {
        if let Some(&index) = self.node_index.get(name) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(PendingNode {
            name: name.to_string(),
            weight: None,
            line: tok.line,
            column: tok.column,
        });
        self.node_index.insert(name.to_string(), index);
        index
    }

    /// Parses zero or more `[k = v, ...]` groups; returns the last `weight`.
    fn parse_attr_lists(&mut self) -> Result<Option<RawWeight>, DotError> {
        let mut weight = None;
        while self.peek().kind == TokenKind::LBracket {
            self.advance();
            loop {
                match self.peek().kind.clone() {
                    TokenKind::RBracket => {
                        self.advance();
                        break;
                    }
                    TokenKind::Comma | TokenKind::Semi => {
                        self.advance();
                    }
                    _ => {
                        let (key, _) = self.take_id()?;
                        self.expect(TokenKind::Equals, "`=` after attribute name")?;
                        let (value, tok) = self.take_id()?;
                        if key == "weight" {
                            weight = Some(RawWeight {
                                value,
                                line: tok.line,
                                column: tok.column,
                            });
                        }
                    }
                }
            }
        }
        Ok(weight)
    }

    /// Converts the collected statements into a circuit.
    fn finish(self, name: String) -> Result<Circuit, DotError> {
        let mut circuit = Circuit::named(name);

        let mut ids: Vec<NodeId> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let Some(raw) = &node.weight else {
                return Err(DotError::MissingWeight {
                    line: node.line,
                    column: node.column,
                    kind: "node",
                    name: node.name.clone(),
                });
            };
            ids.push(circuit.add_node(node.name.clone(), parse_weight(raw)?));
        }

        for edge in &self.edges {
            let Some(raw) = &edge.weight else {
                return Err(DotError::MissingWeight {
                    line: edge.line,
                    column: edge.column,
                    kind: "edge",
                    name: format!(
                        "{} -> {}",
                        self.nodes[edge.from].name, self.nodes[edge.to].name
                    ),
                });
            };
            circuit.add_edge(ids[edge.from], ids[edge.to], parse_weight(raw)?);
        }

        Ok(circuit)
    }
}

fn parse_weight(raw: &RawWeight) -> Result<i64, DotError> {
    let value: i64 = raw.value.trim().parse().map_err(|_| DotError::InvalidWeight {
        line: raw.line,
        column: raw.column,
        value: raw.value.clone(),
    })?;
    if value.unsigned_abs() > MAX_MAGNITUDE.unsigned_abs() {
        return Err(DotError::WeightOutOfRange {
            line: raw.line,
            column: raw.column,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORKX_STYLE: &str = r#"
strict digraph "" {
    h [weight=0];
    d0 [weight=3];
    p0 [weight=7];
    h -> d0 [key=0, weight=1];
    d0 -> p0 [key=0, weight=0];
    p0 -> h [key=0, weight=0];
}
"#;

    fn parse(src: &str) -> Result<Circuit, DotError> {
        parse_dot(src, &DiagnosticSink::new())
    }

    #[test]
    fn parse_networkx_output() {
        let c = parse(NETWORKX_STYLE).unwrap();
        assert_eq!(c.name, "");
        assert_eq!(c.node_count(), 3);
        assert_eq!(c.edge_count(), 3);
        let p0 = c.find_node("p0").unwrap();
        assert_eq!(c.delay(p0), 7);
        let h = c.find_node("h").unwrap();
        let d0 = c.find_node("d0").unwrap();
        assert_eq!(c.min_weight(h, d0), Some(1));
    }

    #[test]
    fn edge_chains_and_late_declarations() {
        let c = parse(
            "digraph g { a -> b -> c [weight=2]; a [weight=1]; b [weight=1]; c [weight=4] }",
        )
        .unwrap();
        assert_eq!(c.name, "g");
        assert_eq!(c.edge_count(), 2);
        assert!(c.edges.iter().all(|e| e.weight == 2));
        // nodes keep first-mention order
        assert_eq!(c.node_name(NodeId::from_raw(2)), "c");
    }

    #[test]
    fn parallel_edges_are_kept() {
        let c = parse(
            "digraph { a [weight=1]; b [weight=1]; a -> b [weight=2]; a -> b [weight=0] }",
        )
        .unwrap();
        assert_eq!(c.edge_count(), 2);
        assert_eq!(c.min_weight(NodeId::from_raw(0), NodeId::from_raw(1)), Some(0));
    }

    #[test]
    fn comments_quotes_and_ignored_statements() {
        let sink = DiagnosticSink::new();
        let src = r#"
// leading comment
digraph "my \"circuit\"" {
    rankdir = LR
    node [shape=box]
    /* block
       comment */
    "adder 1" [weight=7, label="adder 1;7"]
    # preprocessor-style line
    "adder 1" -> "adder 1" [weight="1"]
}
"#;
        let c = parse_dot(src, &sink).unwrap();
        assert_eq!(c.name, "my \"circuit\"");
        assert_eq!(c.node_count(), 1);
        assert_eq!(c.edges[0].weight, 1);
        let warnings = sink.take_all();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|d| format!("{}", d.code) == "W101"));
        assert_eq!(warnings[0].location, Some(SourceLocation::new(4, 5)));
    }

    #[test]
    fn missing_node_weight() {
        let err = parse("digraph { a -> b [weight=1]; a [weight=1] }").unwrap_err();
        assert!(matches!(
            err,
            DotError::MissingWeight { kind: "node", ref name, .. } if name == "b"
        ));
    }

    #[test]
    fn missing_edge_weight() {
        let err = parse("digraph { a [weight=1]; b [weight=1]; a -> b }").unwrap_err();
        assert!(matches!(err, DotError::MissingWeight { kind: "edge", .. }));
    }

    #[test]
    fn non_integer_weight() {
        let err = parse("digraph { a [weight=2.5] }").unwrap_err();
        assert!(matches!(err, DotError::InvalidWeight { ref value, .. } if value == "2.5"));
    }

    #[test]
    fn weights_beyond_the_limit() {
        let at_limit = format!("digraph {{ a [weight={MAX_MAGNITUDE}] }}");
        assert_eq!(parse(&at_limit).unwrap().nodes[0].delay, MAX_MAGNITUDE);

        let huge = format!("digraph {{ a [weight=1]; a -> a [weight={}] }}", i64::MAX);
        let err = parse(&huge).unwrap_err();
        assert!(matches!(err, DotError::WeightOutOfRange { value: i64::MAX, .. }));

        let err = parse(&format!("digraph {{ a [weight={}] }}", -MAX_MAGNITUDE - 1)).unwrap_err();
        assert!(matches!(err, DotError::WeightOutOfRange { .. }));
    }

    #[test]
    fn negative_weights_parse() {
        // rejection is the validity checker's job
        let c = parse("digraph { a [weight=-1] }").unwrap();
        assert_eq!(c.nodes[0].delay, -1);
    }

    #[test]
    fn undirected_graph_rejected() {
        let err = parse("graph { a -- b }").unwrap_err();
        assert!(matches!(err, DotError::Syntax { line: 1, column: 1, .. }));
    }

    #[test]
    fn subgraph_rejected() {
        let err = parse("digraph { subgraph cluster { a } }").unwrap_err();
        assert!(matches!(err, DotError::Syntax { .. }));
    }

    #[test]
    fn unterminated_graph() {
        let err = parse("digraph { a [weight=1];").unwrap_err();
        assert!(err.to_string().contains("expected `}`"));
    }

    #[test]
    fn syntax_error_position() {
        let err = parse("digraph {\n  a [weight 1]\n}").unwrap_err();
        match err {
            DotError::Syntax { line, column, .. } => assert_eq!((line, column), (2, 13)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn write_then_parse_preserves_circuit() {
        let mut c = Circuit::named("loop");
        let h = c.add_node("h", 0);
        let odd = c.add_node("odd name", 5);
        c.add_edge(h, odd, 0);
        c.add_edge(odd, h, 2);
        c.add_edge(odd, h, 1);

        let text = write_dot(&c);
        assert!(text.starts_with("digraph loop {\n"));
        assert!(text.contains("\"odd name\" [weight=5, label=\"odd name;5\"];"));
        assert!(text.contains("h -> \"odd name\" [weight=0, label=0];"));

        let back = parse(&text).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn backslashes_survive_a_round_trip() {
        let mut c = Circuit::named("dir\\");
        let a = c.add_node("a\\", 1);
        let b = c.add_node("b\\\"c", 2);
        c.add_edge(a, b, 1);
        c.add_edge(b, a, 1);

        let text = write_dot(&c);
        assert!(text.contains("\"a\\\\\" [weight=1"));
        assert_eq!(parse(&text).unwrap(), c);
        assert_eq!(quote_id("x\\"), "\"x\\\\\"");
    }

    #[test]
    fn keyword_names_are_quoted() {
        assert_eq!(quote_id("node"), "\"node\"");
        assert_eq!(quote_id("d0"), "d0");
        assert_eq!(quote_id("0d"), "\"0d\"");
    }

    #[test]
    fn load_and_save_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tiny.dot");
        std::fs::write(&path, "digraph { a [weight=2]; a -> a [weight=1] }").unwrap();

        let sink = DiagnosticSink::new();
        let c = load_dot(&path, &sink).unwrap();
        assert_eq!(c.name, "tiny");

        let out = tmp.path().join("out.dot");
        save_dot(&c, &out).unwrap();
        assert_eq!(load_dot(&out, &sink).unwrap(), c);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_dot(Path::new("/nonexistent/c.dot"), &DiagnosticSink::new()).unwrap_err();
        assert!(matches!(err, DotError::Io(_)));
    }
}
