//! Python syntax tree builder
//!
//! Parses raw Python source with tree-sitter and lowers the concrete syntax
//! tree into a small, closed set of node kinds that the metric engine cares
//! about:
//!
//! - function and class definitions (with their docstrings)
//! - branch constructs (`if`/`elif`/`while`/`for`/`try`/`with`)
//! - exception handlers (`except`, `except*`)
//! - boolean operators, flattened to their operand count
//!
//! Every other node is dissolved during lowering and its interesting
//! descendants are hoisted into the parent, so analyzers never have to
//! inspect raw tree-sitter node kinds.
//!
//! tree-sitter recovers from syntax errors instead of failing. The builder
//! rejects any tree containing an `ERROR` or `MISSING` node and reports the
//! location of the first one. The grammar also accepts a few forms Python 3
//! does not, and those are rejected the same way:
//!
//! - `print x` and `exec code` statements
//! - a comma-separated iterable in a comprehension (`f(x for x in y, 1)`)
//! - `del` on anything but a name, attribute, subscript or a tuple/list of
//!   those

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::utils::{split_lines, SplitLines};

/// A syntax failure with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Message including the location when one is known
    pub message: String,
    /// 1-based line of the first offending node
    pub line: Option<usize>,
    /// 1-based column of the first offending node
    pub column: Option<usize>,
}

impl ParseError {
    fn without_location(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    fn at(node: Node, reason: &str) -> Self {
        let line = node.start_position().row + 1;
        let column = node.start_position().column + 1;
        Self {
            message: format!("{} (line {}, column {})", reason, line, column),
            line: Some(line),
            column: Some(column),
        }
    }
}

// ============================================================================
// Tree Types
// ============================================================================

/// Branch constructs that add one decision point each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `if` statements and their `elif` clauses
    If,
    While,
    For,
    Try,
    With,
}

/// Boolean combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
}

/// A function definition (`def` or `async def`) at any nesting level
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    /// 1-based line of the `def` keyword
    pub line: usize,
    pub is_async: bool,
    /// Leading string-literal statement of the body, if any
    pub docstring: Option<String>,
    /// Lowered nodes of the signature and body
    pub body: Vec<SyntaxNode>,
}

/// A class definition at any nesting level
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// 1-based line of the `class` keyword
    pub line: usize,
    /// Leading string-literal statement of the body, if any
    pub docstring: Option<String>,
    /// Lowered nodes of the bases and body
    pub body: Vec<SyntaxNode>,
}

/// The node kinds the metric engine inspects
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Function(FunctionDef),
    Class(ClassDef),
    Branch {
        kind: BranchKind,
        children: Vec<SyntaxNode>,
    },
    ExceptHandler {
        children: Vec<SyntaxNode>,
    },
    /// `a and b and c` is one operator with three operands
    BoolOp {
        operator: BoolOperator,
        operands: usize,
        children: Vec<SyntaxNode>,
    },
}

/// The lowered module
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub docstring: Option<String>,
    pub body: Vec<SyntaxNode>,
}

// ============================================================================
// Visitor
// ============================================================================

/// Recursive-descent visitor over the lowered tree
///
/// The default methods walk every child. Override a method and skip the
/// matching `walk_*` call to stop descending at that node.
pub trait Visit<'ast> {
    fn visit_node(&mut self, node: &'ast SyntaxNode) {
        walk_node(self, node);
    }

    fn visit_function(&mut self, function: &'ast FunctionDef) {
        walk_body(self, &function.body);
    }

    fn visit_class(&mut self, class: &'ast ClassDef) {
        walk_body(self, &class.body);
    }
}

/// Visit each node of a body in order
pub fn walk_body<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, body: &'ast [SyntaxNode]) {
    for node in body {
        visitor.visit_node(node);
    }
}

/// Dispatch a node to the matching visitor method
pub fn walk_node<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast SyntaxNode) {
    match node {
        SyntaxNode::Function(function) => visitor.visit_function(function),
        SyntaxNode::Class(class) => visitor.visit_class(class),
        SyntaxNode::Branch { children, .. }
        | SyntaxNode::ExceptHandler { children }
        | SyntaxNode::BoolOp { children, .. } => walk_body(visitor, children),
    }
}

/// All function and class definitions of a module, in pre-order
#[derive(Debug, Default)]
pub struct Definitions<'ast> {
    pub functions: Vec<&'ast FunctionDef>,
    pub classes: Vec<&'ast ClassDef>,
}

impl<'ast> Visit<'ast> for Definitions<'ast> {
    fn visit_function(&mut self, function: &'ast FunctionDef) {
        self.functions.push(function);
        walk_body(self, &function.body);
    }

    fn visit_class(&mut self, class: &'ast ClassDef) {
        self.classes.push(class);
        walk_body(self, &class.body);
    }
}

// ============================================================================
// Source Unit
// ============================================================================

/// Raw source text together with its parsed tree
///
/// A unit can only be built from syntactically valid source and is never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    text: String,
    module: Module,
}

impl SourceUnit {
    /// Parse Python source into a unit
    pub fn parse(text: impl Into<String>) -> Result<Self, ParseError> {
        let text = text.into();
        let module = parse_module(&text)?;
        Ok(Self { text, module })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Raw lines, split on every Python line boundary
    pub fn lines(&self) -> SplitLines<'_> {
        split_lines(&self.text)
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Collect every function and class definition in one traversal
    pub fn definitions(&self) -> Definitions<'_> {
        let mut definitions = Definitions::default();
        walk_body(&mut definitions, &self.module.body);
        definitions
    }
}

/// Parse Python source into a lowered module
pub fn parse_module(source: &str) -> Result<Module, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ParseError::without_location(format!("Failed to set language: {:?}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::without_location("Failed to parse source"))?;

    let root = tree.root_node();
    if let Some((node, reason)) = first_invalid(root) {
        return Err(ParseError::at(node, &reason));
    }
    if root.has_error() {
        return Err(ParseError::without_location("invalid syntax"));
    }

    let lowering = Lowering { source };
    Ok(Module {
        docstring: lowering.docstring(root),
        body: lowering.children(root),
    })
}

/// Find the first node, in document order, that makes the source invalid
fn first_invalid(node: Node) -> Option<(Node, String)> {
    if let Some(found) = rejection(node) {
        return Some(found);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_invalid(child) {
            return Some(found);
        }
    }
    None
}

/// The offending node and reason when `node` itself is invalid
fn rejection(node: Node) -> Option<(Node, String)> {
    if node.is_missing() {
        return Some((node, format!("expected '{}'", node.kind())));
    }
    if node.is_error() {
        return Some((node, "invalid syntax".to_string()));
    }

    match node.kind() {
        "print_statement" => Some((node, "Missing parentheses in call to 'print'".to_string())),
        "exec_statement" => Some((node, "Missing parentheses in call to 'exec'".to_string())),
        "for_in_clause" if has_comma(node) => {
            let in_call = node.parent().is_some_and(|generator| {
                generator.kind() == "generator_expression"
                    && generator.parent().is_some_and(|p| p.kind() == "call")
            });
            let reason = if in_call {
                "Generator expression must be parenthesized"
            } else {
                "invalid syntax"
            };
            Some((node, reason.to_string()))
        }
        "delete_statement" => {
            let mut cursor = node.walk();
            let target = node
                .named_children(&mut cursor)
                .find(|child| child.kind() != "comment")?;
            invalid_delete_target(target)
                .map(|bad| (bad, format!("cannot delete {}", describe(bad))))
        }
        _ => None,
    }
}

fn has_comma(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == ",");
    found
}

/// First operand of a `del` statement that is not a deletable target
fn invalid_delete_target(node: Node) -> Option<Node> {
    match node.kind() {
        "identifier" | "attribute" | "subscript" | "comment" => None,
        "expression_list" | "tuple" | "list" | "parenthesized_expression" => {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            children.into_iter().find_map(invalid_delete_target)
        }
        _ => Some(node),
    }
}

fn describe(node: Node) -> &'static str {
    match node.kind() {
        "call" => "function call",
        "string" | "concatenated_string" | "integer" | "float" | "true" | "false" | "none" => {
            "literal"
        }
        _ => "expression",
    }
}

// ============================================================================
// Lowering
// ============================================================================

struct Lowering<'src> {
    source: &'src str,
}

impl<'src> Lowering<'src> {
    fn text(&self, node: Node) -> &'src str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Lower all named children of a node
    fn children(&self, node: Node) -> Vec<SyntaxNode> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower_into(child, &mut out);
        }
        out
    }

    fn lower_into(&self, node: Node, out: &mut Vec<SyntaxNode>) {
        let branch = match node.kind() {
            "function_definition" => {
                out.push(SyntaxNode::Function(self.function(node)));
                return;
            }
            "class_definition" => {
                out.push(SyntaxNode::Class(self.class(node)));
                return;
            }
            "except_clause" | "except_group_clause" => {
                out.push(SyntaxNode::ExceptHandler {
                    children: self.children(node),
                });
                return;
            }
            "boolean_operator" => {
                out.push(self.bool_op(node));
                return;
            }
            "decorated_definition" => {
                self.decorated(node, out);
                return;
            }
            // `elif` is a nested `if` in Python's own tree
            "if_statement" | "elif_clause" => BranchKind::If,
            "while_statement" => BranchKind::While,
            "for_statement" => BranchKind::For,
            "try_statement" => BranchKind::Try,
            "with_statement" => BranchKind::With,
            _ => {
                out.extend(self.children(node));
                return;
            }
        };

        out.push(SyntaxNode::Branch {
            kind: branch,
            children: self.children(node),
        });
    }

    fn function(&self, node: Node) -> FunctionDef {
        let mut cursor = node.walk();
        let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");

        FunctionDef {
            name: self.name(node),
            line: node.start_position().row + 1,
            is_async,
            docstring: node
                .child_by_field_name("body")
                .and_then(|body| self.docstring(body)),
            body: self.children(node),
        }
    }

    fn class(&self, node: Node) -> ClassDef {
        ClassDef {
            name: self.name(node),
            line: node.start_position().row + 1,
            docstring: node
                .child_by_field_name("body")
                .and_then(|body| self.docstring(body)),
            body: self.children(node),
        }
    }

    /// Decorator expressions belong to the definition they decorate
    fn decorated(&self, node: Node, out: &mut Vec<SyntaxNode>) {
        let mut decorators = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "decorator" {
                decorators.extend(self.children(child));
            }
        }

        let definition = node.child_by_field_name("definition");
        match definition.map(|d| (d, d.kind())) {
            Some((def, "function_definition")) => {
                let mut function = self.function(def);
                decorators.append(&mut function.body);
                function.body = decorators;
                out.push(SyntaxNode::Function(function));
            }
            Some((def, "class_definition")) => {
                let mut class = self.class(def);
                decorators.append(&mut class.body);
                class.body = decorators;
                out.push(SyntaxNode::Class(class));
            }
            _ => out.extend(self.children(node)),
        }
    }

    fn name(&self, node: Node) -> String {
        node.child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default()
    }

    /// Flatten a same-operator chain into one node
    fn bool_op(&self, node: Node) -> SyntaxNode {
        let operator = self.bool_operator(node);
        let mut operands = 0;
        let mut children = Vec::new();
        self.collect_operands(node, operator, &mut operands, &mut children);

        SyntaxNode::BoolOp {
            operator,
            operands,
            children,
        }
    }

    fn collect_operands(
        &self,
        node: Node,
        operator: BoolOperator,
        operands: &mut usize,
        children: &mut Vec<SyntaxNode>,
    ) {
        for field in ["left", "right"] {
            let Some(operand) = node.child_by_field_name(field) else {
                continue;
            };
            if operand.kind() == "boolean_operator" && self.bool_operator(operand) == operator {
                self.collect_operands(operand, operator, operands, children);
            } else {
                *operands += 1;
                self.lower_into(operand, children);
            }
        }
    }

    fn bool_operator(&self, node: Node) -> BoolOperator {
        match node.child_by_field_name("operator").map(|op| op.kind()) {
            Some("or") => BoolOperator::Or,
            _ => BoolOperator::And,
        }
    }

    /// Docstring of a module or block: the first non-comment statement,
    /// when it is a bare plain string literal
    fn docstring(&self, body: Node) -> Option<String> {
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment")?;
        if first.kind() != "expression_statement" {
            return None;
        }

        let mut inner = first.walk();
        let mut expressions = first.named_children(&mut inner);
        let expression = expressions.next()?;
        if expressions.next().is_some() {
            return None;
        }

        self.string_literal(expression)
            .map(|text| text.trim().to_string())
    }

    fn string_literal(&self, node: Node) -> Option<String> {
        match node.kind() {
            "string" => self.plain_string(node),
            "concatenated_string" => {
                let mut cursor = node.walk();
                let mut text = String::new();
                for part in node.named_children(&mut cursor) {
                    match part.kind() {
                        "string" => text.push_str(&self.plain_string(part)?),
                        "comment" => {}
                        _ => return None,
                    }
                }
                Some(text)
            }
            _ => None,
        }
    }

    /// Contents of a `str` literal; `None` for bytes and f-strings
    fn plain_string(&self, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        let mut content_start = node.start_byte();
        let mut content_end = node.end_byte();

        for child in node.children(&mut cursor) {
            match child.kind() {
                "string_start" => {
                    let prefix = self.text(child).trim_end_matches(['"', '\'']);
                    if prefix.contains(['b', 'B', 'f', 'F']) {
                        return None;
                    }
                    content_start = child.end_byte();
                }
                "string_end" => content_end = child.start_byte(),
                "interpolation" => return None,
                _ => {}
            }
        }

        self.source
            .get(content_start..content_end.max(content_start))
            .map(str::to_string)
    }
}
