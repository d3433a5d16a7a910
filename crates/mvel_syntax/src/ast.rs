//! Abstract Syntax Tree definitions for MVEL
//!
//! This module defines all AST node types produced by the parser: literals, expressions (including the MVEL
//! navigation, collection-query, and mutation forms), statements, and switch blocks.
//!
//! ## Notes
//! - The tree owns its children exclusively (`Box`/`Vec`), so it is finite and acyclic by construction.
//! - Literal payloads keep their **source spelling** (`"10L"`, `"0x1F"`, the raw text between quotes) so translation
//!   can reproduce them verbatim.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// Top-level production requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// A single bare expression.
    #[default]
    Expression,
    /// A sequence of statements.
    Program,
}

/// Root of a parsed unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    Expression(Spanned<Expr>),
    Program(Program),
}

impl Root {
    pub fn mode(&self) -> ParseMode {
        match self {
            Root::Expression(_) => ParseMode::Expression,
            Root::Program(_) => ParseMode::Program,
        }
    }
}

/// A program is a sequence of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Spanned<Statement>>,
}

// ============================================================================
// Types
// ============================================================================

/// A type reference as written in source: `java.util.List<String>[]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRef {
    /// Dotted name, e.g. `Map.Entry` or `int`.
    pub name: String,
    /// Generic arguments; `Some(vec![])` is the diamond `<>`.
    pub args: Option<Vec<TypeRef>>,
    /// Number of trailing `[]` pairs.
    pub dims: usize,
}

impl TypeRef {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
            dims: 0,
        }
    }

    /// `var` as a local type asks the target to infer it.
    pub fn is_var(&self) -> bool {
        self.name == "var" && self.args.is_none() && self.dims == 0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(args) = &self.args {
            write!(f, "<")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    ForEach(ForEachStmt),
    Try(TryStmt),
    Switch(SwitchBlock),
    Return(Option<Spanned<Expr>>),
    Throw(Spanned<Expr>),
    Yield(Spanned<Expr>),
    Break(Option<Ident>),
    Continue(Option<Ident>),
    Empty,
    Expr(Spanned<Expr>),
    LocalDecl(LocalDecl),
    Labeled(Ident, Box<Spanned<Statement>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_branch: Box<Spanned<Statement>>,
    pub else_branch: Option<Box<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStmt {
    pub body: Box<Spanned<Statement>>,
    pub condition: Spanned<Expr>,
}

/// Basic `for (init; cond; update) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: ForInit,
    pub condition: Option<Spanned<Expr>>,
    pub update: Vec<Spanned<Expr>>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    None,
    Decl(LocalDecl),
    Exprs(Vec<Spanned<Expr>>),
}

/// Enhanced `for (T x : iterable) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub is_final: bool,
    pub ty: TypeRef,
    pub name: Ident,
    pub iterable: Spanned<Expr>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub body: Block,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Block>,
}

/// `catch (A | B e) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub types: Vec<TypeRef>,
    pub name: Ident,
    pub body: Block,
}

/// `final int a = 1, b[] = {2};`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDecl {
    pub is_final: bool,
    pub ty: TypeRef,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Ident,
    /// Extra `[]` written after the name (`int a[]`).
    pub dims: usize,
    pub init: Option<Spanned<Expr>>,
}

// ============================================================================
// Switch (statement and expression share one shape)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchStyle {
    /// `case A:` with fallthrough statement groups.
    Colon,
    /// `case A ->` with a single body per case.
    Arrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBlock {
    pub selector: Box<Spanned<Expr>>,
    pub style: SwitchStyle,
    pub cases: Vec<Spanned<SwitchCase>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub labels: Vec<CaseLabel>,
    pub guard: Option<Spanned<Expr>>,
    pub body: CaseBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    Default,
    /// Constant (or `null`) label.
    Expr(Spanned<Expr>),
    /// Type pattern `case String s`.
    Pattern { ty: TypeRef, binding: Ident },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseBody {
    /// Colon form: the statement group up to the next label.
    Statements(Vec<Spanned<Statement>>),
    /// Arrow form: `-> expr;`
    Expr(Spanned<Expr>),
    /// Arrow form: `-> { ... }`
    Block(Block),
    /// Arrow form: `-> throw e;`
    Throw(Spanned<Expr>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(String),
    Float(String),
    /// Raw text between the single quotes, escapes preserved.
    Char(String),
    /// Raw text between the quotes, escapes preserved.
    String(String),
    /// Raw text between the `"""` delimiters.
    TextBlock(String),
    Bool(bool),
    Null,
    /// Raw pattern between `~/` and `/`.
    Regex(String),
    /// Numeric literal immediately followed by a unit tag: `10B`, `5pounds`.
    Unit { value: String, unit: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Ident),
    This,
    /// `super` as a method-call receiver.
    Super,
    /// `super.name`
    SuperField(Ident),
    New(Box<Creator>),
    List(Vec<Spanned<Expr>>),
    Map(Vec<MapEntry>),
    /// `{a, b}` in an initializer position.
    ArrayInit(Vec<Spanned<Expr>>),
    /// `empty`
    Empty,
    /// `nil`
    Nil,
    /// `undefined`
    Undefined,
    Paren(Box<Spanned<Expr>>),

    Field(Box<Spanned<Expr>>, Ident),
    SafeField(Box<Spanned<Expr>>, Ident),
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    SafeIndex(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// Call on a bare callee: `f(x)`.
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    MethodCall(Box<Spanned<Expr>>, Ident, Vec<Spanned<Expr>>),
    SafeMethodCall(Box<Spanned<Expr>>, Ident, Vec<Spanned<Expr>>),
    /// `target::name` (name may be `new`).
    MethodRef(Box<Spanned<Expr>>, Ident),

    Postfix(Box<Spanned<Expr>>, IncDec),
    Prefix(IncDec, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    TypeTest(TypeTest),
    Cast(TypeRef, Box<Spanned<Expr>>),
    Ternary(Box<Spanned<Expr>>, Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Assign(Box<Spanned<Expr>>, AssignOp, Box<Spanned<Expr>>),

    /// `c.{e}`
    Projection(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `c.?(e)`
    Selection(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `isdef(e)`
    IsDef(Box<Spanned<Expr>>),
    /// `text ~ pattern`
    RegexMatch(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `e#T`
    Coercion(Box<Spanned<Expr>>, CoercionTarget),
    /// `obj{ f = v, g(x) }`
    MutationBlock(Box<Spanned<Expr>>, Vec<MutationEntry>),
    /// `obj[t1, t2]`
    PredicateBlock(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),

    Lambda(Lambda),
    Switch(SwitchBlock),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDec {
    Inc,
    Dec,
}

impl fmt::Display for IncDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncDec::Inc => write!(f, "++"),
            IncDec::Dec => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::BitNot => write!(f, "~"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Pow,
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    StrSim,
    SoundsLike,
    Contains,
    In,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl BinaryOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(self, BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq)
    }

    /// Operators whose result is a boolean.
    pub fn is_boolean(self) -> bool {
        self.is_relational()
            || matches!(
                self,
                BinaryOp::Eq
                    | BinaryOp::NotEq
                    | BinaryOp::StrSim
                    | BinaryOp::SoundsLike
                    | BinaryOp::Contains
                    | BinaryOp::In
                    | BinaryOp::And
                    | BinaryOp::Or
            )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Pow => write!(f, "**"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Rem => write!(f, "%"),
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::StrSim => write!(f, "strsim"),
            BinaryOp::SoundsLike => write!(f, "soundslike"),
            BinaryOp::Contains => write!(f, "contains"),
            BinaryOp::In => write!(f, "in"),
            BinaryOp::BitAnd => write!(f, "&"),
            BinaryOp::BitXor => write!(f, "^"),
            BinaryOp::BitOr => write!(f, "|"),
            BinaryOp::And => write!(f, "&&"),
            BinaryOp::Or => write!(f, "||"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    /// `**=`
    Pow,
}

impl AssignOp {
    /// The arithmetic operator a compound assignment applies, if any.
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Sub => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::Rem => Some(BinaryOp::Rem),
            AssignOp::Pow => Some(BinaryOp::Pow),
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOp::Assign => write!(f, "="),
            AssignOp::Add => write!(f, "+="),
            AssignOp::Sub => write!(f, "-="),
            AssignOp::Mul => write!(f, "*="),
            AssignOp::Div => write!(f, "/="),
            AssignOp::Rem => write!(f, "%="),
            AssignOp::Pow => write!(f, "**="),
        }
    }
}

/// `expr instanceof Type [binding]` (also spelled `is`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTest {
    pub expr: Box<Spanned<Expr>>,
    pub ty: TypeRef,
    pub binding: Option<Ident>,
}

/// Right-hand side of `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionTarget {
    /// `e#Car`
    Type(Ident),
    /// `e#"java.util.List"`
    Quoted(String),
}

impl CoercionTarget {
    pub fn type_name(&self) -> &str {
        match self {
            CoercionTarget::Type(name) => name,
            CoercionTarget::Quoted(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationEntry {
    /// `field = value`
    Assign {
        field: Ident,
        value: Spanned<Expr>,
    },
    /// Any other expression, applied to the subject.
    Expr(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Creator {
    /// `new Type(args)`
    Class { ty: TypeRef, args: Vec<Spanned<Expr>> },
    /// `new int[n][]` with sized dimensions then unsized ones.
    Array {
        ty: TypeRef,
        sizes: Vec<Spanned<Expr>>,
        extra_dims: usize,
    },
    /// `new int[] {1, 2}`
    ArrayInit { ty: TypeRef, elements: Vec<Spanned<Expr>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<Ident>,
    /// Whether the parameter list was parenthesized.
    pub parenthesized: bool,
    pub body: LambdaBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Spanned<Expr>>),
    Block(Block),
}

// ============================================================================
// Visitor
// ============================================================================

/// Read-only traversal over the tree.
///
/// Every `visit_*` method defaults to the matching `walk_*` function, so an implementor overrides only the nodes it
/// cares about and calls `walk_*` to keep descending.
pub trait Visitor {
    fn visit_root(&mut self, root: &Root) {
        walk_root(self, root);
    }

    fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
        walk_statement(self, stmt);
    }

    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_local_decl(&mut self, decl: &LocalDecl) {
        walk_local_decl(self, decl);
    }

    fn visit_switch(&mut self, switch: &SwitchBlock) {
        walk_switch(self, switch);
    }

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }
}

pub fn walk_root<V: Visitor + ?Sized>(v: &mut V, root: &Root) {
    match root {
        Root::Expression(expr) => v.visit_expr(expr),
        Root::Program(program) => {
            for stmt in &program.statements {
                v.visit_statement(stmt);
            }
        }
    }
}

pub fn walk_local_decl<V: Visitor + ?Sized>(v: &mut V, decl: &LocalDecl) {
    for d in &decl.declarators {
        if let Some(init) = &d.init {
            v.visit_expr(init);
        }
    }
}

pub fn walk_switch<V: Visitor + ?Sized>(v: &mut V, switch: &SwitchBlock) {
    v.visit_expr(&switch.selector);
    for case in &switch.cases {
        for label in &case.node.labels {
            if let CaseLabel::Expr(e) = label {
                v.visit_expr(e);
            }
        }
        if let Some(guard) = &case.node.guard {
            v.visit_expr(guard);
        }
        match &case.node.body {
            CaseBody::Statements(stmts) => {
                for stmt in stmts {
                    v.visit_statement(stmt);
                }
            }
            CaseBody::Expr(e) | CaseBody::Throw(e) => v.visit_expr(e),
            CaseBody::Block(block) => v.visit_block(block),
        }
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &Spanned<Statement>) {
    match &stmt.node {
        Statement::Block(block) => v.visit_block(block),
        Statement::If(s) => {
            v.visit_expr(&s.condition);
            v.visit_statement(&s.then_branch);
            if let Some(e) = &s.else_branch {
                v.visit_statement(e);
            }
        }
        Statement::While(s) => {
            v.visit_expr(&s.condition);
            v.visit_statement(&s.body);
        }
        Statement::DoWhile(s) => {
            v.visit_statement(&s.body);
            v.visit_expr(&s.condition);
        }
        Statement::For(s) => {
            match &s.init {
                ForInit::None => {}
                ForInit::Decl(decl) => v.visit_local_decl(decl),
                ForInit::Exprs(exprs) => exprs.iter().for_each(|e| v.visit_expr(e)),
            }
            if let Some(c) = &s.condition {
                v.visit_expr(c);
            }
            s.update.iter().for_each(|e| v.visit_expr(e));
            v.visit_statement(&s.body);
        }
        Statement::ForEach(s) => {
            v.visit_expr(&s.iterable);
            v.visit_statement(&s.body);
        }
        Statement::Try(s) => {
            v.visit_block(&s.body);
            for c in &s.catches {
                v.visit_block(&c.body);
            }
            if let Some(f) = &s.finally {
                v.visit_block(f);
            }
        }
        Statement::Switch(s) => v.visit_switch(s),
        Statement::Return(e) => {
            if let Some(e) = e {
                v.visit_expr(e);
            }
        }
        Statement::Throw(e) | Statement::Yield(e) | Statement::Expr(e) => v.visit_expr(e),
        Statement::Break(_) | Statement::Continue(_) | Statement::Empty => {}
        Statement::LocalDecl(decl) => v.visit_local_decl(decl),
        Statement::Labeled(_, inner) => v.visit_statement(inner),
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        Expr::Literal(_)
        | Expr::Ident(_)
        | Expr::This
        | Expr::Super
        | Expr::SuperField(_)
        | Expr::Empty
        | Expr::Nil
        | Expr::Undefined => {}
        Expr::New(creator) => match creator.as_ref() {
            Creator::Class { args, .. } => args.iter().for_each(|a| v.visit_expr(a)),
            Creator::Array { sizes, .. } => sizes.iter().for_each(|a| v.visit_expr(a)),
            Creator::ArrayInit { elements, .. } => elements.iter().for_each(|a| v.visit_expr(a)),
        },
        Expr::List(items) | Expr::ArrayInit(items) => items.iter().for_each(|e| v.visit_expr(e)),
        Expr::Map(entries) => {
            for entry in entries {
                v.visit_expr(&entry.key);
                v.visit_expr(&entry.value);
            }
        }
        Expr::Paren(inner)
        | Expr::Field(inner, _)
        | Expr::SafeField(inner, _)
        | Expr::MethodRef(inner, _)
        | Expr::Postfix(inner, _)
        | Expr::Prefix(_, inner)
        | Expr::Unary(_, inner)
        | Expr::Cast(_, inner)
        | Expr::IsDef(inner)
        | Expr::Coercion(inner, _) => v.visit_expr(inner),
        Expr::Index(a, b)
        | Expr::SafeIndex(a, b)
        | Expr::Binary(a, _, b)
        | Expr::Assign(a, _, b)
        | Expr::Projection(a, b)
        | Expr::Selection(a, b)
        | Expr::RegexMatch(a, b) => {
            v.visit_expr(a);
            v.visit_expr(b);
        }
        Expr::Call(callee, args) => {
            v.visit_expr(callee);
            args.iter().for_each(|a| v.visit_expr(a));
        }
        Expr::MethodCall(recv, _, args) | Expr::SafeMethodCall(recv, _, args) => {
            v.visit_expr(recv);
            args.iter().for_each(|a| v.visit_expr(a));
        }
        Expr::TypeTest(t) => v.visit_expr(&t.expr),
        Expr::Ternary(c, a, b) => {
            v.visit_expr(c);
            v.visit_expr(a);
            v.visit_expr(b);
        }
        Expr::MutationBlock(subject, entries) => {
            v.visit_expr(subject);
            for entry in entries {
                match entry {
                    MutationEntry::Assign { value, .. } => v.visit_expr(value),
                    MutationEntry::Expr(e) => v.visit_expr(e),
                }
            }
        }
        Expr::PredicateBlock(subject, tests) => {
            v.visit_expr(subject);
            tests.iter().for_each(|t| v.visit_expr(t));
        }
        Expr::Lambda(lambda) => match &lambda.body {
            LambdaBody::Expr(body) => v.visit_expr(body),
            LambdaBody::Block(block) => v.visit_block(block),
        },
        Expr::Switch(switch) => v.visit_switch(switch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 9);
        let b = Span::new(1, 6);
        assert_eq!(a.merge(b), Span::new(1, 9));
    }

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef {
            name: "Map".to_string(),
            args: Some(vec![TypeRef::simple("String"), TypeRef::simple("Integer")]),
            dims: 1,
        };
        assert_eq!(ty.to_string(), "Map<String, Integer>[]");

        let diamond = TypeRef {
            name: "ArrayList".to_string(),
            args: Some(vec![]),
            dims: 0,
        };
        assert_eq!(diamond.to_string(), "ArrayList<>");
    }

    #[test]
    fn test_compound_assign_maps_to_binary() {
        assert_eq!(AssignOp::Add.binary_op(), Some(BinaryOp::Add));
        assert_eq!(AssignOp::Assign.binary_op(), None);
        assert_eq!(AssignOp::Rem.to_string(), "%=");
    }

    #[test]
    fn test_visitor_reaches_nested_expressions() {
        struct Idents(Vec<String>);
        impl Visitor for Idents {
            fn visit_expr(&mut self, expr: &Spanned<Expr>) {
                if let Expr::Ident(name) = &expr.node {
                    self.0.push(name.clone());
                }
                walk_expr(self, expr);
            }
        }

        let leaf = |name: &str| Box::new(Spanned::new(Expr::Ident(name.to_string()), Span::default()));
        let expr = Spanned::new(
            Expr::Ternary(leaf("a"), leaf("b"), Box::new(Spanned::new(Expr::Paren(leaf("c")), Span::default()))),
            Span::default(),
        );
        let mut v = Idents(Vec::new());
        v.visit_root(&Root::Expression(expr));
        assert_eq!(v.0, vec!["a", "b", "c"]);
    }
}
