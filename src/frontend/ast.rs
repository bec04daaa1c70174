//! Abstract Syntax Tree definitions for Rustica

use crate::utils::Span;

/// A complete program (one statement list)
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// Code block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// Shape of a `let` declaration, decided by which optional parts were parsed
#[derive(Debug, Clone, PartialEq)]
pub enum LetInit {
    /// `let x;`
    Bare,
    /// `let x: T;`
    Typed(TypeAnnotation),
    /// `let x = e;`
    Value(Expr),
    /// `let x: T = e;`
    TypedValue(TypeAnnotation, Expr),
}

impl LetInit {
    pub fn ty(&self) -> Option<&TypeAnnotation> {
        match self {
            LetInit::Typed(ty) | LetInit::TypedValue(ty, _) => Some(ty),
            LetInit::Bare | LetInit::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<&Expr> {
        match self {
            LetInit::Value(e) | LetInit::TypedValue(_, e) => Some(e),
            LetInit::Bare | LetInit::Typed(_) => None,
        }
    }
}

/// Plain and compound assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// let [mut] name [: type] [= expr];
    Let {
        name: Ident,
        mutable: bool,
        init: LetInit,
        span: Span,
    },
    /// name op= expr;
    Assign {
        name: Ident,
        op: AssignOp,
        value: Expr,
        span: Span,
    },
    /// name[index] = expr;
    AssignIndex {
        target: IndexTarget,
        value: Expr,
        span: Span,
    },
    /// Expression statement
    Expr(Expr),
    /// print!(..) / println!(..), with or without the `!`
    Print {
        newline: bool,
        is_macro: bool,
        args: Vec<Expr>,
        span: Span,
    },
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Block,
        span: Span,
    },
    For {
        var: Ident,
        iter: Expr,
        body: Block,
        span: Span,
    },
    /// Nested `{ ... }`
    Block(Block),
    Function(Function),
    /// return [expr];
    Return {
        value: Option<Expr>,
        span: Span,
    },
    Break { span: Span },
    Continue { span: Span },
    /// Empty statement (;)
    Empty { span: Span },
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret_type: Option<TypeAnnotation>,
    pub body: Block,
    pub span: Span,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeAnnotation,
}

/// `base[index]`, shared by index expressions and indexed assignment
#[derive(Debug, Clone, PartialEq)]
pub struct IndexTarget {
    pub base: Ident,
    pub index: Box<Expr>,
    pub span: Span,
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Ident),
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
        span: Span,
    },
    /// name(args)
    Call {
        name: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    /// name[index]
    Index(IndexTarget),
    /// name.N
    TupleAccess {
        base: Ident,
        index: usize,
        span: Span,
    },
    /// vec![...]
    Vector {
        elements: Vec<Expr>,
        span: Span,
    },
    /// [...]
    Array {
        elements: Vec<Expr>,
        span: Span,
    },
    /// (a, b, ...)
    Tuple {
        elements: Vec<Expr>,
        span: Span,
    },
    /// start..end, only produced as a `for` iterable
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span(),
            Expr::Ident(ident) => ident.span,
            Expr::Index(target) => target.span,
            Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Call { span, .. }
            | Expr::TupleAccess { span, .. }
            | Expr::Vector { span, .. }
            | Expr::Array { span, .. }
            | Expr::Tuple { span, .. }
            | Expr::Range { span, .. } => *span,
        }
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64, Span),
    Float(f64, Span),
    String(String, Span),
    Char(char, Span),
    Bool(bool, Span),
}

impl Literal {
    pub fn span(&self) -> Span {
        match self {
            Literal::Int(_, s) => *s,
            Literal::Float(_, s) => *s,
            Literal::String(_, s) => *s,
            Literal::Char(_, s) => *s,
            Literal::Bool(_, s) => *s,
        }
    }
}

/// Identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod)
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// Negation (-)
    Neg,
    /// Logical not (!)
    Not,
}

/// Type annotation as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeAnnotation {
    /// i32, f64, String, ...
    Named(String, Span),
    /// Vec<T>
    Vec(Box<TypeAnnotation>, Span),
    /// [T; N]
    Array {
        elem: Box<TypeAnnotation>,
        size: usize,
        span: Span,
    },
    /// (T1, T2, ...)
    Tuple(Vec<TypeAnnotation>, Span),
}

