//! Semantic Analysis for Rustica
//!
//! Two passes over the AST:
//! - function hoisting, so calls may precede the callee's definition
//! - a full walk checking scopes, mutability, types and control flow
//!
//! Every diagnostic is recovered locally; one run reports every independent
//! error. All state lives in a session created per `analyze` call.

use std::collections::HashSet;

use log::{debug, info};

use crate::frontend::ast::*;
use crate::frontend::scope::{FunctionSig, FunctionTable, Symbol, SymbolKind, SymbolTable};
use crate::types::Type;
use crate::utils::{MismatchSite, SemanticError};

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Diagnostics in the order they were found
    pub diagnostics: Vec<SemanticError>,
    /// Every variable, parameter and loop binding, in declaration order
    pub symbols: Vec<Symbol>,
    /// Registered functions, in source order
    pub functions: Vec<FunctionSig>,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyze a program
pub fn analyze(program: &Program) -> Analysis {
    SemanticAnalyzer::new().run(program)
}

/// Innermost enclosing loop/function at the current point of the walk
#[derive(Debug, Clone, Default)]
struct Context {
    in_loop: bool,
    function: Option<String>,
    expected_return: Option<Type>,
}

/// Analysis session
struct SemanticAnalyzer {
    symbols: SymbolTable,
    functions: FunctionTable,
    ctx: Context,
    diagnostics: Vec<SemanticError>,
    seen: HashSet<SemanticError>,
}

impl SemanticAnalyzer {
    fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            functions: FunctionTable::new(),
            ctx: Context::default(),
            diagnostics: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn run(mut self, program: &Program) -> Analysis {
        // Pass 1: register all functions
        self.collect_functions(&program.stmts);

        // Pass 2: check everything
        self.check_stmts(&program.stmts);

        info!("semantic analysis finished with {} diagnostics", self.diagnostics.len());
        Analysis {
            diagnostics: self.diagnostics,
            symbols: self.symbols.into_symbols(),
            functions: self.functions.into_sigs(),
        }
    }

    /// Record a diagnostic unless an identical one was already recorded
    fn report(&mut self, err: SemanticError) {
        if self.seen.insert(err.clone()) {
            debug!("{}", err);
            self.diagnostics.push(err);
        }
    }

    fn mismatch(&mut self, site: MismatchSite, expected: &Type, found: &Type, line: usize) {
        self.report(SemanticError::TypeMismatch {
            site,
            expected: expected.clone(),
            found: found.clone(),
            line,
        });
    }

    // ==================== Pass 1 ====================

    fn collect_functions(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Function(func) => {
                    let sig = FunctionSig {
                        name: func.name.name.clone(),
                        params: func.params.iter().map(|p| Type::from_annotation(&p.ty)).collect(),
                        ret: Self::return_type(func),
                        line: func.span.line,
                    };
                    if let Err(err) = self.functions.register(sig) {
                        self.report(err);
                    }
                    self.collect_functions(&func.body.stmts);
                }
                Stmt::Block(block) => self.collect_functions(&block.stmts),
                Stmt::If { then_block, else_block, .. } => {
                    self.collect_functions(&then_block.stmts);
                    if let Some(block) = else_block {
                        self.collect_functions(&block.stmts);
                    }
                }
                Stmt::While { body, .. } | Stmt::For { body, .. } => {
                    self.collect_functions(&body.stmts)
                }
                _ => {}
            }
        }
    }

    /// Declared return type; `-> ()` is the same as no return value
    fn return_type(func: &Function) -> Option<Type> {
        func.ret_type
            .as_ref()
            .map(Type::from_annotation)
            .filter(|ty| *ty != Type::Unit)
    }

    // ==================== Pass 2: statements ====================

    fn check_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_block(&mut self, block: &Block) {
        self.symbols.enter_scope();
        self.check_stmts(&block.stmts);
        self.symbols.exit_scope();
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let { name, mutable, init, span } => {
                self.check_let(name, *mutable, init, span.line)
            }
            Stmt::Assign { name, op, value, span } => {
                self.check_assign(name, *op, value, span.line)
            }
            Stmt::AssignIndex { target, value, span } => {
                let value_ty = self.check_expr(value);
                let elem_ty = self.check_index(target);
                let name = &target.base.name;

                let binding = self.symbols.lookup(name).map(|s| (s.mutable, s.initialized));
                if let Some((mutable, initialized)) = binding {
                    if !mutable && initialized {
                        self.report(SemanticError::ImmutableAssignment {
                            name: name.clone(),
                            line: span.line,
                        });
                    }
                    if !elem_ty.compatible(&value_ty) {
                        self.mismatch(
                            MismatchSite::IndexedAssignment(name.clone()),
                            &elem_ty,
                            &value_ty,
                            span.line,
                        );
                    }
                }
                if let Some(symbol) = self.symbols.lookup_mut(name) {
                    symbol.initialized = true;
                }
            }
            Stmt::Expr(expr) => {
                // A discarded value is not checked against anything
                self.check_expr(expr);
            }
            Stmt::Print { args, .. } => {
                for arg in args {
                    self.check_expr(arg);
                }
            }
            Stmt::If { cond, then_block, else_block, span } => {
                self.check_condition(cond, "if", span.line);
                self.check_block(then_block);
                if let Some(block) = else_block {
                    self.check_block(block);
                }
            }
            Stmt::While { cond, body, span } => {
                self.check_condition(cond, "while", span.line);
                let was_in_loop = std::mem::replace(&mut self.ctx.in_loop, true);
                self.check_block(body);
                self.ctx.in_loop = was_in_loop;
            }
            Stmt::For { var, iter, body, span } => {
                self.check_expr(iter);

                self.symbols.enter_scope();
                let symbol = Symbol::new(var.name.clone(), SymbolKind::LoopVar, Type::I32, span.line);
                if let Err(err) = self.symbols.define(symbol) {
                    self.report(err);
                }
                let was_in_loop = std::mem::replace(&mut self.ctx.in_loop, true);
                self.check_stmts(&body.stmts);
                self.ctx.in_loop = was_in_loop;
                self.symbols.exit_scope();
            }
            Stmt::Block(block) => self.check_block(block),
            Stmt::Function(func) => self.check_function(func),
            Stmt::Return { value, span } => self.check_return(value.as_ref(), span.line),
            Stmt::Break { span } => self.check_loop_keyword("break", span.line),
            Stmt::Continue { span } => self.check_loop_keyword("continue", span.line),
            Stmt::Empty { .. } => {}
        }
    }

    fn check_let(&mut self, name: &Ident, mutable: bool, init: &LetInit, line: usize) {
        // The initializer is evaluated before the new binding exists
        let value_ty = init.value().map(|value| self.check_expr(value));
        let declared = init.ty().map(Type::from_annotation);

        if let (Some(declared), Some(value_ty)) = (&declared, &value_ty) {
            if !declared.compatible(value_ty) {
                self.mismatch(MismatchSite::Declaration(name.name.clone()), declared, value_ty, line);
            }
        }

        let mut symbol = Symbol::new(
            name.name.clone(),
            SymbolKind::Variable,
            declared.or(value_ty).unwrap_or(Type::Unknown),
            line,
        );
        symbol.mutable = mutable;
        symbol.initialized = init.value().is_some();

        if let Err(err) = self.symbols.define(symbol) {
            self.report(err);
        }
    }

    fn check_assign(&mut self, name: &Ident, op: AssignOp, value: &Expr, line: usize) {
        let value_ty = self.check_expr(value);

        let Some(symbol) = self.symbols.lookup(&name.name).cloned() else {
            self.report(SemanticError::UndeclaredVariable {
                name: name.name.clone(),
                line,
            });
            return;
        };

        if !symbol.mutable && symbol.initialized {
            self.report(SemanticError::ImmutableAssignment {
                name: name.name.clone(),
                line,
            });
        }

        let mut inferred = None;
        match op {
            AssignOp::Assign => {
                if symbol.ty.is_unknown() {
                    // First assignment to `let x;` fixes its type
                    inferred = Some(value_ty);
                } else if !symbol.ty.compatible(&value_ty) {
                    self.mismatch(MismatchSite::Assignment(name.name.clone()), &symbol.ty, &value_ty, line);
                }
            }
            _ => {
                let numeric = |ty: &Type| ty.is_numeric() || ty.is_unknown();
                if !numeric(&symbol.ty) || !numeric(&value_ty) {
                    self.report(SemanticError::NonNumericOperands {
                        op: op.as_str().to_string(),
                        left: symbol.ty.clone(),
                        right: value_ty,
                        line,
                    });
                }
            }
        }

        if let Some(target) = self.symbols.lookup_mut(&name.name) {
            target.initialized = true;
            if let Some(ty) = inferred {
                target.ty = ty;
            }
        }
    }

    fn check_condition(&mut self, cond: &Expr, keyword: &'static str, line: usize) {
        let ty = self.check_expr(cond);
        if !Type::Bool.compatible(&ty) {
            self.mismatch(MismatchSite::Condition(keyword), &Type::Bool, &ty, line);
        }
    }

    fn check_function(&mut self, func: &Function) {
        let name = func.name.name.clone();
        let expected_return = Self::return_type(func);
        debug!("checking function '{}'", name);

        // A function body starts outside of any loop
        let saved = std::mem::replace(
            &mut self.ctx,
            Context {
                in_loop: false,
                function: Some(name.clone()),
                expected_return: expected_return.clone(),
            },
        );

        self.symbols.enter_scope();
        for param in &func.params {
            let ty = Type::from_annotation(&param.ty);
            let symbol = Symbol::new(param.name.name.clone(), SymbolKind::Param, ty, param.name.span.line);
            if let Err(err) = self.symbols.define(symbol) {
                self.report(err);
            }
        }
        self.check_stmts(&func.body.stmts);
        self.symbols.exit_scope();

        if expected_return.is_some() && !contains_return(&func.body.stmts) {
            self.report(SemanticError::MissingReturn {
                function: name,
                line: func.span.line,
            });
        }

        self.ctx = saved;
    }

    fn check_return(&mut self, value: Option<&Expr>, line: usize) {
        let value_ty = value.map(|v| self.check_expr(v));

        let Some(function) = self.ctx.function.clone() else {
            self.report(SemanticError::ReturnOutsideFunction { line });
            return;
        };

        match (self.ctx.expected_return.clone(), value_ty) {
            (None, None) => {}
            (None, Some(_)) => self.report(SemanticError::UnexpectedReturnValue { function, line }),
            (Some(expected), None) => {
                self.report(SemanticError::MissingReturnValue { function, expected, line })
            }
            (Some(expected), Some(found)) => {
                if !expected.compatible(&found) {
                    self.mismatch(MismatchSite::Return(function), &expected, &found, line);
                }
            }
        }
    }

    fn check_loop_keyword(&mut self, keyword: &'static str, line: usize) {
        if !self.ctx.in_loop {
            self.report(SemanticError::OutsideLoop { keyword, line });
        }
    }

    // ==================== Pass 2: expressions ====================

    /// Check an expression and infer its type
    fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Literal(lit) => literal_type(lit),

            Expr::Ident(ident) => match self.symbols.lookup(&ident.name) {
                Some(symbol) => symbol.ty.clone(),
                None => {
                    if !self.functions.contains(&ident.name) {
                        self.report(SemanticError::UndeclaredVariable {
                            name: ident.name.clone(),
                            line: ident.span.line,
                        });
                    }
                    Type::Unknown
                }
            },

            Expr::Binary { left, op, right, .. } => {
                let left = self.check_expr(left);
                let right = self.check_expr(right);
                if op.is_arithmetic() {
                    Type::dominant(&left, &right)
                } else {
                    Type::Bool
                }
            }

            Expr::Unary { op, expr, .. } => {
                let ty = self.check_expr(expr);
                match op {
                    UnOp::Not => Type::Bool,
                    UnOp::Neg => ty,
                }
            }

            Expr::Call { name, args, span } => self.check_call(name, args, span.line),

            Expr::Index(target) => self.check_index(target),

            Expr::TupleAccess { base, index, .. } => match self.symbols.lookup(&base.name) {
                Some(symbol) => symbol.ty.slot(*index),
                None => {
                    self.report(SemanticError::UndeclaredVariable {
                        name: base.name.clone(),
                        line: base.span.line,
                    });
                    Type::Unknown
                }
            },

            Expr::Vector { elements, span } => {
                let elem = self.check_elements(elements, "vector", span.line);
                Type::Vec(Box::new(elem))
            }

            Expr::Array { elements, span } => {
                let elem = self.check_elements(elements, "array", span.line);
                Type::Array {
                    elem: Box::new(elem),
                    size: elements.len(),
                }
            }

            Expr::Tuple { elements, .. } => {
                if elements.is_empty() {
                    Type::Unit
                } else {
                    Type::Tuple(elements.iter().map(|e| self.check_expr(e)).collect())
                }
            }

            Expr::Range { start, end, .. } => {
                self.check_expr(start);
                self.check_expr(end);
                Type::I32
            }
        }
    }

    fn check_call(&mut self, name: &Ident, args: &[Expr], line: usize) -> Type {
        // Arguments are always checked, even when the call itself is invalid
        let arg_types: Vec<Type> = args.iter().map(|arg| self.check_expr(arg)).collect();

        let Some(sig) = self.functions.get(&name.name).cloned() else {
            self.report(SemanticError::UndeclaredFunction {
                name: name.name.clone(),
                line,
            });
            return Type::Unknown;
        };

        if sig.params.len() != arg_types.len() {
            self.report(SemanticError::ArityMismatch {
                name: sig.name.clone(),
                expected: sig.params.len(),
                found: arg_types.len(),
                line,
            });
        } else {
            for (position, (expected, found)) in sig.params.iter().zip(&arg_types).enumerate() {
                if !expected.compatible(found) {
                    let site = MismatchSite::Argument {
                        function: sig.name.clone(),
                        position: position + 1,
                    };
                    self.mismatch(site, expected, found, line);
                }
            }
        }

        sig.ret.unwrap_or(Type::Unit)
    }

    /// Check `base[index]` and return the element type
    fn check_index(&mut self, target: &IndexTarget) -> Type {
        let index_ty = self.check_expr(&target.index);
        let name = &target.base.name;
        let line = target.span.line;

        let Some(base_ty) = self.symbols.lookup(name).map(|s| s.ty.clone()) else {
            self.report(SemanticError::UndeclaredVariable {
                name: name.clone(),
                line,
            });
            return Type::Unknown;
        };

        if !Type::I32.compatible(&index_ty) {
            self.report(SemanticError::IndexType {
                name: name.clone(),
                found: index_ty,
                line,
            });
        }

        base_ty.element()
    }

    /// Infer the common element type of a collection literal. Only the first
    /// element that disagrees is reported.
    fn check_elements(&mut self, elements: &[Expr], literal: &'static str, line: usize) -> Type {
        let types: Vec<Type> = elements.iter().map(|e| self.check_expr(e)).collect();

        let Some(reference) = types.iter().find(|t| !t.is_unknown()).cloned() else {
            return Type::Unknown;
        };

        if let Some(offending) = types.iter().find(|t| !reference.compatible(t)) {
            self.mismatch(MismatchSite::Elements(literal), &reference, offending, line);
        }

        reference
    }
}

fn literal_type(lit: &Literal) -> Type {
    match lit {
        Literal::Int(..) => Type::I32,
        Literal::Float(..) => Type::F64,
        Literal::Bool(..) => Type::Bool,
        Literal::Char(..) => Type::Char,
        Literal::String(s, _) if s.chars().count() == 1 => Type::Char,
        Literal::String(..) => Type::Str,
    }
}

/// Whether a `return` appears anywhere in these statements, not counting
/// nested function definitions
fn contains_return(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match stmt {
        Stmt::Return { .. } => true,
        Stmt::Block(block) => contains_return(&block.stmts),
        Stmt::If { then_block, else_block, .. } => {
            contains_return(&then_block.stmts)
                || else_block.as_ref().map_or(false, |b| contains_return(&b.stmts))
        }
        Stmt::While { body, .. } | Stmt::For { body, .. } => contains_return(&body.stmts),
        _ => false,
    })
}
