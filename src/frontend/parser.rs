//! Parser for Rustica
//!
//! Recursive descent parser with precedence climbing for expressions.
//! Syntax errors never abort the parse: each one is recorded, the parser
//! resynchronizes at the next statement boundary and carries on, so a single
//! run reports every independent error.

use log::{debug, info};

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Span, SyntaxError};

type PResult<T> = std::result::Result<T, SyntaxError>;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer<'_>) -> Self {
        Self::from_tokens(lexer.tokenize())
    }

    /// Create a parser from pre-tokenized input. A missing trailing `Eof` is added.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            let span = tokens
                .last()
                .map(|t| {
                    let column = t.span.column + (t.span.end - t.span.start);
                    Span::new(t.span.end, t.span.end, t.span.line, column)
                })
                .unwrap_or_default();
            tokens.push(Token::eof(span));
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Error describing the current token
    fn unexpected(&self) -> SyntaxError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            SyntaxError::UnexpectedEof
        } else {
            SyntaxError::UnexpectedToken {
                value: token.value(),
                line: token.span.line,
                column: token.span.column,
            }
        }
    }

    fn expect(&mut self, expected: TokenKind) -> PResult<Token> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    // ==================== Error Recovery ====================

    fn record(&mut self, err: SyntaxError) {
        if err == SyntaxError::UnexpectedEof && self.errors.contains(&err) {
            return;
        }
        debug!("recovering from {}", err);
        self.errors.push(err);
    }

    /// Discard input up to a statement boundary. At least one token is
    /// dropped when the failing statement consumed nothing. An opening
    /// brace is left in place so its group is parsed as a block.
    fn synchronize(&mut self, start: usize) {
        if self.pos == start {
            self.advance();
        }
        while !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::LBrace | TokenKind::RBrace => return,
                kind if kind.starts_statement() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program, returning the (possibly partial) AST and
    /// every syntax error in source order.
    pub fn parse_program(&mut self) -> (Program, Vec<SyntaxError>) {
        let stmts = self.parse_stmt_list(false);
        info!("parsed {} statements, {} syntax errors", stmts.len(), self.errors.len());
        (Program { stmts }, std::mem::take(&mut self.errors))
    }

    fn parse_stmt_list(&mut self, in_block: bool) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.is_at_end() && !(in_block && self.check(&TokenKind::RBrace)) {
            let start = self.pos;
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.record(err);
                    self.synchronize(start);
                }
            }
        }
        stmts
    }

    fn parse_block(&mut self) -> PResult<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let stmts = self.parse_stmt_list(true);
        self.expect(TokenKind::RBrace)?;

        Ok(Block {
            stmts,
            span: start.merge(&self.previous_span()),
        })
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.current_kind() {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::Fn => Ok(Stmt::Function(self.parse_function()?)),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => {
                let start = self.advance().span;
                let cond = self.parse_expr()?;
                let body = self.parse_block()?;
                Ok(Stmt::While {
                    cond,
                    span: start.merge(&body.span),
                    body,
                })
            }
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Break => {
                let span = self.advance().span;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Break { span })
            }
            TokenKind::Continue => {
                let span = self.advance().span;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Continue { span })
            }
            TokenKind::Print | TokenKind::Println => self.parse_print_stmt(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Semicolon => {
                let span = self.advance().span;
                Ok(Stmt::Empty { span })
            }
            TokenKind::Ident(_) if self.peek().and_then(|t| Self::assign_op(&t.kind)).is_some() => {
                self.parse_assign_stmt()
            }
            _ => {
                let expr = self.parse_expr()?;
                if let Expr::Index(target) = expr {
                    if self.consume(&TokenKind::Eq) {
                        let value = self.parse_expr()?;
                        self.expect(TokenKind::Semicolon)?;
                        return Ok(Stmt::AssignIndex {
                            span: target.span.merge(&self.previous_span()),
                            target,
                            value,
                        });
                    }
                    self.expect(TokenKind::Semicolon)?;
                    return Ok(Stmt::Expr(Expr::Index(target)));
                }
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_let_stmt(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::Let)?.span;

        let mutable = self.consume(&TokenKind::Mut);
        let name = self.parse_ident()?;

        let ty = if self.consume(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let value = if self.consume(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;

        let init = match (ty, value) {
            (None, None) => LetInit::Bare,
            (Some(ty), None) => LetInit::Typed(ty),
            (None, Some(value)) => LetInit::Value(value),
            (Some(ty), Some(value)) => LetInit::TypedValue(ty, value),
        };

        Ok(Stmt::Let {
            name,
            mutable,
            init,
            span: start.merge(&self.previous_span()),
        })
    }

    fn assign_op(kind: &TokenKind) -> Option<AssignOp> {
        match kind {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::AddAssign),
            TokenKind::MinusEq => Some(AssignOp::SubAssign),
            TokenKind::StarEq => Some(AssignOp::MulAssign),
            TokenKind::SlashEq => Some(AssignOp::DivAssign),
            TokenKind::PercentEq => Some(AssignOp::ModAssign),
            _ => None,
        }
    }

    fn parse_assign_stmt(&mut self) -> PResult<Stmt> {
        let name = self.parse_ident()?;
        let op = Self::assign_op(self.current_kind()).ok_or_else(|| self.unexpected())?;
        self.advance();
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Assign {
            span: name.span.merge(&self.previous_span()),
            name,
            op,
            value,
        })
    }

    fn parse_print_stmt(&mut self) -> PResult<Stmt> {
        let keyword = self.advance();
        let newline = keyword.kind == TokenKind::Println;
        let is_macro = self.consume(&TokenKind::Not);

        self.expect(TokenKind::LParen)?;
        let args = self.parse_args(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Print {
            newline,
            is_macro,
            args,
            span: keyword.span.merge(&self.previous_span()),
        })
    }

    fn parse_if_stmt(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::If)?.span;

        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;

        let else_block = if self.consume(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                let nested = self.parse_if_stmt()?;
                let span = match &nested {
                    Stmt::If { span, .. } => *span,
                    _ => self.previous_span(),
                };
                Some(Block {
                    stmts: vec![nested],
                    span,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        let end = else_block.as_ref().map(|b| b.span).unwrap_or(then_block.span);

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
            span: start.merge(&end),
        })
    }

    fn parse_for_stmt(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::For)?.span;
        let var = self.parse_ident()?;
        self.expect(TokenKind::In)?;

        let mut iter = self.parse_expr()?;
        if self.consume(&TokenKind::DotDot) {
            let end = self.parse_expr()?;
            iter = Expr::Range {
                span: iter.span().merge(&end.span()),
                start: Box::new(iter),
                end: Box::new(end),
            };
        }

        let body = self.parse_block()?;
        Ok(Stmt::For {
            var,
            iter,
            span: start.merge(&body.span),
            body,
        })
    }

    fn parse_return_stmt(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::Return)?.span;

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Return {
            value,
            span: start.merge(&self.previous_span()),
        })
    }

    /// Parse a function definition
    fn parse_function(&mut self) -> PResult<Function> {
        let start = self.expect(TokenKind::Fn)?.span;

        let name = self.parse_ident()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            let name = self.parse_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            params.push(Param { name, ty });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;

        let ret_type = if self.consume(&TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(Function {
            name,
            params,
            ret_type,
            span: start.merge(&body.span),
            body,
        })
    }

    fn parse_ident(&mut self) -> PResult<Ident> {
        let token = self.current().clone();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Ident {
                    name: name.clone(),
                    span: token.span,
                })
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_type(&mut self) -> PResult<TypeAnnotation> {
        let start = self.current().span;

        // Vec<T>, spelled with either the keyword or the std name
        let is_vec = match self.current_kind() {
            TokenKind::Vec => true,
            TokenKind::Ident(name) => name == "Vec" && matches!(self.peek(), Some(t) if t.kind == TokenKind::Lt),
            _ => false,
        };
        if is_vec {
            self.advance();
            self.expect(TokenKind::Lt)?;
            let elem = self.parse_type()?;
            self.expect(TokenKind::Gt)?;
            return Ok(TypeAnnotation::Vec(Box::new(elem), start.merge(&self.previous_span())));
        }

        // Array type [T; N]
        if self.consume(&TokenKind::LBracket) {
            let elem = self.parse_type()?;
            self.expect(TokenKind::Semicolon)?;
            let size = match self.current_kind() {
                TokenKind::IntLit(n) if *n >= 0 => *n as usize,
                _ => return Err(self.unexpected()),
            };
            self.advance();
            self.expect(TokenKind::RBracket)?;
            return Ok(TypeAnnotation::Array {
                elem: Box::new(elem),
                size,
                span: start.merge(&self.previous_span()),
            });
        }

        // Unit or tuple
        if self.consume(&TokenKind::LParen) {
            if self.consume(&TokenKind::RParen) {
                return Ok(TypeAnnotation::Tuple(Vec::new(), start.merge(&self.previous_span())));
            }

            let first = self.parse_type()?;
            if self.consume(&TokenKind::Comma) {
                let mut types = vec![first];
                while !self.check(&TokenKind::RParen) && !self.is_at_end() {
                    types.push(self.parse_type()?);
                    if !self.consume(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen)?;
                return Ok(TypeAnnotation::Tuple(types, start.merge(&self.previous_span())));
            }
            self.expect(TokenKind::RParen)?;
            return Ok(first);
        }

        // Named type
        if let TokenKind::Ident(name) = self.current_kind().clone() {
            self.advance();
            return Ok(TypeAnnotation::Named(name, start));
        }

        Err(self.unexpected())
    }

    // ==================== Expression Parsing ====================

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_expr_bp(0)
    }

    /// Parse expression with binding power (precedence climbing)
    fn parse_expr_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op_kind = self.current_kind().clone();
            let Some(bp) = op_kind.binary_precedence() else {
                break;
            };

            if bp < min_bp {
                break;
            }

            self.advance();
            let op = Self::token_to_binop(&op_kind).ok_or_else(|| self.unexpected())?;

            // All binary tiers are left-associative
            let right = self.parse_expr_bp(bp + 1)?;
            let span = left.span().merge(&right.span());

            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Prefix operators bind tighter than any binary tier and nest to the right
    fn parse_unary(&mut self) -> PResult<Expr> {
        let op = match self.current_kind() {
            TokenKind::Not => UnOp::Not,
            TokenKind::Minus => UnOp::Neg,
            _ => return self.parse_primary(),
        };
        let start = self.advance().span;
        let expr = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            span: start.merge(&expr.span()),
            expr: Box::new(expr),
        })
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let token = self.current().clone();

        let expr = match &token.kind {
            // Literals
            TokenKind::IntLit(n) => {
                self.advance();
                Expr::Literal(Literal::Int(*n, token.span))
            }
            TokenKind::FloatLit(n, _) => {
                self.advance();
                Expr::Literal(Literal::Float(*n, token.span))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Expr::Literal(Literal::String(s.clone(), token.span))
            }
            TokenKind::CharLit(c) => {
                self.advance();
                Expr::Literal(Literal::Char(*c, token.span))
            }
            TokenKind::True => {
                self.advance();
                Expr::Literal(Literal::Bool(true, token.span))
            }
            TokenKind::False => {
                self.advance();
                Expr::Literal(Literal::Bool(false, token.span))
            }

            // Identifier, call, index or tuple access
            TokenKind::Ident(_) => {
                let ident = self.parse_ident()?;

                if self.consume(&TokenKind::LParen) {
                    let args = self.parse_args(TokenKind::RParen)?;
                    Expr::Call {
                        span: ident.span.merge(&self.previous_span()),
                        name: ident,
                        args,
                    }
                } else if self.consume(&TokenKind::LBracket) {
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    Expr::Index(IndexTarget {
                        span: ident.span.merge(&self.previous_span()),
                        base: ident,
                        index: Box::new(index),
                    })
                } else if self.consume(&TokenKind::Dot) {
                    let index = match self.current_kind() {
                        TokenKind::IntLit(n) if *n >= 0 => *n as usize,
                        _ => return Err(self.unexpected()),
                    };
                    self.advance();
                    Expr::TupleAccess {
                        span: ident.span.merge(&self.previous_span()),
                        base: ident,
                        index,
                    }
                } else {
                    Expr::Ident(ident)
                }
            }

            // vec![...]
            TokenKind::Vec => {
                self.advance();
                self.expect(TokenKind::Not)?;
                self.expect(TokenKind::LBracket)?;
                let elements = self.parse_args(TokenKind::RBracket)?;
                Expr::Vector {
                    elements,
                    span: token.span.merge(&self.previous_span()),
                }
            }

            // Array literal
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_args(TokenKind::RBracket)?;
                Expr::Array {
                    elements,
                    span: token.span.merge(&self.previous_span()),
                }
            }

            // Parenthesized or tuple
            TokenKind::LParen => {
                self.advance();
                if self.consume(&TokenKind::RParen) {
                    return Ok(Expr::Tuple {
                        elements: Vec::new(),
                        span: token.span.merge(&self.previous_span()),
                    });
                }

                let first = self.parse_expr()?;
                if self.consume(&TokenKind::Comma) {
                    let mut elements = vec![first];
                    while !self.check(&TokenKind::RParen) && !self.is_at_end() {
                        elements.push(self.parse_expr()?);
                        if !self.consume(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    return Ok(Expr::Tuple {
                        elements,
                        span: token.span.merge(&self.previous_span()),
                    });
                }

                self.expect(TokenKind::RParen)?;
                first
            }

            _ => return Err(self.unexpected()),
        };

        Ok(expr)
    }

    /// Comma-separated expressions up to and including `close`
    fn parse_args(&mut self, close: TokenKind) -> PResult<Vec<Expr>> {
        let mut args = Vec::new();
        while !self.check(&close) && !self.is_at_end() {
            args.push(self.parse_expr()?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(args)
    }

    fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Percent => Some(BinOp::Mod),
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::Ne => Some(BinOp::Ne),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::Le => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::Ge => Some(BinOp::Ge),
            TokenKind::AndAnd => Some(BinOp::And),
            TokenKind::OrOr => Some(BinOp::Or),
            _ => None,
        }
    }
}

/// Parse a token stream into a program plus its syntax errors
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<SyntaxError>) {
    Parser::from_tokens(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> (Program, Vec<SyntaxError>) {
        Parser::new(Lexer::new(source)).parse_program()
    }

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse_source(source);
        assert!(errors.is_empty(), "unexpected syntax errors: {:?}", errors);
        program
    }

    fn first_expr(source: &str) -> Expr {
        match parse_ok(source).stmts.into_iter().next() {
            Some(Stmt::Expr(expr)) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    /// Render an expression with explicit grouping
    fn sexpr(expr: &Expr) -> String {
        match expr {
            Expr::Literal(Literal::Int(n, _)) => n.to_string(),
            Expr::Literal(Literal::Bool(b, _)) => b.to_string(),
            Expr::Ident(ident) => ident.name.clone(),
            Expr::Binary { left, op, right, .. } => {
                format!("({:?} {} {})", op, sexpr(left), sexpr(right))
            }
            Expr::Unary { op, expr, .. } => format!("({:?} {})", op, sexpr(expr)),
            other => format!("{:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        let program = parse_ok("");
        assert!(program.stmts.is_empty());
    }

    #[test]
    fn test_function_with_return() {
        let program = parse_ok("fn add(a: i32, b: i32) -> i32 { return a + b; }");
        assert_eq!(program.stmts.len(), 1);
        match &program.stmts[0] {
            Stmt::Function(func) => {
                assert_eq!(func.name.name, "add");
                assert_eq!(func.params.len(), 2);
                assert!(matches!(func.ret_type, Some(TypeAnnotation::Named(ref n, _)) if n == "i32"));
                assert!(matches!(func.body.stmts[0], Stmt::Return { value: Some(_), .. }));
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_let_shapes() {
        let program = parse_ok("let a; let mut b = 1; let c: f64; let mut d: bool = true;");
        let shapes: Vec<(bool, bool, bool)> = program
            .stmts
            .iter()
            .map(|s| match s {
                Stmt::Let { mutable, init, .. } => (*mutable, init.ty().is_some(), init.value().is_some()),
                other => panic!("expected let, got {:?}", other),
            })
            .collect();
        assert_eq!(
            shapes,
            vec![(false, false, false), (true, false, true), (false, true, false), (true, true, true)]
        );
        assert!(matches!(program.stmts[0], Stmt::Let { init: LetInit::Bare, .. }));
        assert!(matches!(program.stmts[2], Stmt::Let { init: LetInit::Typed(_), .. }));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(sexpr(&first_expr("1 + 2 * 3;")), "(Add 1 (Mul 2 3))");
        assert_eq!(sexpr(&first_expr("a || b && c;")), "(Or a (And b c))");
        assert_eq!(sexpr(&first_expr("a == b < c;")), "(Eq a (Lt b c))");
        assert_eq!(sexpr(&first_expr("(1 + 2) * 3;")), "(Mul (Add 1 2) 3)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(sexpr(&first_expr("10 - 2 - 3;")), "(Sub (Sub 10 2) 3)");
        assert_eq!(sexpr(&first_expr("8 / 4 % 3;")), "(Mod (Div 8 4) 3)");
    }

    #[test]
    fn test_unary_binds_tightest() {
        assert_eq!(sexpr(&first_expr("!a && b;")), "(And (Not a) b)");
        assert_eq!(sexpr(&first_expr("!!a;")), "(Not (Not a))");
        assert_eq!(sexpr(&first_expr("-x * y;")), "(Mul (Neg x) y)");
    }

    #[test]
    fn test_assignments() {
        let program = parse_ok("x = 1; x += 2; x %= 3; arr[0] = 5;");
        assert!(matches!(program.stmts[0], Stmt::Assign { op: AssignOp::Assign, .. }));
        assert!(matches!(program.stmts[1], Stmt::Assign { op: AssignOp::AddAssign, .. }));
        assert!(matches!(program.stmts[2], Stmt::Assign { op: AssignOp::ModAssign, .. }));
        assert!(matches!(program.stmts[3], Stmt::AssignIndex { ref target, .. } if target.base.name == "arr"));
    }

    #[test]
    fn test_collections_and_access() {
        let program = parse_ok("let v = vec![1, 2]; let a = [1, 2, 3]; let t = (1, 'c'); let x = t.1; let y = a[0];");
        let values: Vec<&Expr> = program
            .stmts
            .iter()
            .filter_map(|s| match s {
                Stmt::Let { init, .. } => init.value(),
                _ => None,
            })
            .collect();
        assert!(matches!(values[0], Expr::Vector { elements, .. } if elements.len() == 2));
        assert!(matches!(values[1], Expr::Array { elements, .. } if elements.len() == 3));
        assert!(matches!(values[2], Expr::Tuple { elements, .. } if elements.len() == 2));
        assert!(matches!(values[3], Expr::TupleAccess { index: 1, .. }));
        assert!(matches!(values[4], Expr::Index(_)));
    }

    #[test]
    fn test_type_annotations() {
        let program = parse_ok("let a: Vec<i32>; let b: [f64; 4]; let c: (i32, bool); let d: vec<char>;");
        let types: Vec<&TypeAnnotation> = program
            .stmts
            .iter()
            .filter_map(|s| match s {
                Stmt::Let { init, .. } => init.ty(),
                _ => None,
            })
            .collect();
        assert!(matches!(types[0], TypeAnnotation::Vec(..)));
        assert!(matches!(types[1], TypeAnnotation::Array { size: 4, .. }));
        assert!(matches!(types[2], TypeAnnotation::Tuple(elems, _) if elems.len() == 2));
        assert!(matches!(types[3], TypeAnnotation::Vec(..)));
    }

    #[test]
    fn test_control_flow_statements() {
        let program = parse_ok(
            "while i < 3 { i += 1; continue; } for k in 0..3 { break; } if a { } else if b { } else { }",
        );
        assert!(matches!(program.stmts[0], Stmt::While { .. }));
        assert!(matches!(program.stmts[1], Stmt::For { iter: Expr::Range { .. }, .. }));
        match &program.stmts[2] {
            Stmt::If { else_block: Some(block), .. } => {
                assert!(matches!(block.stmts[0], Stmt::If { else_block: Some(_), .. }));
            }
            other => panic!("expected if/else, got {:?}", other),
        }
    }

    #[test]
    fn test_print_forms() {
        let program = parse_ok(r#"println!("a", x); print(1);"#);
        assert!(matches!(
            program.stmts[0],
            Stmt::Print { newline: true, is_macro: true, ref args, .. } if args.len() == 2
        ));
        assert!(matches!(program.stmts[1], Stmt::Print { newline: false, is_macro: false, .. }));
    }

    #[test]
    fn test_statement_lines() {
        let program = parse_ok("let a = 1;\n\nbreak;");
        assert!(matches!(program.stmts[1], Stmt::Break { span } if span.line == 3));
    }

    #[test]
    fn test_two_independent_errors() {
        let (program, errors) = parse_source("let x = ;\nlet y = 5 5;\nlet z = 1;");
        assert_eq!(
            errors,
            vec![
                SyntaxError::UnexpectedToken { value: ";".to_string(), line: 1, column: 9 },
                SyntaxError::UnexpectedToken { value: "5".to_string(), line: 2, column: 11 },
            ]
        );
        // The statement after both errors still parses
        assert_eq!(program.stmts.len(), 1);
        assert!(matches!(program.stmts[0], Stmt::Let { ref name, .. } if name.name == "z"));
    }

    #[test]
    fn test_error_in_if_condition_keeps_block() {
        let (program, errors) = parse_source("if a + { let y = 1; }\nlet b = ;\n");
        assert_eq!(
            errors,
            vec![
                SyntaxError::UnexpectedToken { value: "{".to_string(), line: 1, column: 8 },
                SyntaxError::UnexpectedToken { value: ";".to_string(), line: 2, column: 9 },
            ]
        );
        // The brace group is read as a plain block, so its `}` is not an error
        assert!(matches!(program.stmts[0], Stmt::Block(ref block) if block.stmts.len() == 1));
    }

    #[test]
    fn test_error_in_while_condition() {
        let (program, errors) = parse_source("while x < { x += 1; }\nlet c = 1;");
        assert_eq!(
            errors,
            vec![SyntaxError::UnexpectedToken { value: "{".to_string(), line: 1, column: 11 }]
        );
        assert_eq!(program.stmts.len(), 2);
        assert!(matches!(program.stmts[1], Stmt::Let { ref name, .. } if name.name == "c"));
    }

    #[test]
    fn test_unterminated_string_reported_at_quote() {
        let (_, errors) = parse_source("let s = \"never closed;\nlet t = 1;");
        assert_eq!(
            errors,
            vec![SyntaxError::UnexpectedToken { value: "\"".to_string(), line: 1, column: 9 }]
        );
    }

    #[test]
    fn test_error_message_format() {
        let (_, errors) = parse_source("fn f() {\n    let a = 1 +;\n}");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "syntax error at line 2, column 16: unexpected token ';'");
    }

    #[test]
    fn test_recovery_inside_function_body() {
        let (program, errors) = parse_source("fn f() {\n  let = 1;\n  let ok = 2;\n}\nlet after = 3;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.stmts.len(), 2);
        match &program.stmts[0] {
            Stmt::Function(func) => assert_eq!(func.body.stmts.len(), 1),
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let (_, errors) = parse_source("fn f() {\n  let a = 1;\n  if a {");
        assert_eq!(errors, vec![SyntaxError::UnexpectedEof]);
    }

    #[test]
    fn test_stray_closing_brace() {
        let (program, errors) = parse_source("}\nlet a = 1;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), Some(1));
        assert_eq!(program.stmts.len(), 1);
    }

    #[test]
    fn test_unknown_character_is_a_syntax_error() {
        let (_, errors) = parse_source("let a = 1 @ 2;");
        assert_eq!(
            errors,
            vec![SyntaxError::UnexpectedToken { value: "@".to_string(), line: 1, column: 11 }]
        );
    }

    #[test]
    fn test_from_tokens_without_eof() {
        let mut tokens = crate::frontend::lexer::tokenize("break;");
        tokens.pop();
        let (program, errors) = parse(tokens);
        assert!(errors.is_empty());
        assert_eq!(program.stmts.len(), 1);
    }
}
