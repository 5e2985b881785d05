//! Parser for the textual constraint language.
//!
//! The grammar is the usual polyhedral notation:
//!
//! ```text
//! [n, m] -> { [i, j] : 0 <= i, j < n and i + j < m }
//! [n] -> { [i] -> [j] : 0 <= i, j < n }
//! ```
//!
//! Constraints are conjunctions (`and`) of comparison chains over comma
//! lists, with disjunction (`or`) producing the pieces of the resulting
//! object. Expressions are affine: `+`, `-`, `*` by a constant, parentheses.

use crate::error::{ParseError, Result};
use crate::polyhedral::constraint::{Constraint, ConstraintSystem};
use crate::polyhedral::expr::AffineExpr;
use crate::polyhedral::relation::IntegerRelation;
use crate::polyhedral::space::{DimKind, Space};

/// Parse a set, e.g. `[n] -> { [i, j] : 0 <= i, j < n }`.
pub fn parse_set(source: &str) -> Result<IntegerRelation> {
    let parsed = Parser::new(source)?.parse_object()?;
    if parsed.space().is_relation() {
        return Err(ParseError::new("expected a set, found a relation", 0).into());
    }
    Ok(parsed)
}

/// Parse a relation, e.g. `[n] -> { [i] -> [j] : 0 <= i, j < n }`.
pub fn parse_relation(source: &str) -> Result<IntegerRelation> {
    let parsed = Parser::new(source)?.parse_object()?;
    if !parsed.space().is_relation() {
        return Err(ParseError::new("expected a relation, found a set", 0).into());
    }
    Ok(parsed)
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Int(i64),
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Colon,
    Arrow,
    Plus,
    Minus,
    Star,
    Le,
    Lt,
    Ge,
    Gt,
    Eq,
    And,
    Or,
    Eof,
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    offset: usize,
}

fn lex(source: &str) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        let offset = i;
        let tok = match c {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
                continue;
            }
            '[' => Tok::LBracket,
            ']' => Tok::RBracket,
            '{' => Tok::LBrace,
            '}' => Tok::RBrace,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            ',' => Tok::Comma,
            ':' => Tok::Colon,
            '+' => Tok::Plus,
            '*' => Tok::Star,
            '-' => {
                if bytes.get(i + 1) == Some(&b'>') {
                    i += 1;
                    Tok::Arrow
                } else {
                    Tok::Minus
                }
            }
            '<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 1;
                    Tok::Le
                } else {
                    Tok::Lt
                }
            }
            '>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 1;
                    Tok::Ge
                } else {
                    Tok::Gt
                }
            }
            '=' => Tok::Eq,
            '0'..='9' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let text = &source[start..i];
                let value = text
                    .parse::<i64>()
                    .map_err(|_| ParseError::new("integer literal out of range", start))?;
                tokens.push(Token {
                    tok: Tok::Int(value),
                    offset,
                });
                continue;
            }
            _ if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < bytes.len()
                    && ((bytes[i] as char).is_ascii_alphanumeric()
                        || bytes[i] == b'_'
                        || bytes[i] == b'\'')
                {
                    i += 1;
                }
                let text = &source[start..i];
                let tok = match text {
                    "and" => Tok::And,
                    "or" => Tok::Or,
                    _ => Tok::Ident(text.to_string()),
                };
                tokens.push(Token { tok, offset });
                continue;
            }
            _ => {
                return Err(ParseError::new(format!("unexpected character '{}'", c), i).into());
            }
        };
        i += 1;
        tokens.push(Token { tok, offset });
    }
    tokens.push(Token {
        tok: Tok::Eof,
        offset: bytes.len(),
    });
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    space: Space,
}

impl Parser {
    fn new(source: &str) -> Result<Self> {
        Ok(Self {
            tokens: lex(source)?,
            pos: 0,
            space: Space::set(0, 0),
        })
    }

    fn peek(&self) -> &Tok {
        &self.tokens[self.pos].tok
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].offset
    }

    fn advance(&mut self) -> Tok {
        let tok = self.tokens[self.pos].tok.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: Tok, what: &str) -> Result<()> {
        if *self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::new(format!("expected {}", what), self.offset()).into())
        }
    }

    fn check(&mut self, expected: Tok) -> bool {
        if *self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<String> {
        match self.peek().clone() {
            Tok::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::new("expected identifier", self.offset()).into()),
        }
    }

    /// `[a, b, c]` — possibly empty.
    fn ident_tuple(&mut self) -> Result<Vec<String>> {
        self.eat(Tok::LBracket, "'['")?;
        let mut names = Vec::new();
        if *self.peek() != Tok::RBracket {
            names.push(self.ident()?);
            while self.check(Tok::Comma) {
                names.push(self.ident()?);
            }
        }
        self.eat(Tok::RBracket, "']'")?;
        Ok(names)
    }

    fn parse_object(mut self) -> Result<IntegerRelation> {
        let params = if *self.peek() == Tok::LBracket {
            let params = self.ident_tuple()?;
            self.eat(Tok::Arrow, "'->'")?;
            params
        } else {
            Vec::new()
        };

        self.eat(Tok::LBrace, "'{'")?;
        let first = self.ident_tuple()?;
        let (ins, outs) = if self.check(Tok::Arrow) {
            let outs = self.ident_tuple()?;
            (first, outs)
        } else {
            (Vec::new(), first)
        };

        let mut space = Space::relation(ins.len(), outs.len(), params.len());
        let mut seen: Vec<&str> = Vec::new();
        let groups = [
            (DimKind::Param, &params),
            (DimKind::In, &ins),
            (DimKind::Out, &outs),
        ];
        for (kind, names) in groups {
            for (idx, name) in names.iter().enumerate() {
                if seen.contains(&name.as_str()) {
                    return Err(
                        ParseError::new(format!("duplicate dimension name {}", name), 0).into(),
                    );
                }
                seen.push(name);
                space = space.with_dim_name(kind, idx, name.clone());
            }
        }
        self.space = space;

        let pieces = if self.check(Tok::Colon) {
            self.disjunction()?
        } else {
            vec![ConstraintSystem::new()]
        };

        self.eat(Tok::RBrace, "'}'")?;
        self.eat(Tok::Eof, "end of input")?;

        IntegerRelation::from_pieces(self.space, pieces)
    }

    /// Constraints in disjunctive normal form: each element is one piece.
    fn disjunction(&mut self) -> Result<Vec<ConstraintSystem>> {
        let mut pieces = self.conjunction()?;
        while self.check(Tok::Or) {
            pieces.extend(self.conjunction()?);
        }
        Ok(pieces)
    }

    fn conjunction(&mut self) -> Result<Vec<ConstraintSystem>> {
        let mut pieces = self.constraint_term()?;
        while self.check(Tok::And) {
            let rhs = self.constraint_term()?;
            // Conjunction distributes over the pieces of both sides.
            let mut joined = Vec::with_capacity(pieces.len() * rhs.len());
            for a in &pieces {
                for b in &rhs {
                    joined.push(a.conjoin(b));
                }
            }
            pieces = joined;
        }
        Ok(pieces)
    }

    /// Either a parenthesized disjunction or a comparison chain. A leading
    /// `(` is ambiguous (it may open an expression), so try the constraint
    /// reading first and rewind on failure.
    fn constraint_term(&mut self) -> Result<Vec<ConstraintSystem>> {
        if *self.peek() == Tok::LParen {
            let saved = self.pos;
            self.advance();
            if let Ok(inner) = self.disjunction() {
                if self.check(Tok::RParen) {
                    return Ok(inner);
                }
            }
            self.pos = saved;
        }
        Ok(vec![self.chain()?])
    }

    /// A comparison chain over comma lists, e.g. `0 <= i, j < n`. Every
    /// adjacent pair of lists contributes all pairwise constraints.
    fn chain(&mut self) -> Result<ConstraintSystem> {
        let mut lists = vec![self.expr_list()?];
        let mut ops = Vec::new();
        while let Some(op) = self.comparison_op() {
            ops.push(op);
            lists.push(self.expr_list()?);
        }
        if ops.is_empty() {
            return Err(ParseError::new("expected comparison", self.offset()).into());
        }

        let mut system = ConstraintSystem::new();
        for (i, op) in ops.iter().enumerate() {
            for lhs in &lists[i] {
                for rhs in &lists[i + 1] {
                    let constraint = match op {
                        Tok::Le => Constraint::le(lhs.clone(), rhs.clone()),
                        Tok::Lt => Constraint::lt(lhs.clone(), rhs.clone()),
                        Tok::Ge => Constraint::le(rhs.clone(), lhs.clone()),
                        Tok::Gt => Constraint::lt(rhs.clone(), lhs.clone()),
                        Tok::Eq => Constraint::eq(lhs.clone(), rhs.clone()),
                        _ => unreachable!("comparison_op only yields comparisons"),
                    };
                    system.add(constraint);
                }
            }
        }
        Ok(system)
    }

    fn comparison_op(&mut self) -> Option<Tok> {
        match self.peek() {
            Tok::Le | Tok::Lt | Tok::Ge | Tok::Gt | Tok::Eq => Some(self.advance()),
            _ => None,
        }
    }

    fn expr_list(&mut self) -> Result<Vec<AffineExpr>> {
        let mut exprs = vec![self.expr()?];
        while self.check(Tok::Comma) {
            exprs.push(self.expr()?);
        }
        Ok(exprs)
    }

    fn expr(&mut self) -> Result<AffineExpr> {
        let mut expr = self.term()?;
        loop {
            if self.check(Tok::Plus) {
                expr = expr + self.term()?;
            } else if self.check(Tok::Minus) {
                expr = expr - self.term()?;
            } else {
                return Ok(expr);
            }
        }
    }

    fn term(&mut self) -> Result<AffineExpr> {
        let mut expr = self.factor()?;
        while self.check(Tok::Star) {
            let offset = self.offset();
            let rhs = self.factor()?;
            expr = if let Some(c) = rhs.as_constant() {
                expr.scale(c)
            } else if let Some(c) = expr.as_constant() {
                rhs.scale(c)
            } else {
                return Err(ParseError::new("non-affine product", offset).into());
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<AffineExpr> {
        let offset = self.offset();
        match self.advance() {
            Tok::Int(value) => Ok(AffineExpr::constant(value, &self.space)),
            Tok::Minus => Ok(-self.factor()?),
            Tok::LParen => {
                let expr = self.expr()?;
                self.eat(Tok::RParen, "')'")?;
                Ok(expr)
            }
            Tok::Ident(name) => {
                for &kind in &DimKind::ALL {
                    if let Some(idx) = self.space.find_dim(kind, &name) {
                        return Ok(AffineExpr::var(kind, idx, &self.space));
                    }
                }
                Err(ParseError::new(format!("unknown identifier {}", name), offset).into())
            }
            _ => Err(ParseError::new("expected expression", offset).into()),
        }
    }
}
