use bumpalo::collections::vec::Vec;
use std::{cmp, ops::Range};

use crate::token::Token;

/// A visitor over the Lox expression tree. Each consumer of the tree
/// (printing, evaluation) dispatches on the closed set of nodes here
pub trait Visitor {
  type Result;

  fn visit_expr(&mut self, expr: &Expr) -> Self::Result;

  fn visit_assign(&mut self, assign: &Assign) -> Self::Result;
  fn visit_logical(&mut self, logical: &Logical) -> Self::Result;
  fn visit_binary(&mut self, binary: &Binary) -> Self::Result;
  fn visit_unary(&mut self, unary: &Unary) -> Self::Result;
  fn visit_grouping(&mut self, grouping: &Grouping) -> Self::Result;
  fn visit_literal(&mut self, literal: &Literal) -> Self::Result;
  fn visit_variable(&mut self, variable: &Variable) -> Self::Result;
}

/// An object that can specify it's start and end position and optionally the full range
/// Implementors of ranges only need to implement `start` ad `end`
pub trait Spanned {
  /// The starting offset of this node
  fn start(&self) -> u32;

  /// The ending offset of this node
  fn end(&self) -> u32;

  /// The full range of this node
  fn span(&self) -> Span {
    Span {
      start: self.start(),
      end: self.end(),
    }
  }
}

/// Representing the start and end of a node
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
pub struct Span {
  pub start: u32,
  pub end: u32,
}

impl Span {
  pub fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }
}

impl From<Span> for Range<usize> {
  fn from(span: Span) -> Self {
    (span.start as usize)..(span.end as usize)
  }
}

/// The parsed program, one expression per top level
/// expression in source order
#[derive(Debug)]
pub struct Ast<'a> {
  pub exprs: Vec<'a, Expr<'a>>,
}

impl<'a> Ast<'a> {
  pub fn new(exprs: Vec<'a, Expr<'a>>) -> Self {
    Self { exprs }
  }

  pub fn len(&self) -> usize {
    self.exprs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.exprs.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Expr<'a>> {
    self.exprs.iter()
  }
}

/// An expression node. Nodes live in the source arena and are
/// freed with it, never dropped one by one
#[derive(Debug, Clone, Copy)]
pub enum Expr<'a> {
  Assign(&'a Assign<'a>),
  Logical(&'a Logical<'a>),
  Binary(&'a Binary<'a>),
  Unary(&'a Unary<'a>),
  Grouping(&'a Grouping<'a>),
  Literal(&'a Literal<'a>),
  Variable(&'a Variable<'a>),
}

impl<'a> Expr<'a> {
  /// The token most responsible for this node, used to
  /// attribute errors raised while evaluating it
  pub fn token(&self) -> &Token<'a> {
    match self {
      Expr::Assign(assign) => &assign.name,
      Expr::Logical(logical) => &logical.operator,
      Expr::Binary(binary) => &binary.operator,
      Expr::Unary(unary) => &unary.operator,
      Expr::Grouping(grouping) => &grouping.open,
      Expr::Literal(literal) => &literal.token,
      Expr::Variable(variable) => &variable.name,
    }
  }

  /// How many levels a walk of this expression recurses through.
  /// Operator chains are walked along their left side without
  /// recursing, so a left operand shares its chain's level
  ///
  /// # Examples
  /// ```
  /// use lox_interp::{parser::Parser, scanner::Scanner, source::Source, Config};
  ///
  /// let source = Source::new("1 + 2 + 3 + 4 -(5)");
  /// let (tokens, _) = Scanner::new(&source).scan();
  /// let ast = Parser::new(&source, tokens, Config::default()).parse().unwrap();
  ///
  /// assert_eq!(ast.exprs[0].height(), 3);
  /// ```
  pub fn height(&self) -> usize {
    match self {
      Expr::Assign(assign) => assign.height,
      Expr::Logical(logical) => logical.height,
      Expr::Binary(binary) => binary.height,
      Expr::Unary(unary) => unary.height,
      Expr::Grouping(grouping) => grouping.height,
      Expr::Literal(_) | Expr::Variable(_) => 1,
    }
  }

  /// The height of a node with this expression as the left operand
  fn chain_height(&self) -> usize {
    match self {
      Expr::Logical(_) | Expr::Binary(_) => self.height(),
      _ => self.height() + 1,
    }
  }
}

/// One operator in a left leaning chain of binary and logical operators
#[derive(Debug, Clone, Copy)]
pub enum Link<'e, 'a> {
  Binary(&'e Binary<'a>),
  Logical(&'e Logical<'a>),
}

impl<'e, 'a> Link<'e, 'a> {
  pub fn operator(&self) -> &'e Token<'a> {
    match self {
      Link::Binary(binary) => &binary.operator,
      Link::Logical(logical) => &logical.operator,
    }
  }

  pub fn lhs(&self) -> &'e Expr<'a> {
    match self {
      Link::Binary(binary) => &binary.lhs,
      Link::Logical(logical) => &logical.lhs,
    }
  }

  pub fn rhs(&self) -> &'e Expr<'a> {
    match self {
      Link::Binary(binary) => &binary.rhs,
      Link::Logical(logical) => &logical.rhs,
    }
  }

  /// This link and every link down its left side, outermost first,
  /// along with the leftmost operand of the chain
  pub fn spine(self) -> (std::vec::Vec<Link<'e, 'a>>, &'e Expr<'a>) {
    let mut links = vec![self];
    let mut lhs = self.lhs();

    loop {
      let link = match lhs {
        Expr::Binary(binary) => Link::Binary(binary),
        Expr::Logical(logical) => Link::Logical(logical),
        _ => return (links, lhs),
      };

      links.push(link);
      lhs = link.lhs();
    }
  }
}

impl<'a> Spanned for Expr<'a> {
  fn start(&self) -> u32 {
    let mut expr = self;

    // follow operator chains down their left side
    loop {
      match expr {
        Expr::Logical(logical) => expr = &logical.lhs,
        Expr::Binary(binary) => expr = &binary.lhs,
        Expr::Assign(assign) => return assign.start(),
        Expr::Unary(unary) => return unary.start(),
        Expr::Grouping(grouping) => return grouping.start(),
        Expr::Literal(literal) => return literal.start(),
        Expr::Variable(variable) => return variable.start(),
      }
    }
  }

  fn end(&self) -> u32 {
    match self {
      Expr::Assign(assign) => assign.end(),
      Expr::Logical(logical) => logical.end(),
      Expr::Binary(binary) => binary.end(),
      Expr::Unary(unary) => unary.end(),
      Expr::Grouping(grouping) => grouping.end(),
      Expr::Literal(literal) => literal.end(),
      Expr::Variable(variable) => variable.end(),
    }
  }
}

/// An assignment to a bare name. Only the value is ever evaluated
#[derive(Debug)]
pub struct Assign<'a> {
  pub name: Token<'a>,
  pub equal: Token<'a>,
  pub value: Expr<'a>,
  height: usize,
}

impl<'a> Assign<'a> {
  pub fn new(name: Token<'a>, equal: Token<'a>, value: Expr<'a>) -> Self {
    let height = value.height() + 1;

    Self {
      name,
      equal,
      value,
      height,
    }
  }
}

impl<'a> Spanned for Assign<'a> {
  fn start(&self) -> u32 {
    self.name.start()
  }

  fn end(&self) -> u32 {
    self.value.end()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
  And,
  Or,
}

#[derive(Debug)]
pub struct Logical<'a> {
  pub op: LogicalOp,
  pub operator: Token<'a>,
  pub lhs: Expr<'a>,
  pub rhs: Expr<'a>,
  height: usize,
}

impl<'a> Logical<'a> {
  pub fn new(op: LogicalOp, operator: Token<'a>, lhs: Expr<'a>, rhs: Expr<'a>) -> Self {
    let height = cmp::max(lhs.chain_height(), rhs.height() + 1);

    Self {
      op,
      operator,
      lhs,
      rhs,
      height,
    }
  }
}

impl<'a> Spanned for Logical<'a> {
  fn start(&self) -> u32 {
    self.lhs.start()
  }

  fn end(&self) -> u32 {
    self.rhs.end()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Lt,
  LtEq,
  Gt,
  GtEq,
  Eq,
  Ne,
}

#[derive(Debug)]
pub struct Binary<'a> {
  pub op: BinaryOp,
  pub operator: Token<'a>,
  pub lhs: Expr<'a>,
  pub rhs: Expr<'a>,
  height: usize,
}

impl<'a> Binary<'a> {
  pub fn new(op: BinaryOp, operator: Token<'a>, lhs: Expr<'a>, rhs: Expr<'a>) -> Self {
    let height = cmp::max(lhs.chain_height(), rhs.height() + 1);

    Self {
      op,
      operator,
      lhs,
      rhs,
      height,
    }
  }
}

impl<'a> Spanned for Binary<'a> {
  fn start(&self) -> u32 {
    self.lhs.start()
  }

  fn end(&self) -> u32 {
    self.rhs.end()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
  Not,
  Negate,
}

#[derive(Debug)]
pub struct Unary<'a> {
  pub op: UnaryOp,
  pub operator: Token<'a>,
  pub expr: Expr<'a>,
  height: usize,
}

impl<'a> Unary<'a> {
  pub fn new(op: UnaryOp, operator: Token<'a>, expr: Expr<'a>) -> Self {
    let height = expr.height() + 1;

    Self {
      op,
      operator,
      expr,
      height,
    }
  }
}

impl<'a> Spanned for Unary<'a> {
  fn start(&self) -> u32 {
    self.operator.start()
  }

  fn end(&self) -> u32 {
    self.expr.end()
  }
}

/// A parenthesized expression, kept distinct from its inner
/// expression so it can be printed back out
#[derive(Debug)]
pub struct Grouping<'a> {
  pub open: Token<'a>,
  pub expr: Expr<'a>,
  pub close: Token<'a>,
  height: usize,
}

impl<'a> Grouping<'a> {
  pub fn new(open: Token<'a>, expr: Expr<'a>, close: Token<'a>) -> Self {
    let height = expr.height() + 1;

    Self {
      open,
      expr,
      close,
      height,
    }
  }
}

impl<'a> Spanned for Grouping<'a> {
  fn start(&self) -> u32 {
    self.open.start()
  }

  fn end(&self) -> u32 {
    self.close.end()
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
  Number(f64),
  String(&'a str),
  Bool(bool),
  Nil,
}

#[derive(Debug)]
pub struct Literal<'a> {
  pub value: LiteralValue<'a>,
  pub token: Token<'a>,
}

impl<'a> Literal<'a> {
  pub fn new(value: LiteralValue<'a>, token: Token<'a>) -> Self {
    Self { value, token }
  }
}

impl<'a> Spanned for Literal<'a> {
  fn start(&self) -> u32 {
    self.token.start()
  }

  fn end(&self) -> u32 {
    self.token.end()
  }
}

#[derive(Debug)]
pub struct Variable<'a> {
  pub name: Token<'a>,
}

impl<'a> Variable<'a> {
  pub fn new(name: Token<'a>) -> Self {
    Self { name }
  }
}

impl<'a> Spanned for Variable<'a> {
  fn start(&self) -> u32 {
    self.name.start()
  }

  fn end(&self) -> u32 {
    self.name.end()
  }
}
