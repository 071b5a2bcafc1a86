use crate::ast::*;
use lox_core::utils::format_literal;

/// Prints the ast in a fully parenthesized prefix form,
/// one line per top level expression
#[derive(Default)]
pub struct AstPrint {
  buffer: String,
}

impl AstPrint {
  fn reset(&mut self) {
    self.buffer.clear();
  }

  pub fn str(&self) -> &str {
    &self.buffer
  }

  /// Print every top level expression of the ast
  pub fn visit(&mut self, ast: &Ast) {
    self.reset();

    for expr in ast.iter() {
      self.visit_expr(expr);
      self.buffer.push('\n');
    }
  }

  /// Print a single expression
  ///
  /// # Examples
  /// ```
  /// use lox_interp::{ast_printer::AstPrint, parser::Parser, scanner::Scanner, source::Source, Config};
  ///
  /// let source = Source::new("!(1 + x) == \"y\"");
  /// let (tokens, _) = Scanner::new(&source).scan();
  /// let ast = Parser::new(&source, tokens, Config::default()).parse().unwrap();
  ///
  /// let mut printer = AstPrint::default();
  /// assert_eq!(printer.print_expr(&ast.exprs[0]), "(== (! (group (+ 1.0 x))) y)");
  /// ```
  pub fn print_expr(&mut self, expr: &Expr) -> &str {
    self.reset();
    self.visit_expr(expr);
    &self.buffer
  }

  fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) {
    self.buffer.push('(');
    self.buffer.push_str(name);

    for expr in exprs {
      self.buffer.push(' ');
      self.visit_expr(expr);
    }

    self.buffer.push(')');
  }

  /// Print an operator chain without recursing down its left side
  fn chain(&mut self, link: Link) {
    let (links, leaf) = link.spine();

    for link in &links {
      self.buffer.push('(');
      self.buffer.push_str(link.operator().str());
      self.buffer.push(' ');
    }

    self.visit_expr(leaf);

    for link in links.iter().rev() {
      self.buffer.push(' ');
      self.visit_expr(link.rhs());
      self.buffer.push(')');
    }
  }
}

impl Visitor for AstPrint {
  type Result = ();

  fn visit_expr(&mut self, expr: &Expr) -> Self::Result {
    match expr {
      Expr::Assign(assign) => self.visit_assign(assign),
      Expr::Logical(logical) => self.visit_logical(logical),
      Expr::Binary(binary) => self.visit_binary(binary),
      Expr::Unary(unary) => self.visit_unary(unary),
      Expr::Grouping(grouping) => self.visit_grouping(grouping),
      Expr::Literal(literal) => self.visit_literal(literal),
      Expr::Variable(variable) => self.visit_variable(variable),
    }
  }

  fn visit_assign(&mut self, assign: &Assign) -> Self::Result {
    self.buffer.push('(');
    self.buffer.push_str(assign.name.str());
    self.buffer.push_str(" = ");
    self.visit_expr(&assign.value);
    self.buffer.push(')');
  }

  fn visit_logical(&mut self, logical: &Logical) -> Self::Result {
    self.chain(Link::Logical(logical));
  }

  fn visit_binary(&mut self, binary: &Binary) -> Self::Result {
    self.chain(Link::Binary(binary));
  }

  fn visit_unary(&mut self, unary: &Unary) -> Self::Result {
    self.parenthesize(unary.operator.str(), &[&unary.expr]);
  }

  fn visit_grouping(&mut self, grouping: &Grouping) -> Self::Result {
    self.parenthesize("group", &[&grouping.expr]);
  }

  fn visit_literal(&mut self, literal: &Literal) -> Self::Result {
    match literal.value {
      LiteralValue::Number(number) => self
        .buffer
        .push_str(&format_literal(literal.token.str(), number)),
      LiteralValue::String(string) => self.buffer.push_str(string),
      LiteralValue::Bool(true) => self.buffer.push_str("true"),
      LiteralValue::Bool(false) => self.buffer.push_str("false"),
      LiteralValue::Nil => self.buffer.push_str("nil"),
    }
  }

  fn visit_variable(&mut self, variable: &Variable) -> Self::Result {
    self.buffer.push_str(variable.name.str());
  }
}
