use crate::{
  ast::*,
  config::Config,
  error::{RuntimeError, RuntimeErrorKind},
  token::Token,
};
use lox_core::value::Value;
use tracing::debug;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Walks the ast evaluating each top level expression in order.
/// Evaluation stops at the first runtime error
pub struct Evaluator {
  /// The current expression nesting depth
  depth: usize,

  /// The deepest expressions may nest
  max_depth: usize,
}

impl Evaluator {
  pub fn new(config: Config) -> Self {
    Self {
      depth: 0,
      max_depth: config.max_depth,
    }
  }

  /// Evaluate every top level expression, returning one value
  /// for each
  ///
  /// # Examples
  /// ```
  /// use lox_core::value::Value;
  /// use lox_interp::{evaluator::Evaluator, parser::Parser, scanner::Scanner, source::Source, Config};
  ///
  /// let source = Source::new("(1 + 2) * 3 \"a\" + \"b\"");
  /// let (tokens, _) = Scanner::new(&source).scan();
  /// let ast = Parser::new(&source, tokens, Config::default()).parse().unwrap();
  ///
  /// let values = Evaluator::new(Config::default()).evaluate(&ast).unwrap();
  /// assert_eq!(values, vec![Value::Number(9.0), Value::from("ab")]);
  /// ```
  pub fn evaluate(&mut self, ast: &Ast) -> RuntimeResult<Vec<Value>> {
    self.depth = 0;

    let values = ast
      .iter()
      .map(|expr| self.visit_expr(expr))
      .collect::<RuntimeResult<Vec<Value>>>()?;

    debug!(values = values.len(), "evaluated ast");
    Ok(values)
  }
}

impl Visitor for Evaluator {
  type Result = RuntimeResult<Value>;

  fn visit_expr(&mut self, expr: &Expr) -> Self::Result {
    if self.depth >= self.max_depth {
      return Err(RuntimeError::new(
        RuntimeErrorKind::NestingTooDeep,
        expr.token(),
        "Expression nested too deeply.",
      ));
    }

    self.depth += 1;
    let result = match expr {
      Expr::Assign(assign) => self.visit_assign(assign),
      Expr::Logical(logical) => self.visit_logical(logical),
      Expr::Binary(binary) => self.visit_binary(binary),
      Expr::Unary(unary) => self.visit_unary(unary),
      Expr::Grouping(grouping) => self.visit_grouping(grouping),
      Expr::Literal(literal) => self.visit_literal(literal),
      Expr::Variable(variable) => self.visit_variable(variable),
    };
    self.depth -= 1;

    result
  }

  /// Nothing is bound, assignment yields its value
  fn visit_assign(&mut self, assign: &Assign) -> Self::Result {
    self.visit_expr(&assign.value)
  }

  fn visit_logical(&mut self, logical: &Logical) -> Self::Result {
    self.visit_chain(Link::Logical(logical))
  }

  fn visit_binary(&mut self, binary: &Binary) -> Self::Result {
    self.visit_chain(Link::Binary(binary))
  }

  fn visit_unary(&mut self, unary: &Unary) -> Self::Result {
    let value = self.visit_expr(&unary.expr)?;

    match unary.op {
      UnaryOp::Negate => number_operand(&unary.operator, &value).map(|num| Value::Number(-num)),
      UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
    }
  }

  fn visit_grouping(&mut self, grouping: &Grouping) -> Self::Result {
    self.visit_expr(&grouping.expr)
  }

  fn visit_literal(&mut self, literal: &Literal) -> Self::Result {
    Ok(match literal.value {
      LiteralValue::Number(number) => Value::Number(number),
      LiteralValue::String(string) => Value::from(string),
      LiteralValue::Bool(b) => Value::Bool(b),
      LiteralValue::Nil => Value::Nil,
    })
  }

  fn visit_variable(&mut self, variable: &Variable) -> Self::Result {
    Err(RuntimeError::new(
      RuntimeErrorKind::UndefinedVariable,
      &variable.name,
      format!("Undefined variable '{}'.", variable.name.str()),
    ))
  }
}

impl Evaluator {
  /// Evaluate an operator chain along its left side in a loop,
  /// recursing only into the right operands
  fn visit_chain(&mut self, link: Link) -> RuntimeResult<Value> {
    let (links, leaf) = link.spine();
    let mut value = self.visit_expr(leaf)?;

    for link in links.iter().rev() {
      let rhs = self.visit_expr(link.rhs())?;

      value = match link {
        Link::Binary(binary) => binary_op(binary.op, &binary.operator, value, rhs)?,
        Link::Logical(logical) => logical_op(logical.op, value, rhs),
      };
    }

    Ok(value)
  }
}

/// Both sides are always evaluated, there is no short circuit
fn logical_op(op: LogicalOp, lhs: Value, rhs: Value) -> Value {
  Value::Bool(match op {
    LogicalOp::And => lhs.is_truthy() && rhs.is_truthy(),
    LogicalOp::Or => lhs.is_truthy() || rhs.is_truthy(),
  })
}

fn binary_op(op: BinaryOp, operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
  match op {
    BinaryOp::Add => match (&lhs, &rhs) {
      (Value::String(lhs), Value::String(rhs)) => Ok(Value::String(format!("{lhs}{rhs}"))),
      _ => {
        let (lhs, rhs) = number_operands(operator, &lhs, &rhs)?;
        Ok(Value::Number(lhs + rhs))
      },
    },
    BinaryOp::Sub => {
      if lhs.is_str() || rhs.is_str() {
        return Err(RuntimeError::new(
          RuntimeErrorKind::OperandsNotNumbers,
          operator,
          "Operands must be numbers",
        ));
      }

      let (lhs, rhs) = number_operands(operator, &lhs, &rhs)?;
      Ok(Value::Number(lhs - rhs))
    },
    BinaryOp::Mul => {
      let (lhs, rhs) = number_operands(operator, &lhs, &rhs)?;
      Ok(Value::Number(lhs * rhs))
    },
    BinaryOp::Div => {
      let (lhs, rhs) = number_operands(operator, &lhs, &rhs)?;
      if rhs == 0.0 {
        return Err(RuntimeError::new(
          RuntimeErrorKind::DivisionByZero,
          operator,
          "Division by zero",
        ));
      }

      Ok(Value::Number(lhs / rhs))
    },
    BinaryOp::Lt => number_operands(operator, &lhs, &rhs).map(|(lhs, rhs)| Value::Bool(lhs < rhs)),
    BinaryOp::LtEq => {
      number_operands(operator, &lhs, &rhs).map(|(lhs, rhs)| Value::Bool(lhs <= rhs))
    },
    BinaryOp::Gt => number_operands(operator, &lhs, &rhs).map(|(lhs, rhs)| Value::Bool(lhs > rhs)),
    BinaryOp::GtEq => {
      number_operands(operator, &lhs, &rhs).map(|(lhs, rhs)| Value::Bool(lhs >= rhs))
    },
    BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
    BinaryOp::Ne => Ok(Value::Bool(lhs != rhs)),
  }
}

fn number_operand(operator: &Token, value: &Value) -> RuntimeResult<f64> {
  value.to_num().ok_or_else(|| {
    RuntimeError::new(
      RuntimeErrorKind::OperandNotNumber,
      operator,
      "Operand must be a number",
    )
  })
}

fn number_operands(operator: &Token, lhs: &Value, rhs: &Value) -> RuntimeResult<(f64, f64)> {
  Ok((number_operand(operator, lhs)?, number_operand(operator, rhs)?))
}
