//! Abstract syntax tree
//!
//! Every node renders (via `Display`) to a canonical, fully parenthesized form
//! that parses back to a tree with the same rendering. Diagnostics and tests
//! rely on that form, so changes here are observable.

use serde::Serialize;
use std::fmt;
use std::rc::Rc;

use crate::stack::ensure_sufficient_stack;

/// Root of a parsed source file or REPL line
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let(_) => "let".to_string(),
            Statement::Return(_) => "return".to_string(),
            Statement::Expression(stmt) => stmt.expression.token_literal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetStatement {
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// Brace-delimited statement list; the body of `if` branches and functions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Expression {
    Identifier(Identifier),
    Integer(i64),
    Boolean(bool),
    String(String),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Array(ArrayLiteral),
    Index(IndexExpression),
    Object(ObjectLiteral),
}

impl Expression {
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(ident) => ident.name.clone(),
            Expression::Integer(value) => value.to_string(),
            Expression::Boolean(value) => value.to_string(),
            Expression::String(value) => value.clone(),
            Expression::Prefix(expr) => expr.operator.to_string(),
            Expression::Infix(expr) => expr.operator.to_string(),
            Expression::If(_) => "if".to_string(),
            Expression::Function(_) => "fn".to_string(),
            Expression::Call(_) => "(".to_string(),
            Expression::Array(_) | Expression::Index(_) => "[".to_string(),
            Expression::Object(_) => "{".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Less,
    Greater,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixExpression {
    pub operator: PrefixOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// `fn(params) { body }`
///
/// The body is reference counted so that every function value created from
/// this literal shares it instead of copying the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexExpression {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLiteral {
    pub pairs: Vec<(Expression, Expression)>,
}

// === Rendering ===

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Render a string literal with the escapes the lexer understands
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.statements.len();
        for (i, stmt) in self.statements.iter().enumerate() {
            write!(f, "{}", stmt)?;
            // keeps `x; -1` from reading back as the call `x(-1)`
            if i + 1 < count && matches!(stmt, Statement::Expression(_)) {
                f.write_str(";")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Statement::Return(stmt) => write!(f, "return {};", stmt.value),
            Statement::Expression(stmt) => write!(f, "{}", stmt.expression),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
            // let/return already end in ';'
            if matches!(stmt, Statement::Expression(_)) {
                f.write_str(";")?;
            }
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOperator::Bang => "!",
            PrefixOperator::Minus => "-",
        })
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.render(f))
    }
}

impl Expression {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::String(value) => f.write_str(&quote(value)),
            Expression::Prefix(expr) => write!(f, "({}{})", expr.operator, expr.operand),
            Expression::Infix(expr) => {
                write!(f, "({} {} {})", expr.left, expr.operator, expr.right)
            }
            Expression::If(expr) => {
                write!(f, "if ({}) {}", expr.condition, expr.consequence)?;
                if let Some(alternative) = &expr.alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Function(func) => {
                f.write_str("fn(")?;
                write_joined(f, &func.parameters)?;
                write!(f, ") {}", func.body)
            }
            Expression::Call(call) => {
                write!(f, "{}(", call.callee)?;
                write_joined(f, &call.arguments)?;
                f.write_str(")")
            }
            Expression::Array(array) => {
                f.write_str("[")?;
                write_joined(f, &array.elements)?;
                f.write_str("]")
            }
            Expression::Index(expr) => write!(f, "({}[{}])", expr.left, expr.index),
            Expression::Object(object) => {
                f.write_str("{")?;
                for (i, (key, value)) in object.pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

// === Teardown ===

/// Nodes are detached onto a worklist and freed one at a time, so dropping a
/// tree never recurses once per nesting level.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl Expression {
    fn detach_children(&mut self, out: &mut Vec<Expression>) {
        match self {
            Expression::Identifier(_)
            | Expression::Integer(_)
            | Expression::Boolean(_)
            | Expression::String(_) => {}
            Expression::Prefix(expr) => out.push(detach(&mut expr.operand)),
            Expression::Infix(expr) => {
                out.push(detach(&mut expr.left));
                out.push(detach(&mut expr.right));
            }
            Expression::If(expr) => {
                out.push(detach(&mut expr.condition));
                detach_block(&mut expr.consequence, out);
                if let Some(alternative) = &mut expr.alternative {
                    detach_block(alternative, out);
                }
            }
            Expression::Function(func) => {
                // a body still shared with a closure is freed with the closure
                if let Some(body) = Rc::get_mut(&mut func.body) {
                    detach_block(body, out);
                }
            }
            Expression::Call(call) => {
                out.push(detach(&mut call.callee));
                out.append(&mut call.arguments);
            }
            Expression::Array(array) => out.append(&mut array.elements),
            Expression::Index(expr) => {
                out.push(detach(&mut expr.left));
                out.push(detach(&mut expr.index));
            }
            Expression::Object(object) => {
                for (key, value) in object.pairs.drain(..) {
                    out.push(key);
                    out.push(value);
                }
            }
        }
    }
}

fn detach(slot: &mut Expression) -> Expression {
    std::mem::replace(slot, Expression::Integer(0))
}

fn detach_block(block: &mut BlockStatement, out: &mut Vec<Expression>) {
    out.extend(block.statements.drain(..).map(|stmt| match stmt {
        Statement::Let(stmt) => stmt.value,
        Statement::Return(stmt) => stmt.value,
        Statement::Expression(stmt) => stmt.expression,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier::new(name))
    }

    #[test]
    fn test_let_rendering() {
        let program = Program::new(vec![Statement::Let(LetStatement {
            name: Identifier::new("myVar"),
            value: ident("anotherVar"),
        })]);
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_nested_rendering() {
        let expr = Expression::Infix(InfixExpression {
            left: Box::new(Expression::Prefix(PrefixExpression {
                operator: PrefixOperator::Minus,
                operand: Box::new(ident("a")),
            })),
            operator: InfixOperator::Multiply,
            right: Box::new(ident("b")),
        });
        assert_eq!(expr.to_string(), "((-a) * b)");
        assert_eq!(expr.token_literal(), "*");
    }

    #[test]
    fn test_block_rendering() {
        let func = Expression::Function(FunctionLiteral {
            parameters: vec![Identifier::new("x"), Identifier::new("y")],
            body: Rc::new(BlockStatement {
                statements: vec![
                    Statement::Let(LetStatement {
                        name: Identifier::new("z"),
                        value: Expression::Integer(1),
                    }),
                    Statement::Expression(ExpressionStatement {
                        expression: ident("z"),
                    }),
                ],
            }),
        });
        assert_eq!(func.to_string(), "fn(x, y) { let z = 1; z; }");

        let empty = Expression::Function(FunctionLiteral {
            parameters: vec![],
            body: Rc::new(BlockStatement::default()),
        });
        assert_eq!(empty.to_string(), "fn() { }");
    }

    #[test]
    fn test_string_quoting() {
        let expr = Expression::String("say \"hi\"\n".to_string());
        assert_eq!(expr.to_string(), r#""say \"hi\"\n""#);
        assert_eq!(expr.token_literal(), "say \"hi\"\n");
    }

    #[test]
    fn test_object_rendering() {
        let expr = Expression::Object(ObjectLiteral {
            pairs: vec![
                (Expression::String("a".into()), Expression::Integer(1)),
                (Expression::Boolean(true), ident("b")),
            ],
        });
        assert_eq!(expr.to_string(), r#"{"a": 1, true: b}"#);
    }

    #[test]
    fn test_program_separates_expression_statements() {
        let program = Program::new(vec![
            Statement::Expression(ExpressionStatement {
                expression: ident("x"),
            }),
            Statement::Expression(ExpressionStatement {
                expression: Expression::Prefix(PrefixExpression {
                    operator: PrefixOperator::Minus,
                    operand: Box::new(Expression::Integer(1)),
                }),
            }),
        ]);
        assert_eq!(program.to_string(), "x;(-1)");
    }

    #[test]
    fn test_dropping_deep_tree() {
        let mut expr = Expression::Integer(1);
        for _ in 0..200_000 {
            expr = Expression::Prefix(PrefixExpression {
                operator: PrefixOperator::Minus,
                operand: Box::new(expr),
            });
        }
        let mut block = BlockStatement::default();
        for _ in 0..50_000 {
            block = BlockStatement {
                statements: vec![Statement::Expression(ExpressionStatement {
                    expression: Expression::If(IfExpression {
                        condition: Box::new(Expression::Boolean(true)),
                        consequence: block,
                        alternative: None,
                    }),
                })],
            };
        }
        drop(expr);
        drop(block);
    }
}
