//! Expression evaluation

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Expression, IfExpression, InfixOperator, ObjectLiteral, PrefixOperator};
use crate::environment::Env;
use crate::interpreter::{EvalResult, Interpreter};
use crate::stack::ensure_sufficient_stack;
use crate::stdlib;
use crate::value::{Function, RuntimeError, Value, ValueMap};

impl Interpreter {
    pub(super) fn eval_expr(&mut self, expr: &Expression, env: &Env) -> EvalResult {
        ensure_sufficient_stack(|| -> EvalResult {
            match expr {
                Expression::Integer(n) => Ok(Value::Integer(*n)),
                Expression::Boolean(b) => Ok(Value::Boolean(*b)),
                Expression::String(s) => Ok(Value::string(s)),
                Expression::Identifier(ident) => Ok(eval_identifier(&ident.name, env)?),
                Expression::Prefix(prefix) => {
                    let operand = self.eval_expr(&prefix.operand, env)?;
                    Ok(eval_prefix(prefix.operator, operand)?)
                }
                Expression::Infix(infix) => {
                    let left = self.eval_expr(&infix.left, env)?;
                    let right = self.eval_expr(&infix.right, env)?;
                    Ok(eval_infix(infix.operator, &left, &right)?)
                }
                Expression::If(if_expr) => self.eval_if(if_expr, env),
                Expression::Function(func) => Ok(Value::Function(Rc::new(Function {
                    parameters: func.parameters.clone(),
                    body: Rc::clone(&func.body),
                    env: Rc::clone(env),
                }))),
                Expression::Call(call) => {
                    let callee = self.eval_expr(&call.callee, env)?;
                    let args = self.eval_expressions(&call.arguments, env)?;
                    Ok(self.apply_function(&callee, args)?)
                }
                Expression::Array(array) => {
                    let items = self.eval_expressions(&array.elements, env)?;
                    Ok(Value::array(items))
                }
                Expression::Index(index) => {
                    let left = self.eval_expr(&index.left, env)?;
                    let key = self.eval_expr(&index.index, env)?;
                    Ok(eval_index(&left, &key)?)
                }
                Expression::Object(object) => self.eval_object(object, env),
            }
        })
    }

    /// Evaluate left to right, stopping at the first error
    fn eval_expressions(&mut self, exprs: &[Expression], env: &Env) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval_expr(expr, env)).collect()
    }

    fn eval_if(&mut self, if_expr: &IfExpression, env: &Env) -> EvalResult {
        let condition = self.eval_expr(&if_expr.condition, env)?;
        if condition.is_truthy() {
            self.eval_block(&if_expr.consequence, env)
        } else if let Some(alternative) = &if_expr.alternative {
            self.eval_block(alternative, env)
        } else {
            Ok(Value::Null)
        }
    }

    fn eval_object(&mut self, object: &ObjectLiteral, env: &Env) -> EvalResult {
        let mut entries = HashMap::with_capacity(object.pairs.len());
        for (key_expr, value_expr) in &object.pairs {
            let key = self.eval_expr(key_expr, env)?;
            let hash = key.hash_key()?;
            let value = self.eval_expr(value_expr, env)?;
            entries.insert(hash, (key, value));
        }
        Ok(Value::Object(ValueMap::from_entries(entries)))
    }
}

/// User bindings first, then built-ins
fn eval_identifier(name: &str, env: &Env) -> Result<Value, RuntimeError> {
    if let Some(value) = env.borrow().get(name) {
        return Ok(value);
    }
    stdlib::lookup(name)
        .map(Value::Builtin)
        .ok_or_else(|| RuntimeError::IdentifierNotFound {
            name: name.to_string(),
        })
}

fn eval_prefix(operator: PrefixOperator, operand: Value) -> Result<Value, RuntimeError> {
    match (operator, &operand) {
        (PrefixOperator::Bang, _) => Ok(Value::Boolean(!operand.is_truthy())),
        (PrefixOperator::Minus, Value::Integer(n)) => Ok(Value::Integer(n.wrapping_neg())),
        (PrefixOperator::Minus, _) => Err(RuntimeError::UnknownPrefixOperator {
            operator,
            operand: operand.type_tag(),
        }),
    }
}

fn eval_infix(operator: InfixOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => match operator {
            InfixOperator::Plus => Ok(Value::string(format!("{}{}", l, r))),
            InfixOperator::Equal => Ok(Value::Boolean(l == r)),
            InfixOperator::NotEqual => Ok(Value::Boolean(l != r)),
            _ => Err(unknown_operator(operator, left, right)),
        },
        _ => match operator {
            InfixOperator::Equal => Ok(Value::Boolean(left.equals(right))),
            InfixOperator::NotEqual => Ok(Value::Boolean(!left.equals(right))),
            _ if left.type_tag() != right.type_tag() => Err(RuntimeError::TypeMismatch {
                left: left.type_tag(),
                operator,
                right: right.type_tag(),
            }),
            _ => Err(unknown_operator(operator, left, right)),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, l: i64, r: i64) -> Result<Value, RuntimeError> {
    Ok(match operator {
        InfixOperator::Plus => Value::Integer(l.wrapping_add(r)),
        InfixOperator::Minus => Value::Integer(l.wrapping_sub(r)),
        InfixOperator::Multiply => Value::Integer(l.wrapping_mul(r)),
        InfixOperator::Divide => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Integer(l.wrapping_div(r))
        }
        InfixOperator::Less => Value::Boolean(l < r),
        InfixOperator::Greater => Value::Boolean(l > r),
        InfixOperator::Equal => Value::Boolean(l == r),
        InfixOperator::NotEqual => Value::Boolean(l != r),
    })
}

fn unknown_operator(operator: InfixOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnknownInfixOperator {
        left: left.type_tag(),
        operator,
        right: right.type_tag(),
    }
}

fn eval_index(left: &Value, index: &Value) -> Result<Value, RuntimeError> {
    match (left, index) {
        (Value::Array(items), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null)),
        (Value::Object(map), _) => {
            let key = index.hash_key()?;
            Ok(map.get(&key).cloned().unwrap_or(Value::Null))
        }
        _ => Err(RuntimeError::IndexNotSupported(left.type_tag())),
    }
}
