use crate::error::{EvalError, EvalResult};
use crate::parser::Expression;
use crate::runtime::{Environment, Value};

/// Evaluates an expression against an environment
///
/// - numbers and strings evaluate to themselves
/// - symbols are looked up in `env`
/// - `()` is [`Value::Nil`]
/// - any other list evaluates its head, which must yield an operation, and
///   hands the remaining items to it unevaluated
pub fn eval(expr: &Expression, env: &mut Environment) -> EvalResult<Value> {
    match expr {
        Expression::Number { value, .. } => Ok(Value::Number(*value)),
        Expression::String { value, .. } => Ok(Value::String(value.clone())),
        Expression::Symbol { name, position } => {
            env.get(name)
                .cloned()
                .ok_or_else(|| EvalError::UnknownSymbol {
                    name: name.clone(),
                    position: *position,
                })
        }
        Expression::List { items, .. } => {
            let Some((head, args)) = items.split_first() else {
                return Ok(Value::Nil);
            };

            let operation = match eval(head, env)? {
                Value::Operation(op) => op,
                other => {
                    return Err(EvalError::NotExecutable {
                        kind: other.type_name(),
                        expression: head.to_string(),
                        position: head.position(),
                    })
                }
            };

            tracing::trace!(head = %head, args = args.len(), "dispatching operation");
            operation.perform(env, args)
        }
    }
}

impl Expression {
    /// Evaluates this expression; see [`eval`]
    pub fn eval(&self, env: &mut Environment) -> EvalResult<Value> {
        eval(self, env)
    }
}
