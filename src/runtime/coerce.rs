//! Evaluate-then-convert helpers for operation authors
//!
//! Both helpers take the expression slot as an `Option` so that a missing
//! argument (`args.get(n)`) is reported as [`EvalError::NilExpression`]
//! instead of being confused with an expression that evaluated to nil.

use crate::error::{EvalError, EvalResult};
use crate::parser::Expression;
use crate::runtime::{eval, Environment, Value};

/// Evaluates `expr` and converts the result to a number
///
/// Numbers pass through, booleans become 1 or 0 and strings are parsed as
/// floating-point literals.
pub fn eval_as_number(env: &mut Environment, expr: Option<&Expression>) -> EvalResult<f64> {
    let expr = expr.ok_or(EvalError::NilExpression)?;

    match eval(expr, env)? {
        Value::Number(n) => Ok(n),
        Value::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::String(s) => match s.parse::<f64>() {
            Ok(n) => Ok(n),
            Err(_) => Err(EvalError::NumberConversion {
                value: s,
                expression: expr.to_string(),
                position: expr.position(),
            }),
        },
        other @ (Value::Nil
        | Value::Numbers(_)
        | Value::Strings(_)
        | Value::Operation(_)
        | Value::Opaque(_)) => Err(EvalError::CannotConvert {
            target: "number",
            kind: other.type_name(),
            expression: expr.to_string(),
            position: expr.position(),
        }),
    }
}

/// Evaluates `expr` and requires a string result
pub fn eval_as_string(env: &mut Environment, expr: Option<&Expression>) -> EvalResult<String> {
    let expr = expr.ok_or(EvalError::NilExpression)?;

    match eval(expr, env)? {
        Value::String(s) => Ok(s),
        other @ (Value::Nil
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Numbers(_)
        | Value::Strings(_)
        | Value::Operation(_)
        | Value::Opaque(_)) => Err(EvalError::CannotConvert {
            target: "string",
            kind: other.type_name(),
            expression: expr.to_string(),
            position: expr.position(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use crate::lexer::Position;

    fn number_of(value: Option<Value>) -> EvalResult<f64> {
        let expr = compile("X").unwrap();
        let mut env = Environment::new();
        if let Some(value) = value {
            env.define("X", value);
        }
        eval_as_number(&mut env, Some(&expr))
    }

    #[test]
    fn test_number_coercions() {
        assert_eq!(number_of(Some(Value::Bool(true))), Ok(1.0));
        assert_eq!(number_of(Some(Value::Bool(false))), Ok(0.0));
        assert_eq!(number_of(Some(Value::Number(100.0))), Ok(100.0));
        assert_eq!(number_of(Some(Value::from("100"))), Ok(100.0));
        assert_eq!(number_of(Some(Value::from("-1.5e2"))), Ok(-150.0));
    }

    #[test]
    fn test_number_coercion_failures() {
        assert_eq!(
            number_of(Some(Value::from("x"))),
            Err(EvalError::NumberConversion {
                value: "x".to_string(),
                expression: "X".to_string(),
                position: Position::new(1, 1)
            })
        );
        assert_eq!(
            number_of(Some(Value::Nil)),
            Err(EvalError::CannotConvert {
                target: "number",
                kind: "nil",
                expression: "X".to_string(),
                position: Position::new(1, 1)
            })
        );
        assert!(matches!(
            number_of(Some(Value::numbers(vec![1.0]))),
            Err(EvalError::CannotConvert { kind: "numbers", .. })
        ));
        assert!(matches!(
            number_of(None),
            Err(EvalError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn test_nil_expression_is_not_evaluated() {
        let mut env = Environment::new();
        assert_eq!(eval_as_number(&mut env, None), Err(EvalError::NilExpression));
        assert_eq!(eval_as_string(&mut env, None), Err(EvalError::NilExpression));
    }

    #[test]
    fn test_string_coercion() {
        let mut env = Environment::new();
        env.define("s", "abc");
        env.define("n", 1);

        let expr = compile("s").unwrap();
        assert_eq!(eval_as_string(&mut env, Some(&expr)), Ok("abc".to_string()));

        let expr = compile("n").unwrap();
        let err = eval_as_string(&mut env, Some(&expr)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert number to string: n at 1:1");
    }

    #[test]
    fn test_conversion_error_points_at_argument() {
        let mut env = Environment::new();
        env.define("name", "abc");
        let expr = compile("(+ 1\n   name)").unwrap();
        let arg = expr.items().and_then(|items| items.get(2));

        let err = eval_as_number(&mut env, arg).unwrap_err();
        assert_eq!(err.position(), Some(Position::new(2, 4)));
        assert_eq!(
            err.to_string(),
            "cannot convert \"abc\" to number while evaluating name at 2:4"
        );
    }

    #[test]
    fn test_string_literal_number_parsing() {
        let mut env = Environment::new();
        let expr = compile("\"12\"").unwrap();
        assert_eq!(eval_as_number(&mut env, Some(&expr)), Ok(12.0));

        let expr = compile("\"twelve\"").unwrap();
        let err = eval_as_number(&mut env, Some(&expr)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot convert \"twelve\" to number while evaluating \"twelve\" at 1:1"
        );
    }
}
