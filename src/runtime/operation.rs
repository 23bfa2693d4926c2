use crate::error::EvalResult;
use crate::parser::Expression;
use crate::runtime::{Environment, Value};

/// Callable bound to a symbol in the environment
///
/// An operation receives its arguments unevaluated, exactly as they appear in
/// the source, and decides itself which of them to evaluate, in what order
/// and how often. Conditionals, loops and short-circuiting logic are all
/// built this way; the evaluator has no special forms.
///
/// Any `Fn(&mut Environment, &[Expression]) -> EvalResult<Value>` closure that
/// is `Send + Sync` is an operation. Stateful operations are plain structs:
///
/// ```
/// use lispex::{compile, Environment, EvalResult, Expression, Operation, Value};
///
/// /// User function of one parameter, called through a copied environment
/// struct Function {
///     param: String,
///     body: Expression,
/// }
///
/// impl Operation for Function {
///     fn perform(&self, env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
///         let arg = lispex::eval_as_number(env, args.first())?;
///         let mut local = env.scoped(self.param.as_str(), arg);
///         self.body.eval(&mut local)
///     }
/// }
///
/// let mut env = Environment::new();
/// env.define("twice", Value::operation(Function {
///     param: "x".to_string(),
///     body: compile("(+ x x)").unwrap(),
/// }));
/// env.define_operation("+", |env, args| {
///     let mut sum = 0.0;
///     for arg in args {
///         sum += lispex::eval_as_number(env, Some(arg))?;
///     }
///     Ok(Value::Number(sum))
/// });
///
/// let result = lispex::run(&mut env, "(twice 21)").unwrap();
/// assert_eq!(result, Value::Number(42.0));
/// assert!(env.get("x").is_none());
/// ```
pub trait Operation: Send + Sync {
    /// Runs the operation; `args` excludes the operation's own head expression
    fn perform(&self, env: &mut Environment, args: &[Expression]) -> EvalResult<Value>;
}

impl<F> Operation for F
where
    F: Fn(&mut Environment, &[Expression]) -> EvalResult<Value> + Send + Sync,
{
    fn perform(&self, env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
        self(env, args)
    }
}
