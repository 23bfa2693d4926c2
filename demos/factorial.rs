//! Factorial two ways: a host loop operation and a user-defined function
//!
//! Run with: cargo run --example factorial

use lispex::{
    compile, eval_as_number, eval_as_string, Environment, EvalError, EvalResult, Expression, Value,
};

fn prog(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut last = Value::Nil;
    for arg in args {
        last = arg.eval(env)?;
    }
    Ok(last)
}

fn product(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut total = 1.0;
    for arg in args {
        total *= eval_as_number(env, Some(arg))?;
    }
    Ok(Value::Number(total))
}

fn sum(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut total = 0.0;
    for arg in args {
        total += eval_as_number(env, Some(arg))?;
    }
    Ok(Value::Number(total))
}

fn set(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let name = eval_as_string(env, args.first())?;
    let value = args.get(1).ok_or(EvalError::NilExpression)?.eval(env)?;
    env.define(name, value);
    Ok(Value::Nil)
}

fn for_range(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let name = eval_as_string(env, args.first())?;
    let first = eval_as_number(env, args.get(1))? as i64;
    let last = eval_as_number(env, args.get(2))? as i64;
    let body = args.get(3).ok_or(EvalError::NilExpression)?;
    for i in first..=last {
        env.define(name.as_str(), i as f64);
        body.eval(env)?;
    }
    Ok(Value::Nil)
}

fn if_gt_one(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let value = eval_as_number(env, args.first())?;
    let branch = if value > 1.0 { args.get(1) } else { args.get(2) };
    branch.ok_or(EvalError::NilExpression)?.eval(env)
}

struct Function {
    param: String,
    body: Expression,
}

fn def(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let name = eval_as_string(env, args.first())?;
    let param = eval_as_string(env, args.get(1))?;
    let body = args.get(2).ok_or(EvalError::NilExpression)?.clone();
    env.define(name, Value::opaque(Function { param, body }));
    Ok(Value::Nil)
}

fn call(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let name = eval_as_string(env, args.first())?;
    let arg = args.get(1).ok_or(EvalError::NilExpression)?.eval(env)?;
    let value = env
        .get(&name)
        .cloned()
        .ok_or_else(|| EvalError::operation(format!("no function {}", name)))?;
    let function = value
        .downcast_ref::<Function>()
        .ok_or_else(|| EvalError::operation(format!("{} is not a function", name)))?;

    // the callee works on a copy; its bindings vanish on return
    let mut local = env.scoped(function.param.as_str(), arg);
    function.body.eval(&mut local)
}

fn main() -> anyhow::Result<()> {
    println!("═══════════════════════════════════════");
    println!("  lispex {} - Factorial", lispex::VERSION);
    println!("═══════════════════════════════════════\n");

    let mut env = Environment::new();
    env.define_operation("prog", prog);
    env.define_operation("*", product);
    env.define_operation("+", sum);
    env.define_operation("set", set);
    env.define_operation("loop", for_range);
    env.define_operation("if_gt_one", if_gt_one);
    env.define_operation("def", def);
    env.define_operation("call", call);

    println!("Example 1: loop");
    println!("─────────────────────────────────────");
    let looped = compile(
        r#"
(prog
    (set "x" 1)
    (loop "i" 1 N
        (set "x" (* x i)))
    x)
"#,
    )?;
    for n in 1..=6 {
        let mut row = env.clone();
        row.define("N", n);
        println!("{}! = {}", n, looped.eval(&mut row)?);
    }

    println!("\nExample 2: recursion");
    println!("─────────────────────────────────────");
    let recursive = compile(
        r#"
(prog
    (def "F" "x" (if_gt_one x
        (* x (call "F" (+ x -1)))
        1))
    (call "F" N))
"#,
    )?;
    for n in 1..=6 {
        let mut row = env.clone();
        row.define("N", n);
        println!("{}! = {}", n, recursive.eval(&mut row)?);
    }

    println!("\nExample 3: errors");
    println!("─────────────────────────────────────");
    for source in ["(prog (call \"G\" 1))", "(prog (x", "(\"text\" 1)"] {
        match lispex::run(&mut env.clone(), source) {
            Ok(value) => println!("✅ {} -> {}", source, value),
            Err(e) => println!("❌ {} -> [{:?}] {}", source, e.stage(), e),
        }
    }

    Ok(())
}
