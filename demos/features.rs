//! One feature program, two vocabularies: numeric vectors and SQL
//!
//! Run with: cargo run --example features

use lispex::parallel::{evaluate_batch, BatchConfig};
use lispex::{
    compile, eval_as_number, eval_as_string, Environment, EvalError, EvalResult, Expression,
    Operation, Value,
};

const CONSTANTS: &str = r#"
(prog
    # country codes
    (set "IL" "+972")
    (set "RU" "+7")
    (set "UK" "+44")
    # area codes
    (set "LDN" "020")
    (set "MSK" "095" "495")
    (set "TLV" "3")
)"#;

const FEATURES: &str = r#"
(vector
    (and (in phoneCountryCode UK) (in phoneAreaCode LDN))
    (and (in phoneCountryCode IL) (in phoneAreaCode TLV))
    (and (in phoneCountryCode RU) (in phoneAreaCode MSK))
)"#;

fn prog(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut last = Value::Nil;
    for arg in args {
        last = arg.eval(env)?;
    }
    Ok(last)
}

/// (set "NAME" "a" "b" ...) binds a string list
fn set(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let name = eval_as_string(env, args.first())?;
    let mut values = Vec::new();
    for arg in args.iter().skip(1) {
        values.push(eval_as_string(env, Some(arg))?);
    }
    env.define(name, Value::strings(values));
    Ok(Value::Nil)
}

fn strings_arg(env: &mut Environment, expr: Option<&Expression>) -> EvalResult<Vec<String>> {
    let expr = expr.ok_or(EvalError::NilExpression)?;
    match expr.eval(env)? {
        Value::Strings(values) => Ok(values.to_vec()),
        other => Err(EvalError::operation(format!(
            "expected strings, got {} from {}",
            other.type_name(),
            expr
        ))),
    }
}

fn vector(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut result = Vec::with_capacity(args.len());
    for arg in args {
        result.push(eval_as_number(env, Some(arg))?);
    }
    Ok(Value::numbers(result))
}

fn and(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    for arg in args {
        if eval_as_number(env, Some(arg))? == 0.0 {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn contains(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let value = eval_as_string(env, args.first())?;
    Ok(Value::Bool(strings_arg(env, args.get(1))?.contains(&value)))
}

struct SqlSelect {
    table: String,
    alias: String,
}

impl Operation for SqlSelect {
    fn perform(&self, env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
        let mut columns = Vec::with_capacity(args.len());
        for arg in args {
            columns.push(format!("  {}", eval_as_string(env, Some(arg))?));
        }
        Ok(Value::String(format!(
            "select\n{}\nfrom\n  {} as {};",
            columns.join(",\n"),
            self.table,
            self.alias
        )))
    }
}

fn sql_and(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(eval_as_string(env, Some(arg))?);
    }
    Ok(Value::String(parts.join(" and ")))
}

fn sql_in(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let column = eval_as_string(env, args.first())?;
    let quoted: Vec<String> = strings_arg(env, args.get(1))?
        .iter()
        .map(|s| format!("'{}'", s))
        .collect();
    Ok(Value::String(format!("({} in ({}))", column, quoted.join(", "))))
}

fn main() -> anyhow::Result<()> {
    println!("═══════════════════════════════════════");
    println!("  lispex {} - Feature Programs", lispex::VERSION);
    println!("═══════════════════════════════════════\n");

    let constants = compile(CONSTANTS)?;
    let features = compile(FEATURES)?;

    println!("Example 1: one row at a time");
    println!("─────────────────────────────────────");
    let mut numeric = Environment::new();
    numeric.define_operation("prog", prog);
    numeric.define_operation("set", set);
    numeric.define_operation("vector", vector);
    numeric.define_operation("and", and);
    numeric.define_operation("in", contains);
    constants.eval(&mut numeric)?;

    let mut row = numeric.clone();
    row.extend([("phoneCountryCode", "+972"), ("phoneAreaCode", "3")]);
    println!("+972 3 -> {}", features.eval(&mut row)?);

    println!("\nExample 2: many rows on a worker pool");
    println!("─────────────────────────────────────");
    let data = [
        ("+972", "3"),
        ("+7", "095"),
        ("+44", "020"),
        ("+44", "023"),
        ("+34", "976"),
    ];
    let mut rows: Vec<Environment> = data
        .iter()
        .map(|(country, area)| {
            let mut row = numeric.clone();
            row.extend([("phoneCountryCode", *country), ("phoneAreaCode", *area)]);
            row
        })
        .collect();
    let results = evaluate_batch(&features, &mut rows, &BatchConfig::default())?;
    for ((country, area), result) in data.iter().zip(results) {
        println!("{:>5} {:>4} -> {}", country, area, result?);
    }

    println!("\nExample 3: the same program as SQL");
    println!("─────────────────────────────────────");
    let alias = "log";
    let mut sql = Environment::new();
    sql.define_operation("prog", prog);
    sql.define_operation("set", set);
    sql.define(
        "vector",
        Value::operation(SqlSelect {
            table: r#"hive."default".events"#.to_string(),
            alias: alias.to_string(),
        }),
    );
    sql.define_operation("and", sql_and);
    sql.define_operation("in", sql_in);
    constants.eval(&mut sql)?;
    sql.define("phoneCountryCode", format!("{}.phone_country", alias));
    sql.define("phoneAreaCode", format!("{}.phone_area", alias));
    println!("{}", features.eval(&mut sql)?);

    Ok(())
}
