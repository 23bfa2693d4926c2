/// Feature engineering scenarios: one shared program, several host vocabularies
use lispex::parallel::{evaluate_batch, BatchConfig};
use lispex::{
    compile, eval_as_number, eval_as_string, run, Environment, EvalError, EvalResult, Expression,
    Operation, Value,
};

const FEATURES: &str = r#"
(vector
    (and (in phoneCountryCode UK) (in phoneAreaCode LDN))
    (and (in phoneCountryCode IL) (in phoneAreaCode TLV))
    (and (in phoneCountryCode RU) (in phoneAreaCode MSK))
)"#;

const CONSTANTS: &str = r#"
(prog
    # country codes
    (set_str_list "UK" "+44")
    (set_str_list "IL" "+972")
    (set_str_list "RU" "+7")
    # area codes
    (set_str_list "LDN" "020")
    (set_str_list "TLV" "3")
    (set_str_list "MSK" "095" "495")
)"#;

// ====================
// Numeric vocabulary
// ====================

fn prog(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut last = Value::Nil;
    for arg in args {
        last = arg.eval(env)?;
    }
    Ok(last)
}

fn vector(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let mut result = Vec::with_capacity(args.len());
    for arg in args {
        result.push(eval_as_number(env, Some(arg))?);
    }
    Ok(Value::numbers(result))
}

/// Stops at the first false argument
fn and(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    for arg in args {
        match arg.eval(env)? {
            Value::Bool(true) => {}
            Value::Bool(false) => return Ok(Value::Bool(false)),
            other => {
                return Err(EvalError::operation(format!(
                    "and: expected bool, got {}",
                    other.type_name()
                )))
            }
        }
    }
    Ok(Value::Bool(true))
}

fn string_list(env: &mut Environment, expr: Option<&Expression>) -> EvalResult<Vec<String>> {
    let expr = expr.ok_or(EvalError::NilExpression)?;
    match expr.eval(env)? {
        Value::Strings(list) => Ok(list.to_vec()),
        other => Err(EvalError::operation(format!(
            "expected strings, got {} from {}",
            other.type_name(),
            expr
        ))),
    }
}

fn contains(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let value = eval_as_string(env, args.first())?;
    let list = string_list(env, args.get(1))?;
    Ok(Value::Bool(list.contains(&value)))
}

/// (set_str_list "NAME" "a" "b" ...)
fn set_str_list(env: &mut Environment, args: &[Expression]) -> EvalResult<Value> {
    let name = eval_as_string(env, args.first())?;
    let mut list = Vec::new();
    for arg in args.iter().skip(1) {
        list.push(eval_as_string(env, Some(arg))?);
    }
    env.define(name, Value::strings(list));
    Ok(Value::Nil)
}

fn numeric_env() -> Environment {
    let mut env = Environment::new();
    env.define_operation("vector", vector);
    env.define_operation("and", and);
    env.define_operation("in", contains);
    env
}

fn with_constants(mut env: Environment) -> Environment {
    env.define("UK", Value::strings(["+44"]));
    env.define("IL", Value::strings(["+972"]));
    env.define("RU", Value::strings(["+7"]));
    env.define("LDN", Value::strings(["020"]));
    env.define("TLV", Value::strings(["3"]));
    env.define("MSK", Value::strings(["095", "495"]));
    env
}

#[test]
fn test_one_hot_with_host_constants() {
    let mut env = with_constants(numeric_env());
    env.define("phoneCountryCode", "+44");
    env.define("phoneAreaCode", "020");

    let result = run(&mut env, FEATURES).unwrap();
    assert_eq!(result.as_numbers(), Some(&[1.0, 0.0, 0.0][..]));
    assert_eq!(result.to_string(), "[1 0 0]");
}

#[test]
fn test_one_hot_with_initializer_program() {
    let mut env = numeric_env();
    env.define_operation("prog", prog);
    env.define_operation("set_str_list", set_str_list);
    env.define("phoneCountryCode", "+44");
    env.define("phoneAreaCode", "020");

    // two programs applied to one environment, in order
    run(&mut env, CONSTANTS).unwrap();
    assert_eq!(
        env.get("MSK").and_then(Value::as_strings),
        Some(&["095".to_string(), "495".to_string()][..])
    );

    let result = run(&mut env, FEATURES).unwrap();
    assert_eq!(result.to_string(), "[1 0 0]");
}

#[test]
fn test_one_hot_reuses_compiled_program() {
    let features = compile(FEATURES).unwrap();

    for (country, area, expected) in [
        ("+972", "3", [0.0, 1.0, 0.0]),
        ("+7", "495", [0.0, 0.0, 1.0]),
        ("+44", "023", [0.0, 0.0, 0.0]),
    ] {
        let mut env = with_constants(numeric_env());
        env.define("phoneCountryCode", country);
        env.define("phoneAreaCode", area);

        let result = features.eval(&mut env).unwrap();
        assert_eq!(result.as_numbers(), Some(&expected[..]));
    }
}

#[test]
fn test_and_is_lazy() {
    let mut env = with_constants(numeric_env());
    env.define("phoneCountryCode", "+1");
    // phoneAreaCode is unbound; the first false short-circuits before it is read

    let result = run(&mut env, FEATURES).unwrap();
    assert_eq!(result.to_string(), "[0 0 0]");
}

#[test]
fn test_wrong_constant_kind_is_reported() {
    let mut env = with_constants(numeric_env());
    env.define("UK", "+44");
    env.define("phoneCountryCode", "+44");
    env.define("phoneAreaCode", "020");

    let err = run(&mut env, FEATURES).unwrap_err();
    assert_eq!(err.to_string(), "expected strings, got string from UK");
}

#[test]
fn test_bulk_rows() {
    let features = compile(FEATURES).unwrap();
    let rows = [
        ("+972", "3"),
        ("+7", "095"),
        ("+44", "020"),
        ("+44", "023"),
        ("+34", "976"),
    ];
    let mut envs: Vec<Environment> = rows
        .iter()
        .map(|(country, area)| {
            let mut env = with_constants(numeric_env());
            env.define("phoneCountryCode", *country);
            env.define("phoneAreaCode", *area);
            env
        })
        .collect();

    let results = evaluate_batch(&features, &mut envs, &BatchConfig::default()).unwrap();
    let rendered: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().to_string())
        .collect();
    assert_eq!(
        rendered,
        vec!["[0 1 0]", "[0 0 1]", "[1 0 0]", "[0 0 0]", "[0 0 0]"]
    );
}

// ====================
// SQL vocabulary: the same program renders a query
// ====================

/// Operation with its own configuration
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
    let quoted: Vec<String> = string_list(env, args.get(1))?
        .iter()
        .map(|s| format!("'{}'", s))
        .collect();
    Ok(Value::String(format!("({} in ({}))", column, quoted.join(", "))))
}

#[test]
fn test_sql_generation() {
    let alias = "log";
    let mut env = Environment::new();
    env.define(
        "vector",
        Value::operation(SqlSelect {
            table: r#"hive."default".events"#.to_string(),
            alias: alias.to_string(),
        }),
    );
    env.define_operation("and", sql_and);
    env.define_operation("in", sql_in);
    env.define_operation("prog", prog);
    env.define_operation("set_str_list", set_str_list);

    run(&mut env, CONSTANTS).unwrap();
    env.define("phoneCountryCode", format!("{}.phone_country", alias));
    env.define("phoneAreaCode", format!("{}.phone_area", alias));

    let result = run(&mut env, FEATURES).unwrap();
    assert_eq!(
        result.as_str(),
        Some(
            "select\n\
             \x20 (log.phone_country in ('+44')) and (log.phone_area in ('020')),\n\
             \x20 (log.phone_country in ('+972')) and (log.phone_area in ('3')),\n\
             \x20 (log.phone_country in ('+7')) and (log.phone_area in ('095', '495'))\n\
             from\n\
             \x20 hive.\"default\".events as log;"
        )
    );
}
