//! Runtime execution for compiled lispex expressions

mod coerce;
mod environment;
mod evaluator;
mod operation;
mod value;

pub use coerce::{eval_as_number, eval_as_string};
pub use environment::Environment;
pub use evaluator::eval;
pub use operation::Operation;
pub use value::Value;
