//! Runtime values produced by the evaluator.
//!
//! `Boolean` and `Null` are represented as zero-sized/Copy data rather than
//! shared heap singletons -- Rust's `#[derive(Clone, Copy)]` gives value
//! semantics with reference-identity-equivalent behaviour for free (two
//! `Value::Boolean(true)`s always compare equal), so there is no need to
//! hand-roll the singleton-pointer trick the source language relies on.

use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Environment;

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NULL: Value = Value::Null;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i32),
    Boolean(bool),
    Null,
    /// Marks "a return statement produced this": wraps the returned value so
    /// blocks can unwind to the nearest function (or program) boundary
    /// without unwrapping it along the way.
    ReturnValue(Box<Value>),
    /// A first-class error; once produced it short-circuits evaluation the
    /// same way a `ReturnValue` does.
    Error(String),
    Function(Rc<FunctionValue>),
}

#[derive(Debug, Clone)]
pub struct FunctionValue {
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Environment,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function(_) => "FUNCTION",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::ReturnValue(inner) => write!(f, "{inner}"),
            Value::Error(message) => write!(f, "ERROR: {message}"),
            Value::Function(func) => {
                let params = func
                    .params
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({params}) {}", func.body)
            }
        }
    }
}

/// Formats a [`Value`] the way the REPL and tests expect.
pub fn value_to_string(value: &Value) -> String {
    value.to_string()
}
