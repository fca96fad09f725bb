//! The tree-walking evaluator.
//!
//! Walks the AST recursively and produces a [`Value`]. `ReturnValue` is
//! deliberately left wrapped while it unwinds through nested blocks -- it is
//! only unwrapped at a function call boundary ([`apply_function`]) or at the
//! top of the program ([`eval_program`]). Any `Value::Error` is propagated
//! the same way, short-circuiting whatever block or program evaluation was
//! in progress.

use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::environment::Environment;
use crate::object::{FunctionValue, Value, FALSE, NULL, TRUE};

pub fn eval_program(program: &Program, env: &Environment) -> Value {
    let mut result = NULL;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block_statement(block: &BlockStatement, env: &Environment) -> Value {
    let mut result = NULL;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Environment) -> Value {
    match stmt {
        Statement::Expression { value } => eval_expression(value, env),
        Statement::Return { value } => {
            let val = eval_expression(value, env);
            if val.is_error() {
                return val;
            }
            Value::ReturnValue(Box::new(val))
        }
        Statement::Let { name, value } => {
            let val = eval_expression(value, env);
            if val.is_error() {
                return val;
            }
            env.set(name.name.clone(), val);
            NULL
        }
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

fn eval_expression(expr: &Expression, env: &Environment) -> Value {
    match expr {
        Expression::Integer(value) => Value::Integer(*value),
        Expression::Boolean(value) => native_bool(*value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix { operator, operand } => {
            let val = eval_expression(operand, env);
            if val.is_error() {
                return val;
            }
            eval_prefix_expression(operator, val)
        }
        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left_val = eval_expression(left, env);
            if left_val.is_error() {
                return left_val;
            }
            let right_val = eval_expression(right, env);
            if right_val.is_error() {
                return right_val;
            }
            eval_infix_expression(operator, left_val, right_val)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::Function { params, body } => Value::Function(Rc::new(FunctionValue {
            params: params.clone(),
            body: body.clone(),
            env: env.clone(),
        })),
        Expression::Call { callee, args } => {
            let func = eval_expression(callee, env);
            if func.is_error() {
                return func;
            }

            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                let val = eval_expression(arg, env);
                if val.is_error() {
                    return val;
                }
                values.push(val);
            }

            apply_function(func, values)
        }
    }
}

fn eval_identifier(ident: &Identifier, env: &Environment) -> Value {
    env.get(&ident.name)
        .unwrap_or_else(|| Value::Error(format!("identifier not found: {}", ident.name)))
}

fn native_bool(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn eval_prefix_expression(operator: &str, operand: Value) -> Value {
    match operator {
        "!" => native_bool(!operand.is_truthy()),
        "-" => match operand {
            Value::Integer(n) => Value::Integer(n.wrapping_neg()),
            other => Value::Error(format!("unknown operator: -{}", other.type_name())),
        },
        other => Value::Error(format!("unknown operator: {other}{}", operand.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (l, r) if l.type_name() == r.type_name() => match operator {
            "==" => native_bool(value_eq(l, r)),
            "!=" => native_bool(!value_eq(l, r)),
            _ => Value::Error(format!(
                "unknown operator: {} {operator} {}",
                l.type_name(),
                r.type_name()
            )),
        },
        (l, r) => Value::Error(format!(
            "type mismatch: {} {operator} {}",
            l.type_name(),
            r.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i32, right: i32) -> Value {
    match operator {
        "+" => Value::Integer(left.wrapping_add(right)),
        "-" => Value::Integer(left.wrapping_sub(right)),
        "*" => Value::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        }
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        other => Value::Error(format!("unknown operator: INTEGER {other} INTEGER")),
    }
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Null, Value::Null) => true,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        _ => false,
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Environment,
) -> Value {
    let cond = eval_expression(condition, env);
    if cond.is_error() {
        return cond;
    }

    if cond.is_truthy() {
        eval_block_statement(consequence, env)
    } else if let Some(alt) = alternative {
        eval_block_statement(alt, env)
    } else {
        NULL
    }
}

fn apply_function(func: Value, args: Vec<Value>) -> Value {
    match func {
        Value::Function(f) => {
            if f.params.len() != args.len() {
                return Value::Error(format!(
                    "wrong number of arguments: expected {}, got {}",
                    f.params.len(),
                    args.len()
                ));
            }

            let call_env = Environment::enclosed(&f.env);
            for (param, arg) in f.params.iter().zip(args) {
                call_env.set(param.name.clone(), arg);
            }

            let result = eval_block_statement(&f.body, &call_env);
            unwrap_return_value(result)
        }
        other => Value::Error(format!("not a function: {}", other.type_name())),
    }
}

fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => *inner,
        other => other,
    }
}

/// Evaluates a parsed program in a fresh top-level environment.
pub fn eval(program: &Program) -> Value {
    let env = Environment::new();
    eval_program(program, &env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval_input(input: &str) -> Value {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        eval(&program)
    }

    fn assert_int(input: &str, expected: i32) {
        match eval_input(input) {
            Value::Integer(value) => assert_eq!(value, expected, "input was {input:?}"),
            other => panic!("expected integer, got {other:?} for input {input:?}"),
        }
    }

    fn assert_bool(input: &str, expected: bool) {
        match eval_input(input) {
            Value::Boolean(value) => assert_eq!(value, expected, "input was {input:?}"),
            other => panic!("expected boolean, got {other:?} for input {input:?}"),
        }
    }

    #[test]
    fn integer_arithmetic() {
        assert_int("5", 5);
        assert_int("10", 10);
        assert_int("-5", -5);
        assert_int("-10", -10);
        assert_int("5 + 5 + 5 + 5 - 10", 10);
        assert_int("2 * 2 * 2 * 2 * 2", 32);
        assert_int("-50 + 100 + -50", 0);
        assert_int("5 * 2 + 10", 20);
        assert_int("5 + 2 * 10", 25);
        assert_int("20 + 2 * -10", 0);
        assert_int("50 / 2 * 2 + 10", 60);
        assert_int("2 * (5 + 10)", 30);
        assert_int("3 * 3 * 3 + 10", 37);
        assert_int("3 * (3 * 3) + 10", 37);
        assert_int("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50);
    }

    #[test]
    fn boolean_expressions() {
        assert_bool("true", true);
        assert_bool("false", false);
        assert_bool("1 < 2", true);
        assert_bool("1 > 2", false);
        assert_bool("1 < 1", false);
        assert_bool("1 == 1", true);
        assert_bool("1 != 1", false);
        assert_bool("true == true", true);
        assert_bool("false == false", true);
        assert_bool("true == false", false);
        assert_bool("(1 < 2) == true", true);
        assert_bool("(1 < 2) == false", false);
    }

    #[test]
    fn bang_operator() {
        assert_bool("!true", false);
        assert_bool("!false", true);
        assert_bool("!5", false);
        assert_bool("!!true", true);
        assert_bool("!!false", false);
        assert_bool("!!5", true);
    }

    #[test]
    fn if_else_expressions() {
        assert_int("if (true) { 10 }", 10);
        assert!(matches!(eval_input("if (false) { 10 }"), Value::Null));
        assert_int("if (1) { 10 }", 10);
        assert_int("if (1 < 2) { 10 }", 10);
        assert!(matches!(eval_input("if (1 > 2) { 10 }"), Value::Null));
        assert_int("if (1 > 2) { 10 } else { 20 }", 20);
        assert_int("if (1 < 2) { 10 } else { 20 }", 10);
    }

    #[test]
    fn return_statements() {
        assert_int("return 10;", 10);
        assert_int("return 10; 9;", 10);
        assert_int("return 2 * 5; 9;", 10);
        assert_int("9; return 2 * 5; 9;", 10);
        assert_int(
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            10,
        );
    }

    #[test]
    fn error_handling() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            ("5 / 0", "division by zero"),
        ];

        for (input, expected) in cases {
            match eval_input(input) {
                Value::Error(message) => assert_eq!(message, expected, "input was {input:?}"),
                other => panic!("expected error, got {other:?} for input {input:?}"),
            }
        }
    }

    #[test]
    fn let_statements() {
        assert_int("let a = 5; a;", 5);
        assert_int("let a = 5 * 5; a;", 25);
        assert_int("let a = 5; let b = a; b;", 5);
        assert_int("let a = 5; let b = a; let c = a + b + 5; c;", 15);
    }

    #[test]
    fn function_application() {
        assert_int("let identity = fn(x) { x; }; identity(5);", 5);
        assert_int("let identity = fn(x) { return x; }; identity(5);", 5);
        assert_int("let double = fn(x) { x * 2; }; double(5);", 10);
        assert_int("let add = fn(x, y) { x + y; }; add(5, 5);", 10);
        assert_int("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20);
        assert_int("fn(x) { x; }(5)", 5);
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let input = r#"
            let newAdder = fn(x) {
                fn(y) { x + y; };
            };
            let addTwo = newAdder(2);
            addTwo(2);
        "#;
        assert_int(input, 4);
    }

    #[test]
    fn end_to_end_scenarios_from_the_contract() {
        assert_int("5", 5);
        assert_int("-50 + 100 + -50", 0);
        assert_int("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50);
        assert_bool("(1 < 2) == true", true);
        assert_int(
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            10,
        );

        match eval_input("5 + true;") {
            Value::Error(message) => {
                assert_eq!(message, "type mismatch: INTEGER + BOOLEAN")
            }
            other => panic!("expected error, got {other:?}"),
        }

        match eval_input("-true") {
            Value::Error(message) => assert_eq!(message, "unknown operator: -BOOLEAN"),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
