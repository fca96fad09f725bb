//! # A Tree-Walking Interpreter
//!
//! A small expression-oriented language with integers, booleans, `if`/`else`
//! expressions, first-class functions, `let` bindings, and `return`
//! statements. Three phases, leaf first:
//!
//! 1. **Lexing** ([`lexer`]) -- turn source text into a token stream.
//! 2. **Parsing** ([`parser`]) -- a Pratt parser turns tokens into a
//!    [`Program`](ast::Program), collecting structured error messages
//!    rather than aborting on malformed input.
//! 3. **Evaluating** ([`evaluator`]) -- a recursive tree-walker produces a
//!    [`Value`](object::Value), propagating `return` and errors out through
//!    nested blocks.
//!
//! ## Classroom Narrative
//! 1. **Memory flow**: source text lives on the stack as `&str`. The lexer
//!    copies it into a `Vec<char>` (heap) and produces [`Token`]s one at a
//!    time. The parser owns the lexer and builds an AST where every node is
//!    boxed and owned by its parent. The evaluator walks the AST by
//!    reference and produces owned `Value`s.
//! 2. **Ownership beats GC**: every AST node is allocated once and owned by
//!    its parent; dropping a node recursively drops its children. The only
//!    shared ownership in the whole pipeline is `Rc<RefCell<_>>` inside
//!    [`Environment`](environment::Environment), because closures need to
//!    share their defining scope with the call sites that invoke them.
//! 3. **Singletons without a singleton**: `true`, `false`, and `null` are
//!    plain `Copy` values rather than heap-allocated singletons; value
//!    equality and "pointer identity" coincide for them automatically.

pub mod ast;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;

pub use ast::Program;
pub use object::{value_to_string, Value};
pub use token::Token;

use lexer::Lexer;

/// Lexes `input` into its full token stream, including the trailing `Eof`.
pub fn lex(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let is_eof = tok.kind == token::TokenKind::Eof;
        tokens.push(tok);
        if is_eof {
            break;
        }
    }
    tokens
}

/// Parses `input`, returning the program plus any accumulated parse errors.
pub fn parse(input: &str) -> (Program, Vec<String>) {
    parser::parse(input)
}

/// Evaluates an already-parsed program in a fresh top-level environment.
pub fn eval(program: &Program) -> Value {
    evaluator::eval(program)
}

/// Runs the full pipeline -- lex, parse, evaluate -- on one line of input.
/// Returns parse errors on the `Err` side rather than evaluating, matching
/// the REPL's own "skip evaluation on parse errors" behaviour.
pub fn interpret(input: &str) -> Result<Value, Vec<String>> {
    let (program, errors) = parse(input);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(eval(&program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpret_runs_the_whole_pipeline() {
        assert_eq!(interpret("5").unwrap().to_string(), "5");
        assert_eq!(
            interpret("5 + true;").unwrap().to_string(),
            "ERROR: type mismatch: INTEGER + BOOLEAN"
        );
    }

    #[test]
    fn interpret_surfaces_parse_errors_without_evaluating() {
        let err = interpret("let x 5;").unwrap_err();
        assert!(!err.is_empty());
    }
}
