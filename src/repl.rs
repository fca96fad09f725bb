//! The REPL driver.
//!
//! This is the "thin driver" the core pipeline is built to be embedded in:
//! read one line, lex + parse + evaluate it, print one value. No state
//! persists between lines -- each iteration starts from a fresh environment,
//! matching the single-threaded, no-shared-resources model the evaluator
//! assumes.

use std::io::{self, BufRead, Write};

use crate::environment::Environment;
use crate::evaluator::eval_program;
use crate::object::value_to_string;
use crate::parser::parse;

const PROMPT: &str = ">> ";

/// Runs the read-evaluate-print loop against `input`/`output`, generic over
/// `io::Read`/`io::Write` so tests can drive it against in-memory buffers
/// instead of a real terminal.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        let bytes_read = input.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            return Ok(());
        }

        let (program, errors) = parse(&line);
        if !errors.is_empty() {
            #[cfg(feature = "logging")]
            log::debug!("parse produced {} error(s)", errors.len());
            for message in &errors {
                writeln!(output, "{message}")?;
            }
            continue;
        }

        let env = Environment::new();
        let value = eval_program(&program, &env);
        writeln!(output, "{}", value_to_string(&value))?;
    }
}
