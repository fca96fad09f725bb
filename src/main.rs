use std::io;

fn main() -> io::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    interpreter::repl::start(stdin.lock(), stdout.lock())
}
