use std::io::{self, BufRead, Write};

/// Line-oriented user interaction used by interactive selection.
pub trait Prompt: Send {
    /// Ask `question` and return the answer without its line terminator.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Report a rejected answer; the caller asks again.
    fn error(&mut self, message: &str);

    fn success(&mut self, message: &str);
}

/// [`Prompt`] over the process's stdin/stderr.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        eprintln!("{question}");
        eprint!("> ");
        io::stderr().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn error(&mut self, message: &str) {
        eprintln!("\x1b[31m{message}\x1b[0m");
    }

    fn success(&mut self, message: &str) {
        eprintln!("\x1b[32m{message}\x1b[0m");
    }
}
