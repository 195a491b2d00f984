use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use simpl::fmt::Pretty;
use simpl::parser::parse_source;
use simpl::session::{Outcome, Session};

#[derive(Parser)]
#[command(name = "simpl")]
#[command(about = "Type inference and evaluation for a small imperative language", long_about = None)]
struct Cli {
    /// Run this file as one unit instead of starting the REPL
    file: Option<PathBuf>,

    /// Print the syntax tree of every unit before running it
    #[arg(long)]
    dump_ast: bool,

    /// Log filter, e.g. `debug` or `simpl::types=trace` (overridden by RUST_LOG)
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();
    match &cli.file {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if !run_source(&mut session, &source, cli.dump_ast) {
                std::process::exit(1);
            }
            Ok(())
        }
        None => repl(&mut session, cli.dump_ast),
    }
}

/// Run one unit and print its outcome. Returns whether it succeeded.
fn run_source(session: &mut Session, source: &str, dump_ast: bool) -> bool {
    let unit = match parse_source(source) {
        Ok(unit) => unit,
        Err(err) => {
            println!("Error: {}", err.report());
            return false;
        }
    };

    if dump_ast {
        print!("{}", unit.pretty(0));
    }

    match session.run_unit(&unit) {
        Ok(outcome) => {
            print_outcome(&outcome);
            true
        }
        Err(err) => {
            println!("Error: {}", err.report());
            false
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    if let Some(ty) = &outcome.ty {
        println!("Type: {}", ty);
    }
    if let Some(value) = &outcome.value {
        println!("val it = {}", value);
    }
}

fn print_env(session: &mut Session) {
    for binding in session.globals() {
        match binding.value {
            Some(value) => println!("{} : {} = {}", binding.name, binding.ty, value),
            None => println!("{} : {}", binding.name, binding.ty),
        }
    }
}

/// Net count of `{` over `}` in `line`.
fn brace_balance(line: &str) -> isize {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

fn repl(session: &mut Session, dump_ast: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    let mut buffer = String::new();
    let mut depth: isize = 0;

    loop {
        let prompt = if buffer.is_empty() { "> " } else { ". " };
        print!("{}", prompt);
        stdout.flush().context("failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        if buffer.is_empty() {
            match line.trim() {
                "" => continue,
                "exit" | "quit" => break,
                ":env" => {
                    print_env(session);
                    continue;
                }
                _ => {}
            }
        }

        buffer.push_str(&line);
        buffer.push('\n');
        depth += brace_balance(&line);

        if depth > 0 {
            continue;
        }

        run_source(session, &buffer, dump_ast);
        buffer.clear();
        depth = 0;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brace_balance() {
        assert_eq!(brace_balance("function f() {"), 1);
        assert_eq!(brace_balance("{ x := 1; }"), 0);
        assert_eq!(brace_balance("} }"), -2);
    }
}
