use std::{
    env,
    fs::read_to_string,
    io::{self, Read},
    process::ExitCode,
    time::{Duration, Instant},
};

use phplex::{
    display_error,
    errors::errors::{diagnostics, Error},
    init_tracing,
    lexer::{compare::compare, tokens::Token},
    tokenize, Strategy,
};

const USAGE: &str = "usage: phplex [--strategy pattern|automaton|both] [--diagnostics] [FILE]";

struct Options {
    /// `None` runs both recognizers and compares them.
    strategy: Option<Strategy>,
    diagnostics: bool,
    file: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        strategy: None,
        diagnostics: false,
        file: None,
    };

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strategy" | "-s" => {
                let value = args.next().ok_or("--strategy needs a value")?;
                options.strategy = match value.as_str() {
                    "both" => None,
                    other => Some(other.parse::<Strategy>()?),
                };
            }
            "--diagnostics" | "-d" => options.diagnostics = true,
            "--help" | "-h" => return Err(String::new()),
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown flag `{}`", flag));
            }
            path => {
                if options.file.is_some() {
                    return Err(String::from("only one input file may be given"));
                }
                options.file = Some(path.to_string());
            }
        }
    }

    Ok(options)
}

fn read_source(file: Option<&str>) -> io::Result<String> {
    match file {
        None | Some("-") => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(path) => read_to_string(path),
    }
}

fn print_tokens(tokens: &[Token], title: &str) {
    println!("=== {} ===", title);
    for token in tokens {
        println!("{}", token);
    }
    let errors = tokens.iter().filter(|t| t.kind.is_error()).count();
    println!("tokens: {} (errors: {})\n", tokens.len(), errors);
}

fn run(source: &str, strategy: Strategy) -> Result<(Vec<Token>, Duration), Error> {
    let start = Instant::now();
    let tokens = tokenize(source, strategy)?;
    Ok((tokens, start.elapsed()))
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let file_name = options.file.as_deref().unwrap_or("<stdin>");
    let source = match read_source(options.file.as_deref()) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: failed to read {}: {}", file_name, error);
            return ExitCode::from(2);
        }
    };

    let strategies = match options.strategy {
        Some(strategy) => vec![strategy],
        None => vec![Strategy::Pattern, Strategy::Automaton],
    };

    let mut results = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        match run(&source, strategy) {
            Ok((tokens, elapsed)) => {
                print_tokens(&tokens, &format!("{} - {}", file_name, strategy));
                results.push((strategy, tokens, elapsed));
            }
            Err(error) if error.is_internal() => {
                eprintln!("fatal: internal fault in the {} recognizer: {}", strategy, error);
                return ExitCode::from(1);
            }
            Err(error) => {
                eprintln!("fatal: {} recognizer failed: {}", strategy, error);
                return ExitCode::from(1);
            }
        }
    }

    if options.diagnostics {
        if let Some((_, tokens, _)) = results.first() {
            for error in diagnostics(tokens) {
                display_error(&error, &source, file_name);
            }
        }
    }

    let mut status = ExitCode::SUCCESS;
    if let [(left_strategy, left, _), (right_strategy, right, _)] = results.as_slice() {
        let comparison = compare(
            &left_strategy.to_string(),
            left,
            &right_strategy.to_string(),
            right,
        );
        println!("--- comparison ---");
        print!("{}", comparison);
        if !comparison.is_match() {
            status = ExitCode::from(1);
        }
    }

    println!("--- timing ---");
    for (strategy, _, elapsed) in &results {
        println!("{:<10} {:?}", strategy.to_string(), elapsed);
    }

    status
}
