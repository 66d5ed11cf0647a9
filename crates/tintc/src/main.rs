//! Tint CLI
//!
//! Lexes files with the incremental engine and prints what it sees.

use tintc::commands::{
    edit_file, lex_file, list_languages, list_styles, parse_options, show_folds, Options,
};

fn main() {
    tintc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let (options, positional) = match parse_options(&args[2..]) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "lex" => {
            let Some(path) = positional.first() else {
                eprintln!("Usage: tintc lex <file> [--lang=<name>] [--def=<file.json>]");
                std::process::exit(1);
            };
            lex_file(path, &options);
        }
        "folds" => {
            let Some(path) = positional.first() else {
                eprintln!("Usage: tintc folds <file> [--lang=<name>] [--def=<file.json>]");
                std::process::exit(1);
            };
            show_folds(path, &options);
        }
        "styles" => {
            if positional.is_empty() && no_language(&options) {
                eprintln!("Usage: tintc styles [<file>] [--lang=<name>] [--def=<file.json>]");
                std::process::exit(1);
            }
            list_styles(positional.first().map(String::as_str), &options);
        }
        "edit" => {
            let [path, range, text] = positional.as_slice() else {
                eprintln!("Usage: tintc edit <file> <start>..<end> <text> [--max-relex=<bytes>]");
                eprintln!();
                eprintln!("Replacement text may use \\n, \\r, \\t and \\\\.");
                std::process::exit(1);
            };
            edit_file(path, range, text, &options);
        }
        "langs" => list_languages(),
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("tintc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn no_language(options: &Options) -> bool {
    options.lang.is_none() && options.def.is_none()
}

fn print_usage() {
    println!("Tint incremental lexer");
    println!();
    println!("Usage: tintc <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>                     Tokenize and display tokens");
    println!("  folds <file>                   Display fold levels per line");
    println!("  styles [<file>]                Display the style table");
    println!("  edit <file> <range> <text>     Replay an edit and show what was re-lexed");
    println!("  langs                          List built-in languages");
    println!("  help                           Show this help message");
    println!("  version                        Show version information");
    println!();
    println!("Options:");
    println!("  --lang=<name>        Use a built-in language instead of the file extension");
    println!("  --def=<file.json>    Load the language from a JSON description");
    println!("  --max-relex=<bytes>  Stop re-lexing this far past an edit; resume later");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Tracing filter, e.g. tint_engine=debug");
    println!("  TINT_LOG_TREE        Print tracing output as an indented span tree");
}
