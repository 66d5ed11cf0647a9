//! Command handlers for the Tint CLI.
//!
//! Each submodule implements one command. Option parsing, file reading and
//! language selection are shared and live here in the module root.
//! Handlers print to stdout and exit with status 1 on user errors; the
//! `write_*` functions they wrap render into any [`std::io::Write`].

use std::sync::Arc;

use tint_engine::EngineConfig;
use tint_lang::{languages, LanguageDefinition, LanguageDesc};

mod edit;
mod lex;
mod styles;

pub use edit::{edit_file, parse_edit_range, unescape};
pub use lex::{lex_file, show_folds, write_folds, write_tokens};
pub use styles::{list_languages, list_styles, write_styles};

/// Options shared by every command that reads a file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Built-in language name, overriding the file extension.
    pub lang: Option<String>,
    /// JSON language description, overriding both.
    pub def: Option<String>,
    /// Byte budget for re-lexing past an edit.
    pub max_relex: Option<usize>,
}

impl Options {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_relex_bytes: self.max_relex,
        }
    }
}

/// Split `args` into options and positional arguments.
///
/// Accepts `--lang=<name>`, `--def=<file.json>` and `--max-relex=<bytes>`,
/// each also as two arguments.
pub fn parse_options(args: &[String]) -> Result<(Options, Vec<String>), String> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if arg.starts_with("--") => (flag, Some(value.to_owned())),
            _ => (arg.as_str(), None),
        };
        let mut value = || {
            inline
                .clone()
                .or_else(|| iter.next().cloned())
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag {
            "--lang" => options.lang = Some(value()?),
            "--def" => options.def = Some(value()?),
            "--max-relex" => {
                let raw = value()?;
                let bytes = raw
                    .parse()
                    .map_err(|_| format!("invalid byte count for --max-relex: '{raw}'"))?;
                options.max_relex = Some(bytes);
            }
            _ if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => positional.push(arg.clone()),
        }
    }
    Ok((options, positional))
}

/// Pick the language for `path`: a JSON description, then a built-in by
/// name, then a built-in by file extension.
pub fn find_language(
    path: Option<&str>,
    options: &Options,
) -> Result<Arc<LanguageDefinition>, String> {
    if let Some(def_path) = &options.def {
        let json = std::fs::read_to_string(def_path)
            .map_err(|e| format!("error reading '{def_path}': {e}"))?;
        let desc: LanguageDesc =
            serde_json::from_str(&json).map_err(|e| format!("invalid description '{def_path}': {e}"))?;
        return desc
            .build()
            .map_err(|e| format!("invalid language '{def_path}': {e}"));
    }

    if let Some(name) = &options.lang {
        return languages::by_name(name)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("unknown language '{name}'"));
    }

    let ext = path
        .and_then(|p| std::path::Path::new(p).extension())
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| "cannot infer the language; pass --lang=<name>".to_owned())?;
    languages::for_extension(ext)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no language for '.{ext}' files; pass --lang=<name>"))
}

pub(super) fn resolve_language(path: Option<&str>, options: &Options) -> Arc<LanguageDefinition> {
    match find_language(path, options) {
        Ok(def) => def,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Report a failed write to stdout. A closed pipe is not an error.
pub(super) fn finish(result: std::io::Result<()>) {
    if let Err(e) = result {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("error writing output: {e}");
            std::process::exit(1);
        }
    }
}
