//! `styles` and `langs`: inspect language definitions.

use std::io::{self, Write};

use tint_lang::{languages, LanguageDefinition};

use super::{finish, resolve_language, Options};

/// Write the style table and keyword groups of `def`.
pub fn write_styles(out: &mut impl Write, def: &LanguageDefinition) -> io::Result<()> {
    writeln!(out, "Styles for {}:", def.name())?;
    for rule in def.styles().rules() {
        let subs = if rule.sub_styles > 1 {
            format!(" (x{})", rule.sub_styles)
        } else {
            String::new()
        };
        writeln!(
            out,
            "  {:<16} {:<18}{subs} {}",
            rule.kind.to_string(),
            rule.name,
            rule.attributes.as_str()
        )?;
    }

    let groups = def.keywords().groups();
    if !groups.is_empty() {
        writeln!(out)?;
        writeln!(out, "Keyword groups:")?;
        for (index, group) in groups.iter().enumerate() {
            writeln!(
                out,
                "  {index}: {} -> {} ({} words, {:?})",
                group.name(),
                group.kind(),
                group.len(),
                group.lookup()
            )?;
        }
    }
    Ok(())
}

/// Show the styles of the language for `path`, or of `--lang`/`--def`.
pub fn list_styles(path: Option<&str>, options: &Options) {
    let def = resolve_language(path, options);
    finish(write_styles(&mut io::stdout().lock(), &def));
}

/// List the built-in languages.
pub fn list_languages() {
    let all = match languages::all() {
        Ok(all) => all,
        Err(e) => {
            eprintln!("built-in language failed to load: {e}");
            std::process::exit(1);
        }
    };
    println!("Built-in languages:");
    for def in all {
        let exts: Vec<_> = def.extensions().map(|e| format!(".{e}")).collect();
        println!("  {:<12} {}", def.name(), exts.join(" "));
    }
}
