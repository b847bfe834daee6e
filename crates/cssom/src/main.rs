//! cssom - expand and serialize CSS shorthand properties
//!
//! Usage: cssom <COMMAND> <CSS> [OPTIONS]

use std::env;
use std::process::ExitCode;

use serde::Serialize;

use cssom_css::parse_declaration;
use cssom_style::{schema, RecursionGuard, StyleDeclaration, StyleError};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One longhand in `expand` output
#[derive(Debug, Serialize)]
struct LonghandReport {
    name: String,
    value: String,
    important: bool,
    /// Waiting for `var()` substitution
    deferred: bool,
}

/// Result of `expand`
#[derive(Debug, Serialize)]
struct ExpandReport {
    property: String,
    /// Shorthand text rebuilt from the longhands, if it can be
    shorthand: Option<String>,
    longhands: Vec<LonghandReport>,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cssom");

    if args.len() < 2 {
        print_usage(program);
        return ExitCode::FAILURE;
    }

    let flags: Vec<&str> = args[2..].iter().map(String::as_str).filter(|a| a.starts_with("--")).collect();
    let input = args[2..].iter().find(|a| !a.starts_with("--"));

    match args[1].as_str() {
        "--help" | "-h" => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        "--version" | "-V" => {
            println!("cssom {}", VERSION);
            ExitCode::SUCCESS
        }
        "expand" => {
            let Some(input) = input else {
                eprintln!("Usage: {} expand \"<property>: <value>\" [--json]", program);
                return ExitCode::FAILURE;
            };
            match run_expand(input, flags.contains(&"--json")) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        "serialize" => {
            let Some(input) = input else {
                eprintln!("Usage: {} serialize \"<declarations>\" [--minify] [--resolve]", program);
                return ExitCode::FAILURE;
            };
            match run_serialize(input, flags.contains(&"--minify"), flags.contains(&"--resolve")) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"cssom {} - CSS shorthand expansion and serialization

USAGE:
    {} expand "<property>: <value>" [--json]
    {} serialize "<declarations>" [--minify] [--resolve]

OPTIONS:
    -h, --help        Print this help message
    -V, --version     Print version information
    --json            Print the expansion as JSON
    --minify          Print minified declaration text
    --resolve         Substitute var() references before printing

EXAMPLES:
    {} expand "border-top: 1px solid red"
    {} expand "outline: auto" --json
    {} serialize "margin-top: 1px; margin-right: 2px; margin-bottom: 1px; margin-left: 2px"
"#,
        VERSION, program, program, program, program, program
    );
}

/// Expand one declaration into a report of its longhands
fn expand_report(input: &str) -> Result<ExpandReport, StyleError> {
    let declaration = parse_declaration(input)?;
    let mut decl = StyleDeclaration::new();
    decl.set_property(&declaration.property, &declaration.value, declaration.important)?;

    // Report under the property the name is an alias for
    let property = schema::resolve_alias(&declaration.property, &mut RecursionGuard::new())?.to_string();

    let longhands = (0..decl.len())
        .filter_map(|i| decl.item(i))
        .filter_map(|name| {
            let entry = decl.entry(name)?;
            Some(LonghandReport {
                name: name.to_string(),
                value: match entry.value.as_proxy() {
                    Some(proxy) => proxy.original_text(false),
                    None => entry.value.css_text(),
                },
                important: entry.important,
                deferred: entry.value.as_proxy().is_some(),
            })
        })
        .collect();

    let shorthand = schema::shorthand(&property)
        .map(|_| decl.get_property_value(&property))
        .filter(|text| !text.is_empty());

    Ok(ExpandReport { property, shorthand, longhands })
}

fn run_expand(input: &str, json: bool) -> Result<(), String> {
    let report = expand_report(input).map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    for longhand in &report.longhands {
        let priority = if longhand.important { " !important" } else { "" };
        let deferred = if longhand.deferred { "  (deferred)" } else { "" };
        println!("{}: {}{}{}", longhand.name, longhand.value, priority, deferred);
    }
    if let Some(text) = &report.shorthand {
        log::info!("{} rebuilds as: {}", report.property, text);
    }
    Ok(())
}

fn run_serialize(input: &str, minify: bool, resolve: bool) -> Result<(), String> {
    let mut decl = StyleDeclaration::parse(input);
    if resolve {
        decl.resolve_substitutions().map_err(|e| e.to_string())?;
    }

    if decl.is_empty() {
        return Err("no valid declarations".to_string());
    }

    if minify {
        println!("{}", decl.minified_css_text());
    } else {
        println!("{}", decl.css_text());
    }
    Ok(())
}
