//! Command-line interface for fsm-parser
//! This binary parses a plain text file with one of the bundled grammars and prints the tree.
//!
//! Usage:
//!   fsmparse `<path>` [--grammar `<name>`] [--chunking `<mode>`] [--format `<format>`] [--trace] [--config `<file>`]
//!   fsmparse --list-grammars                                 - List the bundled grammars
//!   fsmparse --list-formats                                  - List the output formats
//!
//! Flags override the values of the configuration file, which in turn override the built-in
//! defaults.

use clap::{Arg, ArgAction, ArgMatches, Command};
use fsm_config::{FsmConfig, Loader};
use fsm_parser::fsm::chunking::Chunking;
use fsm_parser::fsm::formats::{FormatRegistry, TreevizFormatter};
use fsm_parser::fsm::grammars::GrammarRegistry;
use fsm_parser::fsm::loader::{DocumentLoader, ParseOptions};

fn main() {
    let matches = Command::new("fsmparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse plain text documents with a finite-state-machine grammar")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the text file")
                .required_unless_present_any(["list-grammars", "list-formats"])
                .index(1),
        )
        .arg(
            Arg::new("grammar")
                .long("grammar")
                .short('g')
                .help("Grammar name (e.g., 'outline', 'memo')"),
        )
        .arg(
            Arg::new("chunking")
                .long("chunking")
                .help("How the text is split into fragments")
                .value_parser(Chunking::ALL.map(Chunking::name)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'treeviz', 'tag', 'json', 'yaml')"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Report every parse step on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("list-grammars")
                .long("list-grammars")
                .help("List available grammars")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-grammars") {
        handle_list_grammars_command();
        return;
    }
    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing");
    handle_parse_command(path, &config);
}

/// Defaults, then the `--config` file, then flags.
fn load_config(matches: &ArgMatches) -> Result<FsmConfig, fsm_config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    if let Some(grammar) = matches.get_one::<String>("grammar") {
        loader = loader.set_override("parse.grammar", grammar.as_str())?;
    }
    if let Some(chunking) = matches.get_one::<String>("chunking") {
        loader = loader.set_override("parse.chunking", chunking.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("trace") {
        loader = loader.set_override("trace.enabled", true)?;
    }
    loader.build()
}

fn handle_parse_command(path: &str, config: &FsmConfig) {
    let mut formats = FormatRegistry::with_defaults();
    formats.register(TreevizFormatter {
        label_width: config.output.label_width,
    });
    if !formats.has(&config.output.format) {
        eprintln!("Unknown format '{}'", config.output.format);
        eprintln!("Available formats: {}", formats.list_formats().join(", "));
        std::process::exit(1);
    }

    let options = ParseOptions::new(config.parse.grammar.as_str())
        .with_chunking(config.parse.chunking)
        .with_trace(config.trace.enabled);
    let tree = DocumentLoader::from_path(path)
        .and_then(|loader| loader.parse(&options))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let output = formats
        .serialize(&tree, &config.output.format)
        .unwrap_or_else(|e| {
            eprintln!("Error formatting tree: {}", e);
            std::process::exit(1);
        });
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

fn handle_list_grammars_command() {
    let registry = GrammarRegistry::with_defaults();
    println!("Available grammars:\n");
    for name in registry.list_grammars() {
        if let Some(grammar) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", grammar.description());
            println!();
        }
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Some(format) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", format.description());
            println!();
        }
    }
}
