use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clangtool_clang::{ClangFrontEnd, ClangOptions};
use clangtool_config::ClangtoolConfig;
use clangtool_core::{AstNode, SourceLocation};
use clangtool_frontend::FrontEnd;
use clangtool_ide::{Engine, QueryOptions};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "clangtool", version, about = "C/C++ code intelligence backed by libclang")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (defaults to discovery from the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Compiler argument; when given, replaces the configured ones
    #[arg(short = 'a', long = "arg", global = true, allow_hyphen_values = true)]
    args: Vec<String>,
    /// Use the contents of CONTENT_FILE as the unsaved buffer for FILE
    #[arg(long, global = true, value_name = "FILE=CONTENT_FILE", value_parser = parse_unsaved)]
    unsaved: Vec<(PathBuf, PathBuf)>,
    /// Emit JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree of a file
    Ast(FileArgs),
    /// Print includes, functions, classes and variables of a file
    Outline(FileArgs),
    /// Print diagnostics; exits 1 when any is an error
    Diagnose(FileArgs),
    /// Print completion candidates at a position
    Complete(PositionArgs),
    /// Print the type of the entity at a position
    TypeAt(PositionArgs),
    /// Print where the entity at a position is declared
    Declaration(PositionArgs),
    /// Print where the entity at a position is defined
    Definition(PositionArgs),
    /// Parse files and report the memory held by each
    Status(StatusArgs),
}

#[derive(Args)]
struct FileArgs {
    file: PathBuf,
}

#[derive(Args)]
struct PositionArgs {
    file: PathBuf,
    /// 1-based line
    row: u32,
    /// 1-based column
    col: u32,
}

#[derive(Args)]
struct StatusArgs {
    files: Vec<PathBuf>,
}

fn parse_unsaved(value: &str) -> Result<(PathBuf, PathBuf), String> {
    match value.split_once('=') {
        Some((file, content)) if !file.is_empty() && !content.is_empty() => {
            Ok((PathBuf::from(file), PathBuf::from(content)))
        }
        _ => Err(format!("expected FILE=CONTENT_FILE, got `{value}`")),
    }
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn load_config(path: Option<&Path>) -> Result<ClangtoolConfig> {
    match path {
        Some(path) => Ok(ClangtoolConfig::load_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            let (config, _) = clangtool_config::load_for_dir(&cwd)?;
            Ok(config)
        }
    }
}

fn clang_options(config: &ClangtoolConfig) -> ClangOptions {
    let frontend = &config.frontend;
    ClangOptions {
        libclang_path: frontend.libclang_path.clone(),
        detailed_preprocessing_record: frontend.detailed_preprocessing_record,
        precompiled_preamble: frontend.precompiled_preamble,
        brief_comments: frontend.brief_comments,
        include_macros: frontend.include_macros,
        include_code_patterns: frontend.include_code_patterns,
    }
}

fn query_options(config: &ClangtoolConfig) -> QueryOptions {
    QueryOptions {
        include_headers: config.query.include_headers,
        max_candidates: config.query.max_candidates,
    }
}

fn compile_args(config: &ClangtoolConfig, overrides: &[String]) -> Vec<String> {
    if overrides.is_empty() {
        config.compile.args.clone()
    } else {
        overrides.to_vec()
    }
}

fn open_engine(config: &ClangtoolConfig, global: &GlobalArgs) -> Result<Engine<ClangFrontEnd>> {
    let front_end = ClangFrontEnd::load(clang_options(config)).context("failed to load libclang")?;
    let mut engine = Engine::with_options(front_end, query_options(config));
    engine.set_arguments(compile_args(config, &global.args));

    for (file, content_file) in &global.unsaved {
        let content = std::fs::read(content_file)
            .with_context(|| format!("failed to read {}", content_file.display()))?;
        tracing::debug!(
            target: "clangtool.cli",
            file = %file.display(),
            bytes = content.len(),
            "registering unsaved buffer"
        );
        engine.index_touch_unsaved(file, &content, content.len());
    }
    Ok(engine)
}

/// Reparses `files` from disk, except those backed by an unsaved buffer,
/// which were already parsed from it.
fn touch_for_status<F: FrontEnd>(engine: &mut Engine<F>, files: &[PathBuf]) {
    for file in files {
        if engine.has_unsaved(file) {
            continue;
        }
        engine.index_touch(file);
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.global.config.as_deref())?;
    clangtool_config::init_tracing(&config.logging);

    let mut engine = open_engine(&config, &cli.global)?;
    let json = cli.global.json;

    match cli.command {
        Command::Ast(args) => {
            let ast = engine.file_ast(&args.file);
            if json {
                print_json(&ast)?;
            } else {
                print_tree(&ast);
            }
            Ok(0)
        }
        Command::Outline(args) => {
            let outline = engine.file_outline(&args.file);
            if json {
                print_json(&outline)?;
            } else {
                for include in &outline.includes {
                    println!("include {include}");
                }
                for variable in &outline.variables {
                    println!("var {variable}");
                }
                for function in &outline.functions {
                    println!("fn {}({})", function.name, function.params.join(", "));
                }
                for class in &outline.classes {
                    println!("class {}", class.name);
                    for attribute in &class.attributes {
                        println!("  field {attribute}");
                    }
                    for function in &class.functions {
                        println!("  fn {}({})", function.name, function.params.join(", "));
                    }
                }
            }
            Ok(0)
        }
        Command::Diagnose(args) => {
            let diagnostics = engine.file_diagnose(&args.file);
            let exit = if diagnostics.iter().any(|d| d.severity.is_error()) {
                1
            } else {
                0
            };
            if json {
                print_json(&diagnostics)?;
            } else {
                for diagnostic in &diagnostics {
                    println!("{}", diagnostic.text);
                }
            }
            Ok(exit)
        }
        Command::Complete(args) => {
            let candidates = engine.cursor_candidates_at(&args.file, args.row, args.col);
            if json {
                print_json(&candidates)?;
            } else {
                for candidate in &candidates {
                    if candidate.result_type.is_empty() {
                        println!("{} [{}]", candidate.name, candidate.kind.as_str());
                    } else {
                        println!(
                            "{}: {} [{}]",
                            candidate.name,
                            candidate.result_type,
                            candidate.kind.as_str()
                        );
                    }
                }
            }
            Ok(0)
        }
        Command::TypeAt(args) => {
            let ty = engine.cursor_type_at(&args.file, args.row, args.col);
            if json {
                print_json(&ty)?;
            } else {
                println!("{ty}");
            }
            Ok(0)
        }
        Command::Declaration(args) => {
            let location = engine.cursor_declaration_at(&args.file, args.row, args.col);
            print_location(&location, json)?;
            Ok(0)
        }
        Command::Definition(args) => {
            let location = engine.cursor_definition_at(&args.file, args.row, args.col);
            print_location(&location, json)?;
            Ok(0)
        }
        Command::Status(args) => {
            touch_for_status(&mut engine, &args.files);
            let report = engine.index_report(config.memory_budget());
            if json {
                print_json(&report)?;
            } else {
                for entry in &report.entries {
                    println!("{}\t{}", entry.path.display(), entry.bytes);
                }
                println!("total\t{}", report.total_bytes);
                if let Some(pressure) = report.pressure {
                    println!("pressure\t{pressure:?}");
                }
            }
            Ok(0)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn print_location(location: &SourceLocation, json: bool) -> Result<()> {
    if json {
        return print_json(location);
    }
    if location.is_none() {
        println!("(none)");
    } else {
        println!(
            "{}:{}:{}",
            location.file.display(),
            location.row,
            location.col
        );
    }
    Ok(())
}

fn print_tree(root: &AstNode) {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        if node.ty.is_empty() {
            println!("{indent}{} {}", node.kind.as_str(), node.name);
        } else {
            println!("{indent}{} {}: {}", node.kind.as_str(), node.name, node.ty);
        }
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
}
