mod config;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use adt::{Variant, interchange, preview, templates};
use pseudo::node::CodeNode;
use pseudo::parser::ParseWarning;
use pseudo::render::render_text;

use crate::config::{Config, RenderOverrides};

const SUBCOMMANDS: &[&str] = &["render", "preview", "template", "migrate", "test", "help"];

#[derive(Parser)]
#[command(name = "adt", version, about = "Abstract data type authoring tools")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file (defaults to ./adt.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG also applies
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a pseudocode file with its block structure
    Render(RenderArgs),

    /// Print a text preview of an ADT document
    Preview(PreviewArgs),

    /// Print or write a built-in template document
    Template(TemplateArgs),

    /// Upgrade a document to the current schema
    Migrate(MigrateArgs),

    /// Run .test.pseudo fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RenderFlags {
    /// Columns per nesting level
    #[arg(long)]
    indent: Option<usize>,

    /// Draw indent guides
    #[arg(long)]
    guides: bool,

    /// Re-indent lines from structure alone
    #[arg(long)]
    trim: bool,
}

impl RenderFlags {
    fn overrides(&self) -> RenderOverrides {
        RenderOverrides {
            indent: self.indent,
            guides: self.guides,
            trim: self.trim,
        }
    }
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Pseudocode source file
    file: String,

    /// Parse only and report warnings
    #[arg(long)]
    check: bool,

    /// Dump the parsed forest
    #[arg(long)]
    ast: bool,

    /// List block headers only
    #[arg(long)]
    outline: bool,

    /// Exit with status 1 if any warning is reported
    #[arg(long)]
    deny_warnings: bool,

    #[command(flatten)]
    flags: RenderFlags,
}

#[derive(clap::Args)]
struct PreviewArgs {
    /// ADT document (JSON)
    file: PathBuf,

    /// Implementation variant to show
    #[arg(long)]
    variant: Option<Variant>,

    #[command(flatten)]
    flags: RenderFlags,
}

#[derive(clap::Args)]
struct TemplateArgs {
    /// Template name
    #[arg(required_unless_present = "list")]
    name: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List available templates
    #[arg(long)]
    list: bool,
}

#[derive(clap::Args)]
struct MigrateArgs {
    /// Document to upgrade
    file: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.pseudo file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // If the first positional arg is not a known subcommand, inject
    // "render" so `adt body.txt` works like `adt render body.txt`.
    let mut args: Vec<String> = std::env::args().collect();
    let first_pos = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, a)| !a.starts_with('-'))
        .map(|(i, a)| (i, a.clone()));
    if let Some((pos, first)) = first_pos {
        if !SUBCOMMANDS.contains(&first.as_str()) {
            args.insert(pos, "render".to_string());
        }
    }

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Command::Render(render_args) => do_render(render_args, &config, cli.no_color),
        Command::Preview(preview_args) => do_preview(preview_args, &config),
        Command::Template(template_args) => do_template(template_args),
        Command::Migrate(migrate_args) => do_migrate(migrate_args),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn do_render(args: RenderArgs, config: &Config, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => fail(format!("cannot read '{}': {}", args.file, e)),
    };

    // Set up codespan file database
    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let parsed = pseudo::parser::Parser::new(source, file_id).parse();
    log::info!(
        "{}: {} line(s), {} top-level node(s)",
        args.file,
        parsed.forest.line_count(),
        parsed.forest.nodes.len()
    );

    let writer = StandardStream::stderr(color_choice);
    emit_warnings(&writer, &files, &parsed.warnings);
    let denied = args.deny_warnings && !parsed.warnings.is_empty();

    // --check: parse only
    if args.check {
        eprintln!(
            "ok: {} parsed with {} warning(s)",
            args.file,
            parsed.warnings.len()
        );
    } else if args.ast {
        println!("{:#?}", parsed.forest);
    } else if args.outline {
        fn print_blocks(nodes: &[CodeNode], indent: usize) {
            for node in nodes {
                if let CodeNode::Block {
                    header, children, ..
                } = node
                {
                    let open = if node.is_terminated() { "" } else { " (open)" };
                    println!("{}{}{}", "  ".repeat(indent), header.trim(), open);
                    print_blocks(children, indent + 1);
                }
            }
        }
        print_blocks(&parsed.forest.nodes, 0);
    } else {
        let options = config.text_options(args.flags.overrides());
        print!("{}", render_text(&parsed.forest.nodes, &options));
    }

    if denied {
        process::exit(1);
    }
}

fn emit_warnings(
    writer: &StandardStream,
    files: &SimpleFiles<String, String>,
    warnings: &[ParseWarning],
) {
    let config = term::Config::default();
    for warning in warnings {
        let diagnostic = warning.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}

fn do_preview(args: PreviewArgs, config: &Config) {
    let document = match interchange::load(&args.file) {
        Ok(d) => d,
        Err(e) => fail(e),
    };
    let variant = args.variant.unwrap_or(config.preview.variant);
    let options = config.text_options(args.flags.overrides());
    print!("{}", preview::render(&document, variant, &options));
}

fn do_template(args: TemplateArgs) {
    if args.list {
        for name in templates::NAMES {
            println!("{}", name);
        }
        return;
    }

    let name = args.name.unwrap_or_default();
    let document = match templates::require(&name) {
        Ok(d) => d,
        Err(e) => fail(e),
    };
    write_document(&document, args.output.as_deref());
}

fn do_migrate(args: MigrateArgs) {
    let text = match std::fs::read_to_string(&args.file) {
        Ok(t) => t,
        Err(e) => fail(format!("cannot read '{}': {}", args.file.display(), e)),
    };
    let (document, migrations) = match interchange::from_json_with_migrations(&text) {
        Ok(pair) => pair,
        Err(e) => fail(e),
    };

    if migrations.is_empty() {
        eprintln!("{}: already current", args.file.display());
    }
    for migration in &migrations {
        eprintln!("{}: applied {:?}", args.file.display(), migration);
    }
    write_document(&document, args.output.as_deref());
}

fn write_document(document: &adt::Adt, output: Option<&Path>) {
    let result = match output {
        Some(path) => interchange::save(document, path).map(|()| {
            eprintln!("wrote {}", path.display());
        }),
        None => interchange::to_json(document).map(|json| println!("{}", json)),
    };
    if let Err(e) = result {
        fail(e);
    }
}
