use clap::{Args, Parser, Subcommand};
use groundschool::node::{ContentNode, NodeContext};
use groundschool::resolve::{DocumentSource, FsSource, HttpSource, ResolveError};
use groundschool::{candidates, captions, config, document, generate, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "groundschool")]
#[command(about = "Compiler and inspector for CBT training content trees")]
#[command(long_about = "\
Compiler and inspector for CBT training content trees

A content tree of JSON topic documents becomes a static, offline-capable
training site. Topics resolve through every historical path convention the
tree accumulated; documents classify as subtopic lists, lessons, or slide
packages; each reachable view is pre-rendered to HTML.

Content structure:

  content/
  ├── config.toml                      # Trainings, shell settings
  └── modules/
      ├── egitim1/
      │   ├── airplane-general.json    # Topic (subtopic container)
      │   └── airplane-general/
      │       ├── general.json         # Lesson document
      │       └── limits/
      │           └── manifest.json    # Slide package (delegated)
      └── egitim2/
          └── ucus-emniyeti.json

Document shapes (first match wins):
  subtopic container:  { title, summary?, topics: [...] }
  lesson:              { title?, html? } or { content: [blocks] }
  slide package:       { pages | slidesDir | slides, ... }

Run 'groundschool gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the static site: resolve, classify, and render every view
    Build,
    /// Validate the content tree without writing anything
    Check,
    /// Resolve one node reference and print the full resolution trace
    Resolve(ResolveArgs),
    /// Clean a slide-caption manifest in place
    Captions(CaptionsArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct ResolveArgs {
    /// Module id (training folder)
    #[arg(long)]
    module: String,

    /// Parent topic slug
    #[arg(long)]
    parent: String,

    /// Node id
    #[arg(long)]
    id: Option<String>,

    /// Node slug
    #[arg(long)]
    slug: Option<String>,

    /// Node title
    #[arg(long)]
    title: Option<String>,

    /// Explicit document path override on the node
    #[arg(long)]
    path: Option<String>,

    /// Explicit filename under the parent folder
    #[arg(long)]
    file: Option<String>,

    /// Resolve over HTTP against a deployed tree instead of --source
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Args)]
struct CaptionsArgs {
    /// Caption manifest to clean
    #[arg(long, default_value = "manifest/manifest.json")]
    manifest: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::build(&cli.source, &cli.output)?;
            output::print_build_report(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = generate::check(&cli.source)?;
            output::print_build_report(&report);
            if report.failures.is_empty() {
                println!("==> Content is valid");
            } else {
                return Err(format!("{} nodes failed to resolve", report.failures.len()).into());
            }
        }
        Command::Resolve(args) => {
            let node = ContentNode {
                id: args.id,
                slug: args.slug,
                title: args.title,
                path: args.path,
                file: args.file,
                ..ContentNode::default()
            };
            let ctx = NodeContext::new(&args.module, &args.parent);
            let list = candidates::candidate_paths(&ctx, &node);
            let display = node.display_title();
            let display = if display.is_empty() { "node" } else { display.as_str() };

            let source: Box<dyn DocumentSource> = match args.base_url {
                Some(url) => Box::new(HttpSource::new(url)),
                None => Box::new(FsSource::new(&cli.source)),
            };

            match groundschool::resolve::resolve(source.as_ref(), &list) {
                Ok(resolution) => {
                    let shape = document::classify(&resolution.document).shape();
                    output::print_resolution(display, &resolution, shape);
                }
                Err(err) => {
                    if let ResolveError::Exhausted { tried } = &err {
                        output::print_resolution_failure(display, tried);
                    }
                    return Err(err.into());
                }
            }
        }
        Command::Captions(args) => {
            let mut entries = captions::load_manifest(&args.manifest)?;
            let report = captions::clean_manifest(&mut entries);
            captions::save_manifest(&args.manifest, &entries)?;
            output::print_clean_report(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
