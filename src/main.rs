use clap::{Parser, Subcommand};
use drill_site::registry::{Registry, RegistryDiff};
use drill_site::{config, derive, generate, output, schema};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "drill-site")]
#[command(about = "Static site builder for language-drill curricula")]
#[command(long_about = "\
Static site builder for language-drill curricula

Reads a curriculum schema, gives every lesson three levels with stable
identifiers, renders the HTML pages and writes the identifier registry.

Schema structure:

  {
    \"config\": { \"uuid_seed\": \"my-course\", \"site_title\": \"...\", \"intro\": \"...\" },
    \"pages\": [
      { \"title\": \"Sounds\",
        \"sections\": [
          { \"heading\": \"Vowels\",
            \"lessons\": [\"Short A\", { \"name\": \"Long E\" }] } ] } ]
  }

Identifiers are UUID v5 of \"page|section|lesson|level\" under a namespace
derived from config.uuid_seed (\"default_seed\" when omitted). The same
schema and seed always produce the same identifiers.

Outputs:
  dist/<title>.html      one per page
  dist/App.html          drill app shell
  dist/index.html        landing page
  drill_registry.json    identifier -> [page, section, lesson, level]

Run 'drill-site gen-config' to generate a documented drill.toml.")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Path overrides shared by every command that touches the curriculum.
#[derive(clap::Args)]
struct PathArgs {
    /// Build config file [default: ./drill.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Curriculum schema
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Output directory for HTML
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Registry file
    #[arg(long, global = true)]
    registry: Option<PathBuf>,
}

impl PathArgs {
    /// Stock defaults → drill.toml → command-line flags.
    fn resolve(&self) -> Result<config::BuildConfig, config::ConfigError> {
        let mut build_config = config::load_config(self.config.as_deref(), Path::new("."))?;
        if let Some(schema) = &self.schema {
            build_config.schema = schema.clone();
        }
        if let Some(output) = &self.output {
            build_config.output.dir = output.clone();
        }
        if let Some(registry) = &self.registry {
            build_config.registry = registry.clone();
        }
        build_config.validate()?;
        Ok(build_config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: load → derive → generate → write registry (default)
    Build,
    /// Validate the schema and list every level identifier without writing
    Check,
    /// Resolve an identifier through the existing registry file
    Lookup {
        /// Level identifier
        uid: Uuid,
    },
    /// Compare a fresh derivation with the existing registry file
    Diff,
    /// Print a stock drill.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let build_config = cli.paths.resolve()?;
            println!("==> Loading {}", build_config.schema.display());
            let schema = schema::load_schema(&build_config.schema)?;

            println!("==> Deriving identifiers");
            let (site, registry) = derive::derive(schema);

            println!(
                "==> Generating HTML \u{2192} {}",
                build_config.output.dir.display()
            );
            let files = generate::generate(
                &site,
                &build_config.output.dir,
                build_config.output.curriculum_json,
            )?;
            output::print_generate_output(&files);

            println!(
                "==> Writing registry \u{2192} {}",
                build_config.registry.display()
            );
            registry.save(&build_config.registry)?;

            output::print_build_summary(
                registry.len(),
                &site.config,
                &build_config.registry,
                &build_config.output.dir,
            );
            println!("==> Build complete");
        }
        Command::Check => {
            let build_config = cli.paths.resolve()?;
            println!("==> Checking {}", build_config.schema.display());
            let schema = schema::load_schema(&build_config.schema)?;
            let (site, registry) = derive::derive(schema);
            output::print_site_output(&site);
            println!(
                "==> Schema is valid: {} lessons, {} identifiers",
                site.lesson_count(),
                registry.len()
            );
        }
        Command::Lookup { uid } => {
            let build_config = cli.paths.resolve()?;
            let registry = Registry::load(&build_config.registry)?;
            let location = registry.get(&uid).ok_or_else(|| {
                format!(
                    "identifier {uid} is not in {}",
                    build_config.registry.display()
                )
            })?;
            println!("{}", output::format_lookup(&uid, location));
        }
        Command::Diff => {
            let build_config = cli.paths.resolve()?;
            let previous = Registry::load(&build_config.registry)?;
            let schema = schema::load_schema(&build_config.schema)?;
            let (_, current) = derive::derive(schema);
            output::print_diff_output(&RegistryDiff::compute(&previous, &current));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
