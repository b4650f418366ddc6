use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use treeshell_core::command_definitions::ApplicationConfig;
use treeshell_core::config;
use treeshell_core::engine::Engine;
use treeshell_core::error::Result;
use treeshell_core::file_handling;
use treeshell_core::registry::Registry;

use treeshell_cli::cli_args::Args;
use treeshell_cli::{handlers, prompt, tree};

/// Load the config file and apply command-line overrides
fn initialize_config(args: &Args) -> Result<ApplicationConfig> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");

    let mut application_config = file_handling::get_application_config(&config_path)?;

    if let Some(language) = &args.language {
        application_config.preferred_language = Some(language.clone());
    }

    if args.debug {
        application_config.debug = true;
    }

    Ok(application_config)
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let application_config = initialize_config(&args)?;

    let mut registry = Registry::new();
    handlers::register(&mut registry, &application_config)?;
    let engine = Engine::new(&application_config, &mut registry);

    if args.print_tree {
        print!("{}", tree::render_tree(engine.root(), engine.languages()));
        return Ok(());
    }

    if let Some(line) = args.command_line() {
        return engine.execute_line(&line);
    }

    let banner = handlers::banner(&application_config);
    if !banner.is_empty() {
        println!("{banner}");
    }

    info!("Starting shell with languages {:?}", engine.languages());
    let mut reader = prompt::reader();
    engine.execute(reader.as_mut())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
