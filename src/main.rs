use clap::Parser;
use miette::Result;
use roomview::cli::{load_config, Cli, Commands};
use roomview::output::Printer;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let printer = Printer::new();
    let config = || load_config(cli.config.as_deref(), &printer);

    match cli.command {
        Commands::Info(args) => roomview::cli::info::run(args, &config()?, &printer)?,
        Commands::Palette(args) => roomview::cli::palette::run(args, &config()?, &printer)?,
        Commands::Render(args) => roomview::cli::render::run(args, &config()?, &printer)?,
        Commands::Completions(args) => roomview::cli::completions::run(args)?,
    }

    Ok(())
}
