use clap::Parser;
use codeposter::cli::Cli;
use codeposter::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(targets) = cli.targets() else {
        println!("{}", codeposter::cli::usage());
        return Ok(());
    };

    let printer = Printer::new(cli.quiet);
    codeposter::cli::build::run(&cli, &targets, &printer)?;

    Ok(())
}
