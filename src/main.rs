use avwx_processor::cli::{
    args::{Args, Commands},
    commands,
};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    init_logging(&args);

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn init_logging(args: &Args) {
    let level = match &args.command {
        Some(Commands::Parse(parse_args)) => parse_args.get_log_level(),
        None => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("AVWX Processor - Aviation Weather Bulletin Parser");
    println!("=================================================");
    println!();
    println!("Parse raw fixed-format aviation weather bulletins (METAR and TAF)");
    println!("into structured records with resolved validity windows.");
    println!();
    println!("USAGE:");
    println!("    avwx-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse bulletin files or stdin into structured records");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a METAR bulletin from stdin as JSON:");
    println!("    echo 'EGLL 201250Z 24015G25KT 9999 FEW035 18/12 Q1013' | \\");
    println!("        avwx-processor parse --format json");
    println!();
    println!("    # Parse TAF files with an explicit reference time:");
    println!("    avwx-processor parse --kind taf --reference-time 2024-06-16T11:00:00Z taf/*.txt");
    println!();
    println!("For detailed help, use:");
    println!("    avwx-processor parse --help");
}
