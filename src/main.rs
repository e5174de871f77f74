//! lucent - progressive enhancement for article pages

use std::process::ExitCode;

use clap::Parser;

use lucent::dom::{parse_html_bytes, to_html};
use lucent::{EnhanceConfig, Enhancer, HeadlessHost};

#[derive(Parser)]
#[command(name = "lucent")]
#[command(version, about = "Progressive enhancement for article pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    lucent page.html out.html          Write the enhanced page
    lucent -i page.html                Show what would be enhanced
    lucent -i --json page.html         Same, as JSON
    lucent -c site.json page.html out.html")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output HTML file
    #[arg(value_name = "OUTPUT", required_unless_present = "info")]
    output: Option<String>,

    /// Show the enhancement report without writing output
    #[arg(short, long)]
    info: bool,

    /// Print the report as JSON
    #[arg(long, requires = "info")]
    json: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> lucent::Result<()> {
    let config = match &cli.config {
        Some(path) => EnhanceConfig::from_path(path)?,
        None => EnhanceConfig::default(),
    };

    let bytes = std::fs::read(&cli.input)?;
    let mut doc = parse_html_bytes(&bytes);
    let mut host = HeadlessHost::new();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, config)?;

    if cli.info {
        return show_info(&cli.input, enhancer.as_ref(), cli.json);
    }

    let Some(output) = cli.output.as_deref() else {
        return Ok(());
    };
    std::fs::write(output, to_html(&doc))?;
    if !cli.quiet {
        match &enhancer {
            Some(enhancer) => println!(
                "Enhanced {} -> {output} ({} listeners)",
                cli.input,
                enhancer.listener_count()
            ),
            None => println!("No content root in {}; wrote {output} unchanged", cli.input),
        }
    }
    Ok(())
}

fn show_info(path: &str, enhancer: Option<&Enhancer>, json: bool) -> lucent::Result<()> {
    let report = enhancer.map(Enhancer::report);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {path}");
    match report {
        Some(report) => println!("{report}"),
        None => println!("No content root; nothing enhanced"),
    }
    Ok(())
}
