use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_vfprogress::cli::{Cli, Commands};
use kira_vfprogress::ctx::Ctx;
use kira_vfprogress::io;
use kira_vfprogress::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = args.to_config();
            let mut ctx = Ctx::new(args.input, args.out, config);
            Pipeline::full().run(&mut ctx)?;
            print_summary(&ctx)?;
            println!("output: {}", ctx.output.table_path.display());
            if ctx.config.write_json {
                println!("report: {}", ctx.output.json_path.display());
            }
        }
        Commands::Validate(args) => {
            let config = args.to_config();
            let mut ctx = Ctx::new(args.input, PathBuf::from("."), config);
            Pipeline::validate().run(&mut ctx)?;
            print_validate_summary(&ctx);
        }
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) {
    println!("kira-vfprogress validate ok");
    if let Some(cohort) = &ctx.cohort {
        println!("rows: {}", cohort.record_count());
        println!("subjects: {}", cohort.subject_count());
        println!("series: {}", cohort.series.len());
    }
    if let Some(layout) = &ctx.layout {
        println!("test points: {}", layout.points.len());
    }
    print_warnings(ctx);
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
