use anyhow::Result;
use std::io::Write;

use crate::engine::TOTAL_KEY;
use crate::models::Month;
use crate::plan::Plan;
use crate::ui::util::{format_amount, format_hours};

pub(crate) fn as_cli(args: &[String], plan: &Plan) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(plan),
        "export" | "e" => cli_export(&args[2..], plan),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetcalc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetCalc - monthly labor budget estimator");
    println!();
    println!("Usage: budgetcalc [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print the default plan's budget per month");
    println!("  export [path|-]               Write budget_data.csv (default: downloads dir)");
    println!("                                '-' writes the CSV to stdout");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(plan: &Plan) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for (key, period) in plan.budget().periods() {
        let title = if key == TOTAL_KEY {
            "Total".to_string()
        } else {
            Month::new(key).label()
        };
        writeln!(out, "{title:<28} {:>20}", format_amount(period.total))?;
        writeln!(out, "{}", "─".repeat(49))?;
        for role in plan.roles() {
            writeln!(
                out,
                "  {:<24} {:>4}% {:>9} {:>16}",
                role.name,
                period.commitment(&role.id),
                format_hours(period.hours(&role.id)),
                format_amount(period.amount(&role.id)),
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn cli_export(args: &[String], plan: &Plan) -> Result<()> {
    let text = plan.to_csv()?;
    match args.first().map(String::as_str) {
        Some("-") => {
            std::io::stdout().lock().write_all(text.as_bytes())?;
        }
        target => {
            let path = target.map_or_else(crate::export::default_path, crate::export::resolve_path);
            crate::export::write_file(&path, &text)?;
            println!("Exported {} rows to {}", text.lines().count() - 1, path.display());
        }
    }
    Ok(())
}
