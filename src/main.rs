// src/main.rs
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use the_shield::config::AppConfig;
use the_shield::logging::{self, LogTarget};
use the_shield::{advise, compute, render, tui, AddOnBasis, AddOnCapPolicy, Side, SizingInput};
use tracing::info;

/// Break-even partial close, pyramiding and crash exposure for one position.
#[derive(Parser)]
#[command(name = "the_shield", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive form (default).
    Tui,
    /// One calculation, printed to stdout.
    Calc(CalcArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Long,
    Short,
}

#[derive(Clone, Copy, ValueEnum)]
enum CapArg {
    Uncapped,
    MatchOriginal,
    DoubleOriginal,
}

#[derive(Clone, Copy, ValueEnum)]
enum BasisArg {
    Original,
    AfterSell,
}

#[derive(clap::Args)]
struct CalcArgs {
    #[arg(long)]
    entry: Decimal,
    #[arg(long)]
    stop: Decimal,
    #[arg(long)]
    shares: u64,
    #[arg(long)]
    current: Decimal,
    /// Defaults to the configured side.
    #[arg(long, value_enum)]
    side: Option<SideArg>,
    /// Money that must survive a pullback to the initial stop.
    #[arg(long)]
    goal: Option<Decimal>,
    #[arg(long)]
    target_stop: Option<Decimal>,
    #[arg(long)]
    add_on_stop: Option<Decimal>,
    #[arg(long)]
    multiplier: Option<Decimal>,
    #[arg(long, value_enum)]
    cap: Option<CapArg>,
    #[arg(long, value_enum)]
    basis: Option<BasisArg>,
    /// Crash shock as a fraction, e.g. 0.2.
    #[arg(long)]
    shock: Option<Decimal>,
    #[arg(long)]
    json: bool,
}

impl CalcArgs {
    fn into_input(self, config: &AppConfig) -> SizingInput {
        let sizing = &config.sizing;
        let side = match self.side {
            Some(SideArg::Long) => Side::Long,
            Some(SideArg::Short) => Side::Short,
            None => sizing.side,
        };
        let add_on_cap = match self.cap {
            Some(CapArg::Uncapped) => AddOnCapPolicy::Uncapped,
            Some(CapArg::MatchOriginal) => AddOnCapPolicy::MatchOriginal,
            Some(CapArg::DoubleOriginal) => AddOnCapPolicy::DoubleOriginal,
            None => sizing.add_on_cap,
        };
        let add_on_basis = match self.basis {
            Some(BasisArg::Original) => AddOnBasis::Original,
            Some(BasisArg::AfterSell) => AddOnBasis::AfterSell,
            None => sizing.add_on_basis,
        };

        SizingInput {
            side,
            entry_price: self.entry,
            initial_stop: self.stop,
            total_shares: self.shares,
            current_price: self.current,
            target_stop: self.target_stop,
            profit_goal: self.goal.unwrap_or(Decimal::ZERO),
            add_on_stop: self.add_on_stop,
            unit_multiplier: self.multiplier.unwrap_or(sizing.unit_multiplier),
            add_on_cap,
            add_on_basis,
            crash_shock: self.shock.unwrap_or(sizing.crash_shock),
        }
    }
}

fn calc(args: CalcArgs, config: &AppConfig) -> anyhow::Result<()> {
    let json = args.json;
    let input = args.into_input(config);
    input.validate().context("Invalid calculation input")?;

    let report = compute(&input);
    let advisories = advise(&input, &report);
    info!(
        "Calculated {:?}: sell {} / add {} / {} advisories",
        input.side,
        report.sell,
        report.add_on,
        advisories.len()
    );

    if json {
        println!("{}", render::json(&input, &report, &advisories)?);
    } else {
        print!("{}", render::text(&input, &report, &advisories));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::new().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Calc(args) => {
            let _guard = logging::init(&config.logging, LogTarget::Stderr)
                .context("Failed to install log subscriber")?;
            calc(args, &config)
        }
        Command::Tui => {
            let _guard = logging::init(&config.logging, LogTarget::FileOnly)
                .context("Failed to install log subscriber")?;
            info!("Starting TUI with {:?}", config.sizing);
            tui::run(&config)
        }
    }
}
