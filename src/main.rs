use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toss_tracker::calculate::{RecordThresholds, TossLedger, TableLookup};
use toss_tracker::config::AppConfig;
use toss_tracker::models::{GameType, OpponentStat, Record, RecordHolder, StreakSpan, TeamStat};
use toss_tracker::storage::{Dataset, StorageConfig};

#[derive(Parser)]
#[command(name = "toss-tracker")]
#[command(about = "Coin toss statistics, streaks and records")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(flatten)]
    query: QueryArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QueryArgs {
    /// First season to include
    #[arg(long, global = true)]
    season_from: Option<i32>,

    /// Last season to include
    #[arg(long, global = true)]
    season_to: Option<i32>,

    /// Game types to include (repeatable; default all)
    #[arg(long = "game-type", value_enum, global = true)]
    game_types: Vec<GameTypeArg>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GameTypeArg {
    Pre,
    Reg,
    Post,
}

impl From<GameTypeArg> for GameType {
    fn from(arg: GameTypeArg) -> Self {
        match arg {
            GameTypeArg::Pre => GameType::Preseason,
            GameTypeArg::Reg => GameType::RegularSeason,
            GameTypeArg::Post => GameType::Postseason,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Toss stats for every team
    Teams,

    /// Toss stats for one team
    Team {
        /// Team abbreviation
        team: String,
    },

    /// Head-to-head stats for a team against each opponent
    Matchups {
        /// Team abbreviation
        team: String,
    },

    /// Head-to-head stats for one pairing
    Matchup {
        team: String,
        opponent: String,
    },

    /// Season-by-season toss record for a team
    Seasons {
        /// Team abbreviation
        team: String,
    },

    /// League-wide records
    Records,

    /// League-wide totals
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::debug!("Starting toss-tracker v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let dataset = Dataset::load(&storage)
        .with_context(|| format!("Failed to load data from {:?}", storage.data_dir))?;
    let lookup = dataset.lookup();

    let filter = config
        .filter()
        .with_seasons(cli.query.season_from, cli.query.season_to)
        .with_game_types(cli.query.game_types.iter().map(|&g| g.into()).collect());
    let ledger = TossLedger::new(&dataset.tosses, &lookup, &filter);

    tracing::info!(
        tosses = ledger.timeline().len(),
        teams = ledger.teams().len(),
        "Query ready"
    );

    let json = cli.query.json;
    match cli.command {
        Commands::Teams => {
            let stats = ledger.team_stats();
            if json {
                print_json(&stats)?;
            } else {
                print_team_table(&stats);
            }
        }

        Commands::Team { team } => {
            let team = normalize(&team);
            let stat = ledger.team_stat(&team);
            if json {
                print_json(&stat)?;
            } else if stat.total_tosses + stat.overtime_tosses == 0 {
                println!("No tosses found for {}", team);
            } else {
                print_team_detail(&stat);
            }
        }

        Commands::Matchups { team } => {
            let team = normalize(&team);
            let stats = ledger.opponent_stats(&team);
            if json {
                print_json(&stats)?;
            } else if stats.is_empty() {
                println!("No tosses found for {}", team);
            } else {
                print_matchup_table(&stats);
            }
        }

        Commands::Matchup { team, opponent } => {
            let (team, opponent) = (normalize(&team), normalize(&opponent));
            let stat = ledger.opponent_stat(&team, &opponent);
            if json {
                print_json(&stat)?;
            } else if stat.total_tosses == 0 {
                println!("{} and {} have not met", team, opponent);
            } else {
                print_matchup_detail(&stat);
            }
        }

        Commands::Seasons { team } => {
            let team = normalize(&team);
            let seasons = ledger.season_stats(&team);
            if json {
                print_json(&seasons)?;
            } else if seasons.is_empty() {
                println!("No tosses found for {}", team);
            } else {
                println!("=== {} by season ===\n", team);
                println!("{:<8} {:>6} {:>6} {:>6} {:>8}", "Season", "Tosses", "Won", "Lost", "Win %");
                for s in &seasons {
                    println!(
                        "{:<8} {:>6} {:>6} {:>6} {:>7.1}%",
                        s.season, s.tosses, s.toss_wins, s.toss_losses, s.toss_win_pct
                    );
                }
            }
        }

        Commands::Records => {
            print_records(&ledger, &config.thresholds, json)?;
        }

        Commands::Summary => {
            let summary = ledger.league_summary();
            if json {
                print_json(&summary)?;
            } else {
                println!("=== League Summary ===");
                if let (Some(first), Some(last)) = (summary.first_season, summary.last_season) {
                    println!("Seasons:          {}-{}", first, last);
                }
                println!("Games:            {}", summary.games);
                println!("Teams:            {}", summary.teams);
                println!("Regular tosses:   {}", summary.regular_tosses);
                println!("Overtime tosses:  {}", summary.overtime_tosses);
                println!("Defer rate:       {:.1}%", summary.defer_pct);
                println!(
                    "Toss winner won:  {:.1}% ({} of {})",
                    summary.toss_winner_game_win_pct,
                    summary.toss_winner_game_wins,
                    summary.resolved_games
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so --json output on stdout stays clean
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn normalize(team: &str) -> String {
    team.trim().to_uppercase()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_streak(streak: i32) -> String {
    match streak {
        0 => "-".to_string(),
        n if n > 0 => format!("W{}", n),
        n => format!("L{}", -n),
    }
}

fn format_span(span: &Option<StreakSpan>) -> String {
    match span {
        Some(span) => format!(
            "{} ({} wk {} to {} wk {})",
            span.length, span.start.season, span.start.week, span.end.season, span.end.week
        ),
        None => "-".to_string(),
    }
}

fn print_team_table(stats: &[TeamStat]) {
    println!(
        "{:<6} {:>6} {:>6} {:>6} {:>7} {:>8} {:>8} {:>7}",
        "Team", "Tosses", "Won", "Lost", "Win %", "Defer %", "Conv %", "Streak"
    );
    for s in stats {
        let marker = if s.defunct { "*" } else { "" };
        println!(
            "{:<6} {:>6} {:>6} {:>6} {:>6.1}% {:>7.1}% {:>7.1}% {:>7}",
            format!("{}{}", s.team, marker),
            s.total_tosses,
            s.toss_wins,
            s.toss_losses,
            s.toss_win_pct,
            s.defer_pct,
            s.game_win_pct,
            format_streak(s.current_streak)
        );
    }
    if stats.iter().any(|s| s.defunct) {
        println!("\n* defunct franchise");
    }
}

fn print_team_detail(s: &TeamStat) {
    match &s.name {
        Some(name) => println!("=== {} ({}) ===", name, s.team),
        None => println!("=== {} ===", s.team),
    }
    println!("Tosses:           {} ({}-{})", s.total_tosses, s.toss_wins, s.toss_losses);
    println!("Toss win rate:    {:.1}%", s.toss_win_pct);
    println!("Defers:           {} ({:.1}%)", s.defers, s.defer_pct);
    println!("Receives:         {}", s.receives);
    println!("Overtime tosses:  {} ({} won)", s.overtime_tosses, s.overtime_wins);
    println!(
        "Won game after winning toss: {:.1}% ({} of {})",
        s.game_win_pct, s.conversions, s.conversion_tosses
    );
    println!("Current streak:   {}", format_streak(s.current_streak));
    println!("Longest win run:  {}", format_span(&s.longest_win_streak));
    println!("Longest loss run: {}", format_span(&s.longest_loss_streak));
}

fn print_matchup_table(stats: &[OpponentStat]) {
    println!(
        "{:<6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>7}",
        "Opp", "Games", "Tosses", "Won", "Lost", "Win %", "Streak"
    );
    for s in stats {
        println!(
            "{:<6} {:>6} {:>6} {:>6} {:>6} {:>6.1}% {:>7}",
            s.opponent,
            s.games_played,
            s.total_tosses,
            s.toss_wins,
            s.toss_losses,
            s.toss_win_pct,
            format_streak(s.current_streak)
        );
    }
}

fn print_matchup_detail(s: &OpponentStat) {
    println!("=== {} vs {} ===", s.team, s.opponent);
    println!("Games:            {}", s.games_played);
    println!("Tosses:           {} ({}-{})", s.total_tosses, s.toss_wins, s.toss_losses);
    println!("Toss win rate:    {:.1}%", s.toss_win_pct);
    println!("Defers:           {} ({:.1}%)", s.defers, s.defer_pct);
    println!(
        "Won game after winning toss: {:.1}% ({} of {})",
        s.game_win_pct, s.conversions, s.conversion_tosses
    );
    println!("Current streak:   {}", format_streak(s.current_streak));
    println!("Longest win run:  {}", format_span(&s.longest_win_streak));
    println!("Longest loss run: {}", format_span(&s.longest_loss_streak));
}

fn print_records(
    ledger: &TossLedger<'_, TableLookup<'_>>,
    thresholds: &RecordThresholds,
    json: bool,
) -> Result<()> {
    let book = ledger.records(thresholds);
    if json {
        return print_json(&book);
    }

    let records = book.records();
    if records.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    println!("=== League Records ===\n");
    for record in records {
        println!("{}: {}", record.kind, record.value);
        for holder in &record.holders {
            println!("  {}", describe_holder(record, holder));
        }
    }
    Ok(())
}

fn describe_holder(record: &Record, holder: &RecordHolder) -> String {
    let mut line = holder.team.clone();
    if let Some(opponent) = &holder.opponent {
        line.push_str(&format!(" vs {}", opponent));
    }
    if let Some(season) = holder.season {
        line.push_str(&format!(" in {}", season));
    }
    line.push_str(&format!(" (sample {})", holder.sample_size));
    if record.is_shared() {
        line.push_str(" [shared]");
    }
    line
}
