use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "finsight")]
#[command(about = "Local-first personal finance tracker", long_about = None)]
pub struct Cli {
    /// Override FinSight home directory (config/data subdirs will be created inside it).
    #[arg(long, env = "FINSIGHT_HOME")]
    pub home: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Register(RegisterArgs),
    Login(LoginArgs),
    Logout,
    Whoami,

    Add(AddArgs),
    Delete(DeleteArgs),
    Transfer(TransferArgs),

    List(ListArgs),
    Summary(SummaryArgs),

    Goal(GoalArgs),
    Categories,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    pub username: String,

    /// Password for the new account.
    #[arg(long, env = "FINSIGHT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub username: String,

    #[arg(long, env = "FINSIGHT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Window selection shared by the read commands. `--from`/`--to` form a
/// custom range and take precedence over `--period`.
#[derive(Debug, Args, Clone)]
pub struct WindowFlags {
    /// Named period: today, yesterday, week, month, year or all.
    #[arg(long, default_value = "month")]
    pub period: String,

    /// Custom range start (YYYY-MM-DD). Requires --to.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Custom range end (YYYY-MM-DD). Requires --from.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Entry kind: income, expense, bill, debt, savings or withdrawal.
    pub kind: String,

    /// Negative values are accepted by the parser so validation can report
    /// them properly instead of clap rejecting them as flags.
    #[arg(allow_negative_numbers = true)]
    pub amount: String,

    pub category: String,

    /// Date the movement occurred (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, short = 'm', alias = "note")]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct TransferArgs {
    /// Direction: save (balance into savings) or withdraw (savings back to balance).
    pub direction: String,

    #[arg(allow_negative_numbers = true)]
    pub amount: String,

    /// Date the transfer occurred (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub window: WindowFlags,

    #[arg(long)]
    pub category: Option<String>,

    /// Show at most this many entries.
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: ReportFormat,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub window: WindowFlags,
}

#[derive(Debug, Subcommand)]
pub enum GoalCmd {
    /// Create or overwrite the monthly limit for a category.
    Set { category: String, limit: String },
    Report {
        #[command(flatten)]
        window: WindowFlags,

        #[arg(long, value_enum, default_value = "table")]
        format: ReportFormat,
    },
}

#[derive(Debug, Args)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub cmd: GoalCmd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Tsv,
}
