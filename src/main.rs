mod auth;
mod cli;
mod config;
mod db;
mod domain;
mod error;
mod goals;
mod guard;
mod ledger;
mod window;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;

use crate::cli::{
    AddArgs, Cli, Command, GoalCmd, ListArgs, ReportFormat, SummaryArgs, TransferArgs, WindowFlags,
};
use crate::config::{
    Session, app_paths, load_or_init_config, now_utc, today_local, write_config,
};
use crate::db::Db;
use crate::domain::{EntryKind, SUGGESTED_CATEGORIES};
use crate::error::EngineError;
use crate::guard::Admission;
use crate::window::{Period, Window};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = app_paths(cli.home.clone())?;
    let (mut cfg, cfg_path) = load_or_init_config(&paths)?;

    match cli.command {
        Command::Register(args) => {
            let (db, _) = Db::open(&paths)?;
            let user_id = auth::register(&db, &args.username, &args.password)?;
            println!(
                "Created account '{}' (user id {user_id}). You can now log in.",
                args.username.trim()
            );
            Ok(())
        }
        Command::Login(args) => {
            let (db, _) = Db::open(&paths)?;
            let session = auth::login(&db, &args.username, &args.password)?;
            println!("Logged in as '{}'.", session.username);
            cfg.session = Some(session);
            write_config(&cfg_path, &cfg)?;
            Ok(())
        }
        Command::Logout => {
            cfg.session = None;
            write_config(&cfg_path, &cfg)?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            match &cfg.session {
                Some(s) => println!("Logged in as '{}' (user id {}).", s.username, s.user_id),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Command::Categories => {
            for c in SUGGESTED_CATEGORIES {
                println!("{c}");
            }
            Ok(())
        }
        cmd => {
            let session = cfg
                .session
                .clone()
                .ok_or_else(|| anyhow!("Not logged in. Run: finsight login <username>"))?;
            let (db, _db_path) = Db::open(&paths)?;

            match cmd {
                Command::Add(args) => handle_add(&db, &session, args),
                Command::Delete(args) => handle_delete(&db, &session, args.id),
                Command::Transfer(args) => handle_transfer(&db, &session, args),
                Command::List(args) => handle_list(&db, &session, args),
                Command::Summary(args) => handle_summary(&db, &session, args),
                Command::Goal(args) => handle_goal(&db, &session, args.cmd),
                Command::Register(_)
                | Command::Login(_)
                | Command::Logout
                | Command::Whoami
                | Command::Categories => unreachable!(),
            }
        }
    }
}

fn handle_add(db: &Db, session: &Session, args: AddArgs) -> Result<()> {
    let kind = parse_kind(&args.kind)?;
    let amount = parse_decimal(args.amount, "amount")?;
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount.into());
    }
    let occurred_on = parse_date_or_today(args.date.as_deref())?;

    // The guard always checks against the all-time balance, even when the
    // UI is showing a filtered period.
    let current = ledger::totals(&db.list_entries(session.user_id)?);
    if let Admission::Reject { balance } = guard::authorize(kind, amount, current.balance) {
        return Err(EngineError::InsufficientBalance { balance }.into());
    }

    let id = db.insert_entry(
        session.user_id,
        kind,
        &args.category,
        amount,
        occurred_on,
        args.description.as_deref(),
        now_utc(),
    )?;
    println!("Recorded {kind} {amount} ({}) as entry {id}.", args.category);
    Ok(())
}

fn handle_delete(db: &Db, session: &Session, id: i64) -> Result<()> {
    if !db.delete_entry(session.user_id, id)? {
        return Err(EngineError::EntryNotFound { id }.into());
    }
    println!("Deleted entry {id}.");
    Ok(())
}

fn handle_transfer(db: &Db, session: &Session, args: TransferArgs) -> Result<()> {
    let amount = parse_decimal(args.amount, "amount")?;
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount.into());
    }
    let signed = match args.direction.to_ascii_lowercase().as_str() {
        "save" => amount,
        "withdraw" => -amount,
        other => {
            return Err(anyhow!("Invalid direction: {other}. Expected save or withdraw"));
        }
    };
    let occurred_on = parse_date_or_today(args.date.as_deref())?;

    let current = ledger::totals(&db.list_entries(session.user_id)?);
    if let Admission::Reject { balance } =
        guard::authorize(EntryKind::Savings, signed, current.balance)
    {
        return Err(EngineError::InsufficientBalance { balance }.into());
    }

    let id = db.insert_entry(
        session.user_id,
        EntryKind::Savings,
        "Transfer",
        signed,
        occurred_on,
        Some("Quick transfer"),
        now_utc(),
    )?;

    if signed > Decimal::ZERO {
        println!("Moved {amount} into savings (entry {id}).");
    } else {
        println!("Moved {amount} out of savings (entry {id}).");
    }
    Ok(())
}

fn handle_list(db: &Db, session: &Session, args: ListArgs) -> Result<()> {
    let entries = db.list_entries(session.user_id)?;
    let window = resolve_window(&args.window, today_local())?;

    let mut filtered = ledger::filter_by_window(&entries, &window);
    if let Some(cat) = &args.category {
        filtered = ledger::filter_by_category(&filtered, cat);
    }
    ledger::sort_for_display(&mut filtered);
    if let Some(limit) = args.limit {
        filtered.truncate(limit);
    }

    if filtered.is_empty() {
        println!("(no entries)");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.occurred_on.format("%Y-%m-%d").to_string(),
                e.kind.to_string(),
                e.category.clone(),
                e.amount.to_string(),
                e.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    match args.format {
        ReportFormat::Table => {
            print_table(&["ID", "DATE", "KIND", "CATEGORY", "AMOUNT", "NOTE"], &rows);
        }
        ReportFormat::Tsv => {
            for row in rows {
                println!("{}", row.join("\t"));
            }
        }
    }
    Ok(())
}

fn handle_summary(db: &Db, session: &Session, args: SummaryArgs) -> Result<()> {
    let entries = db.list_entries(session.user_id)?;
    let window = resolve_window(&args.window, today_local())?;
    let totals = ledger::totals(&ledger::filter_by_window(&entries, &window));

    println!("income\t{}", totals.income);
    println!("outflow\t{}", totals.outflow);
    println!("savings\t{}", totals.savings);
    println!("balance\t{}", totals.balance);
    Ok(())
}

fn handle_goal(db: &Db, session: &Session, cmd: GoalCmd) -> Result<()> {
    match cmd {
        GoalCmd::Set { category, limit } => {
            let limit = parse_decimal(limit, "limit")?;
            if limit <= Decimal::ZERO {
                return Err(EngineError::InvalidAmount.into());
            }
            db.upsert_goal(session.user_id, &category, limit)?;
            println!("Set goal for '{category}': {limit} per month.");
            Ok(())
        }
        GoalCmd::Report { window, format } => {
            let goals = db.list_goals(session.user_id)?;
            if goals.is_empty() {
                println!("(no goals)");
                return Ok(());
            }

            let entries = db.list_entries(session.user_id)?;
            let resolved = resolve_window(&window, today_local())?;
            let windowed = ledger::filter_by_window(&entries, &resolved);

            let limit_header = if resolved.unscaled {
                "LIMIT (UNSCALED)"
            } else {
                "LIMIT"
            };

            let rows: Vec<Vec<String>> = goals
                .iter()
                .map(|g| {
                    let p = goals::progress(g, &windowed, resolved.factor);
                    vec![
                        g.category.clone(),
                        p.spent.to_string(),
                        p.scaled_limit.round_dp(2).to_string(),
                        format!("{}%", p.percent.round_dp(0)),
                        p.status.as_str().to_string(),
                    ]
                })
                .collect();

            match format {
                ReportFormat::Table => {
                    print_table(&["CATEGORY", "SPENT", limit_header, "USED", "STATUS"], &rows);
                }
                ReportFormat::Tsv => {
                    for row in rows {
                        println!("{}", row.join("\t"));
                    }
                }
            }
            Ok(())
        }
    }
}

fn resolve_window(flags: &WindowFlags, today: NaiveDate) -> Result<Window> {
    let period = match (&flags.from, &flags.to) {
        (Some(from), Some(to)) => Period::Custom {
            start: parse_date(from)?,
            end: parse_date(to)?,
        },
        _ => Period::parse(&flags.period).ok_or_else(|| {
            anyhow!(
                "Invalid period: {}. Expected today, yesterday, week, month, year or all",
                flags.period
            )
        })?,
    };
    Ok(period.resolve(today)?)
}

fn parse_kind(raw: &str) -> Result<EntryKind> {
    EntryKind::parse(raw).ok_or_else(|| {
        anyhow!("Invalid kind: {raw}. Expected income, expense, bill, debt, savings or withdrawal")
    })
}

fn parse_decimal(raw: String, field: &'static str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|_| anyhow!("Invalid decimal for {field}: {raw}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date: {raw}. Expected YYYY-MM-DD"))
}

fn parse_date_or_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        None => Ok(today_local()),
        Some(s) => parse_date(s),
    }
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: &[String]| {
        let mut line = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!(" {cell:<width$} |", width = *w));
        }
        println!("{line}");
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    render(&header_cells);

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    println!("|{}|", sep.join("|"));

    for row in rows {
        render(row);
    }
}
