use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use deadliner_core::time::{format_short_date, parse_date, today_in};
use deadliner_core::{
    DeadlineKind, Deadliner, JsonFileRepository, NewDeadline, Priority, StudyStyle, Task,
    TimeOfDay,
};
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod import;
mod setup;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "deadliner",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DEADLINER_BUILD_SHA"), ")"),
    about = "Turn academic deadlines into a day-by-day study plan"
)]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today instead of the local calendar date
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive study-profile setup
    Setup,

    /// Manage ~/.deadliner/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Add a deadline and generate its study tasks
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        subject: String,

        /// assignment | exam | project
        #[arg(long, default_value = "assignment")]
        kind: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// low | medium | high
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Estimated effort in hours
        #[arg(long, default_value_t = 2.0)]
        hours: f64,

        #[arg(long)]
        note: Option<String>,
    },

    /// Add every deadline listed in a markdown file
    Import {
        file: PathBuf,
    },

    /// List deadlines with task progress
    List,

    /// Show the agenda for a day (default: today)
    Plan {
        #[arg(long)]
        date: Option<String>,
    },

    /// Incomplete tasks within the next N days
    Upcoming {
        #[arg(long)]
        days: Option<u32>,
    },

    /// Mark a task done
    Complete {
        task_id: String,
    },

    /// Move a task to another date (marks it incomplete)
    Reschedule {
        task_id: String,
        date: String,
    },

    /// Delete a deadline and all of its tasks
    Remove {
        deadline_id: String,
    },

    /// Completion and upcoming-deadline statistics
    Stats,

    /// Plain-text schedule export (stdout unless --out is given)
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show or update the study profile
    Profile {
        #[arg(long)]
        hours: Option<f64>,

        /// Comma separated: morning,afternoon,evening,night
        #[arg(long)]
        times: Option<String>,

        /// Comma separated subject names
        #[arg(long)]
        subjects: Option<String>,

        /// focused | distributed
        #[arg(long)]
        style: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.logging.level);

    let today = resolve_today(cli.today.as_deref(), &cfg.general.timezone)?;
    debug!(%today, timezone = %cfg.general.timezone, "resolved today");

    let data_dir = state::data_dir(&cfg)?;
    let mut engine = Deadliner::open(JsonFileRepository::new(&data_dir))
        .with_context(|| format!("loading {}", data_dir.display()))?;

    match cli.command {
        Command::Setup => setup::run_setup(&mut engine)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => match config::init_config()? {
                (path, true) => println!("Wrote {}", path.display()),
                (path, false) => println!("Config already exists: {}", path.display()),
            },
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg)?);
                println!("# data dir: {}", data_dir.display());
            }
        },

        Command::Add {
            title,
            subject,
            kind,
            due,
            priority,
            hours,
            note,
        } => {
            let kind: DeadlineKind = kind.parse().map_err(anyhow::Error::msg)?;
            let priority: Priority = priority.parse().map_err(anyhow::Error::msg)?;
            let mut input = NewDeadline::new(title, subject, kind, parse_date(&due)?)
                .with_priority(priority)
                .with_hours(hours);
            if let Some(n) = note {
                input = input.with_note(n);
            }

            let (d, tasks) = engine.add_deadline(input, today, Utc::now())?;
            println!(
                "Added {} [{}] {} ({}) due {}",
                d.id,
                d.kind.as_str(),
                d.title,
                d.subject,
                d.due_date
            );
            println!("Generated {} tasks:\n", tasks.len());
            for t in &tasks {
                print_task(t);
            }
        }

        Command::Import { file } => {
            let md = fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let report = import::parse_deadlines_md(&md)?;

            for (line, reason) in &report.skipped {
                println!("skipped line {}: {}", line, reason);
            }
            let mut added = 0;
            for input in report.deadlines {
                let title = input.title.clone();
                match engine.add_deadline(input, today, Utc::now()) {
                    Ok((d, tasks)) => {
                        added += 1;
                        println!("Added {} {} ({} tasks)", d.id, d.title, tasks.len());
                    }
                    Err(e) => println!("rejected '{}': {}", title, e),
                }
            }
            println!("\nImported {} deadlines from {}", added, file.display());
        }

        Command::List => {
            if engine.deadlines().is_empty() {
                println!("No deadlines yet. Run: deadliner add --help");
            }
            for d in engine.deadlines() {
                let tasks: Vec<&Task> = engine.store().tasks_for(&d.id).collect();
                let done = tasks.iter().filter(|t| t.completed).count();
                let left = (d.due_date - today).num_days();
                println!(
                    "{} [{}] {} ({}) due {} ({} days) | {}/{} tasks done | {}",
                    d.id,
                    d.kind.as_str(),
                    d.title,
                    d.subject,
                    d.due_date,
                    left,
                    done,
                    tasks.len(),
                    d.priority.as_str()
                );
            }
        }

        Command::Plan { date } => {
            let date = match date {
                Some(s) => parse_date(&s)?,
                None => today,
            };
            let plan = engine.day_plan(date);
            println!("# Plan for {}\n", date);
            if plan.is_empty() {
                println!("Nothing scheduled.");
            } else {
                for t in &plan.tasks {
                    print_task(t);
                }
                println!(
                    "\nTotal: {} min ({} min remaining){}",
                    plan.total_study_time,
                    plan.remaining_minutes(),
                    if plan.completed { " - all done!" } else { "" }
                );
            }
        }

        Command::Upcoming { days } => {
            let days = days.unwrap_or(cfg.general.horizon_days);
            let tasks = engine.upcoming(today, days);
            println!("# Upcoming ({} days)\n", days);
            if tasks.is_empty() {
                println!("Nothing pending.");
            }
            for t in &tasks {
                print_task(t);
            }
        }

        Command::Complete { task_id } => {
            let t = engine.complete_task(&task_id)?;
            println!("Completed: {}", t.title);
        }

        Command::Reschedule { task_id, date } => {
            let t = engine.reschedule_task(&task_id, parse_date(&date)?)?;
            println!("Moved '{}' to {}", t.title, t.scheduled_date);
        }

        Command::Remove { deadline_id } => {
            let d = engine.remove_deadline(&deadline_id)?;
            println!("Removed {} and its tasks", d.title);
        }

        Command::Stats => {
            let s = engine.stats(today);
            println!("Tasks:              {}/{} completed", s.completed_tasks, s.total_tasks);
            println!("Completion rate:    {:.1}%", s.completion_rate);
            println!("Deadlines this week: {}", s.upcoming_deadlines);
        }

        Command::Export { out } => {
            let text = engine.export(today);
            match out {
                Some(p) => {
                    fs::write(&p, &text).with_context(|| format!("write {}", p.display()))?;
                    println!("Wrote {}", p.display());
                }
                None => print!("{}", text),
            }
        }

        Command::Profile {
            hours,
            times,
            subjects,
            style,
        } => {
            let mut profile = engine.profile().clone();
            let changed =
                hours.is_some() || times.is_some() || subjects.is_some() || style.is_some();

            if let Some(h) = hours {
                profile.daily_study_hours = h;
            }
            if let Some(t) = times {
                profile.preferred_times = parse_list::<TimeOfDay>(&t)?;
            }
            if let Some(s) = subjects {
                profile.subjects = s
                    .split(',')
                    .map(|x| x.trim().to_string())
                    .filter(|x| !x.is_empty())
                    .collect();
            }
            if let Some(s) = style {
                profile.study_style = s.parse::<StudyStyle>().map_err(anyhow::Error::msg)?;
            }
            if changed {
                engine.update_profile(profile)?;
                println!("Profile updated.\n");
            }

            let p = engine.profile();
            println!("daily study hours: {}", p.daily_study_hours);
            println!("daily cap:         {} min per deadline", p.daily_cap_minutes());
            println!("preferred times:   {:?}", p.preferred_times);
            println!("subjects:          {}", p.subjects.join(", "));
            println!("study style:       {:?}", p.study_style);
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn resolve_today(explicit: Option<&str>, tz: &str) -> Result<NaiveDate> {
    match explicit {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(today_in(tz, Utc::now())?),
    }
}

fn parse_list<T: std::str::FromStr<Err = String>>(s: &str) -> Result<Vec<T>> {
    let items = s
        .split(',')
        .filter(|x| !x.trim().is_empty())
        .map(|x| x.parse::<T>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;
    if items.is_empty() {
        bail!("expected a comma separated list, got '{s}'");
    }
    Ok(items)
}

fn print_task(t: &Task) {
    println!(
        "[{}] {} | {} | {} | {} min | {}",
        if t.completed { "x" } else { " " },
        t.id,
        format_short_date(t.scheduled_date),
        t.priority.as_str(),
        t.duration,
        t.title
    );
}
