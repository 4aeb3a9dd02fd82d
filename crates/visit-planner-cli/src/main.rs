//! `planner` CLI — apply drops to schedule snapshots and inspect them.
//!
//! ## Usage
//!
//! ```sh
//! # Drop an unassigned visit on employee 1 at 09:00 (snapshot on stdin)
//! planner drop --day 2026-03-16 \
//!   --item '{"type":"UNASSIGNED_VISIT","visitId":"v1"}' \
//!   --target '{"type":"EMPLOYEE_SLOT","employeeId":1,"timeSlot":"09:00"}' < day.json
//!
//! # Send a scheduled event back to the pool, writing the result to a file
//! planner drop -i day.json -o day.json \
//!   --item '{"type":"SCHEDULE_EVENT","eventId":"e7"}' --target '{"type":"UNASSIGNED_PANEL"}'
//!
//! # Check that no employee has overlapping visits
//! planner audit -i day.json
//!
//! # List the unassigned pool, urgent first
//! planner pool -i day.json --priority urgent
//!
//! # Show each employee's lane for a day
//! planner lanes -i day.json --day 2026-03-16
//!
//! # Show the timeline drop zones
//! planner slots --config planner.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use visit_planner::model::Priority;
use visit_planner::pool::pool_order;
use visit_planner::timeline::{employee_lanes, time_slots};
use visit_planner::{
    find_conflicts, place_drop, DragItem, DropContext, DropOutcome, DropTarget, PlannerConfig,
    Snapshot,
};

#[derive(Parser)]
#[command(
    name = "planner",
    version,
    about = "Home-care visit schedule placement CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Planner config file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr (otherwise RUST_LOG, default "warn")
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one drag-and-drop gesture and print the resulting snapshot
    Drop {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Dragged item as JSON, e.g. {"type":"UNASSIGNED_VISIT","visitId":"v1"}
        #[arg(long)]
        item: String,
        /// Drop target as JSON, e.g. {"type":"EMPLOYEE_SLOT","employeeId":1,"timeSlot":"09:00"}
        #[arg(long)]
        target: String,
        /// Day shown on the timeline (YYYY-MM-DD); defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// Report overlapping events on any employee lane
    Audit {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List unassigned visits, most urgent first
    Pool {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only show one priority
        #[arg(long, value_enum, ignore_case = true)]
        priority: Option<PriorityArg>,
    },
    /// Show each employee's events and booked time for a day
    Lanes {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Day to show (YYYY-MM-DD); defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// Print the timeline drop-zone labels
    Slots,
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    Urgent,
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Urgent => Priority::Urgent,
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => PlannerConfig::default(),
    };

    match cli.command {
        Commands::Drop {
            input,
            output,
            item,
            target,
            day,
        } => {
            let mut snapshot = read_snapshot(input.as_deref())?;
            let item: DragItem =
                serde_json::from_str(&item).context("Failed to parse --item JSON")?;
            let target: DropTarget =
                serde_json::from_str(&target).context("Failed to parse --target JSON")?;
            let day = parse_day(day.as_deref())?;

            let ctx = DropContext::new(&snapshot.measures, &config, day);
            let placement = place_drop(&item, &target, &snapshot.state, &ctx)
                .context("Drop rejected")?;

            eprintln!("{}", describe(&placement.outcome));
            snapshot.state = placement.state;

            let json = serde_json::to_string_pretty(&snapshot)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Audit { input } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let conflicts = find_conflicts(&snapshot.state.schedule_events);
            if conflicts.is_empty() {
                println!("No conflicts");
            } else {
                for c in &conflicts {
                    println!(
                        "employee {} on {}: {} {}-{} overlaps {} {}-{} by {} min",
                        c.employee_id,
                        c.event_a.date,
                        c.event_a.id,
                        c.event_a.start_time,
                        c.event_a.end_time,
                        c.event_b.id,
                        c.event_b.start_time,
                        c.event_b.end_time,
                        c.overlap_minutes
                    );
                }
                anyhow::bail!("{} conflict(s) found", conflicts.len());
            }
        }
        Commands::Pool { input, priority } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let only = priority.map(Priority::from);

            for visit in pool_order(&snapshot.state.unassigned_visits, only) {
                let measure = snapshot
                    .measures
                    .iter()
                    .find(|m| m.id == visit.measure_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| format!("#{}", visit.measure_id));
                let customer = snapshot
                    .customers
                    .iter()
                    .find(|c| c.id == visit.customer_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("#{}", visit.customer_id));
                let band = visit
                    .preferred_time_slot
                    .map(|b| format!(" [{}]", b))
                    .unwrap_or_default();
                println!(
                    "{:<7} {}  {}  {}{}",
                    visit.priority,
                    visit.id,
                    customer,
                    measure,
                    band
                );
            }
        }
        Commands::Lanes { input, day } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let day = parse_day(day.as_deref())?;

            for lane in employee_lanes(&snapshot.employees, &snapshot.state.schedule_events, day) {
                println!(
                    "{} ({}): {} min booked",
                    lane.employee.name,
                    lane.employee.id,
                    lane.booked_minutes()
                );
                for event in &lane.events {
                    println!("  {}-{} {}", event.start_time, event.end_time, event.id);
                }
            }
        }
        Commands::Slots => {
            let slots = time_slots(&config.timeline).context("Invalid timeline config")?;
            for slot in slots {
                println!("{}", slot.time);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// One-line, human-readable summary of a drop.
fn describe(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Placed {
            event_id,
            employee_id,
            start_time,
            end_time,
            displaced,
            ..
        } => format!(
            "Placed {} on employee {} at {}-{} ({} displaced)",
            event_id,
            employee_id,
            start_time,
            end_time,
            displaced.len()
        ),
        DropOutcome::ReturnedToPool {
            visit_id,
            from_event_id,
        } => format!("Returned {} to the pool as {}", from_event_id, visit_id),
        DropOutcome::Ignored { reason } => format!("Drop ignored: {:?}", reason),
    }
}

fn parse_day(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid --day '{}', expected YYYY-MM-DD", raw)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn read_snapshot(path: Option<&str>) -> Result<Snapshot> {
    let json = read_input(path)?;
    Snapshot::from_json(&json).context("Failed to parse schedule snapshot")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
