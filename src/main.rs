//! Specwright - step-by-step project workflow wizard.
//!
//! Drives the workflow session from the terminal the way a UI layer
//! would: one input per step, generated artifacts printed as they land.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use specwright::{MockGenerator, ProjectType, StepStatus, TaskType, WorkflowSession};

/// Step-by-step project workflow wizard
#[derive(Parser)]
#[command(name = "specwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through a workflow interactively (default)
    Run {
        /// Which flow to run (greenfield, legacy); asked interactively if omitted
        #[arg(short, long)]
        flow: Option<String>,

        /// Generate test-driven prompts (greenfield flow)
        #[arg(long)]
        tdd: bool,

        /// Simulated generation latency in milliseconds
        #[arg(long, default_value_t = 1500)]
        delay_ms: u64,
    },

    /// Show the step table for a flow
    Steps {
        /// Which flow to show (greenfield, legacy)
        #[arg(short, long)]
        flow: Option<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    match cli.command {
        Some(Commands::Run { flow, tdd, delay_ms }) => cmd_run(flow, tdd, delay_ms).await,
        Some(Commands::Steps { flow, format }) => cmd_steps(flow, &format),
        None => cmd_run(None, false, 1500).await,
    }
}

async fn cmd_run(flow: Option<String>, tdd: bool, delay_ms: u64) -> Result<()> {
    let generator = Arc::new(MockGenerator::with_delay(Duration::from_millis(delay_ms)));
    let mut session = WorkflowSession::new(generator);

    let flow = match flow {
        Some(flow) => flow.parse::<ProjectType>()?,
        None => prompt_line("Project type (greenfield/legacy)")?.parse::<ProjectType>()?,
    };

    session.set_project_type(flow);

    match flow {
        ProjectType::Greenfield => run_greenfield(&mut session, tdd).await,
        ProjectType::Legacy => run_legacy(&mut session).await,
    }
}

async fn run_greenfield(session: &mut WorkflowSession, tdd: bool) -> Result<()> {
    session.set_tdd(tdd);

    print_step_header(session);
    let idea = prompt_line("Describe your project idea")?;
    session.set_project_idea(idea);

    print_step_header(session);
    let specification = prompt_line("Paste or write the specification")?;
    session.set_specification(specification);

    print_step_header(session);
    let plan = prompt_line("Paste or write the implementation plan")?;
    session.set_plan(plan);

    print_step_header(session);
    let todo = prompt_line("Write the TODO list")?;
    session.set_todo_list(todo);

    print_step_header(session);
    println!("Generating prompts...");
    session.generate_prompts().await;

    for (i, prompt) in session.state().prompts.iter().enumerate() {
        println!("\n--- Prompt {} ---\n{prompt}", i + 1);
    }

    Ok(())
}

async fn run_legacy(session: &mut WorkflowSession) -> Result<()> {
    print_step_header(session);
    let path = prompt_line("Repository path")?;
    session.set_repository_path(path);

    println!("Analyzing repository...");
    session.generate_code_context().await;
    println!("\n{}\n", session.state().code_context);

    // The analysis satisfies the Repository Context step
    if session.can_advance() {
        session.advance_step();
    }

    print_step_header(session);
    let task_type = prompt_line("Task type (review/issues/tests)")?.parse::<TaskType>()?;
    session.set_selected_task_type(task_type);

    print_step_header(session);
    println!("Generating tasks...");
    session.generate_tasks().await;

    for task in &session.state().generated_tasks {
        println!("\n{task}");
    }

    Ok(())
}

fn cmd_steps(flow: Option<String>, format: &str) -> Result<()> {
    let mut session = WorkflowSession::default();

    if let Some(flow) = flow {
        session.set_project_type(flow.parse::<ProjectType>()?);
        session.go_to_step(1);
    }

    let steps = session.steps();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&steps)?),
        _ => {
            for step in &steps {
                let marker = match step.status {
                    StepStatus::Completed => "x",
                    StepStatus::Current => ">",
                    StepStatus::Upcoming => " ",
                };
                println!("[{marker}] {}. {}", step.number, step.name);
            }
        }
    }

    Ok(())
}

fn print_step_header(session: &WorkflowSession) {
    let step = session.state().current_step;
    let name = session
        .steps()
        .iter()
        .find(|s| s.number == step)
        .map_or_else(String::new, |s| s.name.clone());
    println!("\n== Step {step}/{}: {name} ==", session.max_steps());
}

/// Read one non-empty line from stdin.
fn prompt_line(label: &str) -> Result<String> {
    loop {
        print!("{label}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            anyhow::bail!("unexpected end of input");
        }
        let line = line.trim();
        if !line.is_empty() {
            return Ok(line.to_string());
        }
    }
}
