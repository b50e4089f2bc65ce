mod settings;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client::integrations::{connection_label, sync_summary};
use client::slots::{score_label, slot_label};
use client::{
    ApiClient, CalendarManager, EventForm, EventFormAction, IntegrationPanel, ReqwestTransport,
    SlotRecommendation, SlotView, TaskForm, TaskFormAction,
};
use shared::{EnergyTag, EventType};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::CliConfig;

type Api = ApiClient<ReqwestTransport>;

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "Terminal client for the Schedule Concierge backend")]
#[command(
    long_about = "A command-line companion to the Schedule Concierge web app.\n\n\
    Creates tasks and events, asks for recommended time slots, and manages the\n\
    Google Calendar integration through the same backend API."
)]
struct Cli {
    /// Backend server URL to connect to.
    ///
    /// Overrides `api_url` from concierge.toml and the environment.
    #[arg(short, long, env = "CONCIERGE_API_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Create calendar events, with focus-protection handling
    Events {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Ask for recommended time slots
    Slots {
        #[command(subcommand)]
        action: SlotCommand,
    },
    /// List calendars and choose which ones are used
    Calendars {
        #[command(subcommand)]
        action: CalendarCommand,
    },
    /// Inspect and sync the Google Calendar integration
    Google {
        #[command(subcommand)]
        action: GoogleCommand,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Create a new task
    Create {
        /// Title of the task
        title: String,

        /// Priority from 1 (highest) to 5
        #[arg(short, long, default_value_t = client::forms::task::DEFAULT_PRIORITY)]
        priority: u8,

        /// Estimated effort in minutes (5 to 480)
        #[arg(short, long, value_name = "MINUTES")]
        minutes: Option<u32>,

        /// Due time in UTC, e.g. 2025-08-20T17:00
        #[arg(short, long, value_name = "DATETIME")]
        due: Option<String>,

        /// Preferred energy window: morning, afternoon or deep
        #[arg(short, long)]
        energy: Option<EnergyTag>,
    },
}

#[derive(Subcommand)]
enum EventAction {
    /// Create a new event
    ///
    /// When the time overlaps a protected focus block the backend refuses the
    /// event. With --override-focus it is then resubmitted as a general event
    /// past the protection; without it the creation is cancelled.
    Create {
        /// Title of the event
        title: String,

        /// Start time in UTC, e.g. 2025-08-13T14:00
        #[arg(short, long, value_name = "DATETIME")]
        start: String,

        /// End time in UTC; must be after the start
        #[arg(short, long, value_name = "DATETIME")]
        end: String,

        /// GENERAL, MEETING, FOCUS or BUFFER
        #[arg(short = 't', long = "type", default_value = "GENERAL")]
        event_type: EventType,

        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,

        /// Override focus protection if the event overlaps a focus block
        #[arg(long)]
        override_focus: bool,
    },
}

#[derive(Subcommand)]
enum SlotCommand {
    /// Suggest free slots for a task
    Suggest {
        /// ID of the task to schedule
        task_id: String,

        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum CalendarCommand {
    /// List calendars with their inclusion and default flags
    List,
    /// Include a calendar in scheduling
    Include { id: String },
    /// Exclude a calendar from scheduling
    Exclude { id: String },
    /// Make a calendar the default for new events
    Default { id: String },
}

#[derive(Subcommand)]
enum GoogleCommand {
    /// Show whether Google Calendar is connected
    Status,
    /// Pull the calendar list from Google
    SyncCalendars,
    /// Pull events from the selected calendars
    SyncEvents,
    /// Remove the Google Calendar connection
    Disconnect,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concierge=info,client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let base_url = cli.base_url.unwrap_or_else(|| config.api_url.clone());
    tracing::debug!(%base_url, "using backend");

    let api = ApiClient::new(&base_url, ReqwestTransport::new());

    match cli.command {
        Commands::Tasks { action } => handle_tasks(&api, action).await?,
        Commands::Events { action } => handle_events(&api, action).await?,
        Commands::Slots { action } => handle_slots(&api, &config, action).await?,
        Commands::Calendars { action } => handle_calendars(&api, action).await?,
        Commands::Google { action } => handle_google(&api, action).await?,
    }

    Ok(())
}

async fn handle_tasks(api: &Api, action: TaskAction) -> Result<()> {
    match action {
        TaskAction::Create {
            title,
            priority,
            minutes,
            due,
            energy,
        } => {
            let mut form = TaskForm::new();
            form.apply(TaskFormAction::Title(title));
            form.apply(TaskFormAction::Priority(priority));
            form.apply(TaskFormAction::EstimatedMinutes(minutes));
            form.apply(TaskFormAction::DueAt(due.unwrap_or_default()));
            form.apply(TaskFormAction::EnergyTag(energy));

            match form.submit(api).await {
                Some(task) => println!("Created task: [{}] {}", task.id, task.title),
                None => fail(&form.errors, form.notice.map(|n| n.text()))?,
            }
        }
    }

    Ok(())
}

async fn handle_events(api: &Api, action: EventAction) -> Result<()> {
    match action {
        EventAction::Create {
            title,
            start,
            end,
            event_type,
            description,
            override_focus,
        } => {
            let mut form = EventForm::new();
            form.apply(EventFormAction::Title(title));
            form.apply(EventFormAction::StartAt(start));
            form.apply(EventFormAction::EndAt(end));
            form.apply(EventFormAction::Type(event_type));
            form.apply(EventFormAction::Description(description.unwrap_or_default()));

            let mut created = form.submit(api).await;
            if form.has_conflict() {
                println!("{}", client::forms::event::FOCUS_CONFLICT);
                if override_focus {
                    created = form.override_focus(api).await;
                } else {
                    form.cancel_conflict();
                    println!("Cancelled. Re-run with --override-focus to create it anyway.");
                    return Ok(());
                }
            }

            match created {
                Some(event) => println!(
                    "Created event: [{}] {} ({}, {})",
                    event.id,
                    event.title,
                    client::format::time_range(&event.start_at, &event.end_at),
                    event.event_type.label()
                ),
                None => fail(&form.errors, form.notice.map(|n| n.text()))?,
            }
        }
    }

    Ok(())
}

async fn handle_slots(api: &Api, config: &CliConfig, action: SlotCommand) -> Result<()> {
    match action {
        SlotCommand::Suggest { task_id, limit } => {
            let mut view =
                SlotRecommendation::with_limit(task_id, limit.unwrap_or(config.slot_limit));
            view.fetch(api).await;

            if let Some(placeholder) = view.placeholder() {
                if view.view == SlotView::Failed {
                    bail!("{}", placeholder);
                }
                println!("{}", placeholder);
            }
            for (i, slot) in view.slots().iter().enumerate() {
                println!("{}. {}  score {}", i + 1, slot_label(slot), score_label(slot));
            }
        }
    }

    Ok(())
}

async fn handle_calendars(api: &Api, action: CalendarCommand) -> Result<()> {
    let mut manager = CalendarManager::new();

    match action {
        CalendarCommand::List => {
            manager.load(api).await;
            check(manager.error)?;
            if manager.calendars.is_empty() {
                println!("No calendars found.");
            }
            for calendar in &manager.calendars {
                let selected = if calendar.selected { "✓" } else { "○" };
                let default = if calendar.is_default { " (default)" } else { "" };
                println!(
                    "{} [{}] {}{}",
                    selected,
                    calendar.id,
                    calendar.display_name(),
                    default
                );
            }
        }
        CalendarCommand::Include { id } => {
            manager.set_selected(api, &id, true).await;
            check(manager.error)?;
            println!("Included calendar: {}", id);
        }
        CalendarCommand::Exclude { id } => {
            manager.set_selected(api, &id, false).await;
            check(manager.error)?;
            println!("Excluded calendar: {}", id);
        }
        CalendarCommand::Default { id } => {
            manager.set_default(api, &id).await;
            check(manager.error)?;
            let name = manager
                .find(&id)
                .map(|c| c.display_name().to_string())
                .unwrap_or_else(|| id.clone());
            println!("Default calendar: {}", name);
        }
    }

    Ok(())
}

async fn handle_google(api: &Api, action: GoogleCommand) -> Result<()> {
    let mut panel = IntegrationPanel::new();

    match action {
        GoogleCommand::Status => {
            panel.load(api).await;
            check(panel.error)?;
            match panel.google() {
                Some(google) => {
                    println!("{}", connection_label(google));
                    if !google.scopes.is_empty() {
                        println!("    Scopes: {}", google.scopes.join(", "));
                    }
                }
                None => println!("Google Calendar is not connected."),
            }
        }
        GoogleCommand::SyncCalendars => {
            panel.sync_calendars(api).await;
            report_sync(&panel)?;
        }
        GoogleCommand::SyncEvents => {
            panel.sync_events(api).await;
            report_sync(&panel)?;
        }
        GoogleCommand::Disconnect => {
            panel.disconnect(api).await;
            check(panel.error)?;
            println!("Google Calendar disconnected.");
        }
    }

    Ok(())
}

fn report_sync(panel: &IntegrationPanel) -> Result<()> {
    check(panel.error)?;
    let result = panel.last_sync.as_ref().context("Backend returned no sync result")?;
    for line in sync_summary(result) {
        println!("{}", line);
    }
    Ok(())
}

fn check(error: Option<&'static str>) -> Result<()> {
    match error {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

fn fail(errors: &[String], notice: Option<&str>) -> Result<()> {
    for message in errors {
        eprintln!("{}", message);
    }
    match notice {
        Some(message) => bail!("{}", message),
        None => bail!("Nothing was created"),
    }
}
