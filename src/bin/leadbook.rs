use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use leadbook::{
    config::{self, ClientConfig},
    models::{EditField, Lead, LeadField},
    ConsoleOperator, HttpLeadApi, LeadController, ViewModel,
};
use serde::Serialize;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config().context("failed to load client config")?;
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }
    config::init_tracing(config.log_level(), config.log_json);

    let assume_yes = matches!(&cli.command, Commands::Contact(args) if args.yes);
    let context = CliContext::initialize(&config, assume_yes)?;

    match cli.command {
        Commands::Dashboard => handle_dashboard(&context, cli.json).await?,
        Commands::Create(args) => handle_create(&context, args, cli.json).await?,
        Commands::Search(args) => handle_search(&context, args, cli.json).await?,
        Commands::Edit(args) => handle_edit(&context, args, cli.json).await?,
        Commands::Contact(args) => handle_contact(&context, args, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "leadbook", about = "Capture leads and track who has been contacted", version)]
struct Cli {
    #[arg(long, global = true, help = "Backend address, overriding configuration")]
    base_url: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render the resulting view state as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show counts and the most recent uncontacted leads
    Dashboard,
    /// Save a new lead
    Create(CreateLeadArgs),
    /// Find the first lead matching a query
    Search(SearchArgs),
    /// Edit the first lead matching a query
    Edit(EditLeadArgs),
    /// Mark a recent lead as contacted
    Contact(ContactArgs),
}

#[derive(Args)]
struct CreateLeadArgs {
    #[arg(long, help = "Full name")]
    name: String,
    #[arg(long, help = "Email address")]
    email: String,
    #[arg(long, help = "Phone number")]
    phone: String,
    #[arg(long, help = "Instagram handle or profile link")]
    instagram: String,
    #[arg(long, help = "Business sector")]
    sector: String,
}

#[derive(Args)]
struct SearchArgs {
    #[arg(default_value = "", help = "Search text; empty lists recent leads")]
    query: String,
}

#[derive(Args)]
struct EditLeadArgs {
    #[arg(help = "Search text selecting the lead to edit")]
    query: String,
    #[arg(long, help = "New full name")]
    name: Option<String>,
    #[arg(long, help = "New email address")]
    email: Option<String>,
    #[arg(long, help = "New phone number")]
    phone: Option<String>,
    #[arg(long, help = "New Instagram handle or link")]
    instagram: Option<String>,
    #[arg(long, help = "New sector")]
    sector: Option<String>,
    #[arg(long, help = "Whether the lead has been contacted (true/false)")]
    contracted: Option<bool>,
    #[arg(long, help = "Whether the outreach mail was opened (true/false)")]
    mail_opened: Option<bool>,
    #[arg(long, help = "Whether the lead replied (true/false)")]
    replied: Option<bool>,
}

#[derive(Args)]
struct ContactArgs {
    #[arg(help = "Position in the recent list, starting at 0")]
    index: usize,
    #[arg(long, action = ArgAction::SetTrue, help = "Skip the confirmation prompt")]
    yes: bool,
}

struct CliContext {
    controller: LeadController,
}

impl CliContext {
    fn initialize(config: &ClientConfig, assume_yes: bool) -> Result<Self> {
        let api = HttpLeadApi::new(config).context("failed to build HTTP client")?;
        debug!(target: "leadbook_cli", base_url = %api.base_url(), "using backend");

        let controller = LeadController::new(
            Arc::new(api),
            Arc::new(ConsoleOperator::new(assume_yes)),
            config.recent_limit,
        );
        Ok(Self { controller })
    }
}

async fn handle_dashboard(context: &CliContext, json: bool) -> Result<()> {
    context.controller.open().await;
    let state = context.controller.snapshot().await;
    if json {
        print_json(&state)?;
    } else {
        render_dashboard(&state);
    }
    Ok(())
}

async fn handle_create(context: &CliContext, args: CreateLeadArgs, json: bool) -> Result<()> {
    let controller = &context.controller;
    for (field, value) in [
        (LeadField::Name, args.name),
        (LeadField::Email, args.email),
        (LeadField::Phone, args.phone),
        (LeadField::Instagram, args.instagram),
        (LeadField::Sector, args.sector),
    ] {
        controller.set_form_field(field, value).await;
    }

    if !controller.snapshot().await.can_submit() {
        return Err(anyhow!("every field is required and the email must be valid"));
    }

    let result = controller.submit_form().await;
    let state = controller.snapshot().await;
    if json {
        print_json(&state)?;
    } else if let Some(message) = &state.error {
        eprintln!("{message}");
    } else if result.is_ok() {
        render_dashboard(&state);
    }
    result.context("failed to create lead")
}

async fn handle_search(context: &CliContext, args: SearchArgs, json: bool) -> Result<()> {
    let controller = &context.controller;
    controller
        .search(&args.query)
        .await
        .with_context(|| format!("failed to search for '{}'", args.query))?;

    let state = controller.snapshot().await;
    if json {
        print_json(&state)?;
    } else if args.query.is_empty() {
        render_recent(&state);
    } else {
        match &state.search_result {
            Some(lead) => render_lead(lead),
            None => println!("No lead matched '{}'", args.query),
        }
    }
    Ok(())
}

async fn handle_edit(context: &CliContext, args: EditLeadArgs, json: bool) -> Result<()> {
    let controller = &context.controller;
    controller
        .search(&args.query)
        .await
        .with_context(|| format!("failed to search for '{}'", args.query))?;
    if controller.snapshot().await.search_result.is_none() {
        return Err(anyhow!("no lead matched '{}'", args.query));
    }

    let text_edits = [
        (EditField::Name, args.name),
        (EditField::Email, args.email),
        (EditField::Phone, args.phone),
        (EditField::Instagram, args.instagram),
        (EditField::Sector, args.sector),
    ];
    for (field, value) in text_edits {
        if let Some(value) = value {
            controller.set_edit_field(field, value).await;
        }
    }
    let flag_edits = [
        (EditField::IsContracted, args.contracted),
        (EditField::MailOpened, args.mail_opened),
        (EditField::Replied, args.replied),
    ];
    for (field, value) in flag_edits {
        if let Some(value) = value {
            controller.set_edit_field(field, value.to_string()).await;
        }
    }

    controller.commit_edit().await.context("failed to update lead")?;
    if json {
        print_json(&controller.snapshot().await)?;
    }
    Ok(())
}

async fn handle_contact(context: &CliContext, args: ContactArgs, json: bool) -> Result<()> {
    let controller = &context.controller;
    controller
        .refresh_recent()
        .await
        .context("failed to load recent leads")?;

    let confirmed = controller
        .mark_contacted_at(args.index)
        .await
        .with_context(|| format!("failed to mark lead at position {}", args.index))?;

    let state = controller.snapshot().await;
    if json {
        print_json(&state)?;
    } else if !confirmed {
        println!("Left lead at position {} unchanged", args.index);
    } else {
        render_dashboard(&state);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_dashboard(state: &ViewModel) {
    println!(
        "Leads {} • contacted {} • not contacted {}",
        state.total, state.contracted, state.uncontracted
    );
    render_recent(state);
}

fn render_recent(state: &ViewModel) {
    if state.recent.is_empty() {
        println!("No uncontacted leads.");
        return;
    }
    println!("Recent uncontacted leads:");
    for (index, lead) in state.recent.iter().enumerate() {
        let mark = if state.is_checked(index) { "x" } else { " " };
        println!(
            "[{mark}] {index}: {} • {} • {} • {}",
            lead.name, lead.email, lead.phone, lead.instagram
        );
    }
}

fn render_lead(lead: &Lead) {
    println!(
        "- Lead {} • {} • {} • {} • {} • sector {}",
        lead.id, lead.name, lead.email, lead.phone, lead.instagram, lead.sector
    );
    println!(
        "  contacted {} • mail opened {} • replied {}",
        lead.is_contracted, lead.mail_opened, lead.replied
    );
}
