//! Command-line interface definitions and dispatch

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;

use seckill_admin::backend::{session_token, Attachment, Credentials, PageQuery};
use seckill_admin::config::{Config, BASE_URL_ENV, TOKEN_ENV};
use seckill_admin::output::{render, OutputFormat};
use seckill_admin::resource::ResourceId;
use seckill_admin::{AdminClient, Envelope};

/// Command-line client for the seckill shop administration backend
#[derive(Parser, Debug)]
#[command(name = "seckill-admin", version, about, long_about = None)]
pub struct Args {
    /// Backend base URL
    #[arg(long, env = BASE_URL_ENV, global = true)]
    pub base_url: Option<String>,

    /// Session token (overrides the one saved by `login`)
    #[arg(long, env = TOKEN_ENV, global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    pub log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and save the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "SECKILL_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session token
    Logout,
    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(flatten)]
    Resource(ResourceCommand),
}

/// Commands that talk to a backend resource
#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// Administrator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Employee accounts
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Regular goods
    Goods {
        #[command(subcommand)]
        action: GoodsAction,
    },
    /// Flash-sale items
    Seckill {
        #[command(subcommand)]
        action: SeckillAction,
    },
    /// Orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Delivery riders
    Rider {
        #[command(subcommand)]
        action: RiderAction,
    },
    /// Goods categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Shop customers
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the saved configuration (token masked)
    Show,
    /// Save the backend base URL
    SetBaseUrl { url: String },
}

/// JSON object with the entity fields
#[derive(ClapArgs, Debug)]
pub struct JsonParams {
    /// Fields as a JSON object, e.g. '{"name":"apple","price":3.5}'
    #[arg(long = "json", value_parser = parse_json_object, default_value = "{}")]
    pub json: Value,
}

/// JSON fields plus an optional picture
#[derive(ClapArgs, Debug)]
pub struct UploadParams {
    #[command(flatten)]
    pub params: JsonParams,
    /// Picture to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl UploadParams {
    fn attachment(&self) -> Result<Option<Attachment>> {
        load_attachment(self.image.as_ref())
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    Add(JsonParams),
    Update(JsonParams),
    Delete {
        #[arg(required = true)]
        ids: Vec<ResourceId>,
    },
    Get { id: ResourceId },
    List,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeAction {
    Register(JsonParams),
    /// Change password; fields carry the old and new password
    FixPassword(JsonParams),
    Add(JsonParams),
    /// One page of employees
    Page {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    Get { id: ResourceId },
    Update(JsonParams),
    /// Toggle enabled/disabled
    Status { id: ResourceId },
    Delete { id: ResourceId },
}

#[derive(Subcommand, Debug)]
pub enum GoodsAction {
    Add(UploadParams),
    Update(UploadParams),
    Delete {
        #[arg(required = true)]
        ids: Vec<ResourceId>,
    },
    Get { id: ResourceId },
    List,
}

#[derive(Subcommand, Debug)]
pub enum SeckillAction {
    Add(UploadParams),
    Update(JsonParams),
    Status {
        id: ResourceId,
        #[arg(long)]
        status: i64,
    },
    Delete {
        #[arg(required = true)]
        ids: Vec<ResourceId>,
    },
    Get { id: ResourceId },
    List,
}

#[derive(Subcommand, Debug)]
pub enum OrderAction {
    List,
    /// Mark an order refunded
    Refund { id: ResourceId },
}

#[derive(Subcommand, Debug)]
pub enum RiderAction {
    Add {
        #[command(flatten)]
        params: JsonParams,
        /// Avatar picture to upload
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Assign an order to a rider
    Assign {
        #[arg(long)]
        order: ResourceId,
        #[arg(long)]
        rider: ResourceId,
    },
    Delete {
        #[arg(required = true)]
        ids: Vec<ResourceId>,
    },
    Get { id: ResourceId },
    List,
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    Add(UploadParams),
    Update(UploadParams),
    Delete {
        #[arg(required = true)]
        ids: Vec<ResourceId>,
    },
    List,
}

/// Customer ids are strings on the backend
#[derive(Subcommand, Debug)]
pub enum UserAction {
    Add(JsonParams),
    Update(JsonParams),
    Delete {
        #[arg(required = true, value_parser = parse_text_id)]
        ids: Vec<ResourceId>,
    },
    Get {
        #[arg(value_parser = parse_text_id)]
        id: ResourceId,
    },
    List,
}

fn parse_json_object(raw: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("expected a JSON object".to_string())
    }
}

fn parse_text_id(raw: &str) -> Result<ResourceId, String> {
    Ok(ResourceId::Str(raw.to_string()))
}

fn load_attachment(path: Option<&PathBuf>) -> Result<Option<Attachment>> {
    path.map(|p| Attachment::from_path(p).with_context(|| format!("Cannot upload {:?}", p)))
        .transpose()
}

/// Print an envelope; returns whether the backend reported success
fn report<D: Serialize>(envelope: Envelope<D>, format: OutputFormat) -> Result<bool> {
    println!("{}", render(&envelope, format)?);
    Ok(envelope.is_success())
}

/// Run one command. Returns `false` when the backend rejected the request.
pub async fn run(args: Args) -> Result<bool> {
    let stored = Config::load();
    let config = stored
        .clone()
        .with_overrides(args.base_url.clone(), args.token.clone());
    let format = args.output;

    match args.command {
        Command::Login { username, password } => {
            login(stored, &config, username, password, format).await
        }
        Command::Logout => {
            let mut stored = stored;
            stored.clear_token()?;
            tracing::info!("Session token cleared");
            Ok(true)
        }
        Command::Config { action } => run_config(stored, action, format),
        Command::Resource(command) => {
            let client = AdminClient::from_config(&config)?;
            dispatch(&client, command, format).await
        }
    }
}

async fn login(
    mut stored: Config,
    config: &Config,
    username: String,
    password: String,
    format: OutputFormat,
) -> Result<bool> {
    let client = AdminClient::from_config(config)?;
    let envelope = client.sign_in(&Credentials::new(username, password)).await?;

    if envelope.is_success() {
        if let Some(token) = envelope.data.as_ref().and_then(session_token) {
            stored.set_token(&token).context("Failed to save session token")?;
            tracing::info!("Session token saved");
        }
    }

    report(envelope, format)
}

fn run_config(mut stored: Config, action: ConfigAction, format: OutputFormat) -> Result<bool> {
    match action {
        ConfigAction::Show => {
            let mut shown = stored.clone();
            if shown.token.is_some() {
                shown.token = Some("********".to_string());
            }
            println!("{}", render(&shown, format)?);
        }
        ConfigAction::SetBaseUrl { url } => {
            url::Url::parse(&url).with_context(|| format!("Invalid URL: {}", url))?;
            stored.set_base_url(&url)?;
        }
    }
    Ok(true)
}

async fn dispatch(
    client: &AdminClient,
    command: ResourceCommand,
    format: OutputFormat,
) -> Result<bool> {
    match command {
        ResourceCommand::Admin { action } => match action {
            AdminAction::Add(p) => report(client.add_admin(&p.json).await?, format),
            AdminAction::Update(p) => report(client.update_admin(&p.json).await?, format),
            AdminAction::Delete { ids } => report(client.delete_admins(ids).await?, format),
            AdminAction::Get { id } => report(client.get_admin(id).await?, format),
            AdminAction::List => report(client.list_admins().await?, format),
        },
        ResourceCommand::Employee { action } => match action {
            EmployeeAction::Register(p) => report(client.register_employee(&p.json).await?, format),
            EmployeeAction::FixPassword(p) => {
                report(client.fix_employee_password(&p.json).await?, format)
            }
            EmployeeAction::Add(p) => report(client.add_employee(&p.json).await?, format),
            EmployeeAction::Page {
                name,
                page,
                page_size,
            } => {
                let query = PageQuery::new(name, page, page_size);
                report(client.get_employee_page(&query).await?, format)
            }
            EmployeeAction::Get { id } => report(client.get_employee(id).await?, format),
            EmployeeAction::Update(p) => report(client.update_employee(&p.json).await?, format),
            EmployeeAction::Status { id } => {
                report(client.update_employee_status(id).await?, format)
            }
            EmployeeAction::Delete { id } => report(client.delete_employee(id).await?, format),
        },
        ResourceCommand::Goods { action } => match action {
            GoodsAction::Add(p) => {
                let image = p.attachment()?;
                report(client.add_goods(&p.params.json, image).await?, format)
            }
            GoodsAction::Update(p) => {
                let image = p.attachment()?;
                report(client.update_goods(&p.params.json, image).await?, format)
            }
            GoodsAction::Delete { ids } => report(client.delete_goods(ids).await?, format),
            GoodsAction::Get { id } => report(client.get_goods(id).await?, format),
            GoodsAction::List => report(client.list_goods().await?, format),
        },
        ResourceCommand::Seckill { action } => match action {
            SeckillAction::Add(p) => {
                let image = p.attachment()?;
                report(client.add_seckill(&p.params.json, image).await?, format)
            }
            SeckillAction::Update(p) => report(client.update_seckill(&p.json).await?, format),
            SeckillAction::Status { id, status } => {
                report(client.update_seckill_status(id, status).await?, format)
            }
            SeckillAction::Delete { ids } => report(client.delete_seckills(ids).await?, format),
            SeckillAction::Get { id } => report(client.get_seckill(id).await?, format),
            SeckillAction::List => report(client.list_seckills().await?, format),
        },
        ResourceCommand::Order { action } => match action {
            OrderAction::List => report(client.list_orders().await?, format),
            OrderAction::Refund { id } => report(client.refund_order(id).await?, format),
        },
        ResourceCommand::Rider { action } => match action {
            RiderAction::Add { params, avatar } => {
                let avatar = load_attachment(avatar.as_ref())?;
                report(client.add_rider(&params.json, avatar).await?, format)
            }
            RiderAction::Assign { order, rider } => {
                report(client.assign_order(order, rider).await?, format)
            }
            RiderAction::Delete { ids } => report(client.delete_riders(ids).await?, format),
            RiderAction::Get { id } => report(client.get_rider(id).await?, format),
            RiderAction::List => report(client.list_riders().await?, format),
        },
        ResourceCommand::Category { action } => match action {
            CategoryAction::Add(p) => {
                let image = p.attachment()?;
                report(client.add_category(&p.params.json, image).await?, format)
            }
            CategoryAction::Update(p) => {
                let image = p.attachment()?;
                report(client.update_category(&p.params.json, image).await?, format)
            }
            CategoryAction::Delete { ids } => report(client.delete_categories(ids).await?, format),
            CategoryAction::List => report(client.list_categories().await?, format),
        },
        ResourceCommand::User { action } => match action {
            UserAction::Add(p) => report(client.add_user(&p.json).await?, format),
            UserAction::Update(p) => report(client.update_user(&p.json).await?, format),
            UserAction::Delete { ids } => report(client.delete_users(ids).await?, format),
            UserAction::Get { id } => report(client.get_user(id).await?, format),
            UserAction::List => report(client.list_users().await?, format),
        },
    }
}
