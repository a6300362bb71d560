//! Casita Azul CLI - drive the listing API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (prompts for the password when -p is omitted)
//! casita auth login -e staff@casita-azul.com
//!
//! # List active listings, optionally filtered
//! casita properties list --query azul
//!
//! # Upload an image for a listing
//! casita properties upload-image 12 ./fachada.jpg
//!
//! # Admin-only: manage accounts
//! casita users list
//! casita users set-role u-123 admin
//! ```
//!
//! # Commands
//!
//! - `auth` - login, logout, register, whoami
//! - `properties` - list, show, delete, image upload
//! - `agents` - roster listing and management
//! - `users` - account administration (admin role required)
//! - `dashboard` - aggregated statistics
//!
//! # Environment Variables
//!
//! - `CASITA_API_URL` - API base URL (default `http://localhost:5000/api`)
//! - `CASITA_SESSION_FILE` - where the session record is persisted

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use casita_azul_core::Role;

mod commands;

#[derive(Parser)]
#[command(name = "casita")]
#[command(author, version, about = "Casita Azul listing administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Property listings
    Properties {
        #[command(subcommand)]
        action: PropertyAction,
    },
    /// Agent roster
    Agents {
        #[command(subcommand)]
        action: AgentAction,
    },
    /// User accounts (admin role required)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Aggregated listing statistics
    Dashboard,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Request a new account (an admin must grant a role afterwards)
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// End the session locally and on the server
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum PropertyAction {
    /// List active listings
    List {
        /// Case-insensitive filter over title, description, and address
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one listing in full
    Show {
        /// Listing id
        id: i32,
    },
    /// Create a listing
    Add {
        /// Listing title
        #[arg(short, long)]
        titulo: String,

        /// Listing description
        #[arg(short, long)]
        descripcion: Option<String>,

        /// Sale price
        #[arg(short, long)]
        precio: Option<rust_decimal::Decimal>,

        /// Street address
        #[arg(long)]
        direccion: Option<String>,
    },
    /// Logically delete a listing
    Delete {
        /// Listing id
        id: i32,
    },
    /// Upload an image for a listing
    UploadImage {
        /// Listing id
        id: i32,

        /// Path of the image file
        file: std::path::PathBuf,

        /// Mark the image as principal
        #[arg(long)]
        principal: bool,
    },
    /// Promote an image to cover photo
    SetPrincipal {
        /// Listing id
        id: i32,

        /// Image id
        image_id: i32,
    },
    /// Hard-delete an image
    DeleteImage {
        /// Listing id
        id: i32,

        /// Image id
        image_id: i32,
    },
}

#[derive(Subcommand)]
enum AgentAction {
    /// List the roster
    List,
    /// Add an agent
    Add {
        /// Agent name
        #[arg(short, long)]
        nombre: String,

        /// Agent email
        #[arg(short, long)]
        email: String,

        /// Agent phone
        #[arg(short, long)]
        telefono: Option<String>,
    },
    /// Update an agent
    Update {
        /// Agent id
        id: i32,

        /// New name
        #[arg(short, long)]
        nombre: Option<String>,

        /// New email
        #[arg(short, long)]
        email: Option<String>,

        /// New phone
        #[arg(short, long)]
        telefono: Option<String>,
    },
    /// Delete an agent
    Delete {
        /// Agent id
        id: i32,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,
    /// Create an account with an initial role
    Create {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Initial role (`admin`, `user`, `agent`)
        #[arg(short, long, default_value = "user")]
        role: Role,
    },
    /// Change an account's role
    SetRole {
        /// Account id
        id: String,

        /// New role (`admin`, `user`, `agent`)
        role: Role,
    },
    /// Delete an account
    Delete {
        /// Account id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = commands::Context::load()?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&ctx, &email, password).await?;
            }
            AuthAction::Register { email, password } => {
                commands::auth::register(&ctx, &email, password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&ctx).await,
            AuthAction::Whoami => commands::auth::whoami(&ctx),
        },
        Commands::Properties { action } => match action {
            PropertyAction::List { query } => {
                commands::properties::list(&ctx, query.as_deref()).await?;
            }
            PropertyAction::Show { id } => commands::properties::show(&ctx, id).await?,
            PropertyAction::Add {
                titulo,
                descripcion,
                precio,
                direccion,
            } => commands::properties::add(&ctx, &titulo, descripcion, precio, direccion).await?,
            PropertyAction::Delete { id } => commands::properties::delete(&ctx, id).await?,
            PropertyAction::UploadImage {
                id,
                file,
                principal,
            } => commands::properties::upload_image(&ctx, id, &file, principal).await?,
            PropertyAction::SetPrincipal { id, image_id } => {
                commands::properties::set_principal(&ctx, id, image_id).await?;
            }
            PropertyAction::DeleteImage { id, image_id } => {
                commands::properties::delete_image(&ctx, id, image_id).await?;
            }
        },
        Commands::Agents { action } => match action {
            AgentAction::List => commands::agents::list(&ctx).await?,
            AgentAction::Add {
                nombre,
                email,
                telefono,
            } => commands::agents::add(&ctx, &nombre, &email, telefono).await?,
            AgentAction::Update {
                id,
                nombre,
                email,
                telefono,
            } => commands::agents::update(&ctx, id, nombre, email, telefono).await?,
            AgentAction::Delete { id } => commands::agents::delete(&ctx, id).await?,
        },
        Commands::Users { action } => match action {
            UserAction::List => commands::users::list(&ctx).await?,
            UserAction::Create {
                email,
                password,
                role,
            } => commands::users::create(&ctx, &email, password, role).await?,
            UserAction::SetRole { id, role } => {
                commands::users::set_role(&ctx, &id, role).await?;
            }
            UserAction::Delete { id } => commands::users::delete(&ctx, &id).await?,
        },
        Commands::Dashboard => commands::dashboard::show(&ctx).await?,
    }
    Ok(())
}
