//! Bizniz CLI - operator tools for companies and employees.
//!
//! # Usage
//!
//! ```bash
//! # List companies
//! bizniz company list
//!
//! # Create a company
//! bizniz company create --name "Acme" --contract-level Gold --contract-length 12mo
//!
//! # Edit an employee (empty string clears an optional field)
//! bizniz employee update 64a1f0 --location "" --competence "Rust"
//!
//! # Diagnose the configured backend
//! bizniz probe
//! ```
//!
//! # Commands
//!
//! - `company` - List, create, update, and delete companies
//! - `employee` - List, create, update, and delete employees
//! - `probe` - Test the known endpoints and report status and payload shape
//!
//! # Environment Variables
//!
//! - `BIZNIZ_API_URL` - Base URL of the remote API
//! - `BIZNIZ_STATE_DIR` - Directory for the resolved-endpoint cache

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary talks to the operator on stdout/stderr.
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};

mod commands;

use commands::{company, employee, probe};

#[derive(Parser)]
#[command(name = "bizniz")]
#[command(author, version, about = "Bizniz admin client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage companies
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Test the known endpoints and report status and payload shape
    Probe,
}

#[derive(Subcommand)]
enum CompanyAction {
    /// List all companies
    List,
    /// Create a new company
    Create {
        /// Company name
        #[arg(long)]
        name: String,

        /// Industry sector
        #[arg(long)]
        industry: Option<String>,

        /// Head-office location
        #[arg(long)]
        location: Option<String>,

        /// Contract level
        #[arg(long)]
        contract_level: String,

        /// Contract length
        #[arg(long)]
        contract_length: String,
    },
    /// Update an existing company
    Update {
        /// Company id
        id: String,

        /// New company name
        #[arg(long)]
        name: Option<String>,

        /// New industry sector (empty string clears)
        #[arg(long)]
        industry: Option<String>,

        /// New head-office location (empty string clears)
        #[arg(long)]
        location: Option<String>,

        /// New contract level
        #[arg(long)]
        contract_level: Option<String>,

        /// New contract length
        #[arg(long)]
        contract_length: Option<String>,
    },
    /// Delete a company
    Delete {
        /// Company id
        id: String,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// List all employees
    List,
    /// Create a new employee
    Create {
        /// Family name
        #[arg(long)]
        surname: String,

        /// Given name
        #[arg(long)]
        name: String,

        /// Work location
        #[arg(long)]
        location: Option<String>,

        /// Salary (free-form)
        #[arg(long)]
        salary: Option<String>,

        /// Competence / specialty
        #[arg(long)]
        competence: Option<String>,

        /// Id of the employing company
        #[arg(long)]
        company: Option<String>,
    },
    /// Update an existing employee
    Update {
        /// Employee id
        id: String,

        /// New family name
        #[arg(long)]
        surname: Option<String>,

        /// New given name
        #[arg(long)]
        name: Option<String>,

        /// New work location (empty string clears)
        #[arg(long)]
        location: Option<String>,

        /// New salary (empty string clears)
        #[arg(long)]
        salary: Option<String>,

        /// New competence (empty string clears)
        #[arg(long)]
        competence: Option<String>,

        /// New employing company id (empty string clears)
        #[arg(long)]
        company: Option<String>,
    },
    /// Delete an employee
    Delete {
        /// Employee id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // The single point converting propagated failures into an
        // operator-visible message.
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Company { action } => match action {
            CompanyAction::List => company::list().await?,
            CompanyAction::Create {
                name,
                industry,
                location,
                contract_level,
                contract_length,
            } => {
                company::create(name, industry, location, contract_level, contract_length).await?;
            }
            CompanyAction::Update {
                id,
                name,
                industry,
                location,
                contract_level,
                contract_length,
            } => {
                company::update(
                    &id,
                    company::FieldChanges {
                        name,
                        industry,
                        location,
                        contract_level,
                        contract_length,
                    },
                )
                .await?;
            }
            CompanyAction::Delete { id } => company::delete(&id).await?,
        },
        Commands::Employee { action } => match action {
            EmployeeAction::List => employee::list().await?,
            EmployeeAction::Create {
                surname,
                name,
                location,
                salary,
                competence,
                company,
            } => {
                employee::create(surname, name, location, salary, competence, company).await?;
            }
            EmployeeAction::Update {
                id,
                surname,
                name,
                location,
                salary,
                competence,
                company,
            } => {
                employee::update(
                    &id,
                    employee::FieldChanges {
                        surname,
                        name,
                        location,
                        salary,
                        competence,
                        company,
                    },
                )
                .await?;
            }
            EmployeeAction::Delete { id } => employee::delete(&id).await?,
        },
        Commands::Probe => probe::run().await?,
    }
    Ok(())
}
