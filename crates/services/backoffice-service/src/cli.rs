//! Admin command line: argument definitions and dispatch onto the services.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use common::{AppError, AppResult};
use domain::UserRole;

use crate::service::Services;

#[derive(Debug, Parser)]
#[command(name = "backoffice-service")]
#[command(about = "Store back-office administration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create missing tables and built-in roles
    Init,
    /// Category commands
    Categories {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Company commands
    Companies {
        #[command(subcommand)]
        action: CompanyCommands,
    },
    /// Product commands
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// User administration commands
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommands {
    /// List all companies
    List,
    /// Delete a company
    Delete { id: i32 },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List all products with their category
    List,
}

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// List users with their company and role
    List,
    /// Move a user to another role
    SetRole {
        user_id: String,
        /// Customer, Company, Admin or Employee
        role: UserRole,
        /// Required for the Company role
        #[arg(long)]
        company: Option<i32>,
    },
    /// Toggle a user's account lock
    LockUnlock { user_id: String },
}

/// Run one command. Returns the JSON to print, or `None` when the command
/// has no output.
pub async fn dispatch(command: Commands, services: &Services) -> AppResult<Option<Value>> {
    let output = match command {
        Commands::Init => return Ok(None),
        Commands::Categories { action } => match action {
            CategoryCommands::List => to_json(&services.categories().list().await?)?,
        },
        Commands::Companies { action } => match action {
            CompanyCommands::List => to_json(&services.companies().list().await?)?,
            CompanyCommands::Delete { id } => to_json(&services.companies().delete(id).await?)?,
        },
        Commands::Products { action } => match action {
            ProductCommands::List => to_json(&services.products().list().await?)?,
        },
        Commands::Users { action } => match action {
            UserCommands::List => to_json(&services.users().list().await?)?,
            UserCommands::SetRole {
                user_id,
                role,
                company,
            } => to_json(&services.users().assign_role(&user_id, role, company).await?)?,
            UserCommands::LockUnlock { user_id } => {
                to_json(&services.users().lock_unlock(&user_id).await?)?
            }
        },
    };

    Ok(Some(output))
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}
