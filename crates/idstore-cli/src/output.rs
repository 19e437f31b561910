//! Output formatting utilities.

use colored::Colorize;
use idstore_model::{Claim, IdentityRole, IdentityUser};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::config::OutputFormat;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Outputs rows in the specified format.
pub fn output<T: Tabled + Serialize>(data: &[T], format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                info("No results found.");
            } else {
                let table = Table::new(data).with(Style::rounded()).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Outputs a single item.
pub fn output_single<T: Tabled + Serialize>(item: &T, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            let table = Table::new(std::slice::from_ref(item))
                .with(Style::rounded())
                .to_string();
            println!("{table}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Prompts for confirmation.
pub fn confirm(message: &str) -> crate::CliResult<bool> {
    print!("{message} [y/N]: ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y") || input.trim().eq_ignore_ascii_case("yes"))
}

fn or_dash(value: Option<&String>) -> String {
    value.map_or_else(|| "-".to_string(), Clone::clone)
}

/// User representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserRow {
    /// User id.
    pub id: String,
    /// User name.
    pub user_name: String,
    /// Email.
    pub email: String,
    /// Whether the email is confirmed.
    pub email_confirmed: bool,
    /// Phone number.
    pub phone_number: String,
    /// Whether two-factor authentication is on.
    pub two_factor: bool,
    /// Role claims, comma separated.
    pub roles: String,
}

impl From<&IdentityUser> for UserRow {
    fn from(user: &IdentityUser) -> Self {
        Self {
            id: user.id.clone(),
            user_name: or_dash(user.user_name.as_ref()),
            email: or_dash(user.email.as_ref()),
            email_confirmed: user.email_confirmed,
            phone_number: or_dash(user.phone_number.as_ref()),
            two_factor: user.two_factor_enabled,
            roles: user.role_claims.join(", "),
        }
    }
}

/// Role representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RoleRow {
    /// Role id.
    pub id: String,
    /// Role name.
    pub name: String,
    /// Normalized role name.
    pub normalized_name: String,
}

impl From<&IdentityRole> for RoleRow {
    fn from(role: &IdentityRole) -> Self {
        Self {
            id: role.id.clone(),
            name: or_dash(role.name.as_ref()),
            normalized_name: or_dash(role.normalized_name.as_ref()),
        }
    }
}

/// Claim representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ClaimRow {
    /// Claim type.
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    pub claim_type: String,
    /// Claim value.
    pub value: String,
}

impl From<&Claim> for ClaimRow {
    fn from(claim: &Claim) -> Self {
        Self {
            claim_type: claim.claim_type.clone(),
            value: claim.value.clone(),
        }
    }
}
