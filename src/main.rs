//! portfolio-admin - command-line admin client for the portfolio API.
//!
//! Exercises the client library: sign in/out, inspect the session, list
//! portfolio content, and manage contact messages.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_client::api::{ApiClient, PortfolioApi};
use portfolio_client::auth::{AuthSession, LocalStore, SavedLogin, TokenStore};
use portfolio_client::config::{self, Config};
use portfolio_client::models::LoginCredentials;
use portfolio_client::utils::{format_date, format_optional, truncate_string, validate_email};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: portfolio-admin <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login [--remember]   Sign in (optionally save the password in the keychain)");
    eprintln!("  logout               Sign out and clear the local session");
    eprintln!("  whoami               Show the current session");
    eprintln!("  list <resource>      List a resource: about, social-links, projects, tags,");
    eprintln!("                       skills, skill-categories, services, experience, certificates");
    eprintln!("  messages [--unread]  List contact messages");
    eprintln!("  read <id>            Mark a contact message as read");
    eprintln!();
    eprintln!("The API base URL comes from PORTFOLIO_API_URL (default {})", config::DEFAULT_API_BASE_URL);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };

    let mut config = Config::load()?;
    let store = LocalStore::new(Config::storage_dir());
    let client = ApiClient::new(config::api_base_url(), TokenStore::new(store.clone()))?;
    let api = PortfolioApi::new(client.clone());
    let mut session = AuthSession::new(client.clone(), store);
    session.load();

    match command.as_str() {
        "login" => {
            let remember = args.iter().any(|a| a == "--remember");
            cmd_login(&mut session, &mut config, remember).await?;
        }
        "logout" => {
            session.logout().await;
            if let Some(ref email) = config.last_email {
                let _ = SavedLogin::delete(email);
            }
            println!("Logged out.");
        }
        "whoami" => cmd_whoami(&session),
        "list" => match args.get(2) {
            Some(resource) => cmd_list(&api, resource).await?,
            None => print_usage(),
        },
        "messages" => {
            let unread_only = args.iter().any(|a| a == "--unread");
            cmd_messages(&api, unread_only).await?;
        }
        "read" => match args.get(2).and_then(|raw| raw.parse::<i64>().ok()) {
            Some(id) => {
                api.mark_message_read(id).await?.ok()?;
                println!("Message {} marked as read.", id);
            }
            None => print_usage(),
        },
        _ => print_usage(),
    }

    if *client.session_expired().borrow() {
        eprintln!("Session expired - run `portfolio-admin login` to sign in again.");
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

async fn cmd_login(session: &mut AuthSession, config: &mut Config, remember: bool) -> Result<()> {
    let email = match config.last_email {
        Some(ref last) => {
            let entered = prompt(&format!("Email [{}]", last))?;
            if entered.is_empty() {
                last.clone()
            } else {
                entered
            }
        }
        None => prompt("Email")?,
    };
    if !validate_email(&email) {
        anyhow::bail!("'{}' is not a valid email address", email);
    }

    let password = match SavedLogin::password(&email) {
        Ok(saved) => {
            info!("using saved password from keychain");
            saved
        }
        Err(_) => {
            let entered = prompt("Password")?;
            if entered.is_empty() {
                anyhow::bail!("Password is required");
            }
            entered
        }
    };

    let credentials = LoginCredentials { email, password };
    session.login(&credentials).await?;

    config.last_email = Some(credentials.email.clone());
    config.save()?;
    if remember {
        SavedLogin::store(&credentials.email, &credentials.password)?;
    }

    if let Some(user) = session.user() {
        println!("Welcome, {} ({}).", user.full_name(), user.role);
        if !user.is_email_verified {
            println!("Note: this account's email address is not verified yet.");
        }
    }
    Ok(())
}

fn cmd_whoami(session: &AuthSession) {
    match session.user() {
        Some(user) => {
            println!("{} <{}>", user.full_name(), user.email);
            println!("Role: {}", user.role);
            println!("Email verified: {}", user.is_email_verified);
        }
        None => println!("Not logged in."),
    }
}

async fn cmd_list(api: &PortfolioApi, resource: &str) -> Result<()> {
    match resource {
        "about" => {
            for entry in api.about.list().await?.into_result()? {
                println!("#{:<4} {}", entry.id, entry.title);
                println!("      {}", truncate_string(&entry.description, 70));
            }
        }
        "social-links" => {
            for link in api.social_links.list().await?.into_result()? {
                println!("#{:<4} {:<12} {}", link.id, link.platform, link.url);
            }
        }
        "projects" => {
            for project in api.projects.list().await?.into_result()? {
                let star = if project.featured { "*" } else { " " };
                let tags = project.tag_names().join(", ");
                println!(
                    "#{:<4}{} {:<30} [{}]",
                    project.id,
                    star,
                    truncate_string(&project.title, 30),
                    tags
                );
            }
        }
        "tags" => {
            for tag in api.tags.list().await?.into_result()? {
                println!("#{:<4} {}", tag.id, tag.name);
            }
        }
        "skills" => {
            for skill in api.skills.list().await?.into_result()? {
                println!(
                    "#{:<4} {:<24} {:<12} (category {})",
                    skill.id,
                    skill.name,
                    skill.level.label(),
                    skill.category_id
                );
            }
        }
        "skill-categories" => {
            for category in api.skill_categories.list().await?.into_result()? {
                println!(
                    "#{:<4} {:<24} {}",
                    category.id,
                    category.name,
                    format_optional(&category.description, "")
                );
            }
        }
        "services" => {
            for service in api.services.list().await?.into_result()? {
                println!("#{:<4} {}", service.id, service.title);
                println!("      {}", truncate_string(&service.description, 70));
            }
        }
        "experience" => {
            for exp in api.experience.list().await?.into_result()? {
                let end = if exp.current {
                    "present".to_string()
                } else {
                    format_optional(&exp.end_date.as_ref().map(|d| format_date(d)), "?")
                };
                println!(
                    "#{:<4} {} at {} ({} - {})",
                    exp.id,
                    exp.position,
                    exp.company,
                    format_date(&exp.start_date),
                    end
                );
            }
        }
        "certificates" => {
            for cert in api.certificates.list().await?.into_result()? {
                println!(
                    "#{:<4} {} - {} ({})",
                    cert.id,
                    cert.name,
                    cert.issuer,
                    format_date(&cert.issue_date)
                );
            }
        }
        other => {
            eprintln!("Unknown resource '{}'.", other);
            print_usage();
        }
    }
    Ok(())
}

async fn cmd_messages(api: &PortfolioApi, unread_only: bool) -> Result<()> {
    let envelope = if unread_only {
        api.unread_messages().await?
    } else {
        api.messages.list().await?
    };

    let messages = envelope.into_result()?;
    if messages.is_empty() {
        println!("No messages.");
        return Ok(());
    }

    for message in messages {
        let marker = if message.read { " " } else { "*" };
        println!(
            "{}#{:<4} {} <{}>",
            marker, message.id, message.name, message.email
        );
        println!("      {}", truncate_string(&message.subject, 70));
    }
    Ok(())
}
