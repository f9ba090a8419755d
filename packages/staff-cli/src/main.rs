//! Terminal front end for the Tabside staff ordering flow.
//!
//! Stands in for the mobile app's screens: drives the login /
//! reset-password / OTP flow against the backend and renders an order
//! summary. The auth token lives in process memory for the session and
//! nowhere else.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_client::{ApiClient, LoginPayload};
use order_summary::{format_cents, OrderLine, OrderSummary};

#[derive(Parser)]
#[command(name = "tabside", about = "Tabside staff terminal")]
struct Args {
    /// Override the API base URL (otherwise TABSIDE_API_URL or the built-in
    /// address)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,auth_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    if let Some(url) = args.api_url {
        auth_client::init_base_url(url);
    }

    let term = Term::stdout();
    print_banner(&term)?;

    let client = ApiClient::new();
    tracing::info!(base_url = %client.base_url(), "staff terminal starting");

    let mut session: Option<LoginPayload> = None;

    loop {
        println!();
        if let Some(payload) = &session {
            println!(
                "{}",
                format!(
                    "Signed in as {} ({}, branch {})",
                    payload.user.name, payload.user.role, payload.user.branch_id
                )
                .bright_green()
            );
        }

        let options = vec![
            "🔑 Sign in",
            "✉️  Forgot password",
            "🧾 Review order",
            "🛑 Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact_on(&term)?;

        match selection {
            0 => {
                if let Some(payload) = sign_in(&client).await? {
                    session = Some(payload);
                }
            }
            1 => forgot_password(&client).await?,
            2 => review_order(&term, &session)?,
            3 => {
                println!("{}", "👋 Goodbye!".bright_blue());
                break;
            }
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║        Tabside Staff Terminal        ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}

async fn sign_in(client: &ApiClient) -> Result<Option<LoginPayload>> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    match client.login(&email, &password).await {
        Ok(payload) => {
            println!(
                "{}",
                format!("✅ Welcome back, {}!", payload.user.name).bright_green()
            );
            Ok(Some(payload))
        }
        Err(err) => {
            // Inline form feedback, exactly what the mobile screen shows.
            println!("{}", format!("✗ {err}").bright_red());
            Ok(None)
        }
    }
}

async fn forgot_password(client: &ApiClient) -> Result<()> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    match client.reset_password(&email).await {
        Ok(ack) => println!("{}", format!("✉️  {}", ack.message).bright_green()),
        Err(err) => {
            println!("{}", format!("✗ {err}").bright_red());
            return Ok(());
        }
    }

    let otp: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("One-time code")
        .interact_text()?;

    match client.verify_otp(&email, &otp).await {
        Ok(ack) => println!("{}", format!("✅ {}", ack.message).bright_green()),
        Err(err) => println!("{}", format!("✗ {err}").bright_red()),
    }

    Ok(())
}

fn review_order(term: &Term, session: &Option<LoginPayload>) -> Result<()> {
    if session.is_none() {
        println!("{}", "Sign in first to review an order.".bright_yellow());
        return Ok(());
    }

    let mut order = demo_order();

    loop {
        render_summary(&order);

        let options = vec!["✏️  Change a quantity", "🗑  Remove an item", "✅ Done"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Edit the order?")
            .items(&options)
            .default(2)
            .interact_on(term)?;

        match selection {
            0 => {
                let Some(item_id) = pick_item(term, &order)? else {
                    continue;
                };
                let quantity: u32 = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("New quantity (0 removes)")
                    .interact_text()?;
                order.set_quantity(&item_id, quantity);
            }
            1 => {
                if let Some(item_id) = pick_item(term, &order)? {
                    order.remove_line(&item_id);
                }
            }
            2 => break,
            _ => unreachable!(),
        }

        if order.is_empty() {
            println!("{}", "The order is now empty.".bright_yellow());
            break;
        }
    }

    Ok(())
}

fn pick_item(term: &Term, order: &OrderSummary) -> Result<Option<String>> {
    if order.is_empty() {
        return Ok(None);
    }
    let names: Vec<&str> = order.lines().iter().map(|l| l.name.as_str()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which item?")
        .items(&names)
        .default(0)
        .interact_on(term)?;
    Ok(Some(order.lines()[index].item_id.clone()))
}

fn render_summary(order: &OrderSummary) {
    println!();
    for line in order.lines() {
        println!(
            "  {:<24} {:>3} × {:>8}  {:>10}",
            line.name,
            line.quantity,
            format_cents(line.unit_price_cents),
            format_cents(line.line_total_cents()).bold()
        );
    }
    println!("  {:-<52}", "");
    println!(
        "  {:<37} {:>10}",
        "Subtotal",
        format_cents(order.subtotal_cents())
    );
    println!(
        "  {:<37} {:>10}",
        "Service charge",
        format_cents(order.service_charge_cents)
    );
    println!(
        "  {:<37} {:>10}",
        "Total".bold(),
        format_cents(order.total_cents()).bold()
    );
}

fn demo_order() -> OrderSummary {
    let mut order = OrderSummary::new();
    order.service_charge_cents = 50;
    order.add_line(OrderLine {
        item_id: "flat-white".to_string(),
        name: "Flat white".to_string(),
        unit_price_cents: 450,
        quantity: 2,
    });
    order.add_line(OrderLine {
        item_id: "croissant".to_string(),
        name: "Butter croissant".to_string(),
        unit_price_cents: 380,
        quantity: 1,
    });
    order.add_line(OrderLine {
        item_id: "orange-juice".to_string(),
        name: "Fresh orange juice".to_string(),
        unit_price_cents: 520,
        quantity: 1,
    });
    order
}
