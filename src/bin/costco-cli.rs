use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Months, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use costco_client::api::{OnlineOrdersPage, Receipt, ReceiptsWithCounts};
use costco_client::auth::store::{CredentialStore, StoredConfig};
use costco_client::utils::logging::{self, LogLevel};
use costco_client::{Client, ClientConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store email and default warehouse, optionally authenticate now
    Setup,
    /// Show config and token file status
    Info,
    /// List online orders
    Orders {
        /// Start date (YYYY-MM-DD), defaults to three months ago
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List warehouse and fuel receipts
    Receipts {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show full line-item detail for one receipt
    ReceiptDetail {
        #[arg(long)]
        barcode: String,
        /// "warehouse" or "fuel"
        #[arg(long, default_value = "warehouse")]
        document_type: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level);

    match args.command {
        Command::Setup => setup().await,
        Command::Info => {
            let store = CredentialStore::from_env()?;
            print!("{}", store.describe());
            Ok(())
        }
        Command::Orders {
            start,
            end,
            page,
            size,
            json,
        } => {
            let client = build_client()?;
            let (start, end) = default_range(start, end);
            let orders = client.get_online_orders(&start, &end, page, size).await?;
            if json {
                print_json(&orders)
            } else {
                print_orders(&orders, &start, &end, page);
                Ok(())
            }
        }
        Command::Receipts { start, end, json } => {
            let client = build_client()?;
            let (start, end) = default_range(start, end);
            // the receipts endpoint family wants M/DD/YYYY
            let receipts = client
                .get_receipts(&to_receipt_date(&start)?, &to_receipt_date(&end)?, "all", "all")
                .await?;
            if json {
                print_json(&receipts)
            } else {
                print_receipts(&receipts, &start, &end);
                Ok(())
            }
        }
        Command::ReceiptDetail {
            barcode,
            document_type,
            json,
        } => {
            let client = build_client()?;
            let receipt = client.get_receipt_detail(&barcode, &document_type).await?;
            if json {
                print_json(&receipt)
            } else {
                print_receipt_detail(&receipt);
                Ok(())
            }
        }
    }
}

async fn setup() -> Result<()> {
    let store = CredentialStore::from_env()?;
    let existing = store.load_config().unwrap_or(None);

    println!("Costco CLI Setup");
    println!("================");
    println!("Your credentials will be stored in {}", store.dir().display());
    println!();

    let default_email = existing.as_ref().map(|c| c.email.clone()).unwrap_or_default();
    let email = prompt_with_default("Email", &default_email)?;
    if email.is_empty() {
        bail!("email is required");
    }

    let default_warehouse = existing
        .as_ref()
        .map(|c| c.warehouse_number.clone())
        .unwrap_or_else(|| "847".to_owned());
    let warehouse = prompt_with_default("Warehouse Number", &default_warehouse)?;

    store.save_config(&StoredConfig {
        email: email.clone(),
        warehouse_number: warehouse.clone(),
    })?;
    println!("\n✓ Configuration saved to {}", store.dir().join("config.json").display());

    let answer = prompt_with_default("\nDo you want to authenticate now? (y/n)", "n")?;
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        let password = rpassword::prompt_password("Password: ")?;

        let mut config = ClientConfig::new(email, password);
        config.warehouse_number = warehouse;
        let client = Client::new(config)?;

        print!("Authenticating...");
        std::io::stdout().flush()?;

        // a small receipts query forces the full token exchange
        let (start, end) = default_range(None, None);
        client
            .get_receipts(&to_receipt_date(&start)?, &to_receipt_date(&end)?, "all", "all")
            .await
            .context("authentication failed")?;

        println!(" ✓");
        println!("✓ Authentication successful! Tokens saved to {}", store.dir().join("tokens.json").display());
    }

    println!("\nSetup complete! You can now use the CLI commands.");
    println!("\nExample commands:");
    println!("  costco-cli orders      - Get recent orders");
    println!("  costco-cli receipts    - Get recent receipts");
    println!("  costco-cli info        - Show config info");
    Ok(())
}

/// Build a client from the stored config, prompting for a password only
/// when no unexpired refresh token is on disk.
fn build_client() -> Result<Client> {
    let store = CredentialStore::from_env()?;
    let stored = store
        .load_config()
        .context("loading config")?
        .context("no configuration found; run 'costco-cli setup' first")?;

    let needs_password = match store.load_credentials() {
        Ok(Some(creds)) => Utc::now() > creds.refresh_token_expires_at,
        _ => true,
    };

    let password = if needs_password {
        rpassword::prompt_password("Password: ")?
    } else {
        String::new()
    };

    let mut config = ClientConfig::new(stored.email, password);
    config.warehouse_number = stored.warehouse_number;
    Ok(Client::new(config)?)
}

fn prompt_with_default(label: &str, default: &str) -> Result<String> {
    if default.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, default);
    }
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let value = line.trim();
    Ok(if value.is_empty() {
        default.to_owned()
    } else {
        value.to_owned()
    })
}

fn default_range(start: Option<String>, end: Option<String>) -> (String, String) {
    let today = Utc::now().date_naive();
    let start = start.unwrap_or_else(|| {
        (today - Months::new(3)).format("%Y-%m-%d").to_string()
    });
    let end = end.unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
    (start, end)
}

/// YYYY-MM-DD → M/DD/YYYY, the format the receipts endpoint expects.
fn to_receipt_date(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", date))?;
    Ok(format!(
        "{}/{:02}/{}",
        parsed.month(),
        parsed.day(),
        parsed.year()
    ))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_orders(orders: &OnlineOrdersPage, start: &str, end: &str, page: u32) {
    println!("Online Orders ({} to {})", start, end);
    println!("Page {} of {} total records", page, orders.total_number_of_records);
    println!("{}", "=".repeat(80));

    for order in &orders.bc_orders {
        println!("\nOrder #{}", order.order_number);
        println!("  Date: {}", order.order_placed_date);
        println!("  Status: {}", order.status);
        println!("  Total: ${:.2}", order.order_total);
        println!("  Warehouse: {}", order.warehouse_number);

        if !order.order_line_items.is_empty() {
            println!("  Items: {}", order.order_line_items.len());
            for item in order.order_line_items.iter().take(3) {
                println!("    - {} (Status: {})", item.item_description, item.status);
            }
            if order.order_line_items.len() > 3 {
                println!("    ... and {} more items", order.order_line_items.len() - 3);
            }
        }
    }
}

fn print_receipts(receipts: &ReceiptsWithCounts, start: &str, end: &str) {
    println!("Receipts ({} to {})", start, end);
    println!(
        "In-Warehouse: {}, Gas Station: {}, Car Wash: {}",
        receipts.in_warehouse, receipts.gas_station, receipts.car_wash
    );
    println!("{}", "=".repeat(80));

    for receipt in &receipts.receipts {
        println!("\n{} - {}", receipt.transaction_date_time, receipt.receipt_type);
        println!("  Warehouse: {}", receipt.warehouse_name);
        println!("  Barcode: {}", receipt.transaction_barcode);
        println!("  Total: ${:.2}", receipt.total);
        println!("  Items: {}", receipt.total_item_count);
    }
}

fn print_receipt_detail(receipt: &Receipt) {
    println!("Receipt Detail");
    println!("{}", "=".repeat(80));
    println!("Date: {}", receipt.transaction_date_time);
    println!("Warehouse: {} (#{})", receipt.warehouse_name, receipt.warehouse_number);
    println!(
        "Address: {}, {}, {} {}",
        receipt.warehouse_address1,
        receipt.warehouse_city,
        receipt.warehouse_state,
        receipt.warehouse_postal_code
    );
    println!("Barcode: {}", receipt.transaction_barcode);
    println!("Member: {}", receipt.membership_number);
    println!();

    println!("Items:");
    for item in &receipt.item_array {
        println!(
            "  {} - {} {}",
            item.item_number, item.item_description01, item.item_description02
        );
        if item.unit > 1 {
            println!(
                "    Qty: {} @ ${:.2} = ${:.2}",
                item.unit, item.item_unit_price_amount, item.amount
            );
        } else {
            println!("    ${:.2}", item.amount);
        }
    }

    println!();
    println!("Subtotal: ${:.2}", receipt.sub_total);
    println!("Tax: ${:.2}", receipt.taxes);
    println!("Total: ${:.2}", receipt.total);

    if !receipt.tender_array.is_empty() {
        println!("\nPayment:");
        for tender in &receipt.tender_array {
            println!(
                "  {} ({}): ${:.2}",
                tender.tender_description, tender.display_account_number, tender.amount_tender
            );
        }
    }
}
