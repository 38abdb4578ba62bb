use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use cashier::catalog::CategoryFilter;
use cashier::reports::{ReportProjector, export_csv, write_json};
use cashier::transactions::{LedgerQuery, Period};
use cashier::utils::format_rupiah;
use cashier::utils::time::format_local;
use cashier::{CashierError, CashierSession, RemoteBackend, setup_environment};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shared::AppError;
use shared::models::{DeliveryType, PaymentMethodCreate, PaymentStatus, ProductCategory, ProductCreate};

/// Point-of-sale cashier
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products
    Products {
        /// Name contains
        #[arg(long)]
        search: Option<String>,
        /// all | food | drink
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// List payment methods
    PaymentMethods,
    /// Transaction history, newest first
    History {
        /// all | today | week | month
        #[arg(long, default_value = "all")]
        period: Period,
        /// Buyer or product name contains
        #[arg(long)]
        search: Option<String>,
    },
    /// Sales summary, optionally exported as CSV
    Report {
        #[arg(long, default_value = "all")]
        period: Period,
        #[arg(long)]
        search: Option<String>,
        /// Write the rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a transaction paid or pending
    SetStatus {
        id: String,
        /// paid | pending
        status: PaymentStatus,
    },
    /// Record a sale
    Sell {
        /// Payment method id
        #[arg(long)]
        method: String,
        /// Product id, optionally with quantity: `<id>` or `<id>:<qty>`
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Pre-order for a named buyer instead of a pickup
        #[arg(long)]
        pre_order: bool,
        #[arg(long)]
        buyer: Option<String>,
        /// Pre-order not paid yet
        #[arg(long)]
        unpaid: bool,
    },
    /// Add a product to the catalog
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        /// food | drink
        #[arg(long)]
        category: ProductCategory,
    },
    /// Add a payment method to the catalog
    AddPaymentMethod {
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = setup_environment()?;
    if let Some(url) = cli.backend_url {
        config = config.with_backend_url(url);
    }

    let backend = Arc::new(
        RemoteBackend::new(&config.client_config()).context("failed to build backend client")?,
    );
    let mut session = CashierSession::new(backend, config.timezone);

    if let Err(e) = run(&mut session, cli.command).await {
        let app = AppError::from(&e);
        tracing::error!(code = app.code.code(), error = %e, "Command failed");
        if app.is_retryable() {
            bail!("[{}] {} (temporary failure, try again)", app.code.code(), app.message);
        }
        bail!("[{}] {}", app.code.code(), app.message);
    }
    Ok(())
}

async fn run(session: &mut CashierSession, command: Command) -> Result<(), CashierError> {
    session.load().await?;

    match command {
        Command::Products { search, category } => {
            let products = session
                .catalog()
                .search_products(search.as_deref().unwrap_or_default(), category);
            for p in &products {
                println!(
                    "{:<26} {:<32} {:<6} {}",
                    p.id,
                    p.name,
                    p.category,
                    format_rupiah(p.price)
                );
            }
            println!("{} product(s)", products.len());
        }
        Command::PaymentMethods => {
            for m in session.catalog().payment_methods() {
                println!("{:<26} {}", m.id, m.name);
            }
        }
        Command::History { period, search } => {
            let query = LedgerQuery::new()
                .with_period(period)
                .with_text(search.unwrap_or_default());
            let tz = session.timezone();
            for tx in session.history(&query) {
                println!(
                    "{:<26} {} {:<20} {:<8} {:<8} {}",
                    tx.id,
                    format_local(tx.created_at, tz),
                    tx.buyer_name,
                    tx.payment_method.name,
                    tx.payment_status,
                    format_rupiah(tx.total)
                );
            }
        }
        Command::Report {
            period,
            search,
            csv,
            json,
        } => {
            let query = LedgerQuery::new()
                .with_period(period)
                .with_text(search.unwrap_or_default());
            let report = ReportProjector::new(session.timezone()).project(session.history(&query));

            if json {
                write_json(&report, std::io::stdout().lock())?;
            } else {
                let s = &report.summary;
                println!("Total Transaksi   : {}", s.transaction_count);
                println!("Total Pendapatan  : {}", format_rupiah(s.revenue));
                println!(
                    "Sudah Dibayar     : {} ({})",
                    format_rupiah(s.paid_revenue),
                    s.paid_count
                );
                println!(
                    "Belum Dibayar     : {} ({})",
                    format_rupiah(s.pending_revenue),
                    s.pending_count
                );
                for b in &s.by_payment_method {
                    println!("  {:<16} {} ({})", b.method, format_rupiah(b.amount), b.count);
                }
            }

            if let Some(path) = csv {
                export_csv(&report, &path)?;
                println!("Exported {} row(s) to {}", report.rows.len(), path.display());
            }
        }
        Command::SetStatus { id, status } => {
            let tx = session.set_payment_status(&id, status).await?;
            println!("{} is now {}", tx.id, tx.payment_status);
        }
        Command::Sell {
            method,
            items,
            pre_order,
            buyer,
            unpaid,
        } => {
            for item in &items {
                let (product_id, quantity) = parse_item(item)?;
                session.add_product(product_id)?;
                if quantity != 1
                    && let Some((index, line)) = session.cart().line_for(product_id)
                {
                    let target = i64::from(line.quantity) + quantity - 1;
                    session.set_quantity(index, target)?;
                }
            }
            session.select_payment_method(&method)?;
            if pre_order {
                session.set_delivery_type(DeliveryType::PreOrder);
                session.set_buyer_name(buyer.unwrap_or_default());
                session.set_paid(!unpaid);
            }

            let tx = session.submit().await?;
            println!(
                "Recorded {} for {}: {} ({})",
                tx.id,
                tx.buyer_name,
                format_rupiah(tx.total),
                tx.payment_status
            );
        }
        Command::AddProduct {
            name,
            price,
            category,
        } => {
            let product = session
                .catalog()
                .create_product(ProductCreate {
                    name,
                    price,
                    category,
                })
                .await?;
            println!("Created product {} ({})", product.name, product.id);
        }
        Command::AddPaymentMethod { name } => {
            let method = session
                .catalog()
                .create_payment_method(PaymentMethodCreate { name })
                .await?;
            println!("Created payment method {} ({})", method.name, method.id);
        }
    }

    Ok(())
}

/// `<id>` or `<id>:<qty>`, quantity at least 1
fn parse_item(raw: &str) -> Result<(&str, i64), CashierError> {
    let Some((id, qty)) = raw.split_once(':') else {
        return Ok((raw.trim(), 1));
    };
    let quantity = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| CashierError::invalid_input("item", format!("bad quantity in {raw}")))?;
    if quantity < 1 {
        return Err(CashierError::invalid_input(
            "item",
            format!("quantity must be at least 1 in {raw}"),
        ));
    }
    Ok((id.trim(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("p1").unwrap(), ("p1", 1));
        assert_eq!(parse_item(" p1 : 3 ").unwrap(), ("p1", 3));
        assert!(parse_item("p1:x").is_err());
    }

    #[test]
    fn test_parse_item_rejects_non_positive_quantity() {
        for raw in ["p1:0", "p1:-3"] {
            assert!(matches!(
                parse_item(raw),
                Err(CashierError::InvalidInput { field: "item", .. })
            ));
        }
    }

    #[test]
    fn test_cli_parses_sell() {
        let cli = Cli::try_parse_from([
            "cashier", "sell", "--method", "pm1", "--item", "p1:2", "--item", "p2",
            "--pre-order", "--buyer", "Rina", "--unpaid",
        ])
        .unwrap();
        match cli.command {
            Command::Sell {
                items,
                pre_order,
                unpaid,
                ..
            } => {
                assert_eq!(items, ["p1:2", "p2"]);
                assert!(pre_order && unpaid);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
