//! Coffer Teller - PIN-vault CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coffer_core::{
    account::{format_balance, parse_balance},
    PinGenerator, PinLength, RngDigits, XorObfuscator,
};
use coffer_teller::{AccountStore, LockoutPolicy, Teller, TellerConfig};

/// Coffer Teller - PIN-guarded account store with lockout enforcement
#[derive(Parser)]
#[command(name = "coffer-teller")]
#[command(about = "PIN-guarded account store with lockout enforcement")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a teller configuration file (JSON); defaults apply if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the account store, overriding the configured location
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account with a generated PIN
    CreateAccount {
        /// Username (no '|' characters)
        #[arg(long)]
        username: String,

        /// PIN length: 4 or 6
        #[arg(long, default_value = "4")]
        pin_length: usize,
    },

    /// Verify a PIN against a stored account
    Authenticate {
        #[arg(long)]
        username: String,

        #[arg(long)]
        pin: String,
    },

    /// Change an account's PIN (requires the current PIN)
    ChangePin {
        #[arg(long)]
        username: String,

        #[arg(long)]
        current_pin: String,

        #[arg(long)]
        new_pin: String,
    },

    /// Show an account's balance
    Balance {
        #[arg(long)]
        username: String,

        #[arg(long)]
        pin: String,
    },

    /// Withdraw an amount, e.g. --amount 125.50
    Withdraw {
        #[arg(long)]
        username: String,

        #[arg(long)]
        pin: String,

        #[arg(long)]
        amount: String,
    },

    /// Deposit an amount, e.g. --amount 125.50
    Deposit {
        #[arg(long)]
        username: String,

        #[arg(long)]
        pin: String,

        #[arg(long)]
        amount: String,
    },

    /// List all accounts (admin view; PINs are never shown)
    ListAccounts,

    /// Show store location and account counts
    Status,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffer_teller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TellerConfig::load(path)?,
        None => TellerConfig::default(),
    };
    if let Some(path) = cli.data_file {
        config.data_path = path;
    }

    let obfuscator = XorObfuscator::new(config.obfuscation_key.as_bytes().to_vec())?;
    let store = AccountStore::open(config.data_path.clone(), Box::new(obfuscator))?;
    let generator = PinGenerator::new(
        config.extra_banned_pins.iter().cloned(),
        coffer_core::MAX_GENERATION_ATTEMPTS,
    );
    let mut teller = Teller::new(
        store,
        LockoutPolicy::new(config.max_wrong_attempts),
        generator,
        config.opening_balance_cents,
    );

    match cli.command {
        Commands::CreateAccount {
            username,
            pin_length,
        } => {
            let length = PinLength::from_digits(pin_length)
                .ok_or_else(|| anyhow::anyhow!("PIN length must be 4 or 6"))?;
            let mut digits = RngDigits(rand::rngs::OsRng);
            let account = teller.create_account(&username, length, &mut digits)?;

            println!("Account created: {}", account.username);
            println!("Generated PIN: {}", account.pin);
            println!("(Shown once; store it securely.)");
            println!("Opening balance: {}", format_balance(account.balance_cents));
        }

        Commands::Authenticate { username, pin } => {
            teller.authenticate(&username, &pin)?;
            println!("Authentication successful.");
        }

        Commands::ChangePin {
            username,
            current_pin,
            new_pin,
        } => {
            teller.change_pin(&username, &current_pin, &new_pin)?;
            println!("PIN changed.");
        }

        Commands::Balance { username, pin } => {
            let balance = teller.balance(&username, &pin)?;
            println!("Balance: {}", format_balance(balance));
        }

        Commands::Withdraw {
            username,
            pin,
            amount,
        } => {
            let cents = parse_balance(&amount)?;
            let balance = teller.withdraw(&username, &pin, cents)?;
            println!("Dispensed {}. New balance: {}", amount, format_balance(balance));
        }

        Commands::Deposit {
            username,
            pin,
            amount,
        } => {
            let cents = parse_balance(&amount)?;
            let balance = teller.deposit(&username, &pin, cents)?;
            println!("Deposited {}. New balance: {}", amount, format_balance(balance));
        }

        Commands::ListAccounts => {
            let rows = teller.list_accounts();
            if rows.is_empty() {
                println!("No accounts.");
            } else {
                println!("{:<24} {:>14} {:>8}", "USERNAME", "BALANCE", "LOCKED");
                for row in rows {
                    println!(
                        "{:<24} {:>14} {:>8}",
                        row.username,
                        format_balance(row.balance_cents),
                        if row.locked { "yes" } else { "no" }
                    );
                }
            }
        }

        Commands::Status => {
            let store = teller.store();
            let locked = teller.list_accounts().iter().filter(|r| r.locked).count();
            println!("Store: {}", store.path().display());
            println!("Accounts: {}", store.len());
            println!("Locked: {}", locked);
        }
    }

    Ok(())
}
