//! Generate a self-signed certificate for serving Parlor over HTTPS on a LAN.
//!
//! Writes `cert.pem` and `key.pem`, valid for `localhost`, `127.0.0.1` and
//! this host's outbound IPv4 address.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-certgen
//! cargo run --bin parlor-certgen -- --out-dir ./tls --days 30
//! ```

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use parlor_certgen::{DEFAULT_VALIDITY_DAYS, certificate_params, generate, write_files};
use parlor_shared::{logger::setup_logger, network::local_ipv4};

#[derive(Parser, Debug)]
#[command(name = "parlor-certgen")]
#[command(about = "Generate a self-signed certificate for localhost and this host's LAN address", long_about = None)]
struct Args {
    /// Directory to write cert.pem and key.pem into
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of days the certificate stays valid
    #[arg(short = 'd', long, default_value_t = DEFAULT_VALIDITY_DAYS)]
    days: u32,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let local_ip = local_ipv4();
    tracing::info!("Generating certificate for IP: {} and localhost...", local_ip);

    let params = certificate_params(local_ip, Utc::now().date_naive(), args.days)?;
    let generated = generate(params)?;
    let (cert_path, key_path) = write_files(&generated, &args.out_dir)?;

    tracing::info!(
        "Certificates generated: {} and {}",
        cert_path.display(),
        key_path.display()
    );
    Ok(())
}

fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
