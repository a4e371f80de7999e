//! Login and logout commands - keychain credential management.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use catcard_fetch::{CredentialStore, Credentials, KeychainCredentials};

use crate::Cli;

/// Prompts for credentials and stores them in the system keychain.
///
/// The NetID is read from stdin; the password through a no-echo prompt.
pub fn run_login(cli: &Cli) -> Result<()> {
    print!("NetID: ");
    io::stdout().flush()?;
    let mut net_id = String::new();
    io::stdin().lock().read_line(&mut net_id)?;
    let net_id = net_id.trim().to_string();

    let password = rpassword::prompt_password("Password: ")?;

    let credentials = Credentials::new(net_id, password);
    if !credentials.is_complete() {
        bail!("Both NetID and password are required");
    }

    KeychainCredentials.set(&credentials)?;
    if !cli.quiet {
        println!("Credentials stored for {}", credentials.net_id);
    }
    Ok(())
}

/// Removes stored credentials from the system keychain.
pub fn run_logout(cli: &Cli) -> Result<()> {
    KeychainCredentials.clear()?;
    if !cli.quiet {
        println!("Credentials removed");
    }
    Ok(())
}
