//! Prints an Argon2id PHC string for `ADMIN_PASSWORD_HASH`.
//!
//! The password is read from the first line of stdin so it stays out of
//! shell history.

use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use approvals_site::passwords::Passwords;

fn main() -> Result<()> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("no password given on stdin");
    }

    let hash = Passwords::default().hash(password)?;
    println!("{hash}");
    Ok(())
}
