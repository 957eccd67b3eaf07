//! Sign-in, sign-up, and sign-out commands.

use anyhow::Result;
use spendtrack_core::{SignInPayload, SignUpPayload};
use spendtrack_dispatch::Intent;
use tracing::info;

use super::{build_dispatcher, dispatch_and_wait, print_json, wants_json};
use crate::Cli;

/// Arguments for the signin command.
#[derive(clap::Args)]
pub struct SigninArgs {
    /// Username.
    pub user_name: String,

    /// Password; prompted for when omitted.
    #[arg(long, short)]
    pub password: Option<String>,
}

/// Arguments for the signup command.
#[derive(clap::Args)]
pub struct SignupArgs {
    /// Username.
    pub user_name: String,

    /// Password; prompted for when omitted.
    #[arg(long, short)]
    pub password: Option<String>,

    /// Contact email.
    #[arg(long, short)]
    pub email: Option<String>,
}

fn read_password(provided: Option<&String>) -> Result<String> {
    if let Some(password) = provided {
        return Ok(password.clone());
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Runs the signin command.
pub async fn signin(args: &SigninArgs, cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;
    let password = read_password(args.password.as_ref())?;

    info!(user_name = %args.user_name, "Signing in");
    let data = dispatch_and_wait(
        &dispatcher,
        Intent::SignIn(SignInPayload {
            user_name: args.user_name.clone(),
            password,
        }),
    )
    .await?;

    if wants_json(cli) {
        return print_json(&data, cli.pretty);
    }
    println!("Signed in as {}.", args.user_name);
    Ok(())
}

/// Runs the signup command.
pub async fn signup(args: &SignupArgs, cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;
    let password = read_password(args.password.as_ref())?;

    let data = dispatch_and_wait(
        &dispatcher,
        Intent::SignUp(SignUpPayload {
            user_name: args.user_name.clone(),
            password,
            email: args.email.clone(),
        }),
    )
    .await?;

    if wants_json(cli) {
        return print_json(&data, cli.pretty);
    }
    println!("Account created for {}.", args.user_name);
    Ok(())
}

/// Runs the signout command.
pub async fn signout(cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;
    dispatcher
        .client()
        .sign_out()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear credentials: {e}"))?;

    if !cli.quiet {
        println!("Signed out.");
    }
    Ok(())
}
