//! Notification commands.

use anyhow::Result;
use serde_json::Value;
use spendtrack_core::Notification;
use spendtrack_dispatch::Intent;
use spendtrack_store::NotificationFeed;

use super::{build_dispatcher, dispatch_and_wait, print_json, wants_json};
use crate::Cli;

/// Arguments for the notifications command.
#[derive(clap::Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

/// Notification subcommands.
#[derive(clap::Subcommand)]
pub enum NotificationsCommand {
    /// List notifications.
    List,

    /// Show the unread count.
    Unread,

    /// Mark one notification read.
    Read {
        /// Notification id.
        id: String,
    },

    /// Mark every notification read.
    ReadAll,

    /// Delete a notification.
    Delete {
        /// Notification id.
        id: String,
    },
}

fn print_feed(data: &Value, unread: &Value) {
    let Ok(items) = serde_json::from_value::<Vec<Notification>>(data.clone()) else {
        println!("{data}");
        return;
    };

    let mut feed = NotificationFeed::new();
    feed.set_items(items);
    if let Some(count) = unread.get("count").and_then(Value::as_u64) {
        feed.set_unread_count(u32::try_from(count).unwrap_or(u32::MAX));
    }

    if feed.items().is_empty() {
        println!("No notifications.");
        return;
    }

    for n in feed.items() {
        let marker = if n.is_read { " " } else { "*" };
        println!(
            "{marker} {}  [{}]  {}  {}",
            n.created_at.format("%Y-%m-%d %H:%M"),
            n.kind,
            n.title,
            n.message
        );
    }
    println!();
    println!("{} unread", feed.unread_count());
}

/// Runs a notifications subcommand.
pub async fn run(args: &NotificationsArgs, cli: &Cli) -> Result<()> {
    let dispatcher = build_dispatcher(cli)?;

    match &args.command {
        NotificationsCommand::List => {
            let data = dispatch_and_wait(&dispatcher, Intent::GetNotifications).await?;
            if wants_json(cli) {
                return print_json(&data, cli.pretty);
            }
            // Best effort; the feed renders without it when the count
            // fetch fails.
            let unread = dispatch_and_wait(&dispatcher, Intent::GetUnreadCount)
                .await
                .unwrap_or(Value::Null);
            print_feed(&data, &unread);
        }
        NotificationsCommand::Unread => {
            let data = dispatch_and_wait(&dispatcher, Intent::GetUnreadCount).await?;
            if wants_json(cli) {
                return print_json(&data, cli.pretty);
            }
            match data.get("count").and_then(Value::as_u64) {
                Some(count) => println!("{count} unread"),
                None => println!("{data}"),
            }
        }
        NotificationsCommand::Read { id } => {
            let data =
                dispatch_and_wait(&dispatcher, Intent::MarkAsRead { id: id.clone() }).await?;
            if wants_json(cli) {
                return print_json(&data, cli.pretty);
            }
            println!("Marked {id} read.");
        }
        NotificationsCommand::ReadAll => {
            let data = dispatch_and_wait(&dispatcher, Intent::MarkAllAsRead).await?;
            if wants_json(cli) {
                return print_json(&data, cli.pretty);
            }
            println!("Marked all notifications read.");
        }
        NotificationsCommand::Delete { id } => {
            let data =
                dispatch_and_wait(&dispatcher, Intent::DeleteNotification { id: id.clone() })
                    .await?;
            if wants_json(cli) {
                return print_json(&data, cli.pretty);
            }
            println!("Deleted {id}.");
        }
    }

    Ok(())
}
