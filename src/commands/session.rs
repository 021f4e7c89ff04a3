//! Session inspection and editing commands.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Duration, Utc};
use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use dynamostore_core::error::{ErrorKind, StoreError};
use dynamostore_core::traits::SessionStore;

/// Arguments for `find`
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Session token
    pub token: String,
    /// Print the payload base64-encoded instead of as UTF-8 text
    #[arg(long)]
    pub base64: bool,
}

/// Arguments for `commit`
#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Session token
    pub token: String,
    /// Payload
    pub data: String,
    /// Treat the payload as base64 and decode it before storing
    #[arg(long)]
    pub base64: bool,
    /// Seconds until the session expires
    #[arg(long, default_value_t = 3600)]
    pub ttl_seconds: i64,
}

/// Arguments for `delete`
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Session token
    pub token: String,
    /// Skip confirmation
    #[arg(long)]
    pub force: bool,
}

/// Result of a `find`
#[derive(Debug, Serialize)]
struct FoundSession {
    token: String,
    exists: bool,
    /// Base64 in JSON output regardless of `--base64`.
    data: Option<String>,
    #[serde(skip)]
    text: Option<String>,
}

impl fmt::Display for FoundSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "No live session for token '{}'", self.token),
        }
    }
}

/// Look up a session.
pub async fn find(
    args: &FindArgs,
    store: &dyn SessionStore,
    format: OutputFormat,
) -> Result<(), StoreError> {
    let payload = store.find(&args.token).await?;

    let found = FoundSession {
        token: args.token.clone(),
        exists: payload.is_some(),
        data: payload.as_deref().map(|p| STANDARD.encode(p)),
        text: payload.as_deref().map(|p| {
            if args.base64 {
                STANDARD.encode(p)
            } else {
                String::from_utf8_lossy(p).into_owned()
            }
        }),
    };

    output::print_item(&found, format);
    Ok(())
}

/// Create or replace a session.
pub async fn commit(
    args: &CommitArgs,
    store: &dyn SessionStore,
    format: OutputFormat,
) -> Result<(), StoreError> {
    let payload = if args.base64 {
        STANDARD.decode(&args.data).map_err(|e| {
            StoreError::with_source(ErrorKind::Serialization, "Invalid base64 payload", e)
        })?
    } else {
        args.data.clone().into_bytes()
    };

    let expiry = Duration::try_seconds(args.ttl_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| {
            StoreError::configuration(format!(
                "--ttl-seconds {} is out of range",
                args.ttl_seconds
            ))
        })?;
    store.commit(&args.token, &payload, expiry).await?;

    output::print_success(
        &format!(
            "Session '{}' committed ({} bytes, expires {})",
            args.token,
            payload.len(),
            expiry.to_rfc3339()
        ),
        format,
    );
    Ok(())
}

/// Delete a session.
pub async fn delete(
    args: &DeleteArgs,
    store: &dyn SessionStore,
    format: OutputFormat,
) -> Result<(), StoreError> {
    if !args.force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Delete session '{}'?", args.token))
            .default(false)
            .interact()
            .map_err(|e| StoreError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(&args.token).await?;
    output::print_success(&format!("Session '{}' deleted", args.token), format);
    Ok(())
}
