use crate::config::Config;
use crate::identity::ClerkClient;
use crate::platform::state_paths;
use crate::state::{Session, State, with_state_lock};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::warn;

/// Look the user up when a backend secret is configured; otherwise trust the id.
pub fn resolve_session(config: &Config, user_id: &str) -> Result<Session> {
    let Some(secret) = config.identity_secret() else {
        warn!("identity secret not configured, signing in without verification");
        return Ok(Session {
            user_id: user_id.to_string(),
            display_name: None,
            email: None,
            signed_in_at: Utc::now(),
            verified: false,
        });
    };

    let client = ClerkClient::new(&secret).with_base_url(&config.identity.api_url);
    let user = client
        .get_user(user_id)
        .context("Failed to verify user")?
        .with_context(|| format!("User '{}' not found", user_id))?;

    Ok(Session {
        display_name: user.display_name(),
        email: user.primary_email().map(str::to_string),
        user_id: user.id,
        signed_in_at: Utc::now(),
        verified: true,
    })
}

pub fn sign_in(config: &Config, user_id: &str) -> Result<()> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        anyhow::bail!("User id must not be empty");
    }

    let session = resolve_session(config, user_id)?;
    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_ref())?;

    with_state_lock(&lock_path, &state_path, |state| {
        let who = session
            .display_name
            .clone()
            .unwrap_or_else(|| session.user_id.clone());
        state.session = Some(session);
        println!("✓ Signed in as {}", who);
        Ok(())
    })
}

pub fn sign_out(config: &Config) -> Result<()> {
    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_ref())?;

    with_state_lock(&lock_path, &state_path, |state| {
        match state.session.take() {
            Some(session) => println!("✓ Signed out {}", session.user_id),
            None => println!("Not signed in."),
        }
        Ok(())
    })
}

pub fn status(config: &Config) -> Result<()> {
    let (_, state_path) = state_paths(config.state.state_dir_override.as_ref())?;
    let state = State::load(&state_path)?;

    match state.session {
        Some(session) => {
            println!("Signed in:");
            println!("  User ID: {}", session.user_id);
            if let Some(name) = &session.display_name {
                println!("  Name: {}", name);
            }
            if let Some(email) = &session.email {
                println!("  Email: {}", email);
            }
            println!("  Since: {}", session.signed_in_at.format("%Y-%m-%d %H:%M"));
            println!("  Verified: {}", if session.verified { "yes" } else { "no" });
        }
        None => println!("Not signed in."),
    }

    if let Some(last_sync) = state.last_sync {
        println!("Last sync: {}", last_sync.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}
