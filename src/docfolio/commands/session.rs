use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocfolioConfig;
use crate::error::{DocfolioError, Result};
use crate::session::{Session, SessionStore};
use crate::store::backend::KeyValueStore;
use tracing::info;

pub fn login<K: KeyValueStore>(
    sessions: &SessionStore<K>,
    config: &DocfolioConfig,
    username: &str,
    password: &str,
) -> Result<CmdResult> {
    let Some(session) = Session::login(
        username.trim(),
        password,
        (config.username.as_str(), config.password.as_str()),
    ) else {
        sessions.clear()?;
        return Err(DocfolioError::Api("invalid credentials".into()));
    };

    sessions.save(&session)?;
    info!(username = username.trim(), "logged in");

    let mut result = CmdResult::default();
    if let Some(user) = &session.user {
        result.add_message(CmdMessage::success(format!("Welcome, {}", user.name)));
    }
    result.session = Some(session);
    Ok(result)
}

pub fn logout<K: KeyValueStore>(sessions: &SessionStore<K>) -> Result<CmdResult> {
    let was_active = sessions.load().is_active();
    sessions.clear()?;

    let mut result = CmdResult::default();
    if was_active {
        result.add_message(CmdMessage::success("Logged out"));
    } else {
        result.add_message(CmdMessage::info("Not logged in"));
    }
    Ok(result)
}

pub fn whoami<K: KeyValueStore>(sessions: &SessionStore<K>) -> Result<CmdResult> {
    let session = sessions.load();
    let mut result = CmdResult::default();
    match session.user.as_ref().filter(|_| session.is_active()) {
        Some(user) => result.add_message(CmdMessage::info(format!(
            "{} <{}> since {}",
            user.username,
            user.email,
            user.login_time.format("%Y-%m-%d %H:%M UTC")
        ))),
        None => result.add_message(CmdMessage::info("Not logged in")),
    }
    result.session = Some(session);
    Ok(result)
}
