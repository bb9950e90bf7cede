//! Glue between a mail composer and the subject engine.
//!
//! A host exposes the subject of an open draft; on each lifecycle event the
//! current settings are loaded, the subject is normalized and written back
//! only when it changed. Failures are logged and swallowed so a broken store
//! or handle can never block sending.

use anyhow::Result;

use crate::normalize::normalize_subject;
use crate::store::repo::SettingsStore;

pub trait ComposeHost {
    type Handle: ?Sized;

    fn get_subject(&self, handle: &Self::Handle) -> Result<String>;
    fn set_subject(&self, handle: &Self::Handle, subject: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeEvent {
    WindowOpened,
    BeforeSend,
}

impl ComposeEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComposeEvent::WindowOpened => "window-opened",
            ComposeEvent::BeforeSend => "before-send",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeOutcome {
    Updated { from: String, to: String },
    Unchanged,
    Failed,
}

pub fn clean_subject_on_compose<H: ComposeHost>(
    host: &H,
    handle: &H::Handle,
    store: &dyn SettingsStore,
    event: ComposeEvent,
) -> ComposeOutcome {
    match try_clean(host, handle, store) {
        Ok(Some((from, to))) => {
            log::info!("[{}] subject rewritten: {from:?} -> {to:?}", event.as_str());
            ComposeOutcome::Updated { from, to }
        }
        Ok(None) => {
            log::debug!("[{}] subject already clean", event.as_str());
            ComposeOutcome::Unchanged
        }
        Err(e) => {
            log::error!("[{}] error cleaning subject: {e:#}", event.as_str());
            ComposeOutcome::Failed
        }
    }
}

fn try_clean<H: ComposeHost>(
    host: &H,
    handle: &H::Handle,
    store: &dyn SettingsStore,
) -> Result<Option<(String, String)>> {
    let config = store.load()?.to_configuration();
    let current = host.get_subject(handle)?;
    let cleaned = normalize_subject(&current, &config);

    if cleaned == current {
        return Ok(None);
    }
    host.set_subject(handle, &cleaned)?;
    Ok(Some((current, cleaned)))
}
