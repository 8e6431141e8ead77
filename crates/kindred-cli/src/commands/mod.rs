//! Subcommand handlers and the backend they share.

pub mod config;
pub mod schedule;
pub mod suggest;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kindred_core::api::{CalendarReader, PreferencesReader, ProfileReader, SuggestionStore};
use kindred_core::{AvailabilityScheduler, Config, CoreError, MemoryApi, RestClient, SuggestionEngine};
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Collaborators for one invocation: the REST backend, or a fixture file
/// that is written back after mutating commands.
pub struct Backend {
    preferences: Arc<dyn PreferencesReader>,
    calendar: Arc<dyn CalendarReader>,
    profiles: Arc<dyn ProfileReader>,
    store: Arc<dyn SuggestionStore>,
    fixture: Option<(Arc<MemoryApi>, PathBuf)>,
}

impl Backend {
    pub fn build(fixture: Option<&Path>, config: &Config) -> Result<Self, CoreError> {
        match fixture {
            Some(path) => {
                debug!(fixture = %path.display(), "using fixture backend");
                let api = Arc::new(MemoryApi::load(path)?);
                Ok(Self {
                    preferences: api.clone(),
                    calendar: api.clone(),
                    profiles: api.clone(),
                    store: api.clone(),
                    fixture: Some((api, path.to_path_buf())),
                })
            }
            None => {
                debug!(base_url = %config.api.base_url, "using REST backend");
                let client = Arc::new(RestClient::from_config(&config.api)?);
                Ok(Self {
                    preferences: client.clone(),
                    calendar: client.clone(),
                    profiles: client.clone(),
                    store: client,
                    fixture: None,
                })
            }
        }
    }

    pub fn scheduler(&self, config: &Config) -> AvailabilityScheduler {
        AvailabilityScheduler::with_config(
            self.preferences.clone(),
            self.calendar.clone(),
            config.scheduler.clone(),
        )
    }

    pub fn engine(&self, config: &Config) -> SuggestionEngine {
        let engine = match config.suggestions.seed {
            Some(seed) => SuggestionEngine::with_seed(self.profiles.clone(), self.store.clone(), seed),
            None => SuggestionEngine::new(self.profiles.clone(), self.store.clone()),
        };
        engine.with_defaults(config.profile_defaults())
    }

    /// Write fixture state back to disk. No-op against REST.
    pub fn persist(&self) -> Result<(), CoreError> {
        if let Some((api, path)) = &self.fixture {
            debug!(fixture = %path.display(), "writing fixture back");
            api.save(path)?;
        }
        Ok(())
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
