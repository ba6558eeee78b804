//! Child profiles and the store that owns them.

use crate::config::{AppConfig, GameConfig, GameId};
use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile
{
    pub name: String,
    pub dob: NaiveDate,
    pub color: String,
    pub emoji: String,
    #[serde(default)]
    pub app_config: AppConfig,
}

impl Profile
{
    /// The game's configuration, or `None` when the game is missing or
    /// hidden for this child.
    pub fn playable(&self, game: GameId) -> Option<GameConfig>
    {
        self.app_config.get(game).filter(GameConfig::visible)
    }

    pub fn require(&self, game: GameId) -> Result<GameConfig, Error>
    {
        self.playable(game).ok_or_else(|| Error::GameUnavailable {
            profile: self.name.clone(),
            game,
        })
    }
}

pub fn default_profiles() -> Vec<Profile>
{
    vec![Profile {
        name: "Player".to_string(),
        dob: NaiveDate::from_ymd_opt(2018, 6, 1).unwrap_or_default(),
        color: "orange".to_string(),
        emoji: "🦊".to_string(),
        app_config: AppConfig::default(),
    }]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Profile])>;

/// Owns the profiles and tells subscribers about every change.
pub struct ProfileStore
{
    profiles: Vec<Profile>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ProfileStore
{
    pub fn new(profiles: Vec<Profile>) -> Self
    {
        Self {
            profiles,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Read a JSON array of profiles. Configs are clamped into range on the
    /// way in.
    pub fn load(path: &Path) -> Result<Self, Error>
    {
        let text = fs::read_to_string(path).map_err(|source| Error::ProfileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let profiles: Vec<Profile> =
            serde_json::from_str(&text).map_err(|source| Error::ProfileParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut store = Self::new(Vec::with_capacity(profiles.len()));
        for mut profile in profiles {
            profile.app_config = profile.app_config.sanitized();
            store.add(profile)?;
        }
        info!(path = %path.display(), count = store.profiles.len(), "profiles loaded");
        Ok(store)
    }

    pub fn profiles(&self) -> &[Profile]
    {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str>
    {
        self.profiles.iter().map(|profile| profile.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Profile>
    {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    pub fn require(&self, name: &str) -> Result<&Profile, Error>
    {
        self.get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    pub fn add(&mut self, profile: Profile) -> Result<(), Error>
    {
        if self.get(&profile.name).is_some() {
            return Err(Error::DuplicateProfile(profile.name));
        }
        debug!(name = %profile.name, "profile added");
        self.profiles.push(profile);
        self.notify();
        Ok(())
    }

    pub fn update(&mut self, name: &str, profile: Profile) -> Result<(), Error>
    {
        if profile.name != name && self.get(&profile.name).is_some() {
            return Err(Error::DuplicateProfile(profile.name));
        }
        let slot = self
            .profiles
            .iter_mut()
            .find(|existing| existing.name == name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))?;
        debug!(name, new_name = %profile.name, "profile updated");
        *slot = profile;
        self.notify();
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Profile>
    {
        let index = self.profiles.iter().position(|profile| profile.name == name)?;
        let removed = self.profiles.remove(index);
        debug!(name, "profile removed");
        self.notify();
        Some(removed)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[Profile]) + 'static) -> SubscriptionId
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool
    {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self)
    {
        for (_, listener) in &mut self.listeners {
            listener(&self.profiles);
        }
    }
}

impl Default for ProfileStore
{
    fn default() -> Self
    {
        Self::new(default_profiles())
    }
}
