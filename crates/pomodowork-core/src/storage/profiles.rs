//! Profile list management.

use crate::error::{Result, ValidationError};
use crate::profile::{builtin_profiles, Profile};

use super::database::Database;

/// The profile list plus the active selection, backed by the kv store.
///
/// An empty store is seeded with the built-in profiles; a missing or stale
/// active id falls back to the first profile.
#[derive(Debug, Clone)]
pub struct ProfileBook {
    profiles: Vec<Profile>,
    active_id: Option<String>,
}

impl ProfileBook {
    pub fn load(db: &Database) -> Result<Self> {
        let profiles = match db.profiles()? {
            Some(list) if !list.is_empty() => list,
            _ => builtin_profiles(),
        };
        let active_id = db
            .active_profile_id()?
            .filter(|id| profiles.iter().any(|p| &p.id == id))
            .or_else(|| profiles.first().map(|p| p.id.clone()));
        Ok(Self {
            profiles,
            active_id,
        })
    }

    pub fn save(&self, db: &Database) -> Result<()> {
        db.set_profiles(&self.profiles)?;
        if let Some(id) = &self.active_id {
            db.set_active_profile_id(id)?;
        }
        Ok(())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Profile> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn add(&mut self, profile: Profile) {
        let id = profile.id.clone();
        self.profiles.push(profile);
        if self.active_id.is_none() {
            self.active_id = Some(id);
        }
    }

    pub fn update(&mut self, profile: Profile) -> Result<(), ValidationError> {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => {
                *slot = profile;
                Ok(())
            }
            None => Err(ValidationError::UnknownProfile(profile.id)),
        }
    }

    /// Remove a profile. Built-ins are refused; removing the active profile
    /// moves the selection to the first remaining one.
    pub fn remove(&mut self, id: &str) -> Result<(), ValidationError> {
        let Some(profile) = self.get(id) else {
            return Err(ValidationError::UnknownProfile(id.into()));
        };
        if profile.is_builtin() {
            return Err(ValidationError::BuiltinProfile(id.into()));
        }
        self.profiles.retain(|p| p.id != id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.profiles.first().map(|p| p.id.clone());
        }
        Ok(())
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), ValidationError> {
        if self.get(id).is_none() {
            return Err(ValidationError::UnknownProfile(id.into()));
        }
        self.active_id = Some(id.to_string());
        Ok(())
    }
}
