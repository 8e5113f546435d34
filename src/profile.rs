//! User profile: the saved record and the edit draft.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub location: String,
    pub join_date: String,
    pub events_uploaded: u32,
    pub reputation: f32,
    pub badges: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Rajesh Kumar".into(),
            email: "rajesh.kumar@email.com".into(),
            avatar_url: "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=150".into(),
            location: "Koramangala, Bangalore".into(),
            join_date: "January 2024".into(),
            events_uploaded: 23,
            reputation: 4.8,
            badges: vec![
                "Verified Reporter".into(),
                "Community Helper".into(),
                "Early Adopter".into(),
            ],
        }
    }
}

/// Editable subset of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub location: String,
}

impl From<&UserProfile> for ProfileDraft {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            location: profile.location.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Email,
    Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileState {
    pub record: UserProfile,
    pub editing: bool,
    pub draft: ProfileDraft,
}

impl ProfileState {
    /// Enters edit mode, seeding the draft from the record.
    pub fn begin_edit(&mut self) {
        self.draft = ProfileDraft::from(&self.record);
        self.editing = true;
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) {
        if !self.editing {
            return;
        }
        match field {
            ProfileField::Name => self.draft.name = value,
            ProfileField::Email => self.draft.email = value,
            ProfileField::Location => self.draft.location = value,
        }
    }

    /// Commits the draft into the record and leaves edit mode.
    pub fn save(&mut self) {
        if !self.editing {
            return;
        }
        self.record.name = self.draft.name.clone();
        self.record.email = self.draft.email.clone();
        self.record.location = self.draft.location.clone();
        self.editing = false;
    }

    /// Discards the draft and leaves edit mode.
    pub fn cancel(&mut self) {
        self.draft = ProfileDraft::from(&self.record);
        self.editing = false;
    }
}
