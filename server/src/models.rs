use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pantry_core::UserProfile;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Profile {
    pub email: String,
    pub name: String,
    pub preferences: Vec<String>,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for UserProfile {
    fn from(row: Profile) -> Self {
        UserProfile {
            name: row.name,
            email: row.email,
            preferences: row.preferences,
            items: row.items,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub preferences: &'a [String],
    pub items: &'a [String],
}

impl<'a> From<&'a UserProfile> for NewProfile<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        NewProfile {
            email: &profile.email,
            name: &profile.name,
            preferences: &profile.preferences,
            items: &profile.items,
        }
    }
}
