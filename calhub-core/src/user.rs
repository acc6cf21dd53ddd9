//! Users, their settings, and the password-less view sent to clients.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::error::{CalHubError, CalHubResult};
use crate::identifier::Identifier;

/// Display preferences for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// IANA timezone name
    pub timezone: String,
    pub twenty_four_hour: bool,
    pub show_week_number: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            timezone: "UTC".to_string(),
            twenty_four_hour: true,
            show_week_number: false,
        }
    }
}

impl UserSettings {
    pub fn set_timezone(&mut self, timezone: &str) -> CalHubResult<()> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| CalHubError::validation(format!("Unknown timezone '{timezone}'")))?;
        self.timezone = tz.name().to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Identifier,
    username: String,
    password: String,
    calendars: Vec<Calendar>,
    settings: UserSettings,
}

/// What clients get to see of a user: everything except the password.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Identifier,
    pub username: String,
    pub calendars: Vec<Calendar>,
    pub settings: UserSettings,
}

impl User {
    /// A new user owning a single default calendar.
    pub fn new(username: &str, password: &str) -> Self {
        User {
            id: Identifier::new(),
            username: username.to_string(),
            password: password.to_string(),
            calendars: vec![Calendar::new(None)],
            settings: UserSettings::default(),
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn calendars(&self) -> Vec<Calendar> {
        self.calendars.clone()
    }

    pub fn calendar(&self, id: Identifier) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.id() == id)
    }

    pub fn calendar_mut(&mut self, id: Identifier) -> Option<&mut Calendar> {
        self.calendars.iter_mut().find(|c| c.id() == id)
    }

    pub fn add_calendar(&mut self, calendar: Calendar) {
        self.calendars.push(calendar);
    }

    /// Remove an owned calendar. Returns false if the user has no such calendar.
    pub fn remove_calendar(&mut self, id: Identifier) -> bool {
        let before = self.calendars.len();
        self.calendars.retain(|c| c.id() != id);
        self.calendars.len() != before
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut UserSettings {
        &mut self.settings
    }

    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            calendars: self.calendars.clone(),
            settings: self.settings.clone(),
        }
    }
}
