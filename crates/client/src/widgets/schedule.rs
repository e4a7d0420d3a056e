use detailing_auth::SessionToken;
use detailing_core::model::{Blackout, BlackoutInput, ScheduleDay, ScheduleDayInput, Weekday};
use detailing_core::validation::{validate_blackout, validate_schedule_day};
use detailing_core::{BlackoutId, transitions};

use crate::endpoints::admin;
use crate::widgets::WidgetError;
use crate::{ApiClient, ApiError};

/// Weekly opening hours plus blackout dates.
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    client: ApiClient,
    token: SessionToken,
    days: Vec<ScheduleDay>,
    blackouts: Vec<Blackout>,
}

impl ScheduleEditor {
    pub fn new(client: ApiClient, token: SessionToken) -> Self {
        Self {
            client,
            token,
            days: Vec::new(),
            blackouts: Vec::new(),
        }
    }

    pub fn days(&self) -> &[ScheduleDay] {
        &self.days
    }

    pub fn blackouts(&self) -> &[Blackout] {
        &self.blackouts
    }

    /// Load days and blackouts together; either failing leaves both as they
    /// were.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let (mut days, mut blackouts) = tokio::try_join!(
            admin::schedule(&self.client, &self.token),
            admin::blackouts(&self.client, &self.token),
        )?;
        days.sort_by_key(|d| d.weekday);
        blackouts.sort_by_key(|b| (b.start_date, b.end_date));
        self.days = days;
        self.blackouts = blackouts;
        Ok(())
    }

    pub async fn save_day(&mut self, weekday: Weekday, input: &ScheduleDayInput) -> Result<&ScheduleDay, WidgetError> {
        validate_schedule_day(input)?;
        let saved = admin::save_schedule_day(&self.client, &self.token, weekday, input).await?;
        let key = saved.weekday;
        self.days = transitions::schedule_day_saved(std::mem::take(&mut self.days), saved);
        // the saved day is always present after the transition
        let idx = self.days.iter().position(|d| d.weekday == key).unwrap_or(0);
        Ok(&self.days[idx])
    }

    pub async fn add_blackout(&mut self, input: &BlackoutInput) -> Result<&Blackout, WidgetError> {
        validate_blackout(input)?;
        let added = admin::create_blackout(&self.client, &self.token, input).await?;
        let id = added.id;
        self.blackouts = transitions::blackout_added(std::mem::take(&mut self.blackouts), added);
        let idx = self.blackouts.iter().position(|b| b.id == id).unwrap_or(0);
        Ok(&self.blackouts[idx])
    }

    pub async fn remove_blackout(&mut self, id: BlackoutId) -> Result<(), ApiError> {
        admin::delete_blackout(&self.client, &self.token, id).await?;
        self.blackouts = transitions::remove(std::mem::take(&mut self.blackouts), id);
        Ok(())
    }
}
