use chrono::{Datelike, Utc};

use detailing_auth::SessionToken;
use detailing_core::model::{Vehicle, VehicleInput};
use detailing_core::validation::validate_vehicle;
use detailing_core::{VehicleId, transitions};

use crate::endpoints::account;
use crate::widgets::WidgetError;
use crate::{ApiClient, ApiError};

/// "My vehicles" list with add, edit and delete.
#[derive(Debug, Clone)]
pub struct VehicleManager {
    client: ApiClient,
    token: SessionToken,
    vehicles: Vec<Vehicle>,
}

impl VehicleManager {
    pub fn new(client: ApiClient, token: SessionToken, vehicles: Vec<Vehicle>) -> Self {
        Self {
            client,
            token,
            vehicles,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub async fn load(&mut self) -> Result<&[Vehicle], ApiError> {
        self.vehicles = account::vehicles(&self.client, &self.token).await?;
        Ok(&self.vehicles)
    }

    pub async fn create(&mut self, input: &VehicleInput) -> Result<&Vehicle, WidgetError> {
        validate_vehicle(input, Utc::now().year())?;
        let created = account::create_vehicle(&self.client, &self.token, input).await?;
        Ok(self.upsert(created))
    }

    pub async fn update(&mut self, id: VehicleId, input: &VehicleInput) -> Result<&Vehicle, WidgetError> {
        validate_vehicle(input, Utc::now().year())?;
        let updated = account::update_vehicle(&self.client, &self.token, id, input).await?;
        Ok(self.upsert(updated))
    }

    pub async fn delete(&mut self, id: VehicleId) -> Result<(), ApiError> {
        account::delete_vehicle(&self.client, &self.token, id).await?;
        self.vehicles = transitions::remove(std::mem::take(&mut self.vehicles), id);
        Ok(())
    }

    fn upsert(&mut self, vehicle: Vehicle) -> &Vehicle {
        let id = vehicle.id;
        self.vehicles = transitions::upsert(std::mem::take(&mut self.vehicles), vehicle);
        // upsert always leaves exactly one element with this id
        let idx = self.vehicles.iter().rposition(|v| v.id == id).unwrap_or(0);
        &self.vehicles[idx]
    }
}
