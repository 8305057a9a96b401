use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::percentage;

/// Onboarding steps, in the order they are presented
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    EnumIter,
    strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistStepCode {
    AddVehicle,
    AddProduct,
    CreateOrder,
    CompleteDelivery,
    CaptureDeliveryProof,
}

impl ChecklistStepCode {
    pub fn title(self) -> &'static str {
        match self {
            Self::AddVehicle => "Add a vehicle",
            Self::AddProduct => "Add a product",
            Self::CreateOrder => "Create an order",
            Self::CompleteDelivery => "Complete a delivery",
            Self::CaptureDeliveryProof => "Capture a delivery proof",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AddVehicle => "Register at least one vehicle in your fleet",
            Self::AddProduct => "Create your first catalog product",
            Self::CreateOrder => "Create an order for a customer",
            Self::CompleteDelivery => "Mark an order as delivered",
            Self::CaptureDeliveryProof => "Attach a photo, signature or document to an order",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistStepResponse {
    pub step_code: ChecklistStepCode,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl ChecklistStepResponse {
    pub fn new(step_code: ChecklistStepCode, completed: bool) -> Self {
        Self {
            step_code,
            title: step_code.title().to_string(),
            description: step_code.description().to_string(),
            completed,
        }
    }
}

/// Checklist state for one user; `percentage` is derived, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistProgressResponse {
    pub user_id: Uuid,
    pub steps: Vec<ChecklistStepResponse>,
    pub total_steps: u64,
    pub completed_steps: u64,
    pub percentage: f64,
    pub active_orders: u64,
    pub completed: bool,
}

impl ChecklistProgressResponse {
    pub fn new(user_id: Uuid, steps: Vec<ChecklistStepResponse>, active_orders: u64) -> Self {
        let total_steps = steps.len() as u64;
        let completed_steps = steps.iter().filter(|s| s.completed).count() as u64;
        Self {
            user_id,
            total_steps,
            completed_steps,
            percentage: checklist_percentage(completed_steps, total_steps),
            active_orders,
            completed: total_steps > 0 && completed_steps == total_steps,
            steps,
        }
    }

    /// Builds every step in presentation order from a completion predicate
    pub fn from_predicate(
        user_id: Uuid,
        active_orders: u64,
        is_completed: impl Fn(ChecklistStepCode) -> bool,
    ) -> Self {
        let steps = ChecklistStepCode::iter()
            .map(|code| ChecklistStepResponse::new(code, is_completed(code)))
            .collect();
        Self::new(user_id, steps, active_orders)
    }
}

/// Completed share of the checklist, two decimals; 0 when there are no steps
pub fn checklist_percentage(completed_steps: u64, total_steps: u64) -> f64 {
    percentage(completed_steps, total_steps)
}
