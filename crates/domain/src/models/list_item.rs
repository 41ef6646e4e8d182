//! List item domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// List item domain model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListItem {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub product_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub purchased: bool,
    pub notes: Option<String>,
    /// Lower value = higher priority by convention; no enforced range.
    pub priority: Option<i32>,
    pub added_by: Option<Uuid>,
    pub purchased_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to add an item to a list.
///
/// `added_by`, `purchased` and `purchased_by` are not accepted here: the
/// service stamps them from the authenticated requester.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateListItemRequest {
    #[validate(length(min = 1, max = 200, message = "Product name must be 1-200 characters"))]
    pub product_name: String,

    #[validate(range(min = 0.0, message = "Quantity must be non-negative"))]
    pub quantity: f64,

    #[validate(length(max = 50, message = "Unit must be at most 50 characters"))]
    pub unit: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,

    pub priority: Option<i32>,
}

/// Request to update an item.
///
/// Absent fields keep their stored value. `purchased` only takes effect when
/// it differs from the current flag (see [`purchase_transition`]).
#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(rename_all = "snake_case")]
pub struct UpdateListItemRequest {
    #[validate(length(min = 1, max = 200, message = "Product name must be 1-200 characters"))]
    pub product_name: Option<String>,

    #[validate(range(min = 0.0, message = "Quantity must be non-negative"))]
    pub quantity: Option<f64>,

    #[validate(length(max = 50, message = "Unit must be at most 50 characters"))]
    pub unit: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,

    pub priority: Option<i32>,

    pub purchased: Option<bool>,
}

/// List item representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListItemResponse {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub product_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub purchased: bool,
    pub notes: Option<String>,
    pub priority: Option<i32>,
    pub added_by: Option<Uuid>,
    pub purchased_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ListItem> for ListItemResponse {
    fn from(item: ListItem) -> Self {
        Self {
            id: item.id,
            shopping_list_id: item.shopping_list_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit: item.unit,
            purchased: item.purchased,
            notes: item.notes,
            priority: item.priority,
            added_by: item.added_by,
            purchased_by: item.purchased_by,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Resolves the `(purchased, purchased_by)` pair for an item update.
///
/// The flag only acts when it differs from the stored value: a transition to
/// `true` records the requester as the purchaser, a transition back to
/// `false` clears it, and re-asserting the current value leaves the
/// purchaser untouched.
pub fn purchase_transition(
    current_purchased: bool,
    current_purchased_by: Option<Uuid>,
    requested: Option<bool>,
    requester: Uuid,
) -> (bool, Option<Uuid>) {
    match requested {
        Some(value) if value != current_purchased => {
            if value {
                (true, Some(requester))
            } else {
                (false, None)
            }
        }
        _ => (current_purchased, current_purchased_by),
    }
}
