use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::persistence::Lot;

/// Lot request/response body.
///
/// `start_date` and `end_date` are free text and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LotDto {
    #[serde(default)]
    pub id: i32,
    #[validate(
        required(message = "The name field is required"),
        length(max = 100, message = "The name field must be at most 100 characters")
    )]
    pub name: Option<String>,
    #[validate(required(message = "The price field is required"))]
    pub price: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub event_id: i32,
}

impl From<Lot> for LotDto {
    fn from(lot: Lot) -> Self {
        Self {
            id: lot.id,
            name: Some(lot.name),
            price: Some(lot.price),
            start_date: lot.start_date,
            end_date: lot.end_date,
            quantity: lot.quantity,
            event_id: lot.event_id,
        }
    }
}

impl From<LotDto> for Lot {
    fn from(dto: LotDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            price: dto.price.unwrap_or_default(),
            start_date: dto.start_date,
            end_date: dto.end_date,
            quantity: dto.quantity,
            event_id: dto.event_id,
        }
    }
}
