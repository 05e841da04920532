//! Record sources for tenancy and payment data.
//!
//! The engine never performs I/O. A [`BillingRecords`] implementation hands
//! it fully resolved records: live queries in production, in-memory fixtures
//! in tests and tooling.

use async_trait::async_trait;
use banjara_shared::types::{FamilyId, RoomId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BillingError;
use super::types::{PaymentTransaction, TenancyRecord};

/// Source of the two independent reads a ledger needs.
#[async_trait]
pub trait BillingRecords: Send + Sync {
    /// Fetches the family's tenancy with the room rent resolved.
    async fn tenancy(&self, family_id: FamilyId) -> Result<TenancyRecord, BillingError>;

    /// Fetches every payment recorded for the family, in no particular order.
    async fn payments(&self, family_id: FamilyId) -> Result<Vec<PaymentTransaction>, BillingError>;
}

/// A resident family as stored by the family records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRecord {
    /// Family ID.
    pub id: FamilyId,
    /// Room the family occupies.
    pub room_id: RoomId,
    /// Name of the head of the family.
    #[serde(default)]
    pub head_name: String,
    /// Check-in date as stored.
    #[serde(default)]
    pub check_in_date: Option<String>,
    /// Check-out date as stored.
    #[serde(default)]
    pub check_out_date: Option<String>,
    /// Whether the family currently resides.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Soft-delete marker.
    #[serde(default)]
    pub is_deleted: bool,
}

fn default_true() -> bool {
    true
}

/// A rentable room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    /// Room ID.
    pub id: RoomId,
    /// Room number shown to staff.
    #[serde(default)]
    pub number: String,
    /// Monthly rent.
    pub rent: Decimal,
}

/// In-memory record source, loadable from a JSON fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRecords {
    /// Resident families.
    #[serde(default)]
    pub families: Vec<FamilyRecord>,
    /// Rooms.
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    /// Payments for all families.
    #[serde(default)]
    pub payments: Vec<PaymentTransaction>,
}

impl InMemoryRecords {
    /// Parses a fixture of `{ "families": [...], "rooms": [...], "payments": [...] }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the fixture shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Records a new payment. The next ledger request will include it.
    pub fn add_payment(&mut self, payment: PaymentTransaction) {
        self.payments.push(payment);
    }

    fn family(&self, family_id: FamilyId) -> Option<&FamilyRecord> {
        self.families
            .iter()
            .find(|family| family.id == family_id && !family.is_deleted)
    }
}

#[async_trait]
impl BillingRecords for InMemoryRecords {
    async fn tenancy(&self, family_id: FamilyId) -> Result<TenancyRecord, BillingError> {
        let family = self
            .family(family_id)
            .ok_or(BillingError::TenancyNotFound(family_id))?;
        let rent = self
            .rooms
            .iter()
            .find(|room| room.id == family.room_id)
            .map(|room| room.rent);

        Ok(TenancyRecord {
            family_id: family.id,
            room_id: family.room_id,
            check_in_date: family.check_in_date.clone(),
            check_out_date: family.check_out_date.clone(),
            rent,
            is_active: family.is_active,
        })
    }

    async fn payments(&self, family_id: FamilyId) -> Result<Vec<PaymentTransaction>, BillingError> {
        Ok(self
            .payments
            .iter()
            .filter(|payment| payment.family_id == family_id)
            .cloned()
            .collect())
    }
}
