//! Reservation and notification request bodies
//!
//! Bodies deserialize with every field optional so that validation can report
//! all missing fields at once instead of failing on the first.

use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, Validator};

/// POST /email/reservationConfirmation body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationConfirmationBody {
    pub contact_email: Option<String>,
    pub reservation_id: Option<String>,
}

/// POST /email/reservationStatus body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationStatusBody {
    pub contact_email: Option<String>,
    pub reservation_id: Option<String>,
    pub state: Option<String>,
}

/// POST /innkeeperReservation body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationBody {
    #[serde(alias = "tenant_name")]
    pub tenant_name: Option<String>,
    #[serde(alias = "tenant_reason")]
    pub tenant_reason: Option<String>,
    #[serde(alias = "contact_name")]
    pub contact_name: Option<String>,
    #[serde(alias = "contact_email")]
    pub contact_email: Option<String>,
    #[serde(alias = "contact_phone")]
    pub contact_phone: Option<String>,
}

/// Validated confirmation notice
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationConfirmation {
    pub contact_email: String,
    pub reservation_id: String,
}

/// Validated status-change notice
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationStatus {
    pub contact_email: String,
    pub reservation_id: String,
    pub state: String,
}

/// Validated reservation, in the shape the innkeeper service expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReservation {
    pub tenant_name: String,
    pub tenant_reason: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl ReservationConfirmationBody {
    pub fn validate(&self) -> Result<ReservationConfirmation, Vec<ValidationError>> {
        let mut v = Validator::new();
        let contact_email = v.email("contactEmail", self.contact_email.as_deref());
        let reservation_id = v.required("reservationId", self.reservation_id.as_deref());

        v.finish(|| ReservationConfirmation {
            contact_email: contact_email.unwrap_or_default().to_owned(),
            reservation_id: reservation_id.unwrap_or_default().to_owned(),
        })
    }
}

impl ReservationStatusBody {
    pub fn validate(&self) -> Result<ReservationStatus, Vec<ValidationError>> {
        let mut v = Validator::new();
        let contact_email = v.email("contactEmail", self.contact_email.as_deref());
        let reservation_id = v.required("reservationId", self.reservation_id.as_deref());
        let state = v.required("state", self.state.as_deref());

        v.finish(|| ReservationStatus {
            contact_email: contact_email.unwrap_or_default().to_owned(),
            reservation_id: reservation_id.unwrap_or_default().to_owned(),
            state: state.unwrap_or_default().to_owned(),
        })
    }
}

impl ReservationBody {
    pub fn validate(&self) -> Result<NewReservation, Vec<ValidationError>> {
        let mut v = Validator::new();
        let tenant_name = v.required("tenantName", self.tenant_name.as_deref());
        let tenant_reason = v.required("tenantReason", self.tenant_reason.as_deref());
        let contact_name = v.required("contactName", self.contact_name.as_deref());
        let contact_email = v.email("contactEmail", self.contact_email.as_deref());
        let contact_phone = v.required("contactPhone", self.contact_phone.as_deref());

        v.finish(|| NewReservation {
            tenant_name: tenant_name.unwrap_or_default().to_owned(),
            tenant_reason: tenant_reason.unwrap_or_default().to_owned(),
            contact_name: contact_name.unwrap_or_default().to_owned(),
            contact_email: contact_email.unwrap_or_default().to_owned(),
            contact_phone: contact_phone.unwrap_or_default().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(ValidationError::field).collect()
    }

    #[test]
    fn confirmation_rejects_bad_email() {
        let body: ReservationConfirmationBody =
            serde_json::from_str(r#"{"contactEmail": "bob", "reservationId": "r-1"}"#).unwrap();
        let errors = body.validate().unwrap_err();
        assert_eq!(fields(&errors), ["contactEmail"]);
    }

    #[test]
    fn confirmation_accepts_valid_body() {
        let body: ReservationConfirmationBody =
            serde_json::from_str(r#"{"contactEmail": "bob@example.com", "reservationId": "r-1"}"#)
                .unwrap();
        let ok = body.validate().unwrap();
        assert_eq!(ok.contact_email, "bob@example.com");
        assert_eq!(ok.reservation_id, "r-1");
    }

    #[test]
    fn status_requires_state() {
        let body: ReservationStatusBody = serde_json::from_str(
            r#"{"contactEmail": "bob@example.com", "reservationId": "r-1", "state": ""}"#,
        )
        .unwrap();
        assert_eq!(fields(&body.validate().unwrap_err()), ["state"]);
    }

    #[test]
    fn empty_reservation_lists_every_field() {
        let body: ReservationBody = serde_json::from_str("{}").unwrap();
        assert_eq!(
            fields(&body.validate().unwrap_err()),
            ["tenantName", "tenantReason", "contactName", "contactEmail", "contactPhone"]
        );
    }

    #[test]
    fn reservation_accepts_snake_case() {
        let body: ReservationBody = serde_json::from_str(
            r#"{
                "tenant_name": "permits",
                "tenant_reason": "Issue permits to clients",
                "contact_name": "Pat",
                "contact_email": "pat@example.com",
                "contact_phone": "555-0100"
            }"#,
        )
        .unwrap();
        let reservation = body.validate().unwrap();
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["tenant_name"], "permits");
        assert_eq!(json["contact_phone"], "555-0100");
    }
}
