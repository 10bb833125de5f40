//! Domain models
//!
//! Rendering of wallet rows and validation of request bodies live here;
//! nothing in this module touches the database or the network.

pub mod binary;
pub mod item;
pub mod kind;
pub mod reservation;
pub mod row;
pub mod summary;
pub mod table;
pub mod validation;

pub use item::Item;
pub use kind::ItemKind;
pub use reservation::{
    NewReservation, ReservationBody, ReservationConfirmation, ReservationConfirmationBody,
    ReservationStatus, ReservationStatusBody,
};
pub use row::{ColumnInfo, Row, TableData, Value, ValueKind};
pub use summary::{CategorySummary, KindSummary};
pub use table::TableName;
pub use validation::{FieldError, ValidationError, Validator};
