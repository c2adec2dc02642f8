//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod gift;

pub use gift::{
    ActiveModel as GiftActiveModel, Column as GiftColumn, Entity as Gift, GiftStatus,
    Model as GiftModel, PushType,
};
