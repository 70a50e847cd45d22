//! Row types mapped from database tables.

pub mod notification;
