//! Payload types shared by the service layer and the HTTP API.

pub mod charts;
pub mod dashboard;
pub mod landing;
