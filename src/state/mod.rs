/// State management module
///
/// This module handles all application state, including:
/// - Image payload structs shared across layers (data.rs)
/// - The generation lifecycle state machine (session.rs)

pub mod data;
pub mod session;
