/// Gemini generation API module
///
/// This module handles:
/// - Building generateContent requests carrying the selfie and instruction
/// - Extracting the first inline image payload from the response
/// - Wrapping transport and service failures into one error taxonomy

pub mod client;

pub use client::{GenerationClient, GenerationError};
