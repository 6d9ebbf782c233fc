//! Salon Entitlements - Subscription rights for the salon POS platform
//!
//! This crate maps a salon owner's subscription tier to the features and
//! usage limits it grants, and answers "can this account do this" questions
//! for the point-of-sale and scheduling surfaces.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
