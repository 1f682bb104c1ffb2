//! Metro journey planner server.
//!
//! Finds the shortest route between two stations of a metro line,
//! prices it by distance, and records ticket bookings.

pub mod bookings;
pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
