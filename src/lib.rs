//! # DTS Rust Backend
//!
//! Department-scoped academic timetabling service.
//!
//! This crate provides the backend for the Department Timetabling Service
//! (DTS): storage and listing of departments, faculty, classrooms and
//! timetables, projection of scheduled classes onto a fixed day x hour
//! display grid with conflict highlighting, and asynchronous tracking of
//! timetable-generation jobs delegated to an external engine. The backend
//! exposes a REST API via Axum for the web frontend.
//!
//! ## Features
//!
//! - **Grid Projection**: Map scheduled classes onto a 6-day x 10-hour grid
//! - **Conflict Reporting**: Detect and highlight overlapping bookings
//! - **Generation Jobs**: Submit/poll lifecycle against an external engine
//! - **Auth**: Session tokens, roles, and a single capability check
//! - **Messaging**: Relay messages to the Principal role (Telegram boundary)
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and DTO re-exports for API responses
//! - [`models`]: Domain types (clock times, time slots, scheduled classes)
//! - [`db`]: Repository pattern and in-memory persistence layer
//! - [`services`]: Grid projector, conflict detection, job tracking,
//!   generation-engine and notifier boundaries
//! - [`auth`]: Sessions, roles, and capability checks
//! - [`routes`]: Route-specific data types
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod auth;
pub mod config;
pub mod db;
pub mod models;

pub mod routes;

pub mod services;

pub mod http;
