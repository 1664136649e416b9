//! dasos-web: Server-rendered academic analytics dashboard.
//! Provides:
//!   - Cookie session and route guard
//!   - Dashboard, subject list, subject analytics and catalog pages
//!   - Subject search endpoint for the search box

pub mod assemble;
pub mod charts;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;
pub mod views;
