pub mod catalog;
pub mod chart;
pub mod constants;
pub mod earth_orientation;
pub mod ephemeris;
mod kepler;
pub mod observers;
pub mod projection;
pub mod ref_system;
pub mod skychart;
pub mod skychart_errors;
pub mod time;
