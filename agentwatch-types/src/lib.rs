pub mod finding;
pub mod forecast;
pub mod tags;

pub use finding::{Finding, Location};
pub use forecast::{DayForecast, HourlySample, ScoredHour};
