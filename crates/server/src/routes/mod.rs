pub mod beans;
pub mod brews;
pub mod calculator;
pub mod feedback;
pub mod grinders;
pub mod health;
pub mod methods;
pub mod metrics;
pub mod recommendations;
