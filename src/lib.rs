//! Household electricity analytics and recommendation service.

pub mod aggregate;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod recommend;
pub mod series;
pub mod tariff;
