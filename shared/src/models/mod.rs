//! Domain models for the Candango ERP system

mod catalog;
mod company;
mod costs;
mod expense;
mod partners;
mod sales;
mod stock;

pub use catalog::*;
pub use company::*;
pub use costs::*;
pub use expense::*;
pub use partners::*;
pub use sales::*;
pub use stock::*;
