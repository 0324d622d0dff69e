pub mod affordability;
pub mod loan;
pub mod region;
