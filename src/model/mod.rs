pub mod building;
pub mod company;
pub mod invoice;

pub use building::{Building, Floor};
pub use company::Company;
pub use invoice::{Bill, Invoice};
