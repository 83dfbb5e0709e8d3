pub mod car;
pub mod request;

pub use car::{Car, CarList, TIMESTAMP_FORMAT};
pub use request::{CarPatch, NewCar};
