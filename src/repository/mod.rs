pub mod car_repo;
pub mod errors;


pub use car_repo::CarRepository;
pub use errors::RepositoryError;
