pub mod axon;

pub mod prelude {
    pub use crate::axon::Axon;
}

pub use axon::Axon;
