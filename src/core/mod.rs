// Domain-layer modules and shared errors/models
pub mod service {
    pub use crate::service::*;
}

pub mod scoring {
    pub use crate::scoring::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
