pub mod src {
    pub mod diagnostic;
    pub mod diagnostic_kind;
    pub mod sink;
}

pub use src::diagnostic::*;
pub use src::diagnostic_kind::*;
pub use src::sink::*;
