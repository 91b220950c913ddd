pub mod signal;
pub mod shadow;
pub mod event_record;
pub mod transition;

pub use signal::*;
pub use shadow::*;
pub use event_record::*;
pub use transition::*;
