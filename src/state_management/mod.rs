pub mod previous_values;
pub mod change_processor;

pub use previous_values::PreviousValues;
pub use change_processor::{ChangeProcessor, PassSummary};
