pub mod capability;
pub mod employee;
pub mod role;
pub mod shift;
pub mod template;

pub use capability::{Capability, CapabilitySet};
pub use employee::{Employee, EmployeeChanges};
pub use role::Role;
pub use shift::{Shift, ShiftInput, ShiftTiming};
pub use template::ShiftTemplate;
