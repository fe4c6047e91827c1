pub mod initialize;
pub mod deposit;
pub mod set_arbiter;
pub mod update_conditions;
pub mod release;
pub mod cancel;
pub mod close;

pub use initialize::*;
pub use deposit::*;
pub use set_arbiter::*;
pub use update_conditions::*;
pub use release::*;
pub use cancel::*;
pub use close::*;
