//! One module per subcommand.

mod check;
mod classify;
mod expand;
mod normalize;
mod variables;

pub use check::run_check;
pub use classify::run_classify;
pub use expand::run_expand;
pub use normalize::run_normalize;
pub use variables::run_variables;
