pub mod builders;

#[allow(unused_imports)]
pub use builders::{fixed_now, record, MessageBuilder};
