mod entity;
mod error;
mod executor;
mod listen;
mod notify;
mod ops;
mod record;
mod sql_writer;
mod util;
mod value;

pub use ::anyhow::Context;
pub use entity::*;
pub use error::*;
pub use executor::*;
pub use listen::*;
pub use notify::*;
pub use ops::*;
pub use record::*;
pub use sql_writer::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
