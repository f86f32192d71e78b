//! 惰性、可链式操作的流水线：为任何可迭代的值提供类似数组的`map`、`filter`、`flat`、
//! `reduce`、`dedupe`、查找以及汇聚为集合的操作，且不会预先物化源中的数据。
//!
//! ```
//! use lazy_pipe::{Pipe, list};
//!
//! let mut pipe = Pipe::try_from(list![1, list![2, list![3]], 4])?
//!     .flat(1)
//!     .filter(|item, _| item.is_truthy())
//!     .map(|item, index| format!("{index}:{item}"));
//! assert_eq!(vec!["0:1", "1:2", "2:3", "3:4"], pipe.sink_vec());
//! # Ok::<(), lazy_pipe::PipeErr>(())
//! ```

#[macro_use]
mod print;

mod config;
mod err;
mod item;
mod op;
mod pipe;
mod sink;
mod terminal;

pub use config::Config;
pub use err::PipeErr;
pub use item::{Item, ItemMap, ItemSet, Record};
pub use op::DEFAULT_FLAT_DEPTH;
pub use op::flat::Nested;
pub use pipe::Pipe;
pub use sink::IntoEntry;
pub use terminal::Defined;

/// 整数类型
pub type Integer = i64;

/// 浮点数类型
pub type Float = f64;

pub type PipeRes<T> = Result<T, PipeErr>;
