mod all;
mod footer;
mod gate;
mod header;
mod log;
mod select_list;

use self::log::log;
use super::*;
use footer::footer;
use header::header;

pub use all::all as render;
