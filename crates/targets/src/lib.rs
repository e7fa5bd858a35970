mod catalog;
mod group;
mod rule;

pub use self::{catalog::*, group::*, rule::*};
