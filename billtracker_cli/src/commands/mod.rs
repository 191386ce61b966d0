pub mod lookup;
pub mod normalize;
pub mod search;
pub mod session;
pub mod track;
