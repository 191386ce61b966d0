mod common;
pub use self::common::{Query, ALL_YEARS};

mod search;
pub use self::search::SearchQuery;

mod bill;
pub use self::bill::BillQuery;
