mod meta;
pub use self::meta::{Alert, BillResponse, SearchResponse, STATUS_OK};

mod search;
pub use self::search::{SearchCandidate, SearchResultShape, SearchResultSummary};

mod bill;
pub use self::bill::{BillDetail, Session, Sponsor};
