mod category;
mod dietary;
mod severity;

pub use category::CategoryRevision;
pub use dietary::DietaryRevision;
pub use severity::SeverityRevision;

use crate::domain::classification::{contract::ContractRevision, entities::ContractVersion};

pub fn revision_for(version: ContractVersion) -> Box<dyn ContractRevision> {
    match version {
        ContractVersion::DietaryV1 => Box::new(DietaryRevision),
        ContractVersion::CategoryV2 => Box::new(CategoryRevision),
        ContractVersion::SeverityV3 => Box::new(SeverityRevision),
    }
}
