pub mod order;
pub mod plant;
pub mod report;
pub mod user;

pub use self::order::{Order, OrderUserInfo};
pub use self::plant::{Plant, PlantSeller};
pub use self::report::{DeleteReport, InsertReport, UpdateReport};
pub use self::user::{Role, User};
