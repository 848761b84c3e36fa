mod map_rows;

pub use map_rows::{AddressFeatureRow, PopupRow};
