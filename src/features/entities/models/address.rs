use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub road: String,
    pub number: String,
    pub city: String,
    /// Two-letter province code
    pub province: String,
    pub lon: f64,
    pub lat: f64,
    pub entity_id: i64,
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {} {} ({})",
            self.road, self.number, self.city, self.province
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let address = Address {
            id: 1,
            road: "Via Roma".to_string(),
            number: "12".to_string(),
            city: "Rovereto".to_string(),
            province: "TN".to_string(),
            lon: 11.04,
            lat: 45.89,
            entity_id: 1,
        };
        assert_eq!(address.to_string(), "Via Roma, 12 Rovereto (TN)");
    }
}
