use std::fmt;

/// How many leads a prospecting request should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadCount {
    Three,
    Five,
    Ten,
}

impl LeadCount {
    pub const ALL: [LeadCount; 3] = [LeadCount::Three, LeadCount::Five, LeadCount::Ten];

    pub fn value(self) -> u32 {
        match self {
            LeadCount::Three => 3,
            LeadCount::Five => 5,
            LeadCount::Ten => 10,
        }
    }

}

impl Default for LeadCount {
    fn default() -> Self {
        LeadCount::Five
    }
}

impl fmt::Display for LeadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Validated parameters for a prospecting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub business_type: String,
    pub location: String,
    pub count: LeadCount,
}

impl SearchParams {
    /// Build from raw form input. Fails when either text field is blank.
    pub fn new(
        business_type: &str,
        location: &str,
        count: LeadCount,
    ) -> Result<Self, ParamsError> {
        let business_type = business_type.trim();
        let location = location.trim();
        if business_type.is_empty() {
            return Err(ParamsError::MissingBusinessType);
        }
        if location.is_empty() {
            return Err(ParamsError::MissingLocation);
        }
        Ok(Self {
            business_type: business_type.to_string(),
            location: location.to_string(),
            count,
        })
    }
}

/// Validated parameters for a route-optimization request.
///
/// Invariant: at least two non-empty addresses after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    addresses: Vec<String>,
}

impl RouteParams {
    /// Normalize raw form rows into a submittable address list.
    ///
    /// Blank rows are dropped. When `reference_city` is non-empty it is
    /// appended as `"{addr} - {city}"` to every address that does not already
    /// contain it case-insensitively. This is a string convenience for the
    /// remote geocoder, not a geocoding step.
    pub fn from_rows(rows: &[String], reference_city: &str) -> Result<Self, ParamsError> {
        let city = reference_city.trim();
        let city_lower = city.to_lowercase();

        let addresses: Vec<String> = rows
            .iter()
            .map(|row| row.trim())
            .filter(|row| !row.is_empty())
            .map(|addr| {
                if !city.is_empty() && !addr.to_lowercase().contains(&city_lower) {
                    format!("{addr} - {city}")
                } else {
                    addr.to_string()
                }
            })
            .collect();

        if addresses.len() < 2 {
            return Err(ParamsError::NotEnoughAddresses {
                found: addresses.len(),
            });
        }

        Ok(Self { addresses })
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}

/// Local, synchronous validation failures. These never reach a gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    #[error("informe o tipo de estabelecimento")]
    MissingBusinessType,
    #[error("informe a localização alvo")]
    MissingLocation,
    #[error("são necessários pelo menos 2 endereços (encontrados: {found})")]
    NotEnoughAddresses { found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn search_params_reject_blank_fields() {
        assert_eq!(
            SearchParams::new("  ", "Bauru, SP", LeadCount::Five),
            Err(ParamsError::MissingBusinessType)
        );
        assert_eq!(
            SearchParams::new("Padarias", "", LeadCount::Five),
            Err(ParamsError::MissingLocation)
        );
    }

    #[test]
    fn search_params_trim_input() {
        let params = SearchParams::new(" Padarias ", " Bauru, SP ", LeadCount::Five).unwrap();
        assert_eq!(params.business_type, "Padarias");
        assert_eq!(params.location, "Bauru, SP");
        assert_eq!(params.count.value(), 5);
    }

    #[test]
    fn route_params_pass_through_without_reference_city() {
        let params = RouteParams::from_rows(&rows(&["A", "B"]), "").unwrap();
        assert_eq!(params.addresses(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn route_params_append_reference_city() {
        let params = RouteParams::from_rows(&rows(&["Rua X", "Rua Y"]), "Bauru").unwrap();
        assert_eq!(
            params.addresses(),
            &["Rua X - Bauru".to_string(), "Rua Y - Bauru".to_string()]
        );
    }

    #[test]
    fn reference_city_is_not_duplicated_case_insensitively() {
        let params =
            RouteParams::from_rows(&rows(&["Rua X, bauru", "Rua Y"]), "Bauru").unwrap();
        assert_eq!(
            params.addresses(),
            &["Rua X, bauru".to_string(), "Rua Y - Bauru".to_string()]
        );
    }

    #[test]
    fn blank_rows_are_dropped_before_the_minimum_check() {
        let err = RouteParams::from_rows(&rows(&["Rua X", "   ", ""]), "").unwrap_err();
        assert_eq!(err, ParamsError::NotEnoughAddresses { found: 1 });
    }

    #[test]
    fn two_effective_addresses_are_enough() {
        let params = RouteParams::from_rows(&rows(&["", "Rua X", "", "Rua Y"]), "").unwrap();
        assert_eq!(params.addresses().len(), 2);
    }
}
