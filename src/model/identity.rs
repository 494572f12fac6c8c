//! Buyer identity as exposed at checkout.

/// A named company location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyLocation {
    pub name: Option<String>,
}

/// The B2B company a logged-in customer is purchasing for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchasingCompany {
    pub location: Option<CompanyLocation>,
    pub current_location: Option<CompanyLocation>,
}

/// Identity of a logged-in buyer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identity {
    pub customer_id: Option<String>,
    pub purchasing_company: Option<PurchasingCompany>,
}

impl Identity {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            purchasing_company: None,
        }
    }

    /// Attaches a purchasing company whose primary location is `name`.
    pub fn with_location(mut self, name: impl Into<String>) -> Self {
        self.purchasing_company = Some(PurchasingCompany {
            location: Some(CompanyLocation {
                name: Some(name.into()),
            }),
            current_location: None,
        });
        self
    }

    /// Location name of the affiliated company: the primary location, then the current one.
    pub fn location_name(&self) -> Option<&str> {
        let company = self.purchasing_company.as_ref()?;
        [company.location.as_ref(), company.current_location.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(|location| location.name.as_deref())
            .find(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_name_falls_back_to_current_location() {
        let identity = Identity {
            customer_id: Some("c1".into()),
            purchasing_company: Some(PurchasingCompany {
                location: Some(CompanyLocation { name: None }),
                current_location: Some(CompanyLocation {
                    name: Some("Location Admins".into()),
                }),
            }),
        };
        assert_eq!(identity.location_name(), Some("Location Admins"));
    }

    #[test]
    fn test_location_name_without_company() {
        assert_eq!(Identity::new("c1").location_name(), None);
    }
}
