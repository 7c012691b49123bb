use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares one categorical lead attribute. Variants keep their
/// declaration order, which is also the order the form offers them in;
/// the first variant is the default for a fresh lead.
macro_rules! lead_attribute {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const KIND: &'static str = $kind;

            pub const fn ordered() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ordered()[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = AttributeError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                Self::ordered()
                    .iter()
                    .copied()
                    .find(|value| value.label().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| AttributeError::Unknown {
                        kind: Self::KIND,
                        value: trimmed.to_string(),
                    })
            }
        }
    };
}

lead_attribute! {
    /// Role the lead plays in the sales channel.
    LeadType("lead type") {
        EndUser => "end-user",
        Distributor => "distributor",
        Installer => "installer",
        Consultant => "consultant",
    }
}

lead_attribute! {
    Country("country") {
        Belgium => "BE",
        Netherlands => "NL",
        UnitedKingdom => "UK",
        Ireland => "IE",
        France => "FR",
        Italy => "IT",
        Spain => "ES",
        Portugal => "PT",
        Germany => "DE",
        Denmark => "DK",
        Sweden => "SE",
        Finland => "FI",
        Norway => "NO",
        Poland => "PL",
        Turkey => "TR",
        SouthAfrica => "ZA",
        MiddleEast => "ME",
    }
}

lead_attribute! {
    /// Industry vertical of the site the lead is buying for.
    Industry("industry") {
        Hospitality => "hospitality",
        Datacenters => "datacenters",
        Factories => "factories",
        GasAndOil => "gas & oil",
        Healthcare => "healthcare",
        Education => "education",
        Retail => "retail",
        Transportation => "transportation",
        Manufacturing => "manufacturing",
        Energy => "energy",
        Government => "government",
        Banking => "banking",
        Insurance => "insurance",
        Telecommunications => "telecommunications",
        Construction => "construction",
        RealEstate => "real estate",
        FoodAndBeverage => "food & beverage",
        Pharmaceutical => "pharmaceutical",
        Mining => "mining",
        Utilities => "utilities",
        Logistics => "logistics",
        Media => "media",
        Sports => "sports",
        Entertainment => "entertainment",
        Other => "other",
    }
}

lead_attribute! {
    /// Detection or evacuation technology the lead asked about.
    Technology("technology") {
        Addressable => "addressable",
        Conventional => "conventional",
        Wireless => "wireless",
        AspiratingSmokeDetection => "aspirating smoke detection",
        LinearHeatDetection => "linear heat detection",
        FlameDetection => "flame detection",
        Evacuation => "evacuation",
    }
}

/// A single lead as captured by the intake form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead_type: LeadType,
    pub country: Country,
    pub industry: Industry,
    pub technology: Technology,
}

impl LeadRecord {
    pub fn new(
        lead_type: LeadType,
        country: Country,
        industry: Industry,
        technology: Technology,
    ) -> Self {
        Self {
            lead_type,
            country,
            industry,
            technology,
        }
    }

    /// Overwrites every attribute present in `patch`.
    pub fn apply(&mut self, patch: LeadPatch) {
        if let Some(lead_type) = patch.lead_type {
            self.lead_type = lead_type;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }
        if let Some(industry) = patch.industry {
            self.industry = industry;
        }
        if let Some(technology) = patch.technology {
            self.technology = technology;
        }
    }

    /// Looks up the category this lead falls into along `dimension`.
    pub fn category(&self, dimension: Dimension) -> Category {
        match dimension {
            Dimension::Technology => Category::Technology(self.technology),
            Dimension::Industry => Category::Industry(self.industry),
            Dimension::Country => Category::Country(self.country),
        }
    }
}

/// Parses `lead_type,country,industry,technology`, e.g.
/// `distributor,DE,datacenters,addressable`.
impl FromStr for LeadRecord {
    type Err = AttributeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = raw.split(',').collect();
        let [lead_type, country, industry, technology] = fields.as_slice() else {
            return Err(AttributeError::FieldCount(fields.len()));
        };

        Ok(Self {
            lead_type: lead_type.parse()?,
            country: country.parse()?,
            industry: industry.parse()?,
            technology: technology.parse()?,
        })
    }
}

/// Partial update for a stored lead; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_type: Option<LeadType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<Technology>,
}

impl From<LeadRecord> for LeadPatch {
    fn from(record: LeadRecord) -> Self {
        Self {
            lead_type: Some(record.lead_type),
            country: Some(record.country),
            industry: Some(record.industry),
            technology: Some(record.technology),
        }
    }
}

/// Attributes estimates can be grouped by for the breakdown charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Technology,
    Industry,
    Country,
}

impl Dimension {
    pub const fn ordered() -> [Self; 3] {
        [Self::Technology, Self::Industry, Self::Country]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology Interest",
            Self::Industry => "Industry",
            Self::Country => "Country",
        }
    }
}

/// One value along a [`Dimension`]. Ordering follows the attribute's
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Category {
    Technology(Technology),
    Industry(Industry),
    Country(Country),
}

impl Category {
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Technology(_) => Dimension::Technology,
            Self::Industry(_) => Dimension::Industry,
            Self::Country(_) => Dimension::Country,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology(value) => value.label(),
            Self::Industry(value) => value.label(),
            Self::Country(value) => value.label(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
    #[error("expected lead_type,country,industry,technology but found {0} field(s)")]
    FieldCount(usize),
}
