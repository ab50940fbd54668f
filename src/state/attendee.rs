//! Attendee value objects

/// Age range offered instead of an exact age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    UpToFive,
    FiveToTen,
    OverTen,
}

impl AgeBracket {
    /// All brackets in selector order
    pub const ALL: [AgeBracket; 3] = [
        AgeBracket::UpToFive,
        AgeBracket::FiveToTen,
        AgeBracket::OverTen,
    ];

    /// Value sent to the form endpoint
    pub fn wire_value(self) -> &'static str {
        match self {
            AgeBracket::UpToFive => "0 a 5 anos",
            AgeBracket::FiveToTen => "5 a 10 anos",
            AgeBracket::OverTen => "> 10 anos",
        }
    }

    /// Label shown in the selector
    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::UpToFive => "0 a 5 anos",
            AgeBracket::FiveToTen => "5 a 10 anos",
            AgeBracket::OverTen => "maior que 10 anos",
        }
    }

    /// Parse a selector value. Accepts the wire value or the display label;
    /// anything else (including blank input) means "unset".
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.wire_value() == value || b.label() == value)
    }

    /// Step forward through the selector: unset -> 0-5 -> 5-10 -> >10 -> unset
    pub fn cycle_next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(AgeBracket::UpToFive),
            Some(AgeBracket::UpToFive) => Some(AgeBracket::FiveToTen),
            Some(AgeBracket::FiveToTen) => Some(AgeBracket::OverTen),
            Some(AgeBracket::OverTen) => None,
        }
    }

    /// Step backward through the selector
    pub fn cycle_prev(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(AgeBracket::OverTen),
            Some(AgeBracket::OverTen) => Some(AgeBracket::FiveToTen),
            Some(AgeBracket::FiveToTen) => Some(AgeBracket::UpToFive),
            Some(AgeBracket::UpToFive) => None,
        }
    }
}

/// Editable field of an attendee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeField {
    Name,
    AgeBracket,
}

/// The primary invitee or one of their companions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attendee {
    pub name: String,
    pub age_bracket: Option<AgeBracket>,
}

impl Attendee {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, age_bracket: Option<AgeBracket>) -> Self {
        Self {
            name: name.into(),
            age_bracket,
        }
    }

    /// Set a field from raw input. Names are stored verbatim.
    pub fn set(&mut self, field: AttendeeField, value: &str) {
        match field {
            AttendeeField::Name => self.name = value.to_string(),
            AttendeeField::AgeBracket => self.age_bracket = AgeBracket::parse(value),
        }
    }

    /// Wire value of the age bracket, empty when unset
    pub fn age_wire_value(&self) -> &'static str {
        self.age_bracket.map(AgeBracket::wire_value).unwrap_or("")
    }
}
