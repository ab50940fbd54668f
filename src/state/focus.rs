//! Keyboard focus within the edit view

/// Focusable element of the edit view, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormFocus {
    #[default]
    PrimaryName,
    PrimaryAge,
    CompanionName(usize),
    CompanionAge(usize),
    AddCompanion,
    Message,
    Submit,
}

impl FormFocus {
    /// Tab order for a form with `companions` companions
    pub fn order(companions: usize) -> Vec<FormFocus> {
        let mut order = vec![FormFocus::PrimaryName, FormFocus::PrimaryAge];
        for i in 0..companions {
            order.push(FormFocus::CompanionName(i));
            order.push(FormFocus::CompanionAge(i));
        }
        order.extend([FormFocus::AddCompanion, FormFocus::Message, FormFocus::Submit]);
        order
    }

    /// Next element, wrapping around
    pub fn next(self, companions: usize) -> Self {
        let order = Self::order(companions);
        match order.iter().position(|f| *f == self) {
            Some(i) => order[(i + 1) % order.len()],
            None => FormFocus::PrimaryName,
        }
    }

    /// Previous element, wrapping around
    pub fn prev(self, companions: usize) -> Self {
        let order = Self::order(companions);
        match order.iter().position(|f| *f == self) {
            Some(0) => order[order.len() - 1],
            Some(i) => order[i - 1],
            None => FormFocus::PrimaryName,
        }
    }

    pub fn is_age_selector(self) -> bool {
        matches!(self, FormFocus::PrimaryAge | FormFocus::CompanionAge(_))
    }
}
