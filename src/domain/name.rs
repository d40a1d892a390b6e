//! Splitting a free-form sender name into profile fields.

/// First and last name derived from the single "Name" form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    /// Split on the first whitespace boundary.
    ///
    /// The remaining tokens are joined with single spaces to form the last
    /// name, which is empty when the name is a single word.
    ///
    /// ```
    /// use portfolio_contact::domain::PersonName;
    ///
    /// let name = PersonName::split("Ana  María Ruiz");
    /// assert_eq!(name.first, "Ana");
    /// assert_eq!(name.last, "María Ruiz");
    /// ```
    pub fn split(full_name: &str) -> Self {
        let mut parts = full_name.split_whitespace();
        let first = parts
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| full_name.to_string());
        let last = parts.collect::<Vec<_>>().join(" ");

        Self { first, last }
    }
}
