//! The bean contract.

use tally_core::Value;

/// A caller value whose populated fields act as equality filters.
///
/// `fields` must list every mapped column, including those currently
/// holding a zero value: the builder uses the full list to validate
/// column names and skips zero values when building conditions.
pub trait Bean {
    /// Table the bean maps to.
    fn table_name(&self) -> &str;

    /// Mapped columns with their current values, in declaration order.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Equality conditions contributed by non-zero fields.
    fn conditions(&self) -> Vec<(&'static str, Value)> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| !value.is_zero())
            .collect()
    }

    /// Check whether `column` is one of the mapped fields.
    fn has_column(&self, column: &str) -> bool {
        self.fields().iter().any(|(name, _)| *name == column)
    }
}
