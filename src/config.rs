/// Settings a [`Statement`](crate::Statement) applies to every value it binds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinderConfig {
    /// Longest string, in bytes, passed to the driver. `None` passes strings through
    /// untouched and leaves fitting the column to the caller.
    pub string_limit: Option<usize>,
}

impl BinderConfig {
    pub fn with_string_limit(mut self, limit: usize) -> Self {
        self.string_limit = Some(limit);
        self
    }

    /// Cuts `value` down to the configured limit without splitting a character.
    pub(crate) fn fit_string<'s>(&self, value: &'s str) -> &'s str {
        match self.string_limit {
            Some(limit) if value.len() > limit => {
                let mut end = limit;
                while !value.is_char_boundary(end) {
                    end -= 1;
                }
                &value[..end]
            }
            _ => value,
        }
    }
}
