use crate::{
    config::BinderConfig,
    domain::c_binds::{is_success, SqlUSmallInt},
    errors::{InformixError, Result},
    handle::CliHandle,
    use_type::UseBinding,
};

/// How the use elements of a statement are addressed. Fixed by the first bind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingMethod {
    #[default]
    Unset,
    ByPosition,
    ByName,
}

/// A prepared statement as seen by its input parameters.
pub struct Statement<H> {
    handle: H,
    names: Vec<String>,
    use_binding_method: BindingMethod,
    config: BinderConfig,
}

impl<H> Statement<H> {
    pub fn new(handle: H) -> Self {
        Self::with_names(handle, Vec::new())
    }

    /// `names` lists the placeholder names in the order they appear in the query text.
    pub fn with_names(handle: H, names: Vec<String>) -> Self {
        Statement {
            handle,
            names,
            use_binding_method: BindingMethod::Unset,
            config: BinderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BinderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn binding_method(&self) -> BindingMethod {
        self.use_binding_method
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Fails if the statement is already committed to the other method.
    pub(crate) fn check_binding_method(&self, method: BindingMethod) -> Result<()> {
        match self.use_binding_method {
            BindingMethod::Unset => Ok(()),
            current if current == method => Ok(()),
            _ => Err(InformixError::BindingMethodConflict),
        }
    }

    pub(crate) fn set_binding_method(&mut self, method: BindingMethod) {
        self.use_binding_method = method;
    }

    /// 1-based position of the first placeholder called `name`. Names past the
    /// last addressable position (`u16::MAX`) never resolve.
    pub(crate) fn position_of(&self, name: &str) -> Option<SqlUSmallInt> {
        let index = self.names.iter().position(|n| n == name)?;
        SqlUSmallInt::try_from(index + 1).ok()
    }
}

impl<H: CliHandle> Statement<H> {
    /// Binds every use element for the next execution.
    ///
    /// The returned guard releases the scratch buffers of all `uses` when dropped, so
    /// it has to be kept alive until the statement has executed. Buffers are also
    /// released when binding fails part way.
    pub fn bind_uses<'u, 'a>(&self, uses: &'u mut [UseBinding<'a>]) -> Result<UseCycle<'u, 'a>> {
        let cycle = UseCycle { uses };
        for binding in cycle.uses.iter_mut() {
            let indicator = binding.indicator();
            binding.pre_use(self, Some(indicator))?;
        }
        Ok(cycle)
    }

    /// Binds `uses`, executes and releases the scratch buffers whatever the outcome.
    pub fn execute(&self, uses: &mut [UseBinding<'_>]) -> Result<()> {
        let cycle = self.bind_uses(uses)?;
        let status = self.handle.execute();
        cycle.finish();
        if is_success(status) {
            Ok(())
        } else {
            let error = InformixError::native(
                format!("Error while executing statement: {}", self.handle.diagnostic()),
                status,
            );
            log::error!("{}", error);
            Err(error)
        }
    }
}

/// One execution cycle of a set of use elements. Dropping it runs `post_use` on each.
pub struct UseCycle<'u, 'a> {
    uses: &'u mut [UseBinding<'a>],
}

impl UseCycle<'_, '_> {
    pub fn len(&self) -> usize {
        self.uses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }

    /// Ends the cycle now instead of at the end of scope.
    pub fn finish(self) {}
}

impl Drop for UseCycle<'_, '_> {
    fn drop(&mut self) {
        for binding in self.uses.iter_mut() {
            binding.post_use();
        }
    }
}
