//! Plain-HTTP capability view: request headers, parameters, method.

use crate::options::OptionKey;
use crate::task::descriptor::DownloadTask;
use crate::task::BuildError;

/// Borrowed view over one task exposing its plain-HTTP options. Writes go
/// straight into the task's option store; per-name last write wins.
#[derive(Debug)]
pub struct HttpOptions<'a> {
    task: &'a mut DownloadTask,
}

impl<'a> HttpOptions<'a> {
    pub(crate) fn new(task: &'a mut DownloadTask) -> Self {
        Self { task }
    }

    /// Set one request header. Names are kept as given; an empty name is
    /// refused.
    pub fn header(self, name: &str, value: &str) -> Result<Self, BuildError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BuildError::InvalidArgument(
                "header name must not be empty".to_string(),
            ));
        }
        self.task
            .options_mut()
            .string_map_mut(OptionKey::RequestHeaders)
            .insert(name.to_string(), value.trim().to_string());
        Ok(self)
    }

    /// Set several headers at once; equivalent to repeated `header` calls.
    pub fn headers<I, K, V>(mut self, pairs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in pairs {
            self = self.header(name.as_ref(), value.as_ref())?;
        }
        Ok(self)
    }

    /// Set one request parameter, sent with the request the way the engine
    /// sees fit for the chosen method.
    pub fn param(self, name: &str, value: &str) -> Result<Self, BuildError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BuildError::InvalidArgument(
                "parameter name must not be empty".to_string(),
            ));
        }
        self.task
            .options_mut()
            .string_map_mut(OptionKey::RequestParams)
            .insert(name.to_string(), value.trim().to_string());
        Ok(self)
    }

    /// Request method, stored uppercased. Defaults to GET when never set.
    pub fn method(self, method: &str) -> Result<Self, BuildError> {
        let method = method.trim();
        if method.is_empty() {
            return Err(BuildError::InvalidArgument(
                "request method must not be empty".to_string(),
            ));
        }
        self.task
            .options_mut()
            .set_value(OptionKey::RequestMethod, method.to_ascii_uppercase())?;
        Ok(self)
    }

    /// Whether the engine follows redirects for this task. Defaults to true.
    pub fn follow_redirects(self, follow: bool) -> Result<Self, BuildError> {
        self.task
            .options_mut()
            .set_value(OptionKey::FollowRedirects, follow)?;
        Ok(self)
    }
}
