//! Segmented-streaming capability view: variant choice and part handling.

use std::sync::Arc;

use crate::options::{ObjectValue, OptionKey};
use crate::task::adapter::{self, PartUrlConverter};
use crate::task::descriptor::DownloadTask;
use crate::task::BuildError;

/// Borrowed view over one task exposing its segmented-streaming options.
/// Obtaining it does not clone the task or change the protocol fixed at
/// construction; it only broadens what can be configured.
#[derive(Debug)]
pub struct StreamOptions<'a> {
    task: &'a mut DownloadTask,
}

impl<'a> StreamOptions<'a> {
    pub(crate) fn new(task: &'a mut DownloadTask) -> Self {
        Self { task }
    }

    /// Pick the stream variant closest to `bits_per_sec`. 0 (the default)
    /// lets the engine take the first variant the manifest offers.
    pub fn bandwidth(self, bits_per_sec: u64) -> Result<Self, BuildError> {
        self.task
            .options_mut()
            .set_value(OptionKey::StreamBandwidth, bits_per_sec)?;
        Ok(self)
    }

    /// Keep going when individual parts fail permanently instead of failing
    /// the whole task.
    pub fn ignore_failed_parts(self, ignore: bool) -> Result<Self, BuildError> {
        self.task
            .options_mut()
            .set_value(OptionKey::IgnoreFailedParts, ignore)?;
        Ok(self)
    }

    /// Register a converter that rewrites each part URL relative to the
    /// manifest URL, for servers whose manifests carry unusable part paths.
    /// Must be a named type; see [`PartUrlConverter`].
    pub fn part_url_converter<C>(self, converter: C) -> Result<Self, BuildError>
    where
        C: PartUrlConverter + 'static,
    {
        let type_name = adapter::ensure_named_type::<C>()?;
        self.task.options_mut().set_object(
            OptionKey::PartUrlConverter,
            ObjectValue::PartConverter {
                converter: Arc::new(converter),
                type_name,
            },
        )?;
        tracing::debug!(converter = type_name, "registered part URL converter");
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskBuilder;

    struct CdnRewrite;

    impl PartUrlConverter for CdnRewrite {
        fn convert(&self, manifest_url: &str, part_path: &str) -> String {
            let base = manifest_url.rsplit_once('/').map(|(b, _)| b).unwrap_or("");
            format!("{base}/{}", part_path.trim_start_matches('/'))
        }
    }

    #[test]
    fn variant_options_land_in_the_registry() {
        let mut b = TaskBuilder::hls("https://example.com/v/master.m3u8").unwrap();
        b.stream_options()
            .bandwidth(800_000)
            .unwrap()
            .ignore_failed_parts(true)
            .unwrap();

        let task = b.finish();
        assert_eq!(task.options().int_opt(OptionKey::StreamBandwidth), 800_000);
        assert!(task.options().bool_opt(OptionKey::IgnoreFailedParts));
    }

    #[test]
    fn named_converter_accepted_and_usable() {
        let mut b = TaskBuilder::hls("https://example.com/v/master.m3u8").unwrap();
        b.stream_options().part_url_converter(CdnRewrite).unwrap();

        let task = b.finish();
        let converter = task.options().part_url_converter().unwrap();
        assert_eq!(
            converter.convert("https://example.com/v/master.m3u8", "/seg/0001.ts"),
            "https://example.com/v/seg/0001.ts"
        );
        assert!(task
            .options()
            .part_url_converter_type()
            .unwrap()
            .ends_with("CdnRewrite"));
    }

    #[test]
    fn closure_converter_rejected() {
        let mut b = TaskBuilder::hls("https://example.com/v/master.m3u8").unwrap();
        let err = b
            .stream_options()
            .part_url_converter(|_m: &str, p: &str| p.to_string())
            .unwrap_err();
        assert!(matches!(err, BuildError::UnsafeAdapter(_)));
        assert!(b.task().options().part_url_converter().is_none());
    }
}
