use crate::settings::{SettingStore, SettingValue, INPUT_FILES};

/// Process-level services the window and scene share.
///
/// Built once by the application and handed to the window at construction,
/// so nothing here lives in a global and tests can build their own.
#[derive(Debug, Default)]
pub struct HarnessContext {
    pub settings: SettingStore,
}

impl HarnessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with the `input_files` setting registered, optionally seeded.
    pub fn with_input_files(files: Vec<String>) -> Self {
        let mut ctx = Self::new();
        ctx.settings.register(INPUT_FILES, SettingValue::Paths(files));
        ctx
    }

    /// Current contents of `input_files`, empty when unregistered.
    pub fn input_files(&self) -> &[String] {
        self.settings
            .get(INPUT_FILES)
            .and_then(SettingValue::as_paths)
            .unwrap_or(&[])
    }
}
