//! Keeps the short and long text forms, their validity flags and the
//! encoding mode consistent while either field is edited.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use anyhow::anyhow;
use shared::{
    domain::{ConverterSnapshot, Field, MessageKind, StatePatch},
    error::{CodecError, ConverterError, ErrorKind},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    normalize::{is_in_alphabet, is_uuid_shaped, normalize_uuid},
    scheduler::{HideScheduler, NeverHide, ScheduledHide},
    Clipboard, Encoder, MemoryPreferences, PreferenceStore, Presenter, LEGACY_PREFERENCE_KEY,
};

pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(2);

const INVALID_SHORT_CHARACTERS: &str = "Invalid ShortUUID format - contains invalid characters";
const INVALID_LONG_SHAPE: &str = "Must be 32 hexadecimal characters (with or without dashes)";
const LEGACY_NOTICE: &str =
    "Legacy mode enabled. This will decode/encode UUIDs using the format from versions < 1.0.0.";
const CLEARED_NOTICE: &str = "All fields cleared";

/// Marks the presenter busy until dropped.
struct BusyGuard {
    presenter: Arc<dyn Presenter>,
}

impl BusyGuard {
    fn engage(presenter: &Arc<dyn Presenter>) -> Self {
        presenter.set_busy(true);
        Self {
            presenter: Arc::clone(presenter),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.presenter.set_busy(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Messages {
    Clear,
    Keep,
}

#[derive(Default)]
pub struct ConverterBuilder {
    encoder: Option<Arc<dyn Encoder>>,
    presenter: Option<Arc<dyn Presenter>>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    scheduler: Option<Arc<dyn HideScheduler>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    hide_delay: Option<Duration>,
    legacy: bool,
    short_form: String,
    long_form: String,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Runs the auto-hide of info messages. Without one the controller uses
    /// [`NeverHide`], so info messages stay until the next state change;
    /// pass a [`crate::TokioHideScheduler`] to get the timed hide.
    pub fn scheduler(mut self, scheduler: Arc<dyn HideScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = Some(delay);
        self
    }

    /// Mode used when the preference store holds no value.
    pub fn legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn seed_short(mut self, text: impl Into<String>) -> Self {
        self.short_form = text.into();
        self
    }

    pub fn seed_long(mut self, text: impl Into<String>) -> Self {
        self.long_form = text.into();
        self
    }

    pub fn build(self) -> Result<ConverterController, ConverterError> {
        let Self {
            encoder,
            presenter,
            preferences,
            scheduler,
            clipboard,
            hide_delay,
            legacy,
            short_form,
            long_form,
        } = self;

        let encoder = encoder.ok_or(ConverterError::EncoderUnavailable)?;
        let presenter = presenter.ok_or(ConverterError::PresenterUnavailable)?;
        let preferences = preferences
            .unwrap_or_else(|| Arc::new(MemoryPreferences::default()) as Arc<dyn PreferenceStore>);
        let scheduler =
            scheduler.unwrap_or_else(|| Arc::new(NeverHide) as Arc<dyn HideScheduler>);

        let legacy = match preferences.load_bool(LEGACY_PREFERENCE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => legacy,
            Err(err) => {
                warn!(error = %err, "could not load legacy preference; using default");
                legacy
            }
        };

        let mut controller = ConverterController {
            encoder,
            presenter,
            preferences,
            scheduler,
            clipboard,
            hide_delay: hide_delay.unwrap_or(DEFAULT_HIDE_DELAY),
            short_form: String::new(),
            long_form: String::new(),
            legacy,
            short_invalid: false,
            long_invalid: false,
            pending_hide: None,
            banner: Arc::new(Mutex::new(0)),
            last_error: None,
        };

        if !short_form.is_empty() {
            controller.on_short_form_changed(&short_form);
        } else if !long_form.is_empty() {
            controller.on_long_form_changed(&long_form);
        } else {
            controller.generate_long_form();
        }

        Ok(controller)
    }
}

pub struct ConverterController {
    encoder: Arc<dyn Encoder>,
    presenter: Arc<dyn Presenter>,
    preferences: Arc<dyn PreferenceStore>,
    scheduler: Arc<dyn HideScheduler>,
    clipboard: Option<Arc<dyn Clipboard>>,
    hide_delay: Duration,
    short_form: String,
    long_form: String,
    legacy: bool,
    short_invalid: bool,
    long_invalid: bool,
    pending_hide: Option<ScheduledHide>,
    /// Generation of the banner on screen. Bumped and acted on under the lock
    /// so a hide task that already woke up cannot remove a newer banner.
    banner: Arc<Mutex<u64>>,
    last_error: Option<ConverterError>,
}

impl ConverterController {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn short_form(&self) -> &str {
        &self.short_form
    }

    pub fn long_form(&self) -> &str {
        &self.long_form
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Short => &self.short_form,
            Field::Long => &self.long_form,
        }
    }

    pub fn legacy(&self) -> bool {
        self.legacy
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        match field {
            Field::Short => self.short_invalid,
            Field::Long => self.long_invalid,
        }
    }

    /// The error currently on the banner, if any.
    pub fn last_error(&self) -> Option<&ConverterError> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> ConverterSnapshot {
        ConverterSnapshot {
            short_form: self.short_form.clone(),
            long_form: self.long_form.clone(),
            legacy: self.legacy,
            is_valid: !self.short_invalid && !self.long_invalid,
        }
    }

    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(short_form) = patch.short_form {
            self.on_short_form_changed(&short_form);
        }
        if let Some(long_form) = patch.long_form {
            self.on_long_form_changed(&long_form);
        }
        if let Some(legacy) = patch.legacy {
            self.on_mode_changed(legacy);
        }
    }

    /// An emptied field is a request for a fresh value, never an error.
    pub fn on_short_form_changed(&mut self, text: &str) {
        if text.is_empty() {
            self.generate_long_form();
            return;
        }
        self.convert_short(text, Messages::Clear);
    }

    pub fn on_long_form_changed(&mut self, text: &str) {
        if text.is_empty() {
            self.generate_short_form();
            return;
        }
        self.convert_long(text, Messages::Clear);
    }

    pub fn on_mode_changed(&mut self, legacy: bool) {
        self.legacy = legacy;
        if let Err(err) = self.preferences.save_bool(LEGACY_PREFERENCE_KEY, legacy) {
            warn!(error = %err, "could not persist legacy preference");
        }
        info!(legacy, "encoding mode changed");

        self.hide_messages();
        if legacy {
            self.show_message(MessageKind::Info, LEGACY_NOTICE);
        }

        if !self.short_form.is_empty() && !self.short_invalid {
            let text = self.short_form.clone();
            self.convert_short(&text, Messages::Keep);
        } else if !self.long_form.is_empty() && !self.long_invalid {
            let text = self.long_form.clone();
            self.convert_long(&text, Messages::Keep);
        }
    }

    pub fn generate_long_form(&mut self) -> String {
        self.hide_messages();
        let uuid = Uuid::new_v4().hyphenated().to_string();
        self.clear_invalid_flags();
        self.convert_long(&uuid, Messages::Clear);
        uuid
    }

    pub fn generate_short_form(&mut self) -> String {
        self.hide_messages();
        let short_form = self.encoder.uuid();
        self.clear_invalid_flags();
        self.convert_short(&short_form, Messages::Clear);
        short_form
    }

    pub fn clear(&mut self) {
        self.set_text(Field::Short, "");
        self.set_text(Field::Long, "");
        self.clear_invalid_flags();
        self.hide_messages();
        info!("fields cleared");
        self.show_message(MessageKind::Info, CLEARED_NOTICE);
    }

    pub fn copy(&mut self, field: Field) {
        let text = self.text(field).to_string();
        if text.is_empty() {
            return;
        }

        let written = match &self.clipboard {
            Some(clipboard) => clipboard.write_text(&text),
            None => Err(anyhow!("no clipboard available")),
        };
        match written {
            Ok(()) => {
                let notice = format!("{} copied to clipboard", field.label());
                self.show_message(MessageKind::Info, &notice);
            }
            Err(err) => {
                warn!(error = %err, field = field.label(), "clipboard write failed");
                self.report(ConverterError::ClipboardFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    fn convert_short(&mut self, text: &str, messages: Messages) {
        self.set_text(Field::Short, text);
        self.set_invalid(Field::Short, false);
        if messages == Messages::Clear {
            self.hide_messages();
        }

        let _busy = BusyGuard::engage(&self.presenter);
        match self.decode(text) {
            Ok(long_form) => {
                debug!(legacy = self.legacy, "decoded short form");
                self.set_text(Field::Long, &long_form);
                self.set_invalid(Field::Long, false);
            }
            Err(err) => self.fail_conversion(Field::Short, err),
        }
    }

    fn convert_long(&mut self, text: &str, messages: Messages) {
        self.set_text(Field::Long, text);
        self.set_invalid(Field::Long, false);
        if messages == Messages::Clear {
            self.hide_messages();
        }

        let _busy = BusyGuard::engage(&self.presenter);
        match self.encode(text) {
            Ok((canonical, short_form)) => {
                debug!(legacy = self.legacy, "encoded long form");
                self.set_text(Field::Short, &short_form);
                if canonical != text {
                    self.set_text(Field::Long, &canonical);
                }
                self.set_invalid(Field::Short, false);
            }
            Err(err) => self.fail_conversion(Field::Long, err),
        }
    }

    fn decode(&self, text: &str) -> Result<String, ConverterError> {
        if !is_in_alphabet(text, self.encoder.alphabet()) {
            return Err(ConverterError::short_validation(INVALID_SHORT_CHARACTERS));
        }
        self.encoder
            .decode(text, self.legacy)
            .map_err(|err| match err {
                CodecError::Unavailable => ConverterError::EncoderUnavailable,
                other => ConverterError::ShortFormInvalid {
                    kind: ErrorKind::Conversion,
                    reason: other.to_string(),
                },
            })
    }

    /// Returns the canonical long form alongside its encoding.
    fn encode(&self, text: &str) -> Result<(String, String), ConverterError> {
        if !is_uuid_shaped(text) {
            return Err(ConverterError::long_validation(INVALID_LONG_SHAPE));
        }
        let canonical = normalize_uuid(text);
        let encoded = if self.legacy {
            self.encoder.legacy_encode(&canonical)
        } else {
            self.encoder.encode(&canonical)
        };
        let short_form = encoded.map_err(|err| match err {
            CodecError::Unavailable => ConverterError::EncoderUnavailable,
            other => ConverterError::LongFormInvalid {
                kind: ErrorKind::Conversion,
                reason: other.to_string(),
            },
        })?;
        Ok((canonical, short_form))
    }

    fn fail_conversion(&mut self, source: Field, err: ConverterError) {
        debug!(field = source.label(), error = %err, "conversion failed");
        // A missing encoder says nothing about the source text.
        if err != ConverterError::EncoderUnavailable {
            self.set_invalid(source, true);
        }
        let derived = source.other();
        self.set_text(derived, "");
        self.set_invalid(derived, false);
        self.report(err);
    }

    fn set_text(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Short => &mut self.short_form,
            Field::Long => &mut self.long_form,
        };
        text.clone_into(slot);
        self.presenter.set_field_text(field, text);
    }

    fn set_invalid(&mut self, field: Field, invalid: bool) {
        match field {
            Field::Short => self.short_invalid = invalid,
            Field::Long => self.long_invalid = invalid,
        }
        self.presenter.set_field_invalid(field, invalid);
    }

    fn clear_invalid_flags(&mut self) {
        self.set_invalid(Field::Short, false);
        self.set_invalid(Field::Long, false);
    }

    fn report(&mut self, err: ConverterError) {
        self.show_message(MessageKind::Error, &err.to_string());
        self.last_error = Some(err);
    }

    /// Replaces the banner. Info banners hide themselves after the delay;
    /// any pending hide from an older banner is cancelled first.
    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.cancel_pending_hide();
        self.last_error = None;
        let generation = {
            let mut banner = lock_banner(&self.banner);
            *banner = banner.wrapping_add(1);
            self.presenter.show_message(kind, text);
            *banner
        };

        if kind == MessageKind::Info {
            let presenter = Arc::clone(&self.presenter);
            let banner = Arc::clone(&self.banner);
            let pending = self.scheduler.schedule(
                self.hide_delay,
                Box::new(move || {
                    let current = lock_banner(&banner);
                    if *current == generation {
                        presenter.hide_messages();
                    }
                }),
            );
            self.pending_hide = Some(pending);
        }
    }

    fn hide_messages(&mut self) {
        self.cancel_pending_hide();
        self.last_error = None;
        let mut banner = lock_banner(&self.banner);
        *banner = banner.wrapping_add(1);
        self.presenter.hide_messages();
    }

    fn cancel_pending_hide(&mut self) {
        if let Some(pending) = self.pending_hide.take() {
            pending.cancel();
        }
    }
}

fn lock_banner(banner: &Mutex<u64>) -> MutexGuard<'_, u64> {
    banner.lock().unwrap_or_else(PoisonError::into_inner)
}
